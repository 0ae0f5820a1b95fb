//! rawhttp - minimal HTTP/1.1 server on raw TCP
//!
//! Core library for the protocol engine, routing and connection lifecycle.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
pub mod service;
