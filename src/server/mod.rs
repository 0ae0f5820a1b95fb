pub mod listener;
pub mod shutdown;

pub use listener::{BindError, Server};
