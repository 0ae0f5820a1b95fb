use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::http::connection::{Connection, SharedSettings};
use crate::router::Router;

/// Consecutive ports tried when the requested one is already in use.
pub const MAX_BIND_ATTEMPTS: u16 = 16;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("ports {first}..={last} are all in use")]
    Exhausted { first: u16, last: u16 },

    #[error("failed to bind {addr}: {source}")]
    Io {
        addr: String,
        #[source]
        source: io::Error,
    },
}

/// Binds `host:port`, moving on to the next port while the address is in use.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener, BindError> {
    let mut last = port;

    for offset in 0..MAX_BIND_ATTEMPTS {
        let Some(candidate) = port.checked_add(offset) else {
            break;
        };
        last = candidate;

        let addr = format!("{}:{}", host, candidate);
        match TcpListener::bind(&addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                warn!(port = candidate, "Address in use, trying next port");
            }
            Err(source) => return Err(BindError::Io { addr, source }),
        }
    }

    Err(BindError::Exhausted { first: port, last })
}

pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
    settings: SharedSettings,
}

impl Server {
    pub async fn bind(cfg: &Config, router: Router) -> Result<Self, BindError> {
        let listener = bind(&cfg.host, cfg.port).await?;

        Ok(Self {
            listener,
            router: Arc::new(router),
            settings: Arc::new(ArcSwap::from_pointee(cfg.settings.clone())),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle to the live settings; storing a new snapshot affects every
    /// subsequent request.
    pub fn settings(&self) -> SharedSettings {
        self.settings.clone()
    }

    /// Accepts connections forever, serving each on its own task.
    pub async fn run(self) -> anyhow::Result<()> {
        info!("Listening on {}", self.local_addr()?);

        loop {
            let (socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "Failed to accept connection");
                    continue;
                }
            };
            info!("Accepted connection from {}", peer);

            let router = self.router.clone();
            let settings = self.settings.clone();
            tokio::spawn(async move {
                let mut conn = Connection::new(socket, peer, router, settings);
                if let Err(e) = conn.run().await {
                    error!("Connection error from {}: {:#}", peer, e);
                }
            });
        }
    }
}
