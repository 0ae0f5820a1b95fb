use rawhttp::config::Config;
use rawhttp::server::{Server, shutdown};
use rawhttp::service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let server = Server::bind(&cfg, service::router()).await?;

    tokio::select! {
        res = server.run() => {
            res?;
        }

        res = shutdown::confirmed() => {
            res?;
            tracing::info!("Shutdown confirmed");
        }
    }

    Ok(())
}
