//! Interactive shutdown.
//!
//! SIGINT or SIGTERM asks for confirmation on the terminal before the server
//! stops. Any answer other than yes resumes serving.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

/// Resolves once a termination signal has been confirmed.
pub async fn confirmed() -> io::Result<()> {
    loop {
        termination_signal().await?;

        if confirm().await? {
            return Ok(());
        }

        info!("Shutdown cancelled, resuming");
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

async fn confirm() -> io::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"\nShut down the server? (y/N) ").await?;
    stdout.flush().await?;

    let mut answer = String::new();
    let read = BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;

    // No terminal to ask: treat end of input as consent.
    Ok(read == 0 || is_affirmative(&answer))
}

#[cfg(unix)]
async fn termination_signal() -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;

    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn termination_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}
