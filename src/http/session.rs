//! Per-connection session state and its deadline timer.
//!
//! A connection owns one [`Session`]. The receive loop records each request and
//! arms a deadline whenever it starts waiting for the next one; a single
//! [`watchdog`] task per connection polls that deadline every tick and closes
//! the session once it has passed. Recording a request clears the deadline, so
//! a timer armed for an earlier wait can never fire after new traffic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

#[derive(Debug)]
pub struct Session {
    requests: AtomicU64,
    deadline: watch::Sender<Option<Instant>>,
    closed: watch::Sender<bool>,
}

impl Session {
    pub fn new() -> Arc<Self> {
        let (deadline, _) = watch::channel(None);
        let (closed, _) = watch::channel(false);

        Arc::new(Self {
            requests: AtomicU64::new(0),
            deadline,
            closed,
        })
    }

    /// Number of requests received so far.
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    /// Counts a freshly received request and disarms the pending deadline.
    ///
    /// Returns the request's 1-based id on this connection.
    pub fn record_request(&self) -> u64 {
        let id = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        self.deadline.send_replace(None);
        id
    }

    /// Closes the session unless a request arrives within `after`.
    pub fn arm(&self, after: Duration) {
        self.deadline.send_replace(Some(Instant::now() + after));
    }

    pub fn deadline(&self) -> Option<Instant> {
        *self.deadline.borrow()
    }

    /// Marks the session closed. Returns `true` only for the first call.
    pub fn close(&self) -> bool {
        !self.closed.send_replace(true)
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Resolves once [`close`](Self::close) has been called.
    pub async fn closed(&self) {
        let mut rx = self.closed.subscribe();
        let _ = rx.wait_for(|closed| *closed).await;
    }
}

/// Spawns the deadline timer for `session`.
///
/// The deadline is checked once per `tick`, so closure happens at `tick`
/// granularity after it has passed. The task ends when the session closes.
pub fn watchdog(session: Arc<Session>, tick: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = session.closed() => break,
            }

            let expired = session
                .deadline()
                .is_some_and(|deadline| Instant::now() >= deadline);

            if expired {
                tracing::debug!(requests = session.requests(), "Deadline passed, closing connection");
                session.close();
                break;
            }
        }
    })
}
