#![forbid(unsafe_code)]

//! Interrupt handling
//!
//! SIGINT and SIGTERM only set a [`CancelToken`]. The pipeline checks the
//! token between stages, and the two calls that can block indefinitely
//! (reading stdin, waiting on `stat`) run on a helper thread while the caller
//! polls the token.
//!
//! Writes to stdout are not covered: a signal that arrives while a write is
//! blocked on a full pipe is only noticed once the write returns.

use crate::error::AppError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// How often a blocked stage looks at the token
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the run as cancelled
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns `Err(Interrupted)` once the token has been cancelled
    pub fn check(&self) -> Result<(), AppError> {
        if self.is_cancelled() {
            Err(AppError::Interrupted)
        } else {
            Ok(())
        }
    }

    /// Runs `job` on a helper thread, returning early if the token is cancelled
    ///
    /// On cancellation the helper thread is abandoned; it ends with the
    /// process.
    pub fn run<T, F>(&self, job: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        self.check()?;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver is gone if the run was cancelled
            let _ = tx.send(job());
        });

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(value) => return Ok(value),
                Err(RecvTimeoutError::Timeout) => self.check()?,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(AppError::io(
                        "background task",
                        std::io::Error::other("worker thread panicked"),
                    ));
                }
            }
        }
    }
}

/// Routes SIGINT and SIGTERM to `token`
pub fn install(token: &CancelToken) -> Result<(), ctrlc::Error> {
    let token = token.clone();
    ctrlc::set_handler(move || token.cancel())
}
