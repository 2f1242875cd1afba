//! Thread-based watchdog for abandoning stuck solver calls
//!
//! The solvers check their budget cooperatively, but only at search-node
//! boundaries; the watchdog is the harness-side backstop covering the gaps.
//! The work runs on a worker thread and the caller waits with a deadline.
//! On expiry the worker is abandoned, not killed: it keeps running detached
//! until its own budget check fires, while the harness proceeds and reports
//! a timeout.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Run `work` on a worker thread, waiting at most `limit` for the result.
/// `None` means the deadline passed and the worker was abandoned.
pub fn run_with_watchdog<T, F>(work: F, limit: Duration) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        // The receiver may be gone if the watchdog already gave up.
        let _ = sender.send(work());
    });

    receiver.recv_timeout(limit).ok()
}
