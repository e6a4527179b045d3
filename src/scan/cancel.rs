use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag for stopping a scan early.
///
/// Once cancelled, the directory walk stops and queued files that have not
/// started probing are dropped. Probes already running finish and are
/// reported normally.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
