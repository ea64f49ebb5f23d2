use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Tag carried by an elapsed timer so late deliveries can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Single-slot cancellable timer. Scheduling always replaces the pending trigger.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// Cancel any pending trigger and arm a new one that sends `make(generation)` on elapse.
    pub fn schedule<E, F>(&mut self, tx: UnboundedSender<E>, make: F) -> Generation
    where
        E: Send + 'static,
        F: FnOnce(Generation) -> E + Send + 'static,
    {
        self.cancel();
        self.generation += 1;
        let generation = Generation(self.generation);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the pipeline shut down.
            let _ = tx.send(make(generation));
        }));
        debug!("debounce armed (generation {})", self.generation);
        generation
    }

    /// True only for the most recently scheduled trigger that has not been cancelled.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.pending.is_some() && generation.0 == self.generation
    }

    /// Consume a delivered trigger. Returns false for stale or cancelled ones.
    pub fn fire(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) {
            debug!("ignoring stale debounce generation {}", generation.0);
            return false;
        }
        self.pending = None;
        true
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
