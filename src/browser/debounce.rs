use std::time::Duration;
use tokio::task::JoinHandle;

/// A cancellable delayed callback.
///
/// Every `schedule` aborts the pending timer and hands out a new ticket. A
/// timer that fired just before being replaced may still deliver its old
/// ticket, so receivers check it with [`Debouncer::fire`].
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    ticket: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ticket: 0,
            pending: None,
        }
    }

    /// Run `on_elapsed` with the new ticket once the delay passes without
    /// another call to `schedule` or `cancel`
    pub fn schedule<F>(&mut self, on_elapsed: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel();
        self.ticket += 1;

        let ticket = self.ticket;
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_elapsed(ticket);
        }));
        ticket
    }

    /// Drop the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Accept a delivered ticket. Returns false for tickets that were
    /// superseded or cancelled.
    pub fn fire(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || self.pending.is_none() {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
