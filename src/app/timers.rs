use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Named timer slots; each holds at most one pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    LoadingFloor,
    NotificationReveal,
    NotificationExpire,
}

/// Cancellable one-shot timers that deliver an event back to the owner
///
/// Runs on tokio's clock, so tests can pause and advance virtual time.
pub struct Timers<E> {
    tx: mpsc::UnboundedSender<E>,
    slots: HashMap<TimerSlot, AbortHandle>,
}

impl<E: Send + 'static> Timers<E> {
    pub fn new(tx: mpsc::UnboundedSender<E>) -> Self {
        Self {
            tx,
            slots: HashMap::new(),
        }
    }

    /// Sends `event` after `delay`, replacing any timer pending in `slot`
    pub fn schedule(&mut self, slot: TimerSlot, delay: Duration, event: E) {
        self.cancel(slot);

        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(event).is_err() {
                tracing::debug!(?slot, "Timer fired after its owner stopped");
            }
        });

        self.slots.insert(slot, task.abort_handle());
    }

    pub fn cancel(&mut self, slot: TimerSlot) {
        if let Some(handle) = self.slots.remove(&slot) {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.slots.drain() {
            handle.abort();
        }
    }
}

impl<E> Drop for Timers<E> {
    fn drop(&mut self) {
        for (_, handle) in self.slots.drain() {
            handle.abort();
        }
    }
}
