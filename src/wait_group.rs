//! Completion barrier for fan-out work.
//!
//! Workers are registered with [`WaitGroup::add`] before they are spawned and
//! signal with [`WaitGroup::done`] (or by dropping a [`DoneGuard`]) when they
//! finish, successfully or not. [`WaitGroup::wait`] resolves once every
//! registered worker has signalled.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    pending: AtomicUsize,
    notify: Notify,
}

/// Counts outstanding workers; clones share the same counter
#[derive(Clone, Debug, Default)]
pub struct WaitGroup {
    inner: Arc<Inner>,
}

impl WaitGroup {
    /// Create an empty wait group
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one outstanding worker
    pub fn add(&self) {
        self.inner.pending.fetch_add(1, Ordering::AcqRel);
    }

    /// Signal that one worker has finished
    pub fn done(&self) {
        let previous = self
            .inner
            .pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));

        match previous {
            Ok(1) => self.inner.notify.notify_waiters(),
            Ok(_) => {}
            Err(_) => tracing::warn!("WaitGroup::done called with no outstanding workers"),
        }
    }

    /// Guard that calls [`WaitGroup::done`] when dropped, including on panic
    pub fn done_guard(&self) -> DoneGuard {
        DoneGuard { group: self.clone() }
    }

    /// Number of workers that have not signalled yet
    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::Acquire)
    }

    /// Wait until every registered worker has signalled
    pub async fn wait(&self) {
        loop {
            // Created before the check so a concurrent notify_waiters is not missed
            let notified = self.inner.notify.notified();
            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Signals one unit of completion on drop
#[derive(Debug)]
pub struct DoneGuard {
    group: WaitGroup,
}

impl Drop for DoneGuard {
    fn drop(&mut self) {
        self.group.done();
    }
}
