//! Tick scheduling
//!
//! Recurring time-advance callbacks with explicit cancellation. A subscription
//! lives exactly as long as its [`TickHandle`].

use crate::session::PlayerEvent;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedSender, WeakUnboundedSender};
use tokio::time::{interval_at, Instant};

/// Starts recurring ticks
pub trait TickScheduler {
    /// Start delivering `PlayerEvent::Tick` for `subscription` every `period`
    ///
    /// The first tick arrives one `period` after scheduling.
    fn schedule(&mut self, subscription: u64, period: Duration) -> TickHandle;
}

/// Cancellation handle for a tick subscription
///
/// Cancels on [`TickHandle::cancel`] or when dropped.
pub struct TickHandle {
    subscription: u64,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    pub fn new(subscription: u64, cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            subscription,
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Subscription id carried by every tick of this handle
    pub fn subscription(&self) -> u64 {
        self.subscription
    }

    /// Stop the ticks
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("subscription", &self.subscription)
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Tick scheduler backed by a tokio interval task
///
/// Ticks are sent into the session's event channel, so they are processed in
/// order with user commands. Only a weak sender is kept: the channel still
/// closes once every [`SessionHandle`](crate::SessionHandle) is dropped.
/// Must be used inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioTickScheduler {
    events: WeakUnboundedSender<PlayerEvent>,
}

impl TokioTickScheduler {
    pub fn new(events: &UnboundedSender<PlayerEvent>) -> Self {
        Self {
            events: events.downgrade(),
        }
    }
}

impl TickScheduler for TokioTickScheduler {
    fn schedule(&mut self, subscription: u64, period: Duration) -> TickHandle {
        let events = self.events.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                let tick = PlayerEvent::Tick {
                    subscription,
                    delta: period,
                };
                let delivered = events.upgrade().is_some_and(|tx| tx.send(tick).is_ok());
                if !delivered {
                    // Session gone
                    break;
                }
            }
        });

        tracing::trace!("Tick subscription {} started ({:?})", subscription, period);

        TickHandle::new(subscription, move || {
            tracing::trace!("Tick subscription {} cancelled", subscription);
            task.abort();
        })
    }
}
