//! Exactly-once delivery of the terminal outcome, off the transition stack.
//!
//! Outcomes travel over a channel to a listener thread so the foreign
//! callback never runs inside an adapter callback frame; the listener is
//! expected to hop to its own main context before touching UI.

use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam::channel::{Sender, bounded};
use tracing::{debug, warn};

use crate::session::SessionOutcome;

#[uniffi::export(callback_interface)]
pub trait SessionListener: Send + Sync + 'static {
    /// Called exactly once, after the session has been invalidated
    fn on_outcome(&self, outcome: SessionOutcome);
}

pub struct ResultDispatcher {
    sender: Sender<SessionOutcome>,
    delivered: AtomicBool,
}

impl ResultDispatcher {
    pub fn new(listener: Box<dyn SessionListener>) -> Self {
        let (sender, receiver) = bounded::<SessionOutcome>(1);

        // one outcome per session; the thread ends after delivery, or without
        // firing when the session is dropped with the adapter still pending
        std::thread::spawn(move || {
            if let Ok(outcome) = receiver.recv() {
                listener.on_outcome(outcome);
            }
        });

        Self {
            sender,
            delivered: AtomicBool::new(false),
        }
    }

    pub fn deliver(&self, outcome: SessionOutcome) {
        if self.delivered.swap(true, Ordering::SeqCst) {
            warn!("session outcome already delivered, dropping duplicate: {outcome:?}");
            return;
        }

        debug!("delivering session outcome");
        if self.sender.try_send(outcome).is_err() {
            warn!("outcome listener is gone, nothing delivered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionError;
    use std::time::Duration;

    struct ChannelListener(Sender<SessionOutcome>);

    impl SessionListener for ChannelListener {
        fn on_outcome(&self, outcome: SessionOutcome) {
            let _ = self.0.send(outcome);
        }
    }

    #[test]
    fn duplicate_delivery_is_dropped() {
        let (tx, rx) = crossbeam::channel::unbounded();
        let dispatcher = ResultDispatcher::new(Box::new(ChannelListener(tx)));

        dispatcher.deliver(SessionOutcome::WriteResult);
        dispatcher.deliver(SessionOutcome::Failure {
            error: SessionError::IncompatibleTag,
        });

        assert_eq!(
            rx.recv_timeout(Duration::from_secs(1)).unwrap(),
            SessionOutcome::WriteResult
        );
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn no_delivery_without_an_outcome() {
        let (tx, rx) = crossbeam::channel::unbounded();
        let _dispatcher = ResultDispatcher::new(Box::new(ChannelListener(tx)));

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }
}
