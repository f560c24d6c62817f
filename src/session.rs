//! One tag interaction from start to invalidation.
//!
//! A [`TagSession`] drives a single scan: scan start, tag detection, connect,
//! capability query, then one read or write, then invalidation. Transitions
//! live in [`state::transition`] as a pure function; this module executes the
//! effects against the injected radio adapter and hands the terminal outcome
//! to the dispatcher. A session instance is good for exactly one scan.

pub mod adapter;
pub mod dispatch;
pub mod ffi;
pub mod state;

use tracing::{debug, info, warn};
use tunetag_ndef::NdefMessage;

use adapter::NfcRadioAdapter;
use dispatch::{ResultDispatcher, SessionListener};
use state::{Effect, SessionEvent, SessionState, transition};

#[derive(Debug, Copy, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum SessionMode {
    Read,
    Write,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum SessionError {
    #[error("NFC radio is not available on this device")]
    RadioUnavailable,

    #[error("a tag session is already active")]
    SessionAlreadyActive,

    #[error("could not connect to the tag: {0}")]
    ConnectionFailed(String),

    #[error("tag does not support the requested operation")]
    IncompatibleTag,

    #[error("tag session failed: {0}")]
    AdapterError(String),
}

/// Terminal result of one session, produced exactly once
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum SessionOutcome {
    ReadResult { text: String },
    WriteResult,
    Failure { error: SessionError },
}

pub struct TagSession {
    mode: SessionMode,
    state: SessionState,
    message: Option<NdefMessage>,
    adapter: Box<dyn NfcRadioAdapter>,
    dispatcher: Option<ResultDispatcher>,
}

impl TagSession {
    pub fn new(adapter: Box<dyn NfcRadioAdapter>) -> Self {
        Self {
            mode: SessionMode::Read,
            state: SessionState::Idle,
            message: None,
            adapter,
            dispatcher: None,
        }
    }

    pub fn start_read(&mut self, listener: Box<dyn SessionListener>) -> Result<(), SessionError> {
        self.start(SessionMode::Read, None, listener)
    }

    /// The message is built before the radio connection opens; the session
    /// owns it for the rest of the scan
    pub fn start_write(
        &mut self,
        message: NdefMessage,
        listener: Box<dyn SessionListener>,
    ) -> Result<(), SessionError> {
        self.start(SessionMode::Write, Some(message), listener)
    }

    fn start(
        &mut self,
        mode: SessionMode,
        message: Option<NdefMessage>,
        listener: Box<dyn SessionListener>,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            warn!(
                "start requested while session is {}, refusing",
                self.state.name()
            );
            return Err(SessionError::SessionAlreadyActive);
        }

        if !self.adapter.is_available() {
            return Err(SessionError::RadioUnavailable);
        }

        self.mode = mode;
        self.message = message;
        self.dispatcher = Some(ResultDispatcher::new(listener));
        self.state = SessionState::Scanning;

        info!("tag session started, mode {mode:?}");
        self.adapter.begin_scan();

        Ok(())
    }

    /// Feed one event into the machine and run effects until it settles.
    /// Transitions are strictly sequential; everything here happens on the
    /// caller's stack.
    pub fn on_event(&mut self, event: SessionEvent) {
        let mut next = Some(event);

        while let Some(event) = next.take() {
            let (state, effect) = transition(self.state, event, self.mode);
            debug!("session state -> {}", state.name());

            self.state = state;
            next = self.run_effect(effect);
        }
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    fn run_effect(&mut self, effect: Effect) -> Option<SessionEvent> {
        match effect {
            Effect::None => None,

            Effect::Connect(tag) => match self.adapter.connect(tag) {
                Ok(()) => Some(SessionEvent::Connected(tag)),
                Err(error) => Some(SessionEvent::ConnectFailed(error.to_string())),
            },

            Effect::QueryCapability(tag) => match self.adapter.query_capability(tag) {
                Ok(capability) => Some(SessionEvent::CapabilityRead(tag, capability)),
                Err(error) => Some(SessionEvent::AdapterFailed(error.to_string())),
            },

            Effect::Dispatch => Some(SessionEvent::Dispatch),

            Effect::Read(tag) => match self.adapter.read_message(tag) {
                Ok(records) => Some(SessionEvent::ReadDone(records)),
                Err(error) => Some(SessionEvent::AdapterFailed(error.to_string())),
            },

            Effect::Write { tag, capacity } => {
                let Some(message) = &self.message else {
                    return Some(SessionEvent::AdapterFailed(
                        "no message built for write session".to_string(),
                    ));
                };

                if message.encoded_len() > u64::from(capacity) {
                    warn!(
                        "message is {} bytes but tag reports {capacity} bytes capacity",
                        message.encoded_len()
                    );
                }

                match self.adapter.write_message(tag, message.records()) {
                    Ok(()) => Some(SessionEvent::WriteDone),
                    Err(error) => Some(SessionEvent::AdapterFailed(error.to_string())),
                }
            }

            Effect::Complete { status, outcome } => {
                self.adapter.invalidate(status);
                self.state = SessionState::Invalidated;

                match &self.dispatcher {
                    Some(dispatcher) => dispatcher.deliver(outcome),
                    None => warn!("session completed without a dispatcher, outcome lost"),
                }

                None
            }
        }
    }
}
