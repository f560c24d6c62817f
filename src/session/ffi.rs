//! FFI wrapper around [`TagSession`] for the embedding application.
//!
//! The foreign radio layer feeds detection and termination events in through
//! `on_tags_detected` / `on_session_terminated`; everything else the session
//! pulls from the injected adapter itself.

use std::sync::Arc;

use parking_lot::Mutex;

use tunetag_ndef::NdefMessage;

use crate::{
    session::{
        SessionError, TagSession, adapter::NfcRadioAdapter, dispatch::SessionListener,
        state::SessionEvent,
    },
    tag::TagId,
};

#[derive(uniffi::Object)]
pub struct FfiTagSession(Arc<Mutex<TagSession>>);

#[uniffi::export]
impl FfiTagSession {
    /// One instance per scan; a finished session cannot be restarted
    #[uniffi::constructor]
    pub fn new(adapter: Box<dyn NfcRadioAdapter>) -> Self {
        crate::logging::init();

        let session = TagSession::new(adapter);
        Self(Arc::new(Mutex::new(session)))
    }

    pub fn start_read_session(
        &self,
        listener: Box<dyn SessionListener>,
    ) -> Result<(), SessionError> {
        self.0.lock().start_read(listener)
    }

    pub fn start_write_session(
        &self,
        message: Arc<NdefMessage>,
        listener: Box<dyn SessionListener>,
    ) -> Result<(), SessionError> {
        self.0.lock().start_write((*message).clone(), listener)
    }

    /// Radio delegate entry point: one or more tags entered the field
    pub fn on_tags_detected(&self, tags: Vec<TagId>) {
        self.0.lock().on_event(SessionEvent::TagsDetected(tags));
    }

    /// Radio delegate entry point: the platform session died on its own
    pub fn on_session_terminated(&self, reason: String) {
        self.0.lock().on_event(SessionEvent::AdapterFailed(reason));
    }

    pub fn state_name(&self) -> String {
        self.0.lock().state_name().to_string()
    }
}
