//! Boundary with the platform radio layer.
//!
//! The adapter is implemented by the embedding application (CoreNFC on iOS)
//! and injected into the session. The session borrows it for the duration of
//! one scan; the adapter's own threading model is out of our control, which
//! is why every call here is a plain synchronous result.

use tunetag_ndef::NdefRecord;

use crate::tag::{TagCapability, TagId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum RadioAdapterError {
    #[error("could not connect to tag: {0}")]
    ConnectionFailed(String),

    #[error("could not query tag capability: {0}")]
    QueryFailed(String),

    #[error("could not read tag: {0}")]
    ReadFailed(String),

    #[error("could not write tag: {0}")]
    WriteFailed(String),

    #[error("unexpected adapter failure: {0}")]
    Unexpected(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for RadioAdapterError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::Unexpected(error.reason)
    }
}

#[uniffi::export(callback_interface)]
pub trait NfcRadioAdapter: Send + Sync + 'static {
    /// Whether the device has a usable NFC radio right now
    fn is_available(&self) -> bool;

    /// Start one scan. Detections and radio-side termination come back
    /// through the session's event entry points.
    fn begin_scan(&self);

    fn connect(&self, tag: TagId) -> Result<(), RadioAdapterError>;

    fn query_capability(&self, tag: TagId) -> Result<TagCapability, RadioAdapterError>;

    fn read_message(&self, tag: TagId) -> Result<Vec<NdefRecord>, RadioAdapterError>;

    fn write_message(&self, tag: TagId, records: Vec<NdefRecord>) -> Result<(), RadioAdapterError>;

    /// End the radio session; `reason` is the short status string surfaced
    /// to the user
    fn invalidate(&self, reason: String);
}
