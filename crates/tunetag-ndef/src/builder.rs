//! Assembles the message to be written to a tag

use tracing::debug;

use crate::{
    codec::{encode_text, encode_uri},
    message::NdefMessage,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum BuildError {
    #[error("message would contain no records")]
    InvalidRecords,
}

/// Build a write payload from an optional text and a fallback URI.
///
/// Record order is fixed: text first, URI second. A URI that does not parse
/// is simply left out; the build only fails when both records are absent,
/// since a message must contain at least one record. Empty text is still a
/// valid text record.
pub fn build(text: Option<&str>, fallback_uri: &str) -> Result<NdefMessage, BuildError> {
    let mut records = Vec::with_capacity(2);

    if let Some(text) = text {
        records.push(encode_text(text));
    }

    match encode_uri(fallback_uri) {
        Some(record) => records.push(record),
        None => debug!("fallback uri did not parse, leaving it out: {fallback_uri}"),
    }

    NdefMessage::try_new(records).map_err(|_| BuildError::InvalidRecords)
}
