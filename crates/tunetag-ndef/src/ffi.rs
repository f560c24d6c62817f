//! Free function and constant exports for the foreign side

use std::sync::Arc;

use tunetag_macros::impl_default_for;

use crate::{
    BuildError, TEXT_RECORD_LANGUAGE, builder,
    codec::{self, RECORD_SEPARATOR},
    message::NdefMessage,
    record::NdefRecord,
};

#[uniffi::export]
pub fn encode_text(text: String) -> NdefRecord {
    codec::encode_text(&text)
}

#[uniffi::export]
pub fn encode_uri(uri: String) -> Option<NdefRecord> {
    codec::encode_uri(&uri)
}

#[uniffi::export]
pub fn decode_record(record: NdefRecord) -> Option<String> {
    codec::decode(&record)
}

#[uniffi::export]
pub fn decode_message(message: Arc<NdefMessage>) -> String {
    codec::decode_message(&message)
}

/// Build the message to write: text record first, URI record second,
/// either may be absent
#[uniffi::export]
pub fn build_message(
    text: Option<String>,
    fallback_uri: String,
) -> Result<Arc<NdefMessage>, BuildError> {
    let message = builder::build(text.as_deref(), &fallback_uri)?;
    Ok(Arc::new(message))
}

impl_default_for!(NdefConst);

/// Codec constants the frontend needs when presenting decoded text
#[derive(Debug, Clone, uniffi::Object)]
pub struct NdefConst {
    record_separator: String,
    text_record_language: String,
}

#[uniffi::export]
impl NdefConst {
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self {
            record_separator: RECORD_SEPARATOR.to_string(),
            text_record_language: TEXT_RECORD_LANGUAGE.to_string(),
        }
    }

    pub fn record_separator(&self) -> String {
        self.record_separator.clone()
    }

    pub fn text_record_language(&self) -> String {
        self.text_record_language.clone()
    }
}
