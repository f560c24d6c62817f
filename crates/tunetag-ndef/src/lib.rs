uniffi::setup_scaffolding!();

pub mod builder;
pub mod codec;
pub mod ffi;
pub mod header;
pub mod message;
pub mod ndef_type;
pub mod parser;
pub mod payload;
pub mod record;
pub mod writer;

pub use builder::{BuildError, build};
pub use codec::{decode, decode_message, encode_text, encode_uri};
pub use message::{NdefMessage, NdefMessageError};
pub use ndef_type::NdefType;
pub use record::NdefRecord;

/// Language code written into every text record we produce
pub const TEXT_RECORD_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum EncodeError {
    #[error("record type is longer than 255 bytes")]
    TypeTooLong,

    #[error("record id is longer than 255 bytes")]
    IdTooLong,

    #[error("record payload is too large for the length field")]
    PayloadTooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum DecodeError {
    #[error("no bytes to decode")]
    Empty,

    #[error("message ended before the final record was complete")]
    Truncated,

    #[error("chunked records are not supported")]
    ChunkedUnsupported,

    #[error("first record does not carry the message begin flag")]
    MissingBegin,

    #[error("malformed NDEF message: {0}")]
    Malformed(String),
}
