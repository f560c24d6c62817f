//! Record-level encode and decode for the well-known record types.
//!
//! Decoding mirrors how an incoming record of unknown content is interpreted:
//! URI interpretation takes precedence over plain text.

use url::Url;

use crate::{
    message::NdefMessage,
    ndef_type::NdefType,
    payload::{expand_uri, text_from_payload, text_payload, uri_payload},
    record::NdefRecord,
};

pub const TEXT_TYPE: &[u8] = b"T";
pub const URI_TYPE: &[u8] = b"U";

/// Separator between decoded records when a message is flattened to text
pub const RECORD_SEPARATOR: &str = "\n\n";

/// Build a well-known text (`T`) record. Empty text is still a valid record.
pub fn encode_text(text: &str) -> NdefRecord {
    NdefRecord::well_known(TEXT_TYPE, text_payload(text))
}

/// Build a well-known URI (`U`) record, or `None` if `uri` is not an absolute URI
pub fn encode_uri(uri: &str) -> Option<NdefRecord> {
    Url::parse(uri).ok()?;
    Some(NdefRecord::well_known(URI_TYPE, uri_payload(uri)))
}

/// Interpret a single record as text. Only well-known records decode.
/// URI expansion is attempted first, then the text-record convention,
/// then reading the raw payload as UTF-8.
pub fn decode(record: &NdefRecord) -> Option<String> {
    if record.type_name_format != NdefType::WellKnown {
        return None;
    }

    if record.type_.as_slice() == URI_TYPE {
        if let Some(uri) = expand_uri(&record.payload) {
            return Some(uri);
        }
    }

    if record.type_.as_slice() == TEXT_TYPE {
        if let Some(text) = text_from_payload(&record.payload) {
            return Some(text);
        }
    }

    String::from_utf8(record.payload.clone()).ok()
}

/// Flatten a message into one human readable string, in record order.
/// Records that do not decode are dropped; nothing decodable yields "".
pub fn decode_message(message: &NdefMessage) -> String {
    message
        .records_ref()
        .iter()
        .filter_map(decode)
        .collect::<Vec<String>>()
        .join(RECORD_SEPARATOR)
}
