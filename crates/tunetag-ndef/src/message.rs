use crate::{DecodeError, EncodeError, parser, record::NdefRecord, writer};

/// An ordered, non-empty sequence of records. The begin/end framing flags are
/// applied to the first and last record when the message is put on the wire.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Object)]
pub struct NdefMessage {
    records: Vec<NdefRecord>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum NdefMessageError {
    #[error("an NDEF message must contain at least one record")]
    NoRecords,
}

#[uniffi::export]
impl NdefMessage {
    #[uniffi::constructor]
    pub fn try_new(records: Vec<NdefRecord>) -> Result<Self, NdefMessageError> {
        if records.is_empty() {
            return Err(NdefMessageError::NoRecords);
        }

        Ok(Self { records })
    }

    /// Parse a message from its binary layout
    #[uniffi::constructor]
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        let records = parser::parse_message(&bytes)?;
        Self::try_new(records).map_err(|_| DecodeError::Empty)
    }

    pub fn records(&self) -> Vec<NdefRecord> {
        self.records.clone()
    }

    /// Encode into the binary layout, setting message begin/end on the
    /// first/last record
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        writer::encode_message(&self.records)
    }

    /// Size of the encoded message in bytes
    pub fn encoded_len(&self) -> u64 {
        self.records.iter().map(|r| r.encoded_len() as u64).sum()
    }
}

impl NdefMessage {
    pub fn records_ref(&self) -> &[NdefRecord] {
        &self.records
    }
}
