use crate::ndef_type::NdefType;

/// A single NDEF record. Message framing (MB/ME) is a property of a record's
/// position inside a message and is computed at encode time, not stored here.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefRecord {
    pub type_name_format: NdefType,
    pub type_: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    pub fn well_known(type_: &[u8], payload: Vec<u8>) -> Self {
        Self {
            type_name_format: NdefType::WellKnown,
            type_: type_.to_vec(),
            id: Vec::new(),
            payload,
        }
    }

    /// Short records carry a single length byte for the payload
    pub fn is_short(&self) -> bool {
        self.payload.len() < 256
    }

    /// Number of bytes this record occupies on the wire
    pub fn encoded_len(&self) -> usize {
        let payload_length_bytes = if self.is_short() { 1 } else { 4 };
        let id_length_byte = usize::from(!self.id.is_empty());

        1 + 1
            + payload_length_bytes
            + id_length_byte
            + self.type_.len()
            + self.id.len()
            + self.payload.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_len_short_record() {
        let record = NdefRecord::well_known(b"T", vec![0x02, b'e', b'n', b'h', b'i']);
        // header + type len + payload len + type + payload
        assert_eq!(record.encoded_len(), 1 + 1 + 1 + 1 + 5);
    }

    #[test]
    fn encoded_len_long_record_uses_four_length_bytes() {
        let record = NdefRecord::well_known(b"T", vec![0; 300]);
        assert!(!record.is_short());
        assert_eq!(record.encoded_len(), 1 + 1 + 4 + 1 + 300);
    }
}
