use crate::ndef_type::NdefType;

/// Wire-level view of a record header, as parsed off (or written onto) a tag.
/// The framing flags live only here, never on [`crate::record::NdefRecord`].
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefHeader {
    pub message_begin: bool,
    pub message_end: bool,
    pub chunked: bool,
    pub short_record: bool,
    pub has_id_length: bool,
    pub type_name_format: NdefType,
    pub type_length: u8,
    pub payload_length: u32,
    pub id_length: Option<u8>,
}

impl NdefHeader {
    /// Pack the flag bits and TNF back into the leading header byte
    pub fn header_byte(&self) -> u8 {
        (u8::from(self.message_begin) << 7)
            | (u8::from(self.message_end) << 6)
            | (u8::from(self.chunked) << 5)
            | (u8::from(self.short_record) << 4)
            | (u8::from(self.has_id_length) << 3)
            | self.type_name_format.to_bits()
    }
}
