//! Binary encoding of messages, the inverse of [`crate::parser`]

use crate::{EncodeError, header::NdefHeader, record::NdefRecord};

/// Encode records back to back, applying the message begin/end framing flags
/// to the first and last record
pub fn encode_message(records: &[NdefRecord]) -> Result<Vec<u8>, EncodeError> {
    let capacity = records.iter().map(NdefRecord::encoded_len).sum();
    let mut out = Vec::with_capacity(capacity);

    let last = records.len().saturating_sub(1);
    for (position, record) in records.iter().enumerate() {
        encode_record(&mut out, record, position == 0, position == last)?;
    }

    Ok(out)
}

fn encode_record(
    out: &mut Vec<u8>,
    record: &NdefRecord,
    message_begin: bool,
    message_end: bool,
) -> Result<(), EncodeError> {
    let type_length: u8 = record
        .type_
        .len()
        .try_into()
        .map_err(|_| EncodeError::TypeTooLong)?;

    let id_length: Option<u8> = if record.id.is_empty() {
        None
    } else {
        Some(record.id.len().try_into().map_err(|_| EncodeError::IdTooLong)?)
    };

    let payload_length: u32 = record
        .payload
        .len()
        .try_into()
        .map_err(|_| EncodeError::PayloadTooLong)?;

    let header = NdefHeader {
        message_begin,
        message_end,
        chunked: false,
        short_record: record.is_short(),
        has_id_length: id_length.is_some(),
        type_name_format: record.type_name_format,
        type_length,
        payload_length,
        id_length,
    };

    out.push(header.header_byte());
    out.push(header.type_length);

    if header.short_record {
        out.push(payload_length as u8);
    } else {
        out.extend_from_slice(&payload_length.to_be_bytes());
    }

    if let Some(id_length) = header.id_length {
        out.push(id_length);
    }

    out.extend_from_slice(&record.type_);
    out.extend_from_slice(&record.id);
    out.extend_from_slice(&record.payload);

    Ok(())
}
