pub mod stream;

use stream::Stream;
use winnow::{
    ModalResult, Parser,
    binary::{
        Endianness,
        bits::{bits, bool as take_bool, take as take_bits},
    },
    error::{ContextError, ErrMode},
    token::{any, take},
};

use crate::{DecodeError, header::NdefHeader, ndef_type::NdefType, record::NdefRecord};

/// A record together with its wire header, before framing validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub header: NdefHeader,
    pub type_: Vec<u8>,
    pub id: Option<Vec<u8>>,
    pub payload: Vec<u8>,
}

impl ParsedRecord {
    fn into_record(self) -> NdefRecord {
        NdefRecord {
            type_name_format: self.header.type_name_format,
            type_: self.type_,
            id: self.id.unwrap_or_default(),
            payload: self.payload,
        }
    }
}

/// Parse a complete message. Framing is validated (first record carries the
/// begin flag, chunked records rejected) and then discarded into position.
pub fn parse_message(bytes: &[u8]) -> Result<Vec<NdefRecord>, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut input = stream::new(bytes);
    let parsed = parse_records(&mut input).map_err(|error| match error {
        ErrMode::Incomplete(_) => DecodeError::Truncated,
        other => DecodeError::Malformed(other.to_string()),
    })?;

    if !parsed[0].header.message_begin {
        return Err(DecodeError::MissingBegin);
    }

    if parsed.iter().any(|record| record.header.chunked) {
        return Err(DecodeError::ChunkedUnsupported);
    }

    Ok(parsed.into_iter().map(ParsedRecord::into_record).collect())
}

/// Records follow each other back to back; the message end flag on the last
/// record is the only terminator
pub fn parse_records(input: &mut Stream<'_>) -> ModalResult<Vec<ParsedRecord>> {
    let mut records = Vec::new();

    loop {
        let record = parse_record.parse_next(input)?;
        let message_end = record.header.message_end;
        records.push(record);

        if message_end {
            break;
        }
    }

    Ok(records)
}

pub fn parse_record(input: &mut Stream<'_>) -> ModalResult<ParsedRecord> {
    let header = parse_header.parse_next(input)?;
    let type_ = parse_type(input, header.type_length)?;
    let id = parse_id(input, header.id_length)?;
    let payload = parse_payload(input, header.payload_length)?;

    Ok(ParsedRecord {
        header,
        type_,
        id,
        payload,
    })
}

fn parse_header_byte(input: &mut Stream<'_>) -> ModalResult<(bool, bool, bool, bool, bool, u8)> {
    bits::<_, _, ErrMode<ContextError>, _, _>((
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bits(3_u8),
    ))
    .parse_next(input)
}

pub fn parse_header(input: &mut Stream<'_>) -> ModalResult<NdefHeader> {
    let (message_begin, message_end, chunked, short_record, has_id_length, type_name_format) =
        parse_header_byte(input)?;

    let type_name_format = NdefType::from_bits(type_name_format);
    let type_length = winnow::binary::u8.parse_next(input)?;

    let payload_length = if short_record {
        any.map(|x: u8| x as u32).parse_next(input)?
    } else {
        winnow::binary::u32(Endianness::Big).parse_next(input)?
    };

    let id_length = if has_id_length {
        Some(any.parse_next(input)?)
    } else {
        None
    };

    Ok(NdefHeader {
        message_begin,
        message_end,
        chunked,
        short_record,
        has_id_length,
        type_name_format,
        type_length,
        payload_length,
        id_length,
    })
}

fn parse_type(input: &mut Stream<'_>, type_length: u8) -> ModalResult<Vec<u8>> {
    take(type_length as usize)
        .map(|s: &[u8]| s.to_vec())
        .parse_next(input)
}

fn parse_id(input: &mut Stream<'_>, id_length: Option<u8>) -> ModalResult<Option<Vec<u8>>> {
    if let Some(id_len) = id_length {
        take(id_len as usize)
            .map(|s: &[u8]| Some(s.to_vec()))
            .parse_next(input)
    } else {
        Ok(None)
    }
}

fn parse_payload(input: &mut Stream<'_>, payload_length: u32) -> ModalResult<Vec<u8>> {
    take(payload_length as usize)
        .map(|s: &[u8]| s.to_vec())
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn owned_stream(bytes: Vec<u8>) -> Stream<'static> {
        let bytes = Box::leak(bytes.into_boxed_slice());
        stream::new(bytes)
    }

    #[test]
    fn known_header_parse() {
        // well known short record, type "U", 13 byte payload
        let mut header_bytes = owned_stream(vec![0xD1, 0x01, 0x0D, 0x55, 0x02]);
        let header = parse_header(&mut header_bytes).unwrap();

        assert!(header.message_begin);
        assert!(header.message_end);
        assert!(!header.chunked);
        assert!(header.short_record);
        assert!(!header.has_id_length);
        assert_eq!(header.type_name_format, NdefType::WellKnown);
        assert_eq!(header.type_length, 1);
        assert_eq!(header.payload_length, 13);
    }

    #[test]
    fn single_text_record_message() {
        // D1 01 05 "T" | 02 "en" "hi"
        let bytes = hex::decode("d101055402656e6869").unwrap();
        let records = parse_message(&bytes).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].type_, b"T".to_vec());
        assert_eq!(records[0].payload, vec![0x02, b'e', b'n', b'h', b'i']);
    }

    #[test]
    fn two_record_message_stops_at_message_end() {
        // record 1: MB set, ME clear; record 2: ME set; one trailing pad byte
        let bytes = hex::decode("91010154415101015504fe0000").unwrap();
        let records = parse_message(&bytes).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].type_, b"T".to_vec());
        assert_eq!(records[1].type_, b"U".to_vec());
    }

    #[test]
    fn record_with_id() {
        // MB|ME|SR|IL, type "T", payload len 1, id len 2, type, id "ab", payload
        let bytes = vec![0xD9, 0x01, 0x01, 0x02, b'T', b'a', b'b', 0x00];
        let records = parse_message(&bytes).unwrap();

        assert_eq!(records[0].id, b"ab".to_vec());
    }

    #[test]
    fn long_record_length() {
        let mut bytes = vec![0xC1, 0x01, 0x00, 0x00, 0x01, 0x2C, b'T'];
        bytes.extend(std::iter::repeat_n(0u8, 300));

        let records = parse_message(&bytes).unwrap();
        assert_eq!(records[0].payload.len(), 300);
    }

    #[test]
    fn truncated_message() {
        let bytes = hex::decode("d101055402").unwrap();
        assert_eq!(parse_message(&bytes), Err(DecodeError::Truncated));
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_message(&[]), Err(DecodeError::Empty));
    }

    #[test]
    fn missing_begin_flag() {
        // 0x51: ME set but MB clear
        let bytes = vec![0x51, 0x01, 0x01, b'T', 0x00];
        assert_eq!(parse_message(&bytes), Err(DecodeError::MissingBegin));
    }

    #[test]
    fn chunked_record_rejected() {
        // 0xF1: MB|ME|CF set
        let bytes = vec![0xF1, 0x01, 0x01, b'T', 0x00];
        assert_eq!(parse_message(&bytes), Err(DecodeError::ChunkedUnsupported));
    }
}
