//! Payload conventions for the well-known text (`T`) and URI (`U`) record types

use crate::TEXT_RECORD_LANGUAGE;

/// URI prefix codes as defined in NFC Forum RTD URI specification
pub const URI_PREFIXES: &[&str] = &[
    "",                           // 0x00 - no prepending
    "http://www.",                // 0x01
    "https://www.",               // 0x02
    "http://",                    // 0x03
    "https://",                   // 0x04
    "tel:",                       // 0x05
    "mailto:",                    // 0x06
    "ftp://anonymous:anonymous@", // 0x07
    "ftp://ftp.",                 // 0x08
    "ftps://",                    // 0x09
    "sftp://",                    // 0x0A
    "smb://",                     // 0x0B
    "nfs://",                     // 0x0C
    "ftp://",                     // 0x0D
    "dav://",                     // 0x0E
    "news:",                      // 0x0F
    "telnet://",                  // 0x10
    "imap:",                      // 0x11
    "rtsp://",                    // 0x12
    "urn:",                       // 0x13
    "pop:",                       // 0x14
    "sip:",                       // 0x15
    "sips:",                      // 0x16
    "tftp:",                      // 0x17
    "btspp://",                   // 0x18
    "btl2cap://",                 // 0x19
    "btgoep://",                  // 0x1A
    "tcpobex://",                 // 0x1B
    "irdaobex://",                // 0x1C
    "file://",                    // 0x1D
    "urn:epc:id:",                // 0x1E
    "urn:epc:tag:",               // 0x1F
    "urn:epc:pat:",               // 0x20
    "urn:epc:raw:",               // 0x21
    "urn:epc:",                   // 0x22
    "urn:nfc:",                   // 0x23
];

const UTF16_FLAG: u8 = 0x80;
const LANGUAGE_LENGTH_MASK: u8 = 0x3F;

/// Text record payload: status byte (UTF-8, language length), language code, text
pub fn text_payload(text: &str) -> Vec<u8> {
    let language = TEXT_RECORD_LANGUAGE.as_bytes();

    let mut payload = Vec::with_capacity(1 + language.len() + text.len());
    payload.push(language.len() as u8);
    payload.extend_from_slice(language);
    payload.extend_from_slice(text.as_bytes());

    payload
}

/// URI record payload: abbreviation code byte, then the unabbreviated remainder.
/// Longest prefix from the table wins; code 0 means no abbreviation.
pub fn uri_payload(uri: &str) -> Vec<u8> {
    let (code, rest) = abbreviate_uri(uri);

    let mut payload = Vec::with_capacity(1 + rest.len());
    payload.push(code);
    payload.extend_from_slice(rest.as_bytes());

    payload
}

fn abbreviate_uri(uri: &str) -> (u8, &str) {
    let mut best: (u8, &str) = (0, uri);

    // index 0 is the empty "no abbreviation" entry, skip it
    for (code, prefix) in URI_PREFIXES.iter().enumerate().skip(1) {
        if uri.starts_with(prefix) && prefix.len() > (uri.len() - best.1.len()) {
            best = (code as u8, &uri[prefix.len()..]);
        }
    }

    best
}

/// Expand a URI record payload back into the full URI string
pub fn expand_uri(payload: &[u8]) -> Option<String> {
    let (&code, rest) = payload.split_first()?;
    let prefix = URI_PREFIXES.get(code as usize)?;

    let rest = std::str::from_utf8(rest).ok()?;
    Some(format!("{prefix}{rest}"))
}

/// Extract the text from a text record payload, honoring the UTF-16 status bit
pub fn text_from_payload(payload: &[u8]) -> Option<String> {
    let (&status, rest) = payload.split_first()?;

    let language_length = (status & LANGUAGE_LENGTH_MASK) as usize;
    if language_length > rest.len() {
        return None;
    }

    let text = &rest[language_length..];
    if status & UTF16_FLAG != 0 {
        let code_units: Vec<u16> = text
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();

        String::from_utf16(&code_units).ok()
    } else {
        String::from_utf8(text.to_vec()).ok()
    }
}
