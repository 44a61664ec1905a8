//! Payload to form record.
//!
//! The inverse of [`encode`](crate::encode::encode) for the payloads it
//! produces. Decoding is best effort: every input yields a record, and any
//! field that cannot be located comes back empty (or WPA for the Wi-Fi
//! encryption).

use crate::types::{ContactForm, EmailForm, Encryption, FormRecord, Kind, WifiForm};
use percent_encoding::percent_decode_str;

/// Where a captured field stops.
#[derive(Debug, Clone, Copy)]
enum Until {
    /// At the first occurrence of this character on the same line
    Char(char),
    /// At the next line break
    LineEnd,
    /// At the end of the payload, which must not contain a line break
    End,
}

/// Returns the text after the first `marker` that is followed by its
/// terminator without crossing a line break.
///
/// Occurrences whose terminator is missing are skipped in favour of later
/// ones.
fn capture<'a>(haystack: &'a str, marker: &str, until: Until) -> Option<&'a str> {
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(marker) {
        let start = from + pos + marker.len();
        let rest = &haystack[start..];
        let line_end = rest.find('\n');
        let line = &rest[..line_end.unwrap_or(rest.len())];

        let found = match until {
            Until::Char(c) => line.find(c).map(|end| &line[..end]),
            Until::LineEnd => line_end.map(|_| line),
            Until::End => line_end.is_none().then_some(rest),
        };
        if found.is_some() {
            return found;
        }

        // Markers start with an ASCII byte, so this stays on a char boundary.
        from += pos + 1;
    }
    None
}

fn field(haystack: &str, marker: &str, until: Until) -> String {
    capture(haystack, marker, until)
        .unwrap_or_default()
        .to_string()
}

fn percent_decode(fragment: &str) -> String {
    match percent_decode_str(fragment).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::debug!("keeping raw fragment, percent-decoding failed: {e}");
            fragment.to_string()
        }
    }
}

/// Rebuilds the record of `kind` from a payload.
#[must_use]
pub fn decode(kind: Kind, payload: &str) -> FormRecord {
    match kind {
        Kind::Url => FormRecord::Url {
            value: payload.to_string(),
        },
        Kind::Text => FormRecord::Text {
            value: payload.to_string(),
        },
        Kind::Wifi => FormRecord::Wifi(decode_wifi(payload)),
        Kind::Contact => FormRecord::Contact(decode_contact(payload)),
        Kind::Email => FormRecord::Email(decode_email(payload)),
    }
}

fn decode_wifi(payload: &str) -> WifiForm {
    let token = capture(payload, "T:", Until::Char(';')).unwrap_or_default();
    WifiForm {
        ssid: field(payload, "S:", Until::Char(';')),
        password: field(payload, "P:", Until::Char(';')),
        encryption: Encryption::from_token(token),
    }
}

fn decode_contact(payload: &str) -> ContactForm {
    ContactForm {
        name: field(payload, "FN:", Until::LineEnd),
        phone: field(payload, "TEL:", Until::LineEnd),
        email: field(payload, "EMAIL:", Until::LineEnd),
    }
}

fn decode_email(payload: &str) -> EmailForm {
    EmailForm {
        address: field(payload, "mailto:", Until::Char('?')),
        subject: percent_decode(capture(payload, "subject=", Until::Char('&')).unwrap_or_default()),
        body: percent_decode(capture(payload, "body=", Until::End).unwrap_or_default()),
    }
}
