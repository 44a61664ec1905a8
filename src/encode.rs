//! Form record to payload.
//!
//! Field values are embedded as typed. Characters that are structural in the
//! target format (`;` and `:` in `WIFI:`, line breaks in vCard) are not
//! escaped, so such values may not survive a strict parser.

use crate::types::{ContactForm, EmailForm, FormRecord, Payload, WifiForm};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in `mailto:` query values: everything except
/// `A-Za-z0-9` and `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds the payload for a record.
///
/// Returns [`Payload::empty`] when the record's required fields are empty:
/// `value` for URL and text, `ssid` for Wi-Fi, any one field for a contact,
/// and `address` for email.
#[must_use]
pub fn encode(record: &FormRecord) -> Payload {
    match record {
        FormRecord::Url { value } | FormRecord::Text { value } => Payload::from(value.as_str()),
        FormRecord::Wifi(form) => encode_wifi(form),
        FormRecord::Contact(form) => encode_contact(form),
        FormRecord::Email(form) => encode_email(form),
    }
}

fn encode_wifi(form: &WifiForm) -> Payload {
    if form.ssid.is_empty() {
        return Payload::empty();
    }
    Payload::from(format!(
        "WIFI:S:{};T:{};P:{};H:false;;",
        form.ssid, form.encryption, form.password
    ))
}

fn encode_contact(form: &ContactForm) -> Payload {
    if form.name.is_empty() && form.phone.is_empty() && form.email.is_empty() {
        return Payload::empty();
    }

    let mut card = String::from("BEGIN:VCARD\nVERSION:3.0\n");
    for (tag, value) in [("FN", &form.name), ("TEL", &form.phone), ("EMAIL", &form.email)] {
        if !value.is_empty() {
            card.push_str(tag);
            card.push(':');
            card.push_str(value);
            card.push('\n');
        }
    }
    card.push_str("END:VCARD");
    Payload::from(card)
}

fn encode_email(form: &EmailForm) -> Payload {
    if form.address.is_empty() {
        return Payload::empty();
    }
    Payload::from(format!(
        "mailto:{}?subject={}&body={}",
        form.address,
        utf8_percent_encode(&form.subject, COMPONENT),
        utf8_percent_encode(&form.body, COMPONENT)
    ))
}
