//! Form records and payloads.
//!
//! A [`FormRecord`] holds the fields a user typed for one of the five
//! supported [`Kind`]s. A [`Payload`] is the text that ends up inside the
//! QR symbol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five record kinds a QR code can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// A link, encoded verbatim
    #[default]
    Url,
    /// Free text, encoded verbatim
    Text,
    /// Wi-Fi credentials (`WIFI:` scheme)
    Wifi,
    /// Contact card (vCard 3.0)
    Contact,
    /// Email draft (`mailto:` URI)
    Email,
}

impl Kind {
    /// Every kind, in the order they are offered to the user.
    pub const ALL: [Kind; 5] = [Kind::Url, Kind::Wifi, Kind::Text, Kind::Contact, Kind::Email];

    /// Lowercase identifier, used in persisted entries and export file names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Url => "url",
            Kind::Text => "text",
            Kind::Wifi => "wifi",
            Kind::Contact => "contact",
            Kind::Email => "email",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Kind::Url => "URL",
            Kind::Text => "Text",
            Kind::Wifi => "Wi-Fi",
            Kind::Contact => "Contact",
            Kind::Email => "Email",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wi-Fi authentication type, as written after `T:` in a `WIFI:` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encryption {
    /// WPA/WPA2/WPA3 personal
    #[default]
    Wpa,
    /// Legacy WEP
    Wep,
    /// Open network
    NoPass,
}

impl Encryption {
    /// Token used in the payload.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Encryption::Wpa => "WPA",
            Encryption::Wep => "WEP",
            Encryption::NoPass => "nopass",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Encryption::Wpa => "WPA/WPA2/WPA3",
            Encryption::Wep => "WEP",
            Encryption::NoPass => "No Password",
        }
    }

    /// Parses a payload token. Empty or unknown tokens fall back to WPA.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "WEP" => Encryption::Wep,
            "nopass" => Encryption::NoPass,
            "WPA" | "" => Encryption::Wpa,
            other => {
                tracing::debug!("unknown Wi-Fi encryption token {other:?}, using WPA");
                Encryption::Wpa
            }
        }
    }
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wi-Fi network fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WifiForm {
    pub ssid: String,
    pub password: String,
    pub encryption: Encryption,
}

/// Contact card fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Email draft fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmailForm {
    pub address: String,
    pub subject: String,
    pub body: String,
}

/// The fields of one record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRecord {
    Url { value: String },
    Text { value: String },
    Wifi(WifiForm),
    Contact(ContactForm),
    Email(EmailForm),
}

impl FormRecord {
    /// A record of the given kind with every field empty.
    #[must_use]
    pub fn empty(kind: Kind) -> Self {
        match kind {
            Kind::Url => FormRecord::Url { value: String::new() },
            Kind::Text => FormRecord::Text { value: String::new() },
            Kind::Wifi => FormRecord::Wifi(WifiForm::default()),
            Kind::Contact => FormRecord::Contact(ContactForm::default()),
            Kind::Email => FormRecord::Email(EmailForm::default()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            FormRecord::Url { .. } => Kind::Url,
            FormRecord::Text { .. } => Kind::Text,
            FormRecord::Wifi(_) => Kind::Wifi,
            FormRecord::Contact(_) => Kind::Contact,
            FormRecord::Email(_) => Kind::Email,
        }
    }
}

/// Text content of a QR symbol.
///
/// The empty payload means "nothing to render"; it is what the encoder
/// produces when a record lacks its required fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(String);

impl Payload {
    /// The empty payload.
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
