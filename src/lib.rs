//! # quickqr
//!
//! Turn what a user types into the text of a QR code, and keep a short list
//! of recently saved codes.
//!
//! `quickqr` supports five fixed record kinds: URLs and free text (encoded
//! verbatim), Wi-Fi credentials (`WIFI:` scheme), contact cards (vCard 3.0)
//! and email drafts (`mailto:` URI). Payloads can be decoded back into form
//! fields, rendered as SVG or PNG at the highest error-correction level, and
//! saved to a recent list of at most five distinct entries that survives
//! restarts.
//!
//! ## Features
//!
//! - Pure [`encode`](encode::encode) and [`decode`](decode::decode) functions
//!   that never fail: missing input gives an empty payload, unparseable
//!   payloads give empty fields.
//! - A newest-first, deduplicating [`RecentList`] with value semantics.
//! - Pluggable persistence through the [`Storage`] trait, with file and
//!   in-memory backends.
//! - PNG export with a white margin, named `<prefix>-<kind>-<millis>.png`.
//! - TOML configuration with XDG paths and environment overrides.
//!
//! ## Example
//!
//! Build a Wi-Fi payload and read it back:
//!
//! ```rust
//! use quickqr::{decode, encode, Encryption, FormRecord, Kind, WifiForm};
//!
//! let record = FormRecord::Wifi(WifiForm {
//!     ssid: "home".to_string(),
//!     password: "hunter2".to_string(),
//!     encryption: Encryption::Wpa,
//! });
//! let payload = encode(&record);
//! assert_eq!(payload.as_str(), "WIFI:S:home;T:WPA;P:hunter2;H:false;;");
//! assert_eq!(decode(Kind::Wifi, payload.as_str()), record);
//! ```
//!
//! Drive a generator and save to the recent list:
//!
//! ```rust
//! use quickqr::{Generator, Kind, MemoryStorage, RecentStore};
//!
//! let mut generator = Generator::new(RecentStore::new(MemoryStorage::new()));
//! generator.select_kind(Kind::Email);
//! generator.update_email(|e| e.address = "team@example.com".to_string());
//! generator.save().expect("in-memory storage never fails");
//! assert_eq!(generator.recent().len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: Kinds, form records and payloads.
//! - [`encode`] / [`decode`]: Conversion between records and payloads.
//! - [`history`]: The bounded recent list.
//! - [`storage`]: Storage backends and the recent-list store.
//! - [`render`]: QR symbol construction, SVG and PNG output.
//! - [`session`]: The [`Generator`] a front end drives.

pub mod clipboard;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod history;
pub mod render;
pub mod session;
pub mod storage;
pub mod types;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::{AppConfig, ExportConfig, StorageConfig};
pub use decode::decode;
pub use encode::encode;
pub use error::{ConfigError, ConfigResult, QuickQrError, Result, StorageError, StorageResult};
pub use history::{RecentEntry, RecentList, RECENT_CAPACITY};
pub use session::{Generator, Notice};
pub use storage::{FileStorage, MemoryStorage, RecentStore, Storage, RECENT_KEY};
pub use types::{ContactForm, EmailForm, Encryption, FormRecord, Kind, Payload, WifiForm};
