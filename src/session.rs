//! The generator state a front end drives.
//!
//! [`Generator`] holds the selected kind, the fields of every form, the
//! current payload and the recent list. Every mutating call re-runs the
//! encoder before returning, so [`Generator::payload`] is always current.

use crate::clipboard::Clipboard;
use crate::config::ExportConfig;
use crate::decode::decode;
use crate::encode::encode;
use crate::error::Result;
use crate::history::{RecentEntry, RecentList};
use crate::render;
use crate::storage::{RecentStore, Storage};
use crate::types::{ContactForm, EmailForm, FormRecord, Kind, Payload, WifiForm};
use chrono::Utc;
use std::path::PathBuf;

/// Short user-facing message describing a completed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Saved,
    Removed,
    Copied,
}

impl Notice {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Notice::Saved => "QR Code Saved",
            Notice::Removed => "QR Code Removed",
            Notice::Copied => "Copied!",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Notice::Saved => "Your QR code has been saved to recent list",
            Notice::Removed => "The QR code has been removed from your recent list",
            Notice::Copied => "QR code content copied to clipboard",
        }
    }
}

/// Form state, current payload and recent list for one user.
#[derive(Debug)]
pub struct Generator<S> {
    kind: Kind,
    /// Shared by the URL and text forms.
    value: String,
    wifi: WifiForm,
    contact: ContactForm,
    email: EmailForm,
    payload: Payload,
    recent: RecentList,
    store: RecentStore<S>,
}

impl<S: Storage> Generator<S> {
    /// Creates a generator with empty forms and the recent list hydrated
    /// from `store`.
    pub fn new(store: RecentStore<S>) -> Self {
        let recent = store.load();
        Self {
            kind: Kind::default(),
            value: String::new(),
            wifi: WifiForm::default(),
            contact: ContactForm::default(),
            email: EmailForm::default(),
            payload: Payload::empty(),
            recent,
            store,
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The payload for the current kind and fields; empty when there is
    /// nothing to render.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[must_use]
    pub fn recent(&self) -> &RecentList {
        &self.recent
    }

    #[must_use]
    pub fn store(&self) -> &RecentStore<S> {
        &self.store
    }

    /// The record of the selected kind built from the current fields.
    #[must_use]
    pub fn record(&self) -> FormRecord {
        match self.kind {
            Kind::Url => FormRecord::Url {
                value: self.value.clone(),
            },
            Kind::Text => FormRecord::Text {
                value: self.value.clone(),
            },
            Kind::Wifi => FormRecord::Wifi(self.wifi.clone()),
            Kind::Contact => FormRecord::Contact(self.contact.clone()),
            Kind::Email => FormRecord::Email(self.email.clone()),
        }
    }

    pub fn select_kind(&mut self, kind: Kind) {
        self.kind = kind;
        self.refresh();
    }

    /// Sets the URL/text input.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.refresh();
    }

    pub fn update_wifi(&mut self, f: impl FnOnce(&mut WifiForm)) {
        f(&mut self.wifi);
        self.refresh();
    }

    pub fn update_contact(&mut self, f: impl FnOnce(&mut ContactForm)) {
        f(&mut self.contact);
        self.refresh();
    }

    pub fn update_email(&mut self, f: impl FnOnce(&mut EmailForm)) {
        f(&mut self.email);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.payload = encode(&self.record());
    }

    /// Adds the current payload to the recent list and persists it.
    ///
    /// Does nothing and returns `Ok(None)` when the payload is empty. If the
    /// write fails the in-memory list is left as it was.
    pub fn save(&mut self) -> Result<Option<Notice>> {
        if self.payload.is_empty() {
            return Ok(None);
        }

        let entry = RecentEntry::now(self.kind, self.payload.clone());
        let next = self.recent.clone().insert(entry);
        self.store.persist(&next)?;
        self.recent = next;
        tracing::debug!("saved {} payload to recent list", self.kind);
        Ok(Some(Notice::Saved))
    }

    /// Restores the fields from the recent entry at `index`.
    ///
    /// Returns `false` if there is no such entry.
    pub fn load_entry(&mut self, index: usize) -> bool {
        let Some(entry) = self.recent.get(index) else {
            return false;
        };

        let kind = entry.kind();
        match decode(kind, entry.payload().as_str()) {
            FormRecord::Url { value } | FormRecord::Text { value } => self.value = value,
            FormRecord::Wifi(form) => self.wifi = form,
            FormRecord::Contact(form) => self.contact = form,
            FormRecord::Email(form) => self.email = form,
        }
        self.select_kind(kind);
        true
    }

    /// Removes the recent entry at `index` and persists the list.
    ///
    /// An out-of-range index leaves the list unchanged.
    pub fn remove(&mut self, index: usize) -> Result<Notice> {
        let next = self.recent.clone().remove(index);
        self.store.persist(&next)?;
        self.recent = next;
        Ok(Notice::Removed)
    }

    /// Copies the current payload verbatim.
    pub fn copy(&self, clipboard: &mut impl Clipboard) -> Result<Option<Notice>> {
        if self.payload.is_empty() {
            return Ok(None);
        }
        clipboard.set_text(self.payload.as_str())?;
        Ok(Some(Notice::Copied))
    }

    /// Writes the current code as a PNG, returning its path.
    pub fn download(&self, config: &ExportConfig) -> Result<Option<PathBuf>> {
        render::export_png(&self.payload, self.kind, config, Utc::now())
    }
}
