//! Recently saved payloads.
//!
//! [`RecentList`] is a value: [`RecentList::insert`] and
//! [`RecentList::remove`] consume the list and return its next state.

use crate::types::{Kind, Payload};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in a [`RecentList`].
pub const RECENT_CAPACITY: usize = 5;

/// A saved payload. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    #[serde(rename = "type")]
    kind: Kind,
    #[serde(rename = "content")]
    payload: Payload,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
}

impl RecentEntry {
    #[must_use]
    pub fn new(kind: Kind, payload: Payload, created_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            payload,
            created_at,
        }
    }

    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn now(kind: Kind, payload: Payload) -> Self {
        Self::new(kind, payload, Utc::now())
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Creation time in the local timezone, `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn display_timestamp(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

/// Newest-first list of at most [`RECENT_CAPACITY`] entries with distinct
/// payloads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct RecentList {
    entries: Vec<RecentEntry>,
}

impl RecentList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from entries given newest first.
    ///
    /// Later duplicates of a payload are dropped and the result is truncated
    /// to capacity.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = RecentEntry>) -> Self {
        let mut kept: Vec<RecentEntry> = Vec::with_capacity(RECENT_CAPACITY);
        for entry in entries {
            if kept.len() == RECENT_CAPACITY {
                break;
            }
            if kept.iter().all(|e| e.payload != entry.payload) {
                kept.push(entry);
            }
        }
        Self { entries: kept }
    }

    /// Puts `entry` first, dropping any older entry with the same payload and
    /// evicting the oldest entry beyond capacity.
    #[must_use]
    pub fn insert(self, entry: RecentEntry) -> Self {
        let older = self
            .entries
            .into_iter()
            .filter(|e| e.payload != entry.payload);
        let entries = std::iter::once(entry.clone())
            .chain(older)
            .take(RECENT_CAPACITY)
            .collect();
        Self { entries }
    }

    /// Drops the entry at `index`. Out-of-range indices leave the list as is.
    #[must_use]
    pub fn remove(mut self, index: usize) -> Self {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
        self
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RecentEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecentEntry> {
        self.entries.iter()
    }
}

impl<'de> Deserialize<'de> for RecentList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<RecentEntry>::deserialize(deserializer)?;
        Ok(Self::from_entries(entries))
    }
}

impl<'a> IntoIterator for &'a RecentList {
    type Item = &'a RecentEntry;
    type IntoIter = std::slice::Iter<'a, RecentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(payload: &str, millis: i64) -> RecentEntry {
        let at = Utc
            .timestamp_millis_opt(millis)
            .single()
            .expect("valid timestamp");
        RecentEntry::new(Kind::Text, Payload::from(payload), at)
    }

    fn payloads(list: &RecentList) -> Vec<&str> {
        list.iter().map(|e| e.payload().as_str()).collect()
    }

    fn full_list() -> RecentList {
        (1..=5).fold(RecentList::new(), |list, i| {
            list.insert(entry(&format!("p{i}"), i))
        })
    }

    #[test]
    fn test_insert_prepends() {
        let list = RecentList::new().insert(entry("a", 1)).insert(entry("b", 2));
        assert_eq!(payloads(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_insert_evicts_oldest() {
        let list = full_list();
        assert_eq!(payloads(&list), vec!["p5", "p4", "p3", "p2", "p1"]);

        let list = list.insert(entry("p6", 6));
        assert_eq!(list.len(), RECENT_CAPACITY);
        assert_eq!(payloads(&list), vec!["p6", "p5", "p4", "p3", "p2"]);
    }

    #[test]
    fn test_insert_duplicate_moves_to_front() {
        let list = full_list().insert(entry("p2", 10));
        assert_eq!(list.len(), RECENT_CAPACITY);
        assert_eq!(payloads(&list), vec!["p2", "p5", "p4", "p3", "p1"]);
        assert_eq!(list.get(0).map(|e| e.created_at().timestamp_millis()), Some(10));
    }

    #[test]
    fn test_remove_preserves_order() {
        let list = full_list().remove(1);
        assert_eq!(payloads(&list), vec!["p5", "p3", "p2", "p1"]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let list = full_list();
        assert_eq!(list.clone().remove(5), list);
        assert_eq!(list.clone().remove(usize::MAX), list);
        assert_eq!(RecentList::new().remove(0), RecentList::new());
    }

    #[test]
    fn test_serialized_shape() {
        let list = RecentList::new().insert(RecentEntry::new(
            Kind::Wifi,
            Payload::from("WIFI:S:x;T:WPA;P:;H:false;;"),
            Utc.timestamp_millis_opt(1_700_000_000_123)
                .single()
                .expect("valid timestamp"),
        ));
        let json = serde_json::to_string(&list).expect("serialize list");
        assert_eq!(
            json,
            r#"[{"type":"wifi","content":"WIFI:S:x;T:WPA;P:;H:false;;","timestamp":1700000000123}]"#
        );
    }

    #[test]
    fn test_deserialize_normalizes() {
        let json = r#"[
            {"type":"url","content":"a","timestamp":7},
            {"type":"text","content":"a","timestamp":6},
            {"type":"text","content":"b","timestamp":5},
            {"type":"text","content":"c","timestamp":4},
            {"type":"text","content":"d","timestamp":3},
            {"type":"text","content":"e","timestamp":2},
            {"type":"text","content":"f","timestamp":1}
        ]"#;
        let list: RecentList = serde_json::from_str(json).expect("parse list");
        assert_eq!(payloads(&list), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(list.get(0).map(RecentEntry::kind), Some(Kind::Url));
    }

    #[test]
    fn test_display_timestamp_format() {
        let formatted = entry("a", 0).display_timestamp();
        assert_eq!(formatted.len(), "1970-01-01 00:00:00".len());
    }
}
