use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::status::Status;

/// One tracked roadwork entry, keyed by its id in the enclosing [`SyncSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRecord {
    pub status: Status,
    /// Set by a client whose local edit has not been acknowledged yet.
    pub dirty: bool,
    /// Epoch millis at which the server last accepted a value for this record.
    pub server_update_time: i64,
    /// Epoch millis at which the holder considers its value current.
    pub local_update_time: i64,
}

impl SyncRecord {
    /// A record as the server stores it: clean, both timestamps equal.
    pub fn clean(status: Status, update_time: i64) -> Self {
        Self {
            status,
            dirty: false,
            server_update_time: update_time,
            local_update_time: update_time,
        }
    }

    /// A client-side edit on top of the server value seen at `server_update_time`.
    pub fn edited(status: Status, server_update_time: i64, local_update_time: i64) -> Self {
        Self {
            status,
            dirty: true,
            server_update_time,
            local_update_time,
        }
    }

    /// Stamp both timestamps with the same authoritative time.
    pub fn stamp(&mut self, update_time: i64) {
        self.server_update_time = update_time;
        self.local_update_time = update_time;
    }
}

/// Records of one namespace, keyed by record id.
///
/// Serialized as a plain JSON object (`{"<id>": {..record..}}`), which is both
/// the request/response body and the persisted form. Keys are kept sorted so
/// that saved files are stable across writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncSet(BTreeMap<String, SyncRecord>);

impl SyncSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, record: SyncRecord) -> Option<SyncRecord> {
        self.0.insert(id.into(), record)
    }

    pub fn get(&self, id: &str) -> Option<&SyncRecord> {
        self.0.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut SyncRecord> {
        self.0.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SyncRecord> {
        self.0.iter()
    }

    pub fn records_mut(&mut self) -> btree_map::ValuesMut<'_, String, SyncRecord> {
        self.0.values_mut()
    }

    /// Number of records still flagged dirty.
    pub fn dirty_count(&self) -> usize {
        self.0.values().filter(|r| r.dirty).count()
    }
}

impl FromIterator<(String, SyncRecord)> for SyncSet {
    fn from_iter<I: IntoIterator<Item = (String, SyncRecord)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for SyncSet {
    type Item = (String, SyncRecord);
    type IntoIter = btree_map::IntoIter<String, SyncRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SyncSet {
    type Item = (&'a String, &'a SyncRecord);
    type IntoIter = btree_map::Iter<'a, String, SyncRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let json = r#"{
            "rw-1": {"status": "Ongoing", "dirty": true, "serverUpdateTime": 10, "localUpdateTime": 12}
        }"#;
        let set: SyncSet = serde_json::from_str(json).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("rw-1"), Some(&SyncRecord::edited(Status::Ongoing, 10, 12)));

        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["rw-1"]["serverUpdateTime"], 10);
        assert_eq!(value["rw-1"]["localUpdateTime"], 12);
        assert_eq!(value["rw-1"]["dirty"], true);
        assert_eq!(value["rw-1"]["status"], "Ongoing");
    }

    #[test]
    fn test_missing_field_rejected() {
        let json = r#"{"rw-1": {"status": "New", "dirty": false, "serverUpdateTime": 1}}"#;
        assert!(serde_json::from_str::<SyncSet>(json).is_err());
    }

    #[test]
    fn test_stamp_sets_both_times() {
        let mut record = SyncRecord::edited(Status::New, 1, 2);
        record.stamp(99);
        assert_eq!(record.server_update_time, 99);
        assert_eq!(record.local_update_time, 99);
    }

    #[test]
    fn test_dirty_count() {
        let set: SyncSet = [
            ("a".to_string(), SyncRecord::edited(Status::New, 1, 1)),
            ("b".to_string(), SyncRecord::clean(Status::New, 1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.dirty_count(), 1);
    }
}
