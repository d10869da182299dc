//! The board's record collection.
//!
//! Records are keyed by display name. Processing a file whose name is already
//! on the board replaces the earlier record (last write wins), which is how a
//! corrected photo gets swapped in: drop it again and the old one goes away.
//!
//! The collection is kept sorted by [`collation::compare`] after every insert,
//! so readers never sort. The set of records with naming errors is not stored;
//! [`RecordStore::errored`] filters on each call.
//!
//! Mutation goes through `&mut self`. Callers that read files concurrently fan
//! their results back into one thread before upserting (see [`crate::scan::ingest`]).

use crate::collation;
use crate::naming::parse_filename;
use crate::types::{ImageRef, Record};
use std::cmp::Ordering;

#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `filename`, attach `image`, and upsert the result.
    ///
    /// Returns the stored record so callers can report naming errors.
    pub fn process_file(&mut self, filename: &str, image: ImageRef) -> &Record {
        self.upsert(Record::new(parse_filename(filename), image))
    }

    /// Insert `record`, replacing any record with the same name.
    ///
    /// The remaining records are already in order, so the new one goes straight
    /// to its sorted slot. Returns the stored record.
    pub fn upsert(&mut self, record: Record) -> &Record {
        self.records.retain(|r| r.name != record.name);
        let pos = self
            .records
            .partition_point(|r| collation::compare(&r.name, &record.name) == Ordering::Less);
        self.records.insert(pos, record);
        &self.records[pos]
    }

    /// All records in name order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Records whose filename broke the naming convention, in name order.
    pub fn errored(&self) -> Vec<&Record> {
        self.records.iter().filter(|r| r.has_error()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
