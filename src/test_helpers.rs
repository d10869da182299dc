//! Shared test utilities for the trombi test suite.
//!
//! Provides a photo-folder fixture, record builders, lookup helpers and bulk
//! extractors for [`RecordStore`] assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_photos();
//! let intakes = scan(tmp.path(), ScanOptions::default()).unwrap();
//! let mut store = RecordStore::new();
//! ingest(&intakes, &mut store, None);
//!
//! assert_eq!(error_names(&store), vec!["holiday"]);
//! assert_eq!(find_record(&store, "MARTIN Léa").city, "SAINT MALO");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Intake;
use crate::store::RecordStore;
use crate::types::{ImageRef, Record};

// =========================================================================
// Fixture setup
// =========================================================================

/// Filenames written by [`setup_photos`], in byte (scan) order.
///
/// Three follow the convention; `holiday.jpg` does not.
pub const PHOTO_FILENAMES: &[&str] = &[
    "DOE John PARIS Année de 1ère inscription 2021.jpg",
    "DUPONT Marie Claire LYON Année de 1ère inscription 2018.jpeg",
    "MARTIN Léa SAINT MALO Année de 1ère inscription 2022.png",
    "holiday.jpg",
];

/// A temp photo folder holding [`PHOTO_FILENAMES`].
pub fn setup_photos() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_photos(tmp.path(), PHOTO_FILENAMES);
    tmp
}

/// Write placeholder image files. Contents are never decoded, so a few
/// bytes derived from the name are enough to tell files apart.
pub fn write_photos(dir: &Path, filenames: &[&str]) {
    for name in filenames {
        std::fs::write(dir.join(name), name.as_bytes()).unwrap();
    }
}

// =========================================================================
// Builders
// =========================================================================

pub fn img(s: &str) -> ImageRef {
    ImageRef::from(s)
}

/// A clean record with placeholder city and year.
pub fn record(name: &str, image: &str) -> Record {
    Record {
        name: name.to_string(),
        city: "PARIS".to_string(),
        year: "Année de 1ère inscription 2021".to_string(),
        image: img(image),
        error_message: None,
    }
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a record by name. Panics if not found.
pub fn find_record<'a>(store: &'a RecordStore, name: &str) -> &'a Record {
    store.get(name).unwrap_or_else(|| {
        let names = record_names(store);
        panic!("record '{name}' not found. Available: {names:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All record names in store order.
pub fn record_names(store: &RecordStore) -> Vec<&str> {
    store.all().iter().map(|r| r.name.as_str()).collect()
}

/// Names of records in error, in store order.
pub fn error_names(store: &RecordStore) -> Vec<&str> {
    store.errored().into_iter().map(|r| r.name.as_str()).collect()
}

/// Filenames of scanned intakes, in scan order.
pub fn intake_names(intakes: &[Intake]) -> Vec<&str> {
    intakes.iter().map(|i| i.filename.as_str()).collect()
}
