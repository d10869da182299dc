//! # Trombi
//!
//! Builds a printable class photo board (a *trombinoscope*) from a folder of
//! portraits. The filename is the only data source: each image is named
//! after the person it shows, and the tool parses name, city and enrollment
//! year out of it.
//!
//! ```text
//! DOE John PARIS Année de 1ère inscription 2021.jpg
//! └──┬───┘ └─┬─┘ └─────────────┬──────────────┘
//!   name    city              year
//! ```
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      photos/         →  intakes        (image files, MIME-gated)
//! 2. Ingest    intakes         →  RecordStore    (parallel reads, sequential upserts)
//! 3. Generate  RecordStore     →  dist/          (index.html + records.json)
//! ```
//!
//! The record store is the heart of it. It is keyed by display name:
//! processing a file whose name is already on the board replaces the old
//! record, and the collection stays sorted in locale order after every
//! insert. Files that break the naming convention are kept, carrying an
//! error message, so the board shows who still needs renaming.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Filename convention parser: name / city / year split |
//! | [`collation`] | Locale-aware name comparison used for board order |
//! | [`types`] | `Record` and the opaque `ImageRef` |
//! | [`store`] | Sorted, deduplicated record collection and its error view |
//! | [`scan`] | Folder scanning, MIME gating, parallel reads, fan-in |
//! | [`config`] | `trombi.toml` loading, merging and validation |
//! | [`generate`] | Printable HTML board and JSON export, rendered with Maud |
//! | [`output`] | CLI inventory and progress formatting |
//!
//! # Design Decisions
//!
//! ## Errors Are Data
//!
//! A filename that doesn't fit the convention is not a failure. The parser
//! always returns the best name it can and attaches a
//! [`naming::NamingError`]; the record lands on the board like any other.
//! Only I/O and configuration problems surface as `Err`.
//!
//! ## One Owner, No Locks
//!
//! The store is a plain value mutated through `&mut self`. Reading and
//! base64-encoding files is the slow part and runs on rayon; the results are
//! fanned back into the calling thread and upserted in scan order. Nothing
//! else is shared.
//!
//! ## Self-Contained Board
//!
//! Images are embedded as `data:` URIs, so `index.html` can be mailed,
//! archived or printed without the photo folder next to it.

pub mod collation;
pub mod config;
pub mod generate;
pub mod naming;
pub mod output;
pub mod scan;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
