//! Photo folder scanning and ingestion.
//!
//! This is the file-facing side of the tool: it decides which files are
//! portraits, reads them, and feeds `(filename, image)` pairs into a
//! [`RecordStore`].
//!
//! ## Folder Layout
//!
//! ```text
//! photos/                                                  # Source folder
//! ├── trombi.toml                                          # Board config (optional)
//! ├── DOE John PARIS Année de 1ère inscription 2021.jpg
//! ├── MARTIN Léa SAINT MALO Année de 1ère inscription 2022.png
//! ├── notes.txt                                            # Not an image, skipped
//! └── .DS_Store                                            # Hidden, skipped
//! ```
//!
//! Only the top level is scanned unless `recursive` is set, in which case
//! subfolders are walked too. Subfolder names play no part in parsing.
//!
//! ## MIME Gating
//!
//! A file is accepted when its extension maps to a format whose MIME type is
//! `image/*`. File contents are not inspected.
//!
//! ## Reading and Fan-In
//!
//! Files are read and base64-encoded in parallel with rayon. Results are then
//! applied to the store one at a time, in scan order, on the calling thread.
//! Every upsert sees the complete result of the ones before it, and when two
//! files derive the same name the later one in walk order wins. Walk order is
//! depth-first with each folder's entries sorted by file name, as returned by
//! [`scan`].
//!
//! A file that cannot be read is reported and skipped. A filename that breaks
//! the naming convention is reported and still stored, carrying its error.

use crate::store::RecordStore;
use crate::types::ImageRef;
use image::ImageFormat;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Source folder not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Scanning options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Walk subfolders as well as the top level.
    pub recursive: bool,
}

/// A file accepted for ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intake {
    /// File name only, as passed to the parser.
    pub filename: String,
    pub path: PathBuf,
    pub mime: &'static str,
}

/// Progress events emitted during [`ingest`], one per accepted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestEvent {
    /// The file was read and its record upserted.
    Parsed {
        filename: String,
        name: String,
        error: Option<String>,
    },
    /// The file could not be read; nothing was stored.
    ReadFailed { filename: String, reason: String },
}

/// Counts from one [`ingest`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub parsed: usize,
    pub naming_errors: usize,
    pub read_failures: usize,
}

/// Find every image in `root`, in walk order.
///
/// Each folder's entries are visited by file name, and a subfolder's images
/// come at the subfolder's own position in that listing.
pub fn scan(root: &Path, options: ScanOptions) -> Result<Vec<Intake>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::SourceNotFound(root.to_path_buf()));
    }

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let mut intakes = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(&e.file_name().to_string_lossy()))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        match image_mime(path) {
            Some(mime) => intakes.push(Intake {
                filename: entry.file_name().to_string_lossy().into_owned(),
                path: path.to_path_buf(),
                mime,
            }),
            None => debug!(path = %path.display(), "skipping non-image file"),
        }
    }

    info!(count = intakes.len(), root = %root.display(), "scanned photo folder");
    Ok(intakes)
}

/// Read a file into a `data:` URI.
pub fn read_image(intake: &Intake) -> Result<ImageRef, ScanError> {
    let bytes = fs::read(&intake.path).map_err(|source| ScanError::Read {
        path: intake.path.clone(),
        source,
    })?;
    Ok(ImageRef::data_uri(intake.mime, &bytes))
}

/// Read every intake in parallel, then upsert the results into `store` in order.
pub fn ingest(
    intakes: &[Intake],
    store: &mut RecordStore,
    events: Option<Sender<IngestEvent>>,
) -> IngestSummary {
    let images: Vec<Result<ImageRef, ScanError>> = intakes.par_iter().map(read_image).collect();

    let mut summary = IngestSummary::default();
    for (intake, image) in intakes.iter().zip(images) {
        let event = match image {
            Ok(image) => {
                let record = store.process_file(&intake.filename, image);
                summary.parsed += 1;
                if let Some(message) = &record.error_message {
                    summary.naming_errors += 1;
                    warn!(file = %intake.filename, "{message}");
                } else {
                    debug!(file = %intake.filename, name = %record.name, "parsed");
                }
                IngestEvent::Parsed {
                    filename: intake.filename.clone(),
                    name: record.name.clone(),
                    error: record.error_message.clone(),
                }
            }
            Err(e) => {
                summary.read_failures += 1;
                warn!(file = %intake.filename, "{e}");
                IngestEvent::ReadFailed {
                    filename: intake.filename.clone(),
                    reason: e.to_string(),
                }
            }
        };
        if let Some(tx) = &events {
            // Receiver gone means nobody is printing; keep ingesting.
            let _ = tx.send(event);
        }
    }
    summary
}

/// MIME type for an image file, judged by extension.
fn image_mime(path: &Path) -> Option<&'static str> {
    let mime = ImageFormat::from_path(path).ok()?.to_mime_type();
    mime.starts_with("image/").then_some(mime)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}
