//! Board rendering.
//!
//! Turns the record store into a single self-contained HTML page sized for
//! printing, plus a JSON export of the records.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html      # The board: grid of portraits, print-ready
//! └── records.json    # Every record, in board order
//! ```
//!
//! ## Layout
//!
//! - `grid_size` portraits per row (CSS grid).
//! - `@page { size: <paper_size> }` so the browser's print dialog picks the
//!   right sheet; cards never split across pages.
//! - Records with naming errors still appear on the board, highlighted, and
//!   are listed in a panel above the grid. The panel and the highlight are
//!   screen-only and never printed.
//!
//! Images are `data:` URIs from ingestion, so `index.html` has no companion
//! files.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All record text is escaped automatically.

use crate::config::BoardConfig;
use crate::store::RecordStore;
use crate::types::Record;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const BOARD_FILE: &str = "index.html";
pub const RECORDS_FILE: &str = "records.json";

const CSS_STATIC: &str = r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    color: #111111;
    background: #ffffff;
}
.board-title { text-align: center; margin: 1rem 0; }
.board {
    display: grid;
    grid-template-columns: repeat(var(--grid-size), 1fr);
    gap: 0.75rem;
    padding: 0.75rem;
}
.card {
    display: flex;
    flex-direction: column;
    align-items: center;
    text-align: center;
    break-inside: avoid;
    page-break-inside: avoid;
}
.card img {
    width: 100%;
    aspect-ratio: 4 / 5;
    object-fit: cover;
}
.card .name { font-weight: 600; margin-top: 0.25rem; }
.card .city, .card .year { font-size: 0.8rem; color: #666666; }
.card.in-error { outline: 3px solid #d33; }
.errors {
    margin: 1rem;
    padding: 0.75rem 1rem;
    border: 1px solid #d33;
    background: #fff4f4;
}
.errors h2 { margin-top: 0; font-size: 1rem; }
@media print {
    .errors { display: none; }
    .card.in-error { outline: none; }
}
"#;

/// Render the full board document.
pub fn render_board(store: &RecordStore, config: &BoardConfig) -> Markup {
    let css = board_css(config);
    let errored = store.errored();

    html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.title) }
                style { (PreEscaped(css)) }
            }
            body {
                @if !errored.is_empty() {
                    (error_panel(&errored))
                }
                h1.board-title { (config.title) }
                main.board {
                    @for record in store.all() {
                        (card(record))
                    }
                }
            }
        }
    }
}

/// Write `index.html` into `output_dir`, creating it if needed.
pub fn write_board(
    store: &RecordStore,
    config: &BoardConfig,
    output_dir: &Path,
) -> Result<PathBuf, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(BOARD_FILE);
    fs::write(&path, render_board(store, config).into_string())?;
    info!(path = %path.display(), records = store.len(), "wrote board");
    Ok(path)
}

/// Write every record, in board order, as pretty JSON.
pub fn write_records_json(store: &RecordStore, path: &Path) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(store.all())?;
    fs::write(path, json)?;
    info!(path = %path.display(), "wrote records");
    Ok(())
}

/// Page size and column count on top of the static stylesheet.
fn board_css(config: &BoardConfig) -> String {
    format!(
        "@page {{ size: {paper}; margin: 1cm; }}\n:root {{ --grid-size: {cols}; }}\n{CSS_STATIC}",
        paper = config.paper_size.css_size(),
        cols = config.grid_size,
    )
}

fn card(record: &Record) -> Markup {
    let class = if record.has_error() {
        "card in-error"
    } else {
        "card"
    };
    html! {
        figure class=(class) title=[record.error_message.as_deref()] {
            img src=(record.image.as_str()) alt=(record.name);
            figcaption {
                div.name { (record.name) }
                @if !record.city.is_empty() {
                    div.city { (record.city) }
                }
                @if !record.year.is_empty() {
                    div.year { (record.year) }
                }
            }
        }
    }
}

fn error_panel(errored: &[&Record]) -> Markup {
    html! {
        section.errors {
            h2 { "Fichiers mal nommés (" (errored.len()) ")" }
            ul {
                @for record in errored {
                    li {
                        strong { (record.name) }
                        " : " (record.error_message())
                    }
                }
            }
        }
    }
}
