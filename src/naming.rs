//! Filename parsing for the enrollment naming convention.
//!
//! Every portrait dropped on the board is named after the person it shows:
//!
//! ```text
//! <NAME> <CITY-TOKEN(S)> Année de 1ère inscription <YEAR>.<ext>
//! ```
//!
//! The name part mixes an uppercase family name with a capitalized given name,
//! so the only way to tell where the name stops and the city starts is case:
//! city tokens are written ALL-CAPS. A city may span one or two tokens.
//!
//! - `DOE John PARIS Année de 1ère inscription 2021.jpg` → "DOE John" / "PARIS"
//! - `DOE John SAINT ETIENNE Année de 1ère inscription 2021.jpg` → "DOE John" / "SAINT ETIENNE"
//! - `DOE John St ETIENNE Année de 1ère inscription 2021.jpg` → "DOE John" / "St ETIENNE"
//!
//! `St` is the one abbreviation people never write in capitals, so it counts as
//! uppercase for the city test. The stored city keeps the original spelling.
//!
//! Filenames that don't follow the convention still produce a result: the best
//! available name plus a [`NamingError`]. Parsing never fails hard.

use thiserror::Error;

/// Literal text separating the name/city part from the year.
pub const YEAR_MARKER: &str = "Année de 1ère inscription";

/// Minimum number of tokens before the marker: two for the name, one for the city.
const MIN_TOKENS: usize = 3;

/// Why a filename could not be fully split into name, city and year.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingError {
    #[error(
        "Le nom du fichier ne correspond pas à la convention de nommage (NOM Prénom VILLE Année de 1ère inscription AAAA)"
    )]
    ConventionViolation,
}

/// Result of parsing a portrait filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Display name, always populated (falls back to the bare stem).
    pub name: String,
    /// City token(s), empty when no city could be identified.
    pub city: String,
    /// `"Année de 1ère inscription <suffix>"`, empty when the marker is missing.
    pub year: String,
    pub error: Option<NamingError>,
}

impl ParsedName {
    fn violation(name: impl Into<String>, year: String) -> Self {
        Self {
            name: name.into(),
            city: String::new(),
            year,
            error: Some(NamingError::ConventionViolation),
        }
    }
}

/// Parse a portrait filename following the enrollment convention.
///
/// Handles these patterns:
/// - `"DOE John PARIS Année de 1ère inscription 2021.jpg"` → name="DOE John", city="PARIS"
/// - `"DOE John SAINT ETIENNE Année de 1ère inscription 2021.jpg"` → city="SAINT ETIENNE"
/// - `"DOE Année de 1ère inscription 2021.jpg"` → name="DOE", city="", error
/// - `"DOE John paris Année de 1ère inscription 2021.jpg"` → name="DOE John paris", error
/// - `"holiday.jpg"` → name="holiday", year="", error
pub fn parse_filename(filename: &str) -> ParsedName {
    let stem = strip_extension(filename);

    let Some((prefix, suffix)) = split_on_marker(stem) else {
        return ParsedName::violation(stem, String::new());
    };

    let name_part = prefix.trim();
    let year = format!("{} {}", YEAR_MARKER, suffix.trim());

    let tokens: Vec<&str> = name_part.split(' ').collect();
    let m = tokens.len();
    if m < MIN_TOKENS {
        return ParsedName::violation(name_part, year);
    }

    let last = tokens[m - 1];
    if !looks_uppercase(last) {
        return ParsedName::violation(tokens.join(" ").trim(), year);
    }

    let second_last = tokens[m - 2];
    let (name_tokens, city) = if looks_uppercase(second_last) {
        (
            &tokens[..m - 2],
            format!("{} {}", second_last.trim(), last.trim()),
        )
    } else {
        (&tokens[..m - 1], last.trim().to_string())
    };

    ParsedName {
        name: name_tokens.join(" ").trim().to_string(),
        city,
        year,
        error: None,
    }
}

/// Drop the final extension: a trailing `.` followed by at least one character
/// that is neither `.` nor `/`. `"a.b.jpg"` → `"a.b"`, `"file."` is unchanged.
fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(dot) => {
            let ext = &filename[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                filename
            } else {
                &filename[..dot]
            }
        }
        None => filename,
    }
}

/// Split around the last occurrence of [`YEAR_MARKER`].
///
/// A stem spanning several lines never matches.
fn split_on_marker(stem: &str) -> Option<(&str, &str)> {
    if stem.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
        return None;
    }
    let pos = stem.rfind(YEAR_MARKER)?;
    Some((&stem[..pos], &stem[pos + YEAR_MARKER.len()..]))
}

/// True when the token is all caps, with `St` accepted as `ST`.
fn looks_uppercase(token: &str) -> bool {
    token.to_uppercase() == token.replacen("St", "ST", 1)
}
