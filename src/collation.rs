//! Locale-aware name ordering.
//!
//! The board lists people the way a class register does: `DURAND` and
//! `Durand` sit together, `ÉLISE` files under E, and `D’ARTAGNAN` comes
//! before `DANTON`. Byte order gets all of these wrong, so records are sorted
//! with [`compare`], which uses the Unicode root collation (the same table
//! browsers use for `localeCompare`):
//!
//! - whitespace < punctuation < symbols < digits < letters;
//! - accents only break ties, unaccented first;
//! - case breaks remaining ties, lowercase first.
//!
//! Distinct strings that still collate equal fall back to code-point order,
//! so the ordering is total.

use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;
use tracing::warn;

thread_local! {
    static ROOT_COLLATOR: Option<Collator> = root_collator();
}

/// Root locale, tertiary strength, non-ignorable punctuation.
fn root_collator() -> Option<Collator> {
    Collator::try_new(&Default::default(), CollatorOptions::new())
        .inspect_err(|e| warn!(error = %e, "collation data unavailable, sorting by code point"))
        .ok()
}

/// Compare two display names.
pub fn compare(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR
        .with(|collator| match collator {
            Some(c) => c.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| compare(a, b));
        v
    }

    #[test]
    fn case_does_not_split_families() {
        assert_eq!(
            sorted(&["DURAND Zoé", "Dupont Anne", "DUPONT Marc"]),
            vec!["Dupont Anne", "DUPONT Marc", "DURAND Zoé"]
        );
    }

    #[test]
    fn accented_initial_files_under_base_letter() {
        assert_eq!(
            sorted(&["FABRE Luc", "ÉLISE Marie", "DAVID Paul"]),
            vec!["DAVID Paul", "ÉLISE Marie", "FABRE Luc"]
        );
    }

    #[test]
    fn unaccented_before_accented_on_tie() {
        assert_eq!(compare("cote", "côte"), Ordering::Less);
        assert_eq!(compare("côte", "cote"), Ordering::Greater);
    }

    #[test]
    fn lowercase_before_uppercase_on_tie() {
        assert_eq!(compare("martin", "Martin"), Ordering::Less);
        assert_eq!(compare("Martin", "MARTIN"), Ordering::Less);
    }

    #[test]
    fn space_sorts_before_letters() {
        assert_eq!(compare("LE Anne", "LEBLANC Anne"), Ordering::Less);
    }

    #[test]
    fn typographic_apostrophe_sorts_before_letters() {
        assert_eq!(
            sorted(&["DANTON Paul", "D’ARTAGNAN Charles"]),
            vec!["D’ARTAGNAN Charles", "DANTON Paul"]
        );
    }

    #[test]
    fn underscore_sorts_before_hyphen() {
        assert_eq!(
            sorted(&["MARTIN-DURAND Léa", "MARTIN_X"]),
            vec!["MARTIN_X", "MARTIN-DURAND Léa"]
        );
    }

    #[test]
    fn space_sorts_before_punctuation() {
        assert_eq!(compare("MARTIN DURAND", "MARTIN-DURAND"), Ordering::Less);
        assert_eq!(compare("MARTIN DURAND", "MARTIN_DURAND"), Ordering::Less);
    }

    #[test]
    fn digits_sort_before_letters() {
        assert_eq!(compare("IMG_0042", "IMG_ABCD"), Ordering::Less);
    }

    #[test]
    fn thorn_is_a_letter_after_z() {
        assert_eq!(sorted(&["Þór Ari", "Tz Bob"]), vec!["Tz Bob", "Þór Ari"]);
        assert_eq!(compare("Zola", "Þór"), Ordering::Less);
    }

    #[test]
    fn distinct_strings_never_equal() {
        assert_ne!(compare("Éa", "Eá"), Ordering::Equal);
        assert_eq!(compare("Same", "Same"), Ordering::Equal);
    }
}
