// AppInventory - core/collate.rs
//
// Name ordering for the exported sheet, approximating the Unicode root
// collation at its three default strengths:
//   1. base letters (accents and case ignored)
//   2. accents ("Eclair" before "Éclair")
//   3. case, lowercase first ("xcode" before "Xcode")
// The exact name is the final tie-break so the order is total.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Precomputed comparison key for one name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    base: String,
    accents: String,
    case: Vec<bool>,
    exact: String,
}

impl CollationKey {
    pub fn new(name: &str) -> Self {
        let decomposed: Vec<char> = name.nfd().collect();

        let base = decomposed
            .iter()
            .filter(|c| !is_combining_mark(**c))
            .flat_map(|c| c.to_lowercase())
            .collect();
        let accents = decomposed.iter().flat_map(|c| c.to_lowercase()).collect();
        let case = decomposed
            .iter()
            .filter(|c| !is_combining_mark(**c))
            .map(|c| c.is_uppercase())
            .collect();

        Self {
            base,
            accents,
            case,
            exact: name.to_string(),
        }
    }
}
