//! Weighted fuzzy search over fee records.

mod index;
mod matcher;

pub use index::{MIN_QUERY_CHARS, SearchField, SearchHit, SearchIndex};
pub use matcher::{DEFAULT_THRESHOLD, FuzzyMatcher, Matcher, SubstringMatcher, substring_distance};

/// Lower-cases, strips Spanish diacritics and collapses whitespace so that
/// `"Constancia  de ESTUDIOS"` and `"constancia de estudios"` compare equal.
pub fn fold(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Constancia  de ESTUDIOS", "constancia de estudios")]
    #[case("Matrícula Ñandú", "matricula nandu")]
    #[case("  ", "")]
    fn test_fold(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fold(input), expected);
    }
}
