//! Pairs Arabic verse text with its translation by position.

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use crate::{
    chapter::{PositionedText, Verse},
    text_utils::parse_position,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VerseMapError {
    /// Arabic text and translation carry a different number of verses.
    LengthMismatch { arabic: usize, translation: usize },
    /// A position exists in the Arabic text but not in the translation.
    MissingPosition(u16),
    /// A position key is not a decimal verse number.
    InvalidPosition(String),
}

impl fmt::Display for VerseMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                arabic,
                translation,
            } => write!(
                f,
                "verse count mismatch: {} arabic, {} translated",
                arabic, translation
            ),
            Self::MissingPosition(position) => {
                write!(f, "verse {} has no translation", position)
            }
            Self::InvalidPosition(key) => write!(f, "invalid verse position {:?}", key),
        }
    }
}

fn index_by_position(text: &PositionedText) -> Result<BTreeMap<u16, &str>, VerseMapError> {
    let mut indexed = BTreeMap::new();
    for (key, value) in text {
        let position =
            parse_position(key).ok_or_else(|| VerseMapError::InvalidPosition(key.clone()))?;
        indexed.insert(position, value.as_str());
    }
    Ok(indexed)
}

/// Build the ordered verse sequence, position ascending.
///
/// Both inputs must describe the same positions. Any disagreement is
/// reported instead of truncating to the shorter side.
pub fn map_verses(
    arabic: &PositionedText,
    translation: &PositionedText,
) -> Result<Vec<Verse>, VerseMapError> {
    if arabic.len() != translation.len() {
        return Err(VerseMapError::LengthMismatch {
            arabic: arabic.len(),
            translation: translation.len(),
        });
    }

    let arabic = index_by_position(arabic)?;
    let translation = index_by_position(translation)?;

    // "01" and "1" collapse to one position; catch that as a length problem.
    if arabic.len() != translation.len() {
        return Err(VerseMapError::LengthMismatch {
            arabic: arabic.len(),
            translation: translation.len(),
        });
    }

    arabic
        .into_iter()
        .map(|(position, arabic_text)| {
            let translation_text = translation
                .get(&position)
                .ok_or(VerseMapError::MissingPosition(position))?;
            Ok(Verse {
                verse_number: position,
                arabic_text: String::from(arabic_text),
                translation_text: String::from(*translation_text),
            })
        })
        .collect()
}

/// Verse numbers in recitation order.
pub fn verse_numbers(verses: &[Verse]) -> Vec<u16> {
    verses.iter().map(|verse| verse.verse_number).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, vec};

    fn positioned(entries: &[(&str, &str)]) -> PositionedText {
        entries
            .iter()
            .map(|(key, value)| (String::from(*key), String::from(*value)))
            .collect()
    }

    #[test]
    fn pairs_by_numeric_position() {
        let arabic = positioned(&[("1", "a1"), ("2", "a2"), ("10", "a10")]);
        let translation = positioned(&[("10", "t10"), ("2", "t2"), ("1", "t1")]);

        let verses = map_verses(&arabic, &translation).unwrap();
        assert_eq!(verse_numbers(&verses), vec![1, 2, 10]);
        assert_eq!(verses[2].arabic_text, "a10");
        assert_eq!(verses[2].translation_text, "t10");
    }

    #[test]
    fn length_mismatch_is_reported() {
        let arabic = positioned(&[("1", "a1"), ("2", "a2")]);
        let translation = positioned(&[("1", "t1")]);

        assert_eq!(
            map_verses(&arabic, &translation),
            Err(VerseMapError::LengthMismatch {
                arabic: 2,
                translation: 1
            })
        );
    }

    #[test]
    fn disjoint_positions_are_reported() {
        let arabic = positioned(&[("1", "a1"), ("2", "a2")]);
        let translation = positioned(&[("1", "t1"), ("3", "t3")]);

        assert_eq!(
            map_verses(&arabic, &translation),
            Err(VerseMapError::MissingPosition(2))
        );
    }

    #[test]
    fn non_numeric_keys_are_rejected() {
        let arabic = positioned(&[("x", "a1")]);
        let translation = positioned(&[("1", "t1")]);

        let err = map_verses(&arabic, &translation).unwrap_err();
        assert_eq!(err, VerseMapError::InvalidPosition(String::from("x")));
        assert_eq!(format!("{}", err), "invalid verse position \"x\"");
    }

    #[test]
    fn empty_chapter_maps_to_empty_list() {
        let verses = map_verses(&PositionedText::new(), &PositionedText::new()).unwrap();
        assert!(verses.is_empty());
        assert!(verse_numbers(&verses).is_empty());
    }
}
