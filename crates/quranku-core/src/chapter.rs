//! Chapter data model shared by sources, the mapper and the page controller.

use alloc::{collections::BTreeMap, string::String};
use core::fmt::{self, Write};

use heapless::String as HeaplessString;

use crate::text_utils::bounded_copy;

pub const CHAPTER_ID_BYTES: usize = 8;
pub const CHAPTER_NAME_BYTES: usize = 32;
pub const FIRST_CHAPTER: u16 = 1;
pub const LAST_CHAPTER: u16 = 114;

pub type ChapterName = HeaplessString<CHAPTER_NAME_BYTES>;

/// Text keyed by verse position, as delivered by the data source (`"1"`, `"2"`, ...).
pub type PositionedText = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChapterIdError {
    Empty,
    TooLong,
}

impl fmt::Display for ChapterIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("chapter identifier is empty"),
            Self::TooLong => write!(
                f,
                "chapter identifier exceeds {} bytes",
                CHAPTER_ID_BYTES
            ),
        }
    }
}

/// Opaque route key for a chapter. Only a successful source lookup makes it valid.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ChapterId(HeaplessString<CHAPTER_ID_BYTES>);

impl ChapterId {
    pub fn parse(raw: &str) -> Result<Self, ChapterIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ChapterIdError::Empty);
        }

        let mut id = HeaplessString::new();
        id.push_str(trimmed).map_err(|_| ChapterIdError::TooLong)?;
        Ok(Self(id))
    }

    pub fn from_number(number: u16) -> Self {
        let mut id = HeaplessString::new();
        // u16::MAX is five digits, always fits.
        let _ = write!(id, "{}", number);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Numeric value of the key when it is a plain chapter number.
    pub fn number(&self) -> Option<u16> {
        crate::text_utils::parse_position(self.as_str())
    }

    /// Route key with numeric spellings folded together (`"01"` becomes `"1"`).
    pub fn canonical(&self) -> Self {
        self.number()
            .map(Self::from_number)
            .unwrap_or_else(|| self.clone())
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive chapter metadata. Replaced wholesale on every fetch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChapterSummary {
    pub number: u16,
    pub latin_name: ChapterName,
    pub verse_count: u16,
}

impl ChapterSummary {
    pub fn new(number: u16, latin_name: &str, verse_count: u16) -> Self {
        Self {
            number,
            latin_name: bounded_copy(latin_name),
            verse_count,
        }
    }
}

/// One verse in canonical recitation order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Verse {
    pub verse_number: u16,
    pub arabic_text: String,
    pub translation_text: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Translation {
    pub name: String,
    pub text: PositionedText,
}

/// Full chapter payload: metadata, Arabic text and translations by language code.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChapterBody {
    pub summary: ChapterSummary,
    pub arabic_text: PositionedText,
    pub translations: BTreeMap<String, Translation>,
}

impl ChapterBody {
    pub fn translation(&self, language: &str) -> Option<&Translation> {
        self.translations.get(language)
    }
}

/// Catalog neighbor as seen from another chapter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChapterLink {
    pub id: ChapterId,
    pub name: ChapterName,
}

impl ChapterLink {
    pub fn to(summary: &ChapterSummary) -> Self {
        Self {
            id: ChapterId::from_number(summary.number),
            name: summary.latin_name.clone(),
        }
    }
}

/// Chapter summary together with its neighbors in the catalog.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChapterListing {
    pub summary: ChapterSummary,
    pub previous: Option<ChapterLink>,
    pub next: Option<ChapterLink>,
}

/// Data resolved once per identifier before the page controller runs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageProps {
    pub chapter_id: ChapterId,
    pub murottal_url: String,
    pub previous: Option<ChapterLink>,
    pub next: Option<ChapterLink>,
}

/// Neighbor identifier `offset` chapters away, or `None` past either end of the catalog.
pub fn neighbor_id(number: u16, offset: i32, last_chapter: u16) -> Option<ChapterId> {
    let target = i32::from(number) + offset;
    if target < i32::from(FIRST_CHAPTER) || target > i32::from(last_chapter) {
        return None;
    }
    u16::try_from(target).ok().map(ChapterId::from_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_trimmed_and_bounded() {
        assert_eq!(ChapterId::parse(" 2 ").unwrap().as_str(), "2");
        assert_eq!(ChapterId::parse("   "), Err(ChapterIdError::Empty));
        assert_eq!(ChapterId::parse("123456789"), Err(ChapterIdError::TooLong));
    }

    #[test]
    fn numeric_ids_expose_their_number() {
        assert_eq!(ChapterId::parse("114").unwrap().number(), Some(114));
        assert_eq!(ChapterId::parse("fatihah").unwrap().number(), None);
        assert_eq!(ChapterId::parse("al-fatihah"), Err(ChapterIdError::TooLong));
        assert_eq!(ChapterId::from_number(36).as_str(), "36");
    }

    #[test]
    fn canonical_ids_fold_numeric_spellings() {
        assert_eq!(ChapterId::parse("01").unwrap().canonical().as_str(), "1");
        assert_eq!(ChapterId::parse(" 007").unwrap().canonical().as_str(), "7");
        assert_eq!(ChapterId::parse("114").unwrap().canonical().as_str(), "114");
        assert_eq!(ChapterId::parse("fatihah").unwrap().canonical().as_str(), "fatihah");
    }

    #[test]
    fn links_point_at_the_summary_number() {
        let link = ChapterLink::to(&ChapterSummary::new(3, "Ali 'Imran", 200));
        assert_eq!(link.id.as_str(), "3");
        assert_eq!(link.name.as_str(), "Ali 'Imran");
    }

    #[test]
    fn neighbors_are_clamped_to_catalog() {
        assert_eq!(neighbor_id(1, -1, LAST_CHAPTER), None);
        assert_eq!(neighbor_id(1, 1, LAST_CHAPTER), Some(ChapterId::from_number(2)));
        assert_eq!(neighbor_id(2, -1, LAST_CHAPTER), Some(ChapterId::from_number(1)));
        assert_eq!(neighbor_id(LAST_CHAPTER, 1, LAST_CHAPTER), None);
    }

    #[test]
    fn long_names_are_truncated() {
        let summary = ChapterSummary::new(1, "A name that is far too long for the bound", 7);
        assert_eq!(summary.latin_name.len(), CHAPTER_NAME_BYTES);
    }
}
