//! JSON chapter documents in the upstream API shape.
//!
//! A chapter document looks like
//! `{ "number": "1", "name_latin": "Al-Fatihah", "number_of_ayah": "7",
//!    "text": { "1": ".." }, "translations": { "id": { "name": "..", "text": { "1": ".." } } } }`.
//! Numbers may arrive as strings or integers. The chapter index is an array of
//! `{ "number", "name_latin", "number_of_ayah", "murottal" }` entries.

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use log::debug;
use serde::Deserialize;

use super::ChapterSource;
use crate::{
    chapter::{
        ChapterBody, ChapterId, ChapterIdError, ChapterLink, ChapterListing, ChapterSummary,
        PositionedText, Translation,
    },
    text_utils::parse_position,
};

#[derive(Debug)]
pub enum JsonSourceError {
    Parse(serde_json::Error),
    InvalidNumber(String),
    InvalidId(ChapterIdError),
    UnknownChapter(ChapterId),
}

impl fmt::Display for JsonSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed chapter json: {}", err),
            Self::InvalidNumber(raw) => write!(f, "invalid number field {:?}", raw),
            Self::InvalidId(err) => write!(f, "{}", err),
            Self::UnknownChapter(id) => write!(f, "chapter {} not found", id),
        }
    }
}

impl From<serde_json::Error> for JsonSourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ChapterIdError> for JsonSourceError {
    fn from(err: ChapterIdError) -> Self {
        Self::InvalidId(err)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberField {
    Number(u16),
    Text(String),
}

impl NumberField {
    fn value(&self) -> Result<u16, JsonSourceError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(raw) => {
                parse_position(raw).ok_or_else(|| JsonSourceError::InvalidNumber(raw.clone()))
            }
        }
    }
}

#[derive(Deserialize)]
struct TranslationDocument {
    #[serde(default)]
    name: String,
    text: PositionedText,
}

#[derive(Deserialize)]
struct ChapterDocument {
    number: NumberField,
    name_latin: String,
    number_of_ayah: NumberField,
    text: PositionedText,
    #[serde(default)]
    translations: BTreeMap<String, TranslationDocument>,
}

#[derive(Deserialize)]
struct IndexDocumentEntry {
    number: NumberField,
    name_latin: String,
    number_of_ayah: NumberField,
    murottal: String,
}

/// Parse one chapter document.
pub fn parse_chapter_document(json: &str) -> Result<ChapterBody, JsonSourceError> {
    let document: ChapterDocument = serde_json::from_str(json)?;

    let translations = document
        .translations
        .into_iter()
        .map(|(language, translation)| {
            (
                language,
                Translation {
                    name: translation.name,
                    text: translation.text,
                },
            )
        })
        .collect();

    Ok(ChapterBody {
        summary: ChapterSummary::new(
            document.number.value()?,
            &document.name_latin,
            document.number_of_ayah.value()?,
        ),
        arabic_text: document.text,
        translations,
    })
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct IndexEntry {
    summary: ChapterSummary,
    murottal_url: String,
}

/// Catalog of chapters in display order, with their audio URLs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChapterIndex {
    entries: Vec<IndexEntry>,
}

/// Parse the chapter index array.
pub fn parse_chapter_index(json: &str) -> Result<ChapterIndex, JsonSourceError> {
    let documents: Vec<IndexDocumentEntry> = serde_json::from_str(json)?;
    let mut entries = Vec::with_capacity(documents.len());
    for document in documents {
        entries.push(IndexEntry {
            summary: ChapterSummary::new(
                document.number.value()?,
                &document.name_latin,
                document.number_of_ayah.value()?,
            ),
            murottal_url: document.murottal,
        });
    }
    debug!("content-json: index with {} chapters", entries.len());
    Ok(ChapterIndex { entries })
}

impl ChapterIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<ChapterId> {
        self.entries
            .iter()
            .map(|entry| ChapterId::from_number(entry.summary.number))
            .collect()
    }

    fn position_of(&self, id: &ChapterId) -> Result<usize, JsonSourceError> {
        let number = id.number();
        self.entries
            .iter()
            .position(|entry| Some(entry.summary.number) == number)
            .ok_or_else(|| JsonSourceError::UnknownChapter(id.clone()))
    }

    fn link_at(&self, index: Option<usize>) -> Option<ChapterLink> {
        index
            .and_then(|index| self.entries.get(index))
            .map(|entry| ChapterLink::to(&entry.summary))
    }

    pub fn listing(&self, id: &ChapterId) -> Result<ChapterListing, JsonSourceError> {
        let index = self.position_of(id)?;
        Ok(ChapterListing {
            summary: self.entries[index].summary.clone(),
            previous: self.link_at(index.checked_sub(1)),
            next: self.link_at(index.checked_add(1)),
        })
    }

    pub fn murottal_url(&self, id: &ChapterId) -> Result<String, JsonSourceError> {
        let index = self.position_of(id)?;
        Ok(self.entries[index].murottal_url.clone())
    }
}

/// In-memory source built from an index plus already-parsed chapter documents.
#[derive(Clone, Debug, Default)]
pub struct JsonCatalogSource {
    index: ChapterIndex,
    bodies: BTreeMap<ChapterId, ChapterBody>,
}

impl JsonCatalogSource {
    pub fn new(index: ChapterIndex) -> Self {
        Self {
            index,
            bodies: BTreeMap::new(),
        }
    }

    pub fn from_index_json(json: &str) -> Result<Self, JsonSourceError> {
        Ok(Self::new(parse_chapter_index(json)?))
    }

    /// Parse and store a chapter document, returning the identifier it answers to.
    pub fn insert_document(&mut self, json: &str) -> Result<ChapterId, JsonSourceError> {
        let body = parse_chapter_document(json)?;
        let id = ChapterId::from_number(body.summary.number);
        self.bodies.insert(id.clone(), body);
        Ok(id)
    }
}

impl ChapterSource for JsonCatalogSource {
    type Error = JsonSourceError;

    async fn chapter_ids(&self) -> Result<Vec<ChapterId>, Self::Error> {
        Ok(self.index.ids())
    }

    async fn chapter_listing(&self, id: &ChapterId) -> Result<ChapterListing, Self::Error> {
        self.index.listing(id)
    }

    async fn murottal_url(&self, id: &ChapterId) -> Result<String, Self::Error> {
        self.index.murottal_url(id)
    }

    async fn chapter_body(&self, id: &ChapterId) -> Result<ChapterBody, Self::Error> {
        let key = id
            .number()
            .map(ChapterId::from_number)
            .ok_or_else(|| JsonSourceError::UnknownChapter(id.clone()))?;
        self.bodies
            .get(&key)
            .cloned()
            .ok_or_else(|| JsonSourceError::UnknownChapter(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    const INDEX: &str = r#"[
        { "number": 1, "name_latin": "Al-Fatihah", "number_of_ayah": 7, "murottal": "https://cdn/001.mp3" },
        { "number": "2", "name_latin": "Al-Baqarah", "number_of_ayah": "286", "murottal": "https://cdn/002.mp3" }
    ]"#;

    const AN_NAS: &str = r#"{
        "number": "114",
        "name": "الناس",
        "name_latin": "An-Nas",
        "number_of_ayah": "6",
        "text": { "1": "a1", "2": "a2", "3": "a3", "4": "a4", "5": "a5", "6": "a6" },
        "translations": {
            "id": { "name": "Kemenag", "text": { "1": "t1", "2": "t2", "3": "t3", "4": "t4", "5": "t5", "6": "t6" } }
        }
    }"#;

    #[test]
    fn document_numbers_accept_strings() {
        let body = parse_chapter_document(AN_NAS).unwrap();
        assert_eq!(body.summary, ChapterSummary::new(114, "An-Nas", 6));
        assert_eq!(body.arabic_text.len(), 6);
        assert_eq!(body.translation("id").unwrap().name, "Kemenag");
        assert!(body.translation("en").is_none());
    }

    #[test]
    fn bad_number_field_is_rejected() {
        let json = r#"{ "number": "one", "name_latin": "x", "number_of_ayah": 1, "text": {} }"#;
        assert!(matches!(
            parse_chapter_document(json),
            Err(JsonSourceError::InvalidNumber(raw)) if raw == "one"
        ));
        assert!(matches!(
            parse_chapter_document("{"),
            Err(JsonSourceError::Parse(_))
        ));
    }

    #[test]
    fn index_answers_listing_and_audio() {
        let index = parse_chapter_index(INDEX).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.ids(),
            [ChapterId::from_number(1), ChapterId::from_number(2)]
        );

        let listing = index.listing(&ChapterId::from_number(2)).unwrap();
        assert_eq!(listing.summary.verse_count, 286);
        let previous = listing.previous.unwrap();
        assert_eq!(previous.id, ChapterId::from_number(1));
        assert_eq!(previous.name.as_str(), "Al-Fatihah");
        assert_eq!(listing.next, None);
        assert_eq!(
            index.murottal_url(&ChapterId::from_number(1)).unwrap(),
            "https://cdn/001.mp3"
        );
    }

    #[test]
    fn catalog_serves_inserted_documents() {
        let mut src = JsonCatalogSource::from_index_json(INDEX).unwrap();
        let id = src.insert_document(AN_NAS).unwrap();
        assert_eq!(id.as_str(), "114");

        let padded = ChapterId::parse("0114").unwrap();
        let body = block_on(src.chapter_body(&padded)).unwrap();
        assert_eq!(body.summary.latin_name.as_str(), "An-Nas");

        let missing = block_on(src.chapter_body(&ChapterId::from_number(2)));
        assert!(matches!(missing, Err(JsonSourceError::UnknownChapter(_))));
    }

    const DEMO_INDEX: &str = include_str!("../../../../demos/data/index.json");
    const DEMO_DOCUMENTS: [&str; 1] = [include_str!("../../../../demos/data/surah/1.json")];

    #[test]
    fn demo_catalog_serves_every_listed_chapter() {
        let mut src = JsonCatalogSource::from_index_json(DEMO_INDEX).unwrap();
        for document in DEMO_DOCUMENTS {
            src.insert_document(document).unwrap();
        }

        let ids = block_on(src.chapter_ids()).unwrap();
        assert!(!ids.is_empty());
        for id in ids {
            let listing = block_on(src.chapter_listing(&id)).unwrap();
            let body = match block_on(src.chapter_body(&id)) {
                Ok(body) => body,
                Err(err) => panic!("listed chapter {} has no document: {}", id, err),
            };
            let translation = body.translation("id").unwrap();
            let verses = crate::mapper::map_verses(&body.arabic_text, &translation.text).unwrap();
            assert_eq!(verses.len(), usize::from(listing.summary.verse_count));
        }
    }
}
