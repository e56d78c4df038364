use alloc::{string::String, vec::Vec};
use core::fmt;

use super::ChapterSource;
use crate::{
    chapter::{
        ChapterBody, ChapterId, ChapterLink, ChapterListing, ChapterSummary, PositionedText,
        Translation,
    },
    config::DEFAULT_TRANSLATION_LANGUAGE,
};

const TRANSLATION_NAME: &str = "Kementerian Agama Republik Indonesia";

/// One chapter held in memory: `(arabic, translation)` per verse, in order.
#[derive(Clone, Copy, Debug)]
pub struct StaticChapter<'a> {
    pub number: u16,
    pub latin_name: &'a str,
    pub verses: &'a [(&'a str, &'a str)],
    pub murottal_url: &'a str,
}

pub const AL_FATIHAH_VERSES: [(&str, &str); 7] = [
    (
        "بِسْمِ اللّٰهِ الرَّحْمٰنِ الرَّحِيْمِ",
        "Dengan nama Allah Yang Maha Pengasih, Maha Penyayang.",
    ),
    (
        "اَلْحَمْدُ لِلّٰهِ رَبِّ الْعٰلَمِيْنَۙ",
        "Segala puji bagi Allah, Tuhan seluruh alam,",
    ),
    ("الرَّحْمٰنِ الرَّحِيْمِۙ", "Yang Maha Pengasih, Maha Penyayang,"),
    ("مٰلِكِ يَوْمِ الدِّيْنِۗ", "Pemilik hari pembalasan."),
    (
        "اِيَّاكَ نَعْبُدُ وَاِيَّاكَ نَسْتَعِيْنُۗ",
        "Hanya kepada Engkaulah kami menyembah dan hanya kepada Engkaulah kami mohon pertolongan.",
    ),
    (
        "اِهْدِنَا الصِّرَاطَ الْمُسْتَقِيْمَ ۙ",
        "Tunjukilah kami jalan yang lurus,",
    ),
    (
        "صِرَاطَ الَّذِيْنَ اَنْعَمْتَ عَلَيْهِمْ ەۙ غَيْرِ الْمَغْضُوْبِ عَلَيْهِمْ وَلَا الضَّاۤلِّيْنَ ࣖ",
        "(yaitu) jalan orang-orang yang telah Engkau beri nikmat kepadanya; bukan (jalan) mereka yang dimurkai, dan bukan (pula jalan) mereka yang sesat.",
    ),
];

pub const DEFAULT_CHAPTERS: [StaticChapter<'static>; 1] = [StaticChapter {
    number: 1,
    latin_name: "Al-Fatihah",
    verses: &AL_FATIHAH_VERSES,
    murottal_url: "https://download.quranicaudio.com/quran/mishaari_raashid_al_3afaasee/001.mp3",
}];

/// Sample catalog used when no data directory is available.
pub fn default_al_fatihah_source() -> StaticChapterSource<'static> {
    StaticChapterSource::new(&DEFAULT_CHAPTERS)
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StaticSourceError {
    NotFound(ChapterId),
}

impl fmt::Display for StaticSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "chapter {} not found", id),
        }
    }
}

/// Static in-memory chapter source. Lookups match the identifier's number.
#[derive(Clone, Copy, Debug)]
pub struct StaticChapterSource<'a> {
    chapters: &'a [StaticChapter<'a>],
}

impl<'a> StaticChapterSource<'a> {
    pub const fn new(chapters: &'a [StaticChapter<'a>]) -> Self {
        Self { chapters }
    }

    fn position_of(&self, id: &ChapterId) -> Result<usize, StaticSourceError> {
        let number = id.number();
        self.chapters
            .iter()
            .position(|chapter| Some(chapter.number) == number)
            .ok_or_else(|| StaticSourceError::NotFound(id.clone()))
    }

    fn link_at(&self, index: Option<usize>) -> Option<ChapterLink> {
        index
            .and_then(|index| self.chapters.get(index))
            .map(|chapter| ChapterLink::to(&summary_of(chapter)))
    }
}

fn summary_of(chapter: &StaticChapter<'_>) -> ChapterSummary {
    let verse_count = chapter.verses.len().min(u16::MAX as usize) as u16;
    ChapterSummary::new(chapter.number, chapter.latin_name, verse_count)
}

impl ChapterSource for StaticChapterSource<'_> {
    type Error = StaticSourceError;

    async fn chapter_ids(&self) -> Result<Vec<ChapterId>, Self::Error> {
        Ok(self
            .chapters
            .iter()
            .map(|chapter| ChapterId::from_number(chapter.number))
            .collect())
    }

    async fn chapter_listing(&self, id: &ChapterId) -> Result<ChapterListing, Self::Error> {
        let index = self.position_of(id)?;

        Ok(ChapterListing {
            summary: summary_of(&self.chapters[index]),
            previous: self.link_at(index.checked_sub(1)),
            next: self.link_at(index.checked_add(1)),
        })
    }

    async fn murottal_url(&self, id: &ChapterId) -> Result<String, Self::Error> {
        let index = self.position_of(id)?;
        Ok(String::from(self.chapters[index].murottal_url))
    }

    async fn chapter_body(&self, id: &ChapterId) -> Result<ChapterBody, Self::Error> {
        let chapter = &self.chapters[self.position_of(id)?];

        let mut arabic_text = PositionedText::new();
        let mut translated = PositionedText::new();
        for (position, (arabic, translation)) in (1u16..).zip(chapter.verses.iter()) {
            let key = String::from(ChapterId::from_number(position).as_str());
            arabic_text.insert(key.clone(), String::from(*arabic));
            translated.insert(key, String::from(*translation));
        }

        let mut translations = alloc::collections::BTreeMap::new();
        translations.insert(
            String::from(DEFAULT_TRANSLATION_LANGUAGE),
            Translation {
                name: String::from(TRANSLATION_NAME),
                text: translated,
            },
        );

        Ok(ChapterBody {
            summary: summary_of(chapter),
            arabic_text,
            translations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{content::page_props, mapper::map_verses};
    use embassy_futures::block_on;

    const SAMPLE: [StaticChapter<'static>; 3] = [
        StaticChapter {
            number: 1,
            latin_name: "Al-Fatihah",
            verses: &AL_FATIHAH_VERSES,
            murottal_url: "https://cdn/001.mp3",
        },
        StaticChapter {
            number: 2,
            latin_name: "Al-Baqarah",
            verses: &[("a", "b")],
            murottal_url: "https://cdn/002.mp3",
        },
        StaticChapter {
            number: 3,
            latin_name: "Ali 'Imran",
            verses: &[("c", "d")],
            murottal_url: "https://cdn/003.mp3",
        },
    ];

    #[test]
    fn listing_names_neighbors() {
        let src = StaticChapterSource::new(&SAMPLE);
        let id = ChapterId::parse("2").unwrap();

        let listing = block_on(src.chapter_listing(&id)).unwrap();
        assert_eq!(listing.summary.latin_name.as_str(), "Al-Baqarah");
        let previous = listing.previous.unwrap();
        assert_eq!(previous.id.as_str(), "1");
        assert_eq!(previous.name.as_str(), "Al-Fatihah");
        let next = listing.next.unwrap();
        assert_eq!(next.id.as_str(), "3");
        assert_eq!(next.name.as_str(), "Ali 'Imran");

        let first = block_on(src.chapter_listing(&ChapterId::parse("1").unwrap())).unwrap();
        assert_eq!(first.previous, None);
    }

    #[test]
    fn body_maps_in_order_with_default_translation() {
        let src = default_al_fatihah_source();
        let body = block_on(src.chapter_body(&ChapterId::parse("1").unwrap())).unwrap();
        assert_eq!(body.summary.verse_count, 7);

        let translation = body.translation(DEFAULT_TRANSLATION_LANGUAGE).unwrap();
        let verses = map_verses(&body.arabic_text, &translation.text).unwrap();
        assert_eq!(verses.len(), 7);
        assert_eq!(verses[3].translation_text, "Pemilik hari pembalasan.");
    }

    #[test]
    fn unknown_chapter_is_not_found() {
        let src = default_al_fatihah_source();
        let id = ChapterId::parse("115").unwrap();

        assert_eq!(
            block_on(src.murottal_url(&id)),
            Err(StaticSourceError::NotFound(id.clone()))
        );
        assert!(block_on(page_props(&src, &id)).is_err());
    }

    #[test]
    fn page_props_carry_audio_and_neighbors() {
        let src = StaticChapterSource::new(&SAMPLE);
        let id = ChapterId::parse("3").unwrap();

        let props = block_on(page_props(&src, &id)).unwrap();
        assert_eq!(props.chapter_id, id);
        assert_eq!(props.murottal_url, "https://cdn/003.mp3");
        let previous = props.previous.unwrap();
        assert_eq!(previous.id, ChapterId::from_number(2));
        assert_eq!(previous.name.as_str(), "Al-Baqarah");
        assert_eq!(props.next, None);
    }
}
