//! Page-level configuration.

use crate::chapter::LAST_CHAPTER;

pub const SITE_NAME: &str = "QuranKu";
pub const DEFAULT_TRANSLATION_LANGUAGE: &str = "id";
pub const ARABIC_FONT_HREF: &str = "/fonts/LPMQ.ttf";
pub const BISMILLAH_ARABIC: &str = "بِسْمِ اللّٰهِ الرَّحْمٰنِ الرَّحِيْمِ";
pub const BISMILLAH_TRANSLATION: &str = "Dengan nama Allah Yang Maha Pengasih, Maha Penyayang.";

/// Chapters that do not get the bismillah preface: Al-Fatihah carries it as
/// verse 1 and At-Taubah has none.
const NO_PREFACE_CHAPTERS: [u16; 2] = [1, 9];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageConfig {
    pub site_name: &'static str,
    /// Translation language code paired with the Arabic text.
    pub translation_language: &'static str,
    pub font_preload_href: &'static str,
    pub bismillah_arabic: &'static str,
    pub bismillah_translation: &'static str,
    pub loop_audio: bool,
    pub chapter_count: u16,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            site_name: SITE_NAME,
            translation_language: DEFAULT_TRANSLATION_LANGUAGE,
            font_preload_href: ARABIC_FONT_HREF,
            bismillah_arabic: BISMILLAH_ARABIC,
            bismillah_translation: BISMILLAH_TRANSLATION,
            loop_audio: true,
            chapter_count: LAST_CHAPTER,
        }
    }
}

impl PageConfig {
    pub fn shows_bismillah_preface(&self, chapter_number: u16) -> bool {
        !NO_PREFACE_CHAPTERS.contains(&chapter_number)
    }
}
