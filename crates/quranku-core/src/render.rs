//! Page-level view models consumed by a renderer.

use alloc::{string::String, vec::Vec};

use crate::chapter::{ChapterId, Verse};

pub const LOADING_HEADER: &str = "Loading...";
pub const LOADING_LABEL: &str = "Loading";

/// Bismillah line shown ahead of the verse list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrefaceView<'a> {
    pub arabic: &'a str,
    pub translation: &'a str,
}

/// Audio element state. `src` follows the shared player, not the page props.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AudioView<'a> {
    pub src: Option<&'a str>,
    pub looped: bool,
    pub playing: bool,
}

/// One verse row. Chapter id and name travel along for bookmarking.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerseItemView<'a> {
    pub chapter_id: &'a ChapterId,
    pub chapter_name: &'a str,
    pub verse: &'a Verse,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PageBody<'a> {
    /// Spinner; exclusive with chapter content.
    Loading,
    Chapter {
        chapter_id: &'a ChapterId,
        chapter_name: &'a str,
        preface: Option<PrefaceView<'a>>,
        verses: &'a [Verse],
        audio: AudioView<'a>,
    },
    /// The last load failed; error presentation is left to the host.
    Unavailable,
}

impl<'a> PageBody<'a> {
    /// Verse rows of a loaded chapter, empty otherwise.
    pub fn verse_items(&self) -> Vec<VerseItemView<'a>> {
        match *self {
            Self::Chapter {
                chapter_id,
                chapter_name,
                verses,
                ..
            } => verses
                .iter()
                .map(|verse| VerseItemView {
                    chapter_id,
                    chapter_name,
                    verse,
                })
                .collect(),
            Self::Loading | Self::Unavailable => Vec::new(),
        }
    }
}

/// Previous/next navigation. Ids are `None` while the chapter number is
/// unknown or when the neighbor falls outside the catalog.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FooterView<'a> {
    pub previous_id: Option<ChapterId>,
    pub next_id: Option<ChapterId>,
    pub previous_name: &'a str,
    pub next_name: &'a str,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageView<'a> {
    pub document_title: String,
    pub font_preload_href: &'a str,
    pub header_title: String,
    pub body: PageBody<'a>,
    pub footer: FooterView<'a>,
}
