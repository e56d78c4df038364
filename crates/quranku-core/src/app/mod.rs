//! Chapter page controller: loading state machine plus shared player sync.
//!
//! Every identifier change starts two independent flows. The fetch flow
//! raises the loading flag, fetches and maps the chapter, publishes the
//! verse-number list and lowers the flag. The playback flow stops any
//! running recitation and hands the new murottal URL to the shared player.
//! Completions carry a generation ticket; results for a superseded
//! identifier are dropped.

use alloc::{format, string::String, vec::Vec};
use core::fmt;

use log::debug;

use crate::{
    chapter::{
        ChapterBody, ChapterId, ChapterLink, ChapterSummary, PageProps, Verse, neighbor_id,
    },
    config::PageConfig,
    content::{ChapterSource, page_props},
    input::PageEvent,
    mapper::{VerseMapError, map_verses, verse_numbers},
    render::{
        AudioView, FooterView, LOADING_HEADER, LOADING_LABEL, PageBody, PageView, PrefaceView,
    },
    store::{Action, Dispatch},
};

/// Page-local chapter data, replaced as a whole on every completed fetch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoadedChapter {
    pub summary: ChapterSummary,
    pub verses: Vec<Verse>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FailureKind {
    Source,
    MissingTranslation,
    Mapping(VerseMapError),
    VerseCount { expected: u16, actual: usize },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PageState {
    Idle,
    Loading { id: ChapterId, generation: u32 },
    Loaded { id: ChapterId, chapter: LoadedChapter },
    Failed { id: ChapterId, cause: FailureKind },
}

impl PageState {
    /// Identifier the page currently points at.
    pub fn target(&self) -> Option<&ChapterId> {
        match self {
            Self::Idle => None,
            Self::Loading { id, .. } | Self::Loaded { id, .. } | Self::Failed { id, .. } => {
                Some(id)
            }
        }
    }
}

/// Issued when a fetch starts; only the newest ticket may complete.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoadTicket {
    id: ChapterId,
    generation: u32,
}

impl LoadTicket {
    pub fn id(&self) -> &ChapterId {
        &self.id
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Chapter data was stored and published.
    Applied,
    /// The ticket was superseded; nothing changed.
    Discarded,
    /// The event did not start a load.
    Unchanged,
}

#[derive(Debug, Eq, PartialEq)]
pub enum LoadError<E> {
    Source(E),
    MissingTranslation { language: &'static str },
    Mapping(VerseMapError),
    VerseCount { expected: u16, actual: usize },
}

impl<E> LoadError<E> {
    fn kind(&self) -> FailureKind {
        match self {
            Self::Source(_) => FailureKind::Source,
            Self::MissingTranslation { .. } => FailureKind::MissingTranslation,
            Self::Mapping(err) => FailureKind::Mapping(err.clone()),
            Self::VerseCount { expected, actual } => FailureKind::VerseCount {
                expected: *expected,
                actual: *actual,
            },
        }
    }
}

impl<E: fmt::Display> fmt::Display for LoadError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(err) => write!(f, "chapter source: {}", err),
            Self::MissingTranslation { language } => {
                write!(f, "no {:?} translation for chapter", language)
            }
            Self::Mapping(err) => write!(f, "verse mapping: {}", err),
            Self::VerseCount { expected, actual } => write!(
                f,
                "chapter declares {} verses but {} were mapped",
                expected, actual
            ),
        }
    }
}

pub struct ChapterPage<S>
where
    S: ChapterSource,
{
    source: S,
    config: PageConfig,
    props: Option<PageProps>,
    state: PageState,
    generation: u32,
}

include!("load.rs");
include!("playback.rs");
include!("view.rs");
