use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use embassy_time::Timer;
use log::debug;
use quranku_core::{
    chapter::{ChapterBody, ChapterId, ChapterListing},
    content::{
        ChapterSource,
        json::{ChapterIndex, JsonSourceError, parse_chapter_document, parse_chapter_index},
    },
};

const INDEX_FILE: &str = "index.json";
const CHAPTER_DIR: &str = "surah";

#[derive(Debug)]
pub(super) enum DirectorySourceError {
    Io { path: PathBuf, err: io::Error },
    Document { path: PathBuf, err: JsonSourceError },
    Lookup(JsonSourceError),
}

impl fmt::Display for DirectorySourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, err } => write!(f, "{}: {}", path.display(), err),
            Self::Document { path, err } => write!(f, "{}: {}", path.display(), err),
            Self::Lookup(err) => write!(f, "{}", err),
        }
    }
}

/// Chapter data laid out as `<root>/index.json` plus `<root>/surah/<number>.json`.
///
/// Chapter bodies are read on every request, after an artificial delay that
/// stands in for network latency.
pub(super) struct DirectorySource {
    root: PathBuf,
    index: ChapterIndex,
    latency_ms: u64,
}

impl DirectorySource {
    pub(super) fn open(root: &Path, latency_ms: u64) -> Result<Self, DirectorySourceError> {
        let path = root.join(INDEX_FILE);
        let json = read(&path)?;
        let index = parse_chapter_index(&json)
            .map_err(|err| DirectorySourceError::Document { path, err })?;
        debug!(
            "dir-source: {} chapters under {}",
            index.len(),
            root.display()
        );

        Ok(Self {
            root: root.to_path_buf(),
            index,
            latency_ms,
        })
    }

    fn chapter_path(&self, id: &ChapterId) -> Result<PathBuf, DirectorySourceError> {
        // Only the canonical number reaches the filesystem.
        let number = id.number().ok_or_else(|| {
            DirectorySourceError::Lookup(JsonSourceError::UnknownChapter(id.clone()))
        })?;
        Ok(self
            .root
            .join(CHAPTER_DIR)
            .join(format!("{}.json", number)))
    }
}

fn read(path: &Path) -> Result<String, DirectorySourceError> {
    fs::read_to_string(path).map_err(|err| DirectorySourceError::Io {
        path: path.to_path_buf(),
        err,
    })
}

impl ChapterSource for DirectorySource {
    type Error = DirectorySourceError;

    async fn chapter_ids(&self) -> Result<Vec<ChapterId>, Self::Error> {
        Ok(self.index.ids())
    }

    async fn chapter_listing(&self, id: &ChapterId) -> Result<ChapterListing, Self::Error> {
        self.index.listing(id).map_err(DirectorySourceError::Lookup)
    }

    async fn murottal_url(&self, id: &ChapterId) -> Result<String, Self::Error> {
        self.index.murottal_url(id).map_err(DirectorySourceError::Lookup)
    }

    async fn chapter_body(&self, id: &ChapterId) -> Result<ChapterBody, Self::Error> {
        if self.latency_ms > 0 {
            Timer::after_millis(self.latency_ms).await;
        }

        let path = self.chapter_path(id)?;
        let json = read(&path)?;
        debug!("dir-source: read {} bytes from {}", json.len(), path.display());
        parse_chapter_document(&json).map_err(|err| DirectorySourceError::Document { path, err })
    }
}
