//! Chapter data sources.

pub mod json;
pub mod static_source;

use alloc::{string::String, vec::Vec};
use core::fmt;

use log::debug;

use crate::chapter::{ChapterBody, ChapterId, ChapterListing, PageProps};

/// Abstract lookup of chapter metadata, text and recitation audio.
///
/// An identifier the source cannot resolve is reported through
/// [`ChapterSource::Error`]; callers propagate it without retrying.
#[allow(async_fn_in_trait)]
pub trait ChapterSource {
    type Error: fmt::Debug + fmt::Display;

    /// Every identifier the source can serve, in catalog order.
    async fn chapter_ids(&self) -> Result<Vec<ChapterId>, Self::Error>;

    /// Summary of a chapter plus the names of its catalog neighbors.
    async fn chapter_listing(&self, id: &ChapterId) -> Result<ChapterListing, Self::Error>;

    /// Recitation audio URL for a chapter.
    async fn murottal_url(&self, id: &ChapterId) -> Result<String, Self::Error>;

    /// Arabic text and translations for a chapter.
    async fn chapter_body(&self, id: &ChapterId) -> Result<ChapterBody, Self::Error>;
}

/// Identifiers to pre-render. Anything outside this list is not a page.
pub async fn static_paths<S: ChapterSource>(source: &S) -> Result<Vec<ChapterId>, S::Error> {
    let ids = source.chapter_ids().await?;
    debug!("content: {} static chapter paths", ids.len());
    Ok(ids)
}

/// Resolve the per-identifier data the page needs before its controller runs.
pub async fn page_props<S: ChapterSource>(
    source: &S,
    id: &ChapterId,
) -> Result<PageProps, S::Error> {
    let listing = source.chapter_listing(id).await?;
    let murottal_url = source.murottal_url(id).await?;

    Ok(PageProps {
        chapter_id: id.clone(),
        murottal_url,
        previous: listing.previous,
        next: listing.next,
    })
}
