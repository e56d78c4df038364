impl<S> ChapterPage<S>
where
    S: ChapterSource,
{
    pub fn with_view<D, F, R>(&self, store: &D, f: F) -> R
    where
        D: Dispatch,
        F: FnOnce(PageView<'_>) -> R,
    {
        let shared = store.state();
        let loaded = match &self.state {
            PageState::Loaded { id, chapter } => Some((id, chapter)),
            _ => None,
        };

        let (document_title, header_title) = match loaded {
            Some((_, chapter)) => (
                format!(
                    "Quran Surat {} | {}",
                    chapter.summary.latin_name, self.config.site_name
                ),
                format!(
                    "{} | {} ayat",
                    chapter.summary.latin_name, chapter.summary.verse_count
                ),
            ),
            None => (
                format!("Quran Surat | {}", self.config.site_name),
                String::from(LOADING_HEADER),
            ),
        };

        let body = match (&self.state, loaded) {
            _ if shared.is_loading => PageBody::Loading,
            (_, Some((id, chapter))) => PageBody::Chapter {
                chapter_id: id,
                chapter_name: chapter.summary.latin_name.as_str(),
                preface: self
                    .config
                    .shows_bismillah_preface(chapter.summary.number)
                    .then_some(PrefaceView {
                        arabic: self.config.bismillah_arabic,
                        translation: self.config.bismillah_translation,
                    }),
                verses: &chapter.verses,
                audio: AudioView {
                    src: shared.current_audio_url.as_deref(),
                    looped: self.config.loop_audio,
                    playing: shared.is_playing,
                },
            },
            (PageState::Failed { .. }, None) => PageBody::Unavailable,
            (_, None) => PageBody::Loading,
        };

        f(PageView {
            document_title,
            font_preload_href: self.config.font_preload_href,
            header_title,
            body,
            footer: self.footer_view(loaded.map(|(_, chapter)| chapter.summary.number)),
        })
    }

    fn footer_view(&self, number: Option<u16>) -> FooterView<'_> {
        let Some(number) = number else {
            return FooterView {
                previous_id: None,
                next_id: None,
                previous_name: LOADING_LABEL,
                next_name: LOADING_LABEL,
            };
        };

        let props = self.props.as_ref();
        let (previous_id, previous_name) =
            self.footer_link(number, -1, props.and_then(|props| props.previous.as_ref()));
        let (next_id, next_name) =
            self.footer_link(number, 1, props.and_then(|props| props.next.as_ref()));
        FooterView {
            previous_id,
            next_id,
            previous_name,
            next_name,
        }
    }

    /// A footer link needs the adjacent chapter number and a catalog entry for it.
    fn footer_link<'a>(
        &self,
        number: u16,
        offset: i32,
        link: Option<&'a ChapterLink>,
    ) -> (Option<ChapterId>, &'a str) {
        match (neighbor_id(number, offset, self.config.chapter_count), link) {
            (Some(expected), Some(link)) if link.id == expected => {
                (Some(expected), link.name.as_str())
            }
            _ => (None, ""),
        }
    }
}
