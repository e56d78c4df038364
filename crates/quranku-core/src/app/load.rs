impl<S> ChapterPage<S>
where
    S: ChapterSource,
{
    pub fn new(source: S, config: PageConfig) -> Self {
        Self {
            source,
            config,
            props: None,
            state: PageState::Idle,
            generation: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn props(&self) -> Option<&PageProps> {
        self.props.as_ref()
    }

    pub fn loaded(&self) -> Option<&LoadedChapter> {
        match &self.state {
            PageState::Loaded { chapter, .. } => Some(chapter),
            _ => None,
        }
    }

    /// A failed chapter stays eligible for another attempt.
    fn is_current_target(&self, id: &ChapterId) -> bool {
        match &self.state {
            PageState::Loading { id: target, .. } | PageState::Loaded { id: target, .. } => {
                target == id
            }
            PageState::Idle | PageState::Failed { .. } => false,
        }
    }

    fn is_pending(&self, ticket: &LoadTicket) -> bool {
        matches!(
            &self.state,
            PageState::Loading { id, generation }
                if *generation == ticket.generation && *id == ticket.id
        )
    }

    /// Point the page at `props.chapter_id` and start both flows.
    ///
    /// Returns `None` when the identifier is already the current target.
    pub fn on_identifier_changed<D: Dispatch>(
        &mut self,
        props: PageProps,
        store: &mut D,
    ) -> Option<LoadTicket> {
        if self.is_current_target(&props.chapter_id) {
            debug!(
                "page-load: chapter {} already targeted, skipping",
                props.chapter_id
            );
            return None;
        }

        let ticket = self.begin_fetch(props.chapter_id.clone(), store);
        self.sync_playback(&props.murottal_url, store);
        self.props = Some(props);
        Some(ticket)
    }

    fn begin_fetch<D: Dispatch>(&mut self, id: ChapterId, store: &mut D) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        debug!("page-load: begin chapter={} generation={}", id, generation);

        self.state = PageState::Loading {
            id: id.clone(),
            generation,
        };
        store.dispatch(Action::SetLoading(true));
        LoadTicket { id, generation }
    }

    /// Fetch the chapter body for a ticket. This is the only suspension point.
    pub async fn fetch(&self, ticket: &LoadTicket) -> Result<ChapterBody, S::Error> {
        self.source.chapter_body(&ticket.id).await
    }

    /// Apply a fetch result. Superseded tickets are dropped untouched,
    /// including their errors.
    pub fn complete<D: Dispatch>(
        &mut self,
        ticket: LoadTicket,
        result: Result<ChapterBody, S::Error>,
        store: &mut D,
    ) -> Result<Outcome, LoadError<S::Error>> {
        if !self.is_pending(&ticket) {
            debug!(
                "page-load: discard stale chapter={} generation={} current={}",
                ticket.id, ticket.generation, self.generation
            );
            return Ok(Outcome::Discarded);
        }

        match result
            .map_err(LoadError::Source)
            .and_then(|body| self.build_chapter(body))
        {
            Ok(chapter) => {
                let numbers = verse_numbers(&chapter.verses);
                debug!(
                    "page-load: applied chapter={} verses={}",
                    ticket.id,
                    numbers.len()
                );
                self.state = PageState::Loaded {
                    id: ticket.id,
                    chapter,
                };
                store.dispatch(Action::SetVerseNumberList(numbers));
                store.dispatch(Action::SetLoading(false));
                Ok(Outcome::Applied)
            }
            Err(err) => {
                debug!("page-load: failed chapter={} cause={:?}", ticket.id, err.kind());
                self.state = PageState::Failed {
                    id: ticket.id,
                    cause: err.kind(),
                };
                store.dispatch(Action::SetVerseNumberList(Vec::new()));
                store.dispatch(Action::SetLoading(false));
                Err(err)
            }
        }
    }

    fn build_chapter(&self, body: ChapterBody) -> Result<LoadedChapter, LoadError<S::Error>> {
        let language = self.config.translation_language;
        let translation = body
            .translation(language)
            .ok_or(LoadError::MissingTranslation { language })?;
        let verses =
            map_verses(&body.arabic_text, &translation.text).map_err(LoadError::Mapping)?;

        if verses.len() != usize::from(body.summary.verse_count) {
            return Err(LoadError::VerseCount {
                expected: body.summary.verse_count,
                actual: verses.len(),
            });
        }

        Ok(LoadedChapter {
            summary: body.summary,
            verses,
        })
    }

    /// Run both flows for `props` to completion.
    pub async fn load<D: Dispatch>(
        &mut self,
        props: PageProps,
        store: &mut D,
    ) -> Result<Outcome, LoadError<S::Error>> {
        let Some(ticket) = self.on_identifier_changed(props, store) else {
            return Ok(Outcome::Unchanged);
        };
        let result = self.fetch(&ticket).await;
        self.complete(ticket, result, store)
    }

    pub async fn handle_event<D: Dispatch>(
        &mut self,
        event: PageEvent,
        store: &mut D,
    ) -> Result<Outcome, LoadError<S::Error>> {
        match event {
            PageEvent::Navigate(id) => {
                if self.is_current_target(&id) {
                    return Ok(Outcome::Unchanged);
                }
                let props = page_props(&self.source, &id)
                    .await
                    .map_err(LoadError::Source)?;
                self.load(props, store).await
            }
            PageEvent::TogglePlayback => {
                store.dispatch(Action::TogglePlayback);
                Ok(Outcome::Unchanged)
            }
        }
    }
}
