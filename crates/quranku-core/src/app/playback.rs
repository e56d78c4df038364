impl<S> ChapterPage<S>
where
    S: ChapterSource,
{
    /// Hand a chapter's recitation to the shared player.
    ///
    /// Runs on the same trigger as the fetch but never waits on it. Playback
    /// is only ever stopped here, never started.
    pub fn sync_playback<D: Dispatch>(&self, murottal_url: &str, store: &mut D) {
        if store.state().is_playing {
            debug!("page-audio: stop current recitation before switching");
            store.dispatch(Action::TogglePlayback);
        }
        debug!("page-audio: source={}", murottal_url);
        store.dispatch(Action::SetCurrentAudio(String::from(murottal_url)));
    }
}
