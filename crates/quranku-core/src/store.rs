//! Shared player and loading state, mutated only through dispatched actions.

use alloc::{string::String, vec::Vec};

use log::debug;

/// Mutation messages accepted by the shared store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    SetLoading(bool),
    SetCurrentAudio(String),
    TogglePlayback,
    SetVerseNumberList(Vec<u16>),
}

/// State that outlives any single chapter page.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SharedState {
    pub current_audio_url: Option<String>,
    pub is_playing: bool,
    pub verse_numbers: Vec<u16>,
    pub is_loading: bool,
}

/// Handle through which pages request shared-state mutations.
pub trait Dispatch {
    fn dispatch(&mut self, action: Action);
    fn state(&self) -> &SharedState;
}

/// Apply one action. Playback cannot start without an audio source.
pub fn reduce(state: &mut SharedState, action: Action) {
    match action {
        Action::SetLoading(loading) => state.is_loading = loading,
        Action::SetCurrentAudio(url) => state.current_audio_url = Some(url),
        Action::TogglePlayback => {
            if state.is_playing || state.current_audio_url.is_some() {
                state.is_playing = !state.is_playing;
            } else {
                debug!("store: toggle ignored, no audio source");
            }
        }
        Action::SetVerseNumberList(numbers) => state.verse_numbers = numbers,
    }
}

/// Single-writer store: every action goes through [`reduce`] in dispatch order.
#[derive(Debug, Default)]
pub struct Store {
    state: SharedState,
    revision: u32,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: SharedState) -> Self {
        Self { state, revision: 0 }
    }

    /// Bumped on every dispatch; lets a renderer skip unchanged frames.
    pub fn revision(&self) -> u32 {
        self.revision
    }
}

impl Dispatch for Store {
    fn dispatch(&mut self, action: Action) {
        debug!("store: dispatch {:?}", action);
        reduce(&mut self.state, action);
        self.revision = self.revision.wrapping_add(1);
    }

    fn state(&self) -> &SharedState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn toggle_requires_audio_source() {
        let mut store = Store::new();
        store.dispatch(Action::TogglePlayback);
        assert!(!store.state().is_playing);

        store.dispatch(Action::SetCurrentAudio(String::from("https://cdn/001.mp3")));
        store.dispatch(Action::TogglePlayback);
        assert!(store.state().is_playing);

        store.dispatch(Action::TogglePlayback);
        assert!(!store.state().is_playing);
    }

    #[test]
    fn actions_replace_fields_and_bump_revision() {
        let mut store = Store::new();
        store.dispatch(Action::SetLoading(true));
        store.dispatch(Action::SetVerseNumberList(vec![1, 2, 3]));

        assert!(store.state().is_loading);
        assert_eq!(store.state().verse_numbers, vec![1, 2, 3]);
        assert_eq!(store.revision(), 2);

        store.dispatch(Action::SetVerseNumberList(vec![1]));
        store.dispatch(Action::SetLoading(false));
        assert_eq!(store.state().verse_numbers, vec![1]);
        assert!(!store.state().is_loading);
    }

    #[test]
    fn changing_audio_keeps_play_flag() {
        let mut store = Store::with_state(SharedState {
            current_audio_url: Some(String::from("a.mp3")),
            is_playing: true,
            ..SharedState::default()
        });

        store.dispatch(Action::SetCurrentAudio(String::from("b.mp3")));
        assert!(store.state().is_playing);
        assert_eq!(store.state().current_audio_url.as_deref(), Some("b.mp3"));
    }
}
