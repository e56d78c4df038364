use alloc::{collections::VecDeque, string::String};
use core::fmt;

use super::{EventProvider, PageEvent};
use crate::chapter::{ChapterId, ChapterIdError};

/// Word that maps to [`PageEvent::TogglePlayback`] in a script.
pub const TOGGLE_WORD: &str = "play";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScriptedEventsError {
    pub token: String,
    pub cause: ChapterIdError,
}

impl fmt::Display for ScriptedEventsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bad script token {:?}: {}", self.token, self.cause)
    }
}

/// Replays a fixed event list, then reports no further input.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEvents {
    events: VecDeque<PageEvent>,
}

impl ScriptedEvents {
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = PageEvent>,
    {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Build from tokens such as `["1", "play", "2"]`: chapter ids navigate,
    /// [`TOGGLE_WORD`] toggles playback.
    pub fn from_tokens<I, T>(tokens: I) -> Result<Self, ScriptedEventsError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut events = VecDeque::new();
        for token in tokens {
            let token = token.as_ref();
            if token.eq_ignore_ascii_case(TOGGLE_WORD) {
                events.push_back(PageEvent::TogglePlayback);
                continue;
            }
            let id = ChapterId::parse(token).map_err(|cause| ScriptedEventsError {
                token: String::from(token),
                cause,
            })?;
            events.push_back(PageEvent::Navigate(id));
        }
        Ok(Self { events })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push(&mut self, event: PageEvent) {
        self.events.push_back(event);
    }
}

impl EventProvider for ScriptedEvents {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<PageEvent>, Self::Error> {
        Ok(self.events.pop_front())
    }
}
