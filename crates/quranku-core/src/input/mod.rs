//! Page event abstraction layer.

mod scripted;

pub use scripted::{ScriptedEvents, ScriptedEventsError};

use crate::chapter::ChapterId;

/// Logical events consumed by the chapter page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PageEvent {
    /// The hosting route now points at another chapter.
    Navigate(ChapterId),
    /// The listener pressed play/pause on the audio control.
    TogglePlayback,
}

/// Polled event provider.
pub trait EventProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<PageEvent>, Self::Error>;
}
