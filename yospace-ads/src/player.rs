//! Player collaborator contract

use std::fmt;
use std::sync::Arc;

/// Player events the handler listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    /// Playback was requested or resumed
    Play,
}

impl PlayerEvent {
    /// Event name as understood by the player
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerEvent::Play => "play",
        }
    }
}

impl fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by [`Player::add_event_listener`], used to detach it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Callback invoked with no payload when a player event fires
pub type PlayerListener = Arc<dyn Fn() + Send + Sync>;

/// The media player as seen by the ad handler
///
/// Implementations must tolerate `remove_event_listener` being called from
/// inside a listener that is currently being invoked.
pub trait Player: Send + Sync {
    /// Whether playback has actually begun
    ///
    /// Queried on every advert start; never cached by the handler.
    fn started_playing(&self) -> bool;

    fn add_event_listener(&self, event: PlayerEvent, listener: PlayerListener) -> ListenerId;

    /// Detach a listener; unknown ids are ignored
    fn remove_event_listener(&self, event: PlayerEvent, id: ListenerId);
}
