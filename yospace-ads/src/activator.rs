//! Playback-gated advert activation
//!
//! An advert may start (from the session's point of view) before the player
//! has actually begun playing. Its click-through and overlay UI must not be
//! shown until playback is real, so activation is deferred to the player's
//! next `play` signal.
//!
//! ```text
//!             advert start, playing
//!   Idle ───────────────────────────────► Activated
//!    │  ▲                                   ▲   │
//!    │  │ advert end                        │   │ advert end
//!    │  └───────────────────────────────────┼───┘
//!    │ advert start, not playing            │ play
//!    ▼                                      │
//!   Armed ──────────────────────────────────┘
//!    ▲  │
//!    └──┘ advert start, not playing (replaces the pending advert)
//! ```
//!
//! At most one activation is ever pending. Arming always detaches the
//! previous play listener first.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use yospace_session::{AdVert, ResourceType};

use crate::player::{ListenerId, Player, PlayerEvent, PlayerListener};
use crate::ui::{UiHandler, YospaceLinearAd, YospaceNonLinearAd};

/// Observable state of the deferred-activation slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    /// Nothing pending, nothing rendered
    Idle,
    /// Waiting for the player's play signal
    Armed,
    /// UI has been asked to render the current advert
    Activated,
}

enum Slot {
    Idle,
    Armed {
        advert: Arc<AdVert>,
        generation: u64,
        // None while add_event_listener is still in flight
        listener: Option<ListenerId>,
    },
    Activated,
}

impl Slot {
    fn state(&self) -> ActivationState {
        match self {
            Slot::Idle => ActivationState::Idle,
            Slot::Armed { .. } => ActivationState::Armed,
            Slot::Activated => ActivationState::Activated,
        }
    }
}

struct SlotState {
    slot: Slot,
    generation: u64,
}

/// Renders advert creatives once playback has begun
pub struct AdvertActivator {
    player: Arc<dyn Player>,
    ui: Arc<dyn UiHandler>,
    state: Mutex<SlotState>,
}

impl AdvertActivator {
    pub fn new(player: Arc<dyn Player>, ui: Arc<dyn UiHandler>) -> Arc<Self> {
        Arc::new(Self {
            player,
            ui,
            state: Mutex::new(SlotState {
                slot: Slot::Idle,
                generation: 0,
            }),
        })
    }

    pub fn state(&self) -> ActivationState {
        self.state.lock().slot.state()
    }

    /// Handle an advert start: activate now if the player is playing,
    /// otherwise arm a play listener for this advert
    pub fn on_advert_start(self: &Arc<Self>, advert: Arc<AdVert>) {
        if self.player.started_playing() {
            self.disarm();
            self.state.lock().slot = Slot::Activated;
            tracing::debug!(advert = advert.identifier(), "activating advert immediately");
            self.render(&advert);
        } else {
            self.arm(advert);
        }
    }

    /// Handle an advert end: clear all ad UI and settle the slot
    ///
    /// With `cancel_deferred` unset a still-armed activation is left in
    /// place and will fire on the next play signal.
    pub fn on_advert_end(&self, cancel_deferred: bool) {
        self.ui.remove_all_ads();

        if cancel_deferred && self.disarm() {
            tracing::debug!("advert ended before playback; pending activation cancelled");
        }

        let mut state = self.state.lock();
        if matches!(state.slot, Slot::Activated) {
            state.slot = Slot::Idle;
        }
    }

    /// Detach any armed play listener and return to `Idle`
    ///
    /// Returns whether an activation was pending.
    pub fn disarm(&self) -> bool {
        let listener = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut state.slot, Slot::Idle) {
                Slot::Armed { listener, .. } => Some(listener),
                other => {
                    state.slot = other;
                    None
                }
            }
        };

        match listener {
            Some(Some(id)) => {
                self.player.remove_event_listener(PlayerEvent::Play, id);
                true
            }
            Some(None) => true,
            None => false,
        }
    }

    /// Forget everything, including a rendered advert
    pub fn reset(&self) {
        self.disarm();
        self.state.lock().slot = Slot::Idle;
    }

    fn arm(self: &Arc<Self>, advert: Arc<AdVert>) {
        if self.disarm() {
            tracing::debug!("replacing pending activation");
        }

        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.slot = Slot::Armed {
                advert: Arc::clone(&advert),
                generation: state.generation,
                listener: None,
            };
            state.generation
        };

        let weak: Weak<Self> = Arc::downgrade(self);
        let listener: PlayerListener = Arc::new(move || {
            if let Some(activator) = weak.upgrade() {
                activator.on_play(generation);
            }
        });

        let id = self.player.add_event_listener(PlayerEvent::Play, listener);

        // The player may have fired synchronously, or the slot may have been
        // replaced in the meantime; either way this listener is stale.
        let stale = {
            let mut state = self.state.lock();
            match &mut state.slot {
                Slot::Armed {
                    generation: current,
                    listener,
                    ..
                } if *current == generation => {
                    *listener = Some(id);
                    false
                }
                _ => true,
            }
        };

        if stale {
            self.player.remove_event_listener(PlayerEvent::Play, id);
        } else {
            tracing::debug!(
                advert = advert.identifier(),
                listener = id.get(),
                "player not started; activation deferred until play"
            );
        }
    }

    fn on_play(&self, generation: u64) {
        let armed = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut state.slot, Slot::Idle) {
                Slot::Armed {
                    advert,
                    generation: current,
                    listener,
                } if current == generation => {
                    state.slot = Slot::Activated;
                    Some((advert, listener))
                }
                other => {
                    state.slot = other;
                    None
                }
            }
        };

        let Some((advert, listener)) = armed else {
            tracing::trace!(generation, "ignoring play signal for superseded activation");
            return;
        };

        if let Some(id) = listener {
            self.player.remove_event_listener(PlayerEvent::Play, id);
        }

        tracing::debug!(advert = advert.identifier(), "play received; activating advert");
        self.render(&advert);
    }

    fn render(&self, advert: &AdVert) {
        if let Some(linear) = advert.linear_creative() {
            self.ui
                .create_linear_click_through(YospaceLinearAd::from(linear));
        }

        for creative in advert.non_linear_creatives_by_type(ResourceType::Static) {
            if let Some(resource) = creative.resource(ResourceType::Static) {
                self.ui
                    .create_non_linear(YospaceNonLinearAd::from_creative(creative, resource));
            }
        }
    }
}

impl std::fmt::Debug for AdvertActivator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvertActivator")
            .field("state", &self.state())
            .finish()
    }
}
