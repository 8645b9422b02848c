//! Yospace Ad Handling
//!
//! Connects a server-side ad-insertion session to a media player and its ad
//! UI, and re-broadcasts session events to any number of analytic observers.
//!
//! # Features
//!
//! - **Observer fan-out**: one bridge observer on the session, any number of
//!   external observers notified synchronously in registration order
//! - **Playback gating**: advert click-throughs and overlays are rendered
//!   only once the player has actually started playing
//! - **Single pending activation**: a newer advert start replaces any
//!   activation still waiting for `play`, and its listener is detached
//! - **Observer isolation**: a panicking observer is logged and skipped
//!   (configurable)
//!
//! # Architecture
//!
//! ```text
//! SessionManager ──► SessionBridge ──┬──► ObserverRegistry ──► observers (in order)
//!                                    │
//!                                    └──► AdvertActivator ──► UiHandler
//!                                              ▲
//!                            Player "play" ────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use yospace_ads::{AdHandler, HandlerConfig};
//!
//! yospace_ads::init_logging_from_env()?;
//!
//! let handler = AdHandler::with_config(
//!     Some(&session_manager),
//!     Arc::new(OverlayUi::new()),
//!     Arc::new(player),
//!     HandlerConfig::from_env()?,
//! );
//!
//! handler.register_analytic_event_observer(&analytics);
//! ```

pub mod activator;
pub mod config;
pub mod error;
pub mod logging;
pub mod player;
pub mod registry;
pub mod ui;

mod bridge;
mod handler;

pub use activator::{ActivationState, AdvertActivator};
pub use config::{HandlerConfig, ObserverFailurePolicy};
pub use error::{AdsError, Result};
pub use handler::AdHandler;
pub use player::{ListenerId, Player, PlayerEvent, PlayerListener};
pub use registry::ObserverRegistry;
pub use ui::{UiHandler, YospaceLinearAd, YospaceNonLinearAd};

pub use logging::{init_logging, init_logging_from_env, init_silent, LoggingError, LoggingMode};

// Re-export the session model so hosts need a single dependency
pub use yospace_session;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::activator::ActivationState;
    pub use crate::config::{HandlerConfig, ObserverFailurePolicy};
    pub use crate::handler::AdHandler;
    pub use crate::player::{ListenerId, Player, PlayerEvent, PlayerListener};
    pub use crate::ui::{UiHandler, YospaceLinearAd, YospaceNonLinearAd};
    pub use yospace_session::prelude::*;
}
