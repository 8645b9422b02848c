//! Yospace Session Model
//!
//! Session-side types shared between an ad-insertion session manager and
//! the code that reacts to its events.
//!
//! # Contents
//!
//! - **Ad model**: [`AdBreak`], [`AdVert`], [`LinearCreative`],
//!   [`NonLinearCreative`], [`Resource`], [`ResourceType`]
//! - **Error payloads**: [`SessionErrorCode`], [`TrackingError`], forwarded
//!   verbatim to observers
//! - **Contracts**: [`AnalyticEventObserver`] for event consumers and
//!   [`SessionManager`] for the session that emits them
//!
//! # Architecture
//!
//! ```text
//! SessionManager ──(analytic events)──► AnalyticEventObserver(s)
//!        │
//!        └── AdBreak ─► Arc<AdVert> ─► LinearCreative / NonLinearCreative ─► Resource
//! ```

pub mod model;
pub mod observer;
pub mod session;

pub use model::{
    AdBreak, AdVert, LinearCreative, NonLinearCreative, Resource, ResourceType, SessionErrorCode,
    TrackingError,
};
pub use observer::AnalyticEventObserver;
pub use session::SessionManager;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::model::{AdBreak, AdVert, ResourceType, SessionErrorCode, TrackingError};
    pub use crate::observer::AnalyticEventObserver;
    pub use crate::session::SessionManager;
}
