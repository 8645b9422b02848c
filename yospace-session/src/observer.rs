//! Analytic event observer contract
//!
//! The session manager reports ad-break lifecycle and tracking activity to
//! every [`AnalyticEventObserver`] it holds. Each callback receives the
//! session that produced the event.

use std::sync::Arc;

use crate::model::{AdBreak, AdVert, SessionErrorCode, TrackingError};
use crate::session::SessionManager;

/// Receiver of ad-break, advert and tracking events from a session
///
/// Every method has an empty default body, so implementors only override
/// the events they care about. Callbacks are invoked synchronously on the
/// thread that delivers the session event and should return promptly.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use yospace_session::{AdVert, AnalyticEventObserver, SessionManager};
///
/// struct AdCounter;
///
/// impl AnalyticEventObserver for AdCounter {
///     fn on_advert_start(&self, advert: &Arc<AdVert>, _session: &dyn SessionManager) {
///         println!("advert {} started", advert.identifier());
///     }
/// }
/// ```
pub trait AnalyticEventObserver: Send + Sync {
    /// An ad break was left before all of its adverts played
    fn on_advert_break_early_return(&self, _ad_break: &AdBreak, _session: &dyn SessionManager) {}

    fn on_advert_break_start(&self, _ad_break: &AdBreak, _session: &dyn SessionManager) {}

    fn on_advert_break_end(&self, _session: &dyn SessionManager) {}

    fn on_advert_start(&self, _advert: &Arc<AdVert>, _session: &dyn SessionManager) {}

    /// Called at the end of each advert within a break
    fn on_advert_end(&self, _session: &dyn SessionManager) {}

    fn on_session_error(&self, _error: &SessionErrorCode, _session: &dyn SessionManager) {}

    /// Session analytics (break schedule, timeline) were refreshed
    fn on_analytic_update(&self, _session: &dyn SessionManager) {}

    /// A tracking beacon was fired
    fn on_tracking_event(&self, _event_type: &str, _session: &dyn SessionManager) {}

    fn on_tracking_error(&self, _error: &TrackingError, _session: &dyn SessionManager) {}
}
