//! Session manager contract

use std::sync::Arc;

use crate::observer::AnalyticEventObserver;

/// The ad-insertion session as seen by its consumers
///
/// Implementations own the observer list and invoke observers synchronously,
/// passing themselves as the `session` argument. There is no removal
/// method: observers stay attached until the session itself is discarded.
pub trait SessionManager: Send + Sync {
    /// Attach an observer to the session's analytic event stream
    fn add_analytic_observer(&self, observer: Arc<dyn AnalyticEventObserver>);
}
