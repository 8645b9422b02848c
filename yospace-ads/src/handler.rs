//! AdHandler - the public entry point
//!
//! Binds to a session once at construction, owns the observer registry and
//! the deferred-activation slot, and exposes observer registration to
//! external code.

use std::sync::Arc;

use yospace_session::{AnalyticEventObserver, SessionManager};

use crate::activator::{ActivationState, AdvertActivator};
use crate::bridge::SessionBridge;
use crate::config::HandlerConfig;
use crate::player::Player;
use crate::registry::ObserverRegistry;
use crate::ui::UiHandler;

/// State shared between the handler and its session bridge
pub(crate) struct HandlerShared {
    pub(crate) config: HandlerConfig,
    pub(crate) registry: ObserverRegistry,
    pub(crate) activator: Arc<AdvertActivator>,
    pub(crate) ui: Arc<dyn UiHandler>,
}

/// Coordinates session ad events with player state and the ad UI
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use yospace_ads::AdHandler;
/// use yospace_session::AnalyticEventObserver;
///
/// let handler = AdHandler::new(Some(&session), ui, player);
///
/// let observer: Arc<dyn AnalyticEventObserver> = Arc::new(MyAnalytics::default());
/// handler.register_analytic_event_observer(&observer);
///
/// // ... session emits advert events, observer is notified ...
///
/// handler.unregister_analytic_event_observer(&observer);
/// ```
///
/// The session and the player only ever hold weak references back into
/// the handler, so dropping the handler stops all ad activity; any play
/// listener still armed at that point is detached.
pub struct AdHandler {
    shared: Arc<HandlerShared>,
}

impl AdHandler {
    /// Create a handler with default configuration
    ///
    /// `session` may be `None` when the stream has no ad session; the
    /// handler then never receives events but remains usable.
    pub fn new(
        session: Option<&dyn SessionManager>,
        ui: Arc<dyn UiHandler>,
        player: Arc<dyn Player>,
    ) -> Self {
        Self::with_config(session, ui, player, HandlerConfig::default())
    }

    pub fn with_config(
        session: Option<&dyn SessionManager>,
        ui: Arc<dyn UiHandler>,
        player: Arc<dyn Player>,
        config: HandlerConfig,
    ) -> Self {
        let shared = Arc::new(HandlerShared {
            activator: AdvertActivator::new(player, Arc::clone(&ui)),
            registry: ObserverRegistry::new(),
            config,
            ui,
        });

        match session {
            Some(session) => {
                let bridge = SessionBridge::new(Arc::downgrade(&shared));
                session.add_analytic_observer(Arc::new(bridge));
                tracing::debug!(config = ?shared.config, "ad handler attached to session");
            }
            None => tracing::warn!("no session manager available; ad events will not be received"),
        }

        Self { shared }
    }

    /// Add an observer to be notified of every session event
    ///
    /// The handler keeps only a weak reference; the caller owns the
    /// observer. Registering the same observer twice notifies it twice.
    pub fn register_analytic_event_observer(&self, observer: &Arc<dyn AnalyticEventObserver>) {
        self.shared.registry.register(observer);
    }

    /// Remove one registration of `observer`; no-op if it is not registered
    pub fn unregister_analytic_event_observer(
        &self,
        observer: &Arc<dyn AnalyticEventObserver>,
    ) -> bool {
        self.shared.registry.unregister(observer)
    }

    /// Drop all observers, cancel any pending activation and clear the UI
    ///
    /// The session binding survives: later events still reach the handler,
    /// they just have nobody to notify until observers register again.
    pub fn reset(&self) {
        let removed = self.shared.registry.clear();
        self.shared.activator.reset();
        self.shared.ui.remove_all_ads();
        self.shared.ui.reset();
        tracing::debug!(removed, "ad handler reset");
    }

    /// Number of registered, still-alive observers
    pub fn observer_count(&self) -> usize {
        self.shared.registry.len()
    }

    pub fn activation_state(&self) -> ActivationState {
        self.shared.activator.state()
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.shared.config
    }
}

impl Drop for AdHandler {
    fn drop(&mut self) {
        if self.shared.activator.disarm() {
            tracing::debug!("ad handler dropped with a pending activation; listener detached");
        }
    }
}

impl std::fmt::Debug for AdHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdHandler")
            .field("observers", &self.shared.registry.len())
            .field("activation", &self.shared.activator.state())
            .field("config", &self.shared.config)
            .finish()
    }
}
