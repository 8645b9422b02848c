//! The single observer attached to the session
//!
//! Fans every session event out to the registered analytic observers and
//! drives the activator on advert start/end.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use yospace_session::{
    AdBreak, AdVert, AnalyticEventObserver, SessionErrorCode, SessionManager, TrackingError,
};

use crate::config::ObserverFailurePolicy;
use crate::handler::HandlerShared;

pub(crate) struct SessionBridge {
    shared: Weak<HandlerShared>,
}

impl SessionBridge {
    pub(crate) fn new(shared: Weak<HandlerShared>) -> Self {
        Self { shared }
    }

    fn forward<F>(&self, shared: &HandlerShared, event: &'static str, notify: F)
    where
        F: Fn(&dyn AnalyticEventObserver),
    {
        let observers = shared.registry.snapshot();
        tracing::trace!(event, observers = observers.len(), "forwarding analytic event");

        for (index, observer) in observers.iter().enumerate() {
            match shared.config.observer_failure {
                ObserverFailurePolicy::Propagate => notify(&**observer),
                ObserverFailurePolicy::Isolate => {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| notify(&**observer)));
                    if let Err(payload) = outcome {
                        tracing::error!(
                            event,
                            observer = index,
                            panic = panic_message(payload.as_ref()),
                            "analytic observer panicked; continuing with remaining observers"
                        );
                    }
                }
            }
        }
    }

    fn with_shared(&self, event: &'static str, f: impl FnOnce(&HandlerShared)) {
        match self.shared.upgrade() {
            Some(shared) => f(&*shared),
            None => tracing::trace!(event, "ad handler dropped; ignoring session event"),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "<non-string panic payload>"
    }
}

impl AnalyticEventObserver for SessionBridge {
    fn on_advert_break_early_return(&self, ad_break: &AdBreak, session: &dyn SessionManager) {
        self.with_shared("advert_break_early_return", |shared| {
            self.forward(shared, "advert_break_early_return", |o| {
                o.on_advert_break_early_return(ad_break, session)
            });
        });
    }

    fn on_advert_break_start(&self, ad_break: &AdBreak, session: &dyn SessionManager) {
        self.with_shared("advert_break_start", |shared| {
            self.forward(shared, "advert_break_start", |o| {
                o.on_advert_break_start(ad_break, session)
            });
        });
    }

    fn on_advert_break_end(&self, session: &dyn SessionManager) {
        self.with_shared("advert_break_end", |shared| {
            self.forward(shared, "advert_break_end", |o| o.on_advert_break_end(session));
        });
    }

    fn on_advert_start(&self, advert: &Arc<AdVert>, session: &dyn SessionManager) {
        self.with_shared("advert_start", |shared| {
            shared.activator.on_advert_start(Arc::clone(advert));
            self.forward(shared, "advert_start", |o| o.on_advert_start(advert, session));
        });
    }

    fn on_advert_end(&self, session: &dyn SessionManager) {
        self.with_shared("advert_end", |shared| {
            shared
                .activator
                .on_advert_end(shared.config.cancel_deferred_on_advert_end);
            self.forward(shared, "advert_end", |o| o.on_advert_end(session));
        });
    }

    fn on_session_error(&self, error: &SessionErrorCode, session: &dyn SessionManager) {
        self.with_shared("session_error", |shared| {
            tracing::debug!(%error, "forwarding session error");
            self.forward(shared, "session_error", |o| o.on_session_error(error, session));
        });
    }

    fn on_analytic_update(&self, session: &dyn SessionManager) {
        self.with_shared("analytic_update", |shared| {
            self.forward(shared, "analytic_update", |o| o.on_analytic_update(session));
        });
    }

    fn on_tracking_event(&self, event_type: &str, session: &dyn SessionManager) {
        self.with_shared("tracking_event", |shared| {
            self.forward(shared, "tracking_event", |o| {
                o.on_tracking_event(event_type, session)
            });
        });
    }

    fn on_tracking_error(&self, error: &TrackingError, session: &dyn SessionManager) {
        self.with_shared("tracking_error", |shared| {
            self.forward(shared, "tracking_error", |o| o.on_tracking_error(error, session));
        });
    }
}
