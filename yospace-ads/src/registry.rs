//! Ordered registry of externally supplied analytic observers
//!
//! Holds `Weak` references: registering an observer does not keep it
//! alive, and an observer dropped by its owner is skipped at dispatch and
//! pruned on the next registration.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use yospace_session::AnalyticEventObserver;

/// Insertion-ordered observer list keyed by pointer identity
///
/// Registering the same observer twice yields two entries and therefore
/// two notifications per event.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Mutex<Vec<Weak<dyn AnalyticEventObserver>>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer; never rejects, never deduplicates
    pub fn register(&self, observer: &Arc<dyn AnalyticEventObserver>) {
        let mut observers = self.observers.lock();
        observers.retain(|w| w.strong_count() > 0);
        observers.push(Arc::downgrade(observer));
        tracing::debug!(observers = observers.len(), "registered analytic observer");
    }

    /// Remove the first entry referring to `observer`
    ///
    /// Returns `false` (and changes nothing) if it was not registered.
    pub fn unregister(&self, observer: &Arc<dyn AnalyticEventObserver>) -> bool {
        let mut observers = self.observers.lock();
        let target = Arc::as_ptr(observer);

        match observers
            .iter()
            .position(|w| std::ptr::addr_eq(w.as_ptr(), target))
        {
            Some(index) => {
                observers.remove(index);
                tracing::debug!(observers = observers.len(), "unregistered analytic observer");
                true
            }
            None => {
                tracing::debug!("unregister ignored: observer not registered");
                false
            }
        }
    }

    /// Drop every entry, returning how many there were
    pub fn clear(&self) -> usize {
        let mut observers = self.observers.lock();
        let removed = observers.len();
        observers.clear();
        removed
    }

    /// Live observers in notification order
    ///
    /// Dispatch iterates over this copy so observers may register or
    /// unregister from inside a callback; such changes apply from the next
    /// event on.
    pub fn snapshot(&self) -> Vec<Arc<dyn AnalyticEventObserver>> {
        self.observers
            .lock()
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }

    /// Number of live entries (duplicates counted)
    pub fn len(&self) -> usize {
        self.observers
            .lock()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if this exact observer is registered at least once
    #[cfg(test)]
    pub(crate) fn contains(&self, observer: &Arc<dyn AnalyticEventObserver>) -> bool {
        let target = Arc::as_ptr(observer);
        self.observers
            .lock()
            .iter()
            .any(|w| std::ptr::addr_eq(w.as_ptr(), target))
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observer_count", &self.len())
            .finish()
    }
}
