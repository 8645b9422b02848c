//! Integration tests for AdHandler.
//!
//! These tests drive a handler through a scripted session and player and
//! verify:
//! - Session binding and observer fan-out order
//! - Playback-gated activation and replacement of pending activations
//! - Reset and advert-end cleanup
//! - Observer failure handling


use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock, Weak};

use test_helpers::{
    ad_break, entries, linear_advert, new_log, static_overlay_advert, PanickingObserver,
    RecordingObserver, RecordingUi, ScriptedSession, TestPlayer, UiCall,
};
use yospace_ads::{
    ActivationState, AdHandler, HandlerConfig, YospaceLinearAd, YospaceNonLinearAd,
};
use yospace_session::{
    AdBreak, AnalyticEventObserver, SessionErrorCode, SessionManager, TrackingError,
};

struct Fixture {
    session: Arc<ScriptedSession>,
    player: Arc<TestPlayer>,
    ui: Arc<RecordingUi>,
    handler: AdHandler,
}

fn fixture_with(config: HandlerConfig) -> Fixture {
    let session = ScriptedSession::new();
    let player = TestPlayer::new();
    let ui = RecordingUi::new();
    let handler = AdHandler::with_config(
        Some(&*session as &dyn SessionManager),
        ui.clone(),
        player.clone(),
        config,
    );
    Fixture {
        session,
        player,
        ui,
        handler,
    }
}

fn fixture() -> Fixture {
    fixture_with(HandlerConfig::default())
}

// ============================================================================
// Session binding and fan-out
// ============================================================================

#[test]
fn test_binds_exactly_one_bridge_to_session() {
    let f = fixture();
    assert_eq!(f.session.observer_count(), 1);

    let log = new_log();
    let observers: Vec<_> = (0..5)
        .map(|i| RecordingObserver::new(format!("o{}", i), &log))
        .collect();
    for o in &observers {
        f.handler.register_analytic_event_observer(o);
    }
    for o in &observers {
        f.handler.unregister_analytic_event_observer(o);
    }
    f.handler.reset();

    assert_eq!(f.session.observer_count(), 1);
}

#[test]
fn test_without_session_is_inert() {
    let player = TestPlayer::new();
    let ui = RecordingUi::new();
    let handler = AdHandler::new(None, ui.clone(), player.clone());

    let log = new_log();
    let observer = RecordingObserver::new("a", &log);
    handler.register_analytic_event_observer(&observer);

    assert_eq!(handler.observer_count(), 1);
    assert_eq!(handler.activation_state(), ActivationState::Idle);
    assert!(ui.calls().is_empty());
}

#[test]
fn test_every_event_forwarded_in_registration_order() {
    let f = fixture();
    let log = new_log();
    let a = RecordingObserver::new("a", &log);
    let b = RecordingObserver::new("b", &log);
    f.handler.register_analytic_event_observer(&a);
    f.handler.register_analytic_event_observer(&b);

    let brk = ad_break("brk");
    f.session.advert_break_start(&brk);
    f.session.advert_break_early_return(&brk);
    f.session.advert_break_end();
    f.session.advert_start(&linear_advert("ad1", "https://x/click"));
    f.session.advert_end();
    f.session.session_error(SessionErrorCode::Timeout);
    f.session.analytic_update();
    f.session.tracking_event("impression");
    f.session
        .tracking_error(&TrackingError::new("firstQuartile", "https://t/q1", None));

    assert_eq!(
        entries(&log),
        vec![
            "a:break_start(brk)",
            "b:break_start(brk)",
            "a:break_early_return(brk)",
            "b:break_early_return(brk)",
            "a:break_end",
            "b:break_end",
            "a:advert_start(ad1)",
            "b:advert_start(ad1)",
            "a:advert_end",
            "b:advert_end",
            "a:session_error(-1)",
            "b:session_error(-1)",
            "a:analytic_update",
            "b:analytic_update",
            "a:tracking_event(impression)",
            "b:tracking_event(impression)",
            "a:tracking_error(firstQuartile)",
            "b:tracking_error(firstQuartile)",
        ]
    );
}

#[test]
fn test_duplicate_registration_notifies_twice() {
    let f = fixture();
    let log = new_log();
    let a = RecordingObserver::new("a", &log);
    f.handler.register_analytic_event_observer(&a);
    f.handler.register_analytic_event_observer(&a);

    f.session.analytic_update();
    assert_eq!(entries(&log), vec!["a:analytic_update", "a:analytic_update"]);

    f.handler.unregister_analytic_event_observer(&a);
    f.session.advert_break_end();
    assert_eq!(entries(&log).len(), 3);
}

#[test]
fn test_unregister_absent_observer_is_noop() {
    let f = fixture();
    let log = new_log();
    let a = RecordingObserver::new("a", &log);
    let stranger = RecordingObserver::new("stranger", &log);
    f.handler.register_analytic_event_observer(&a);

    assert!(!f.handler.unregister_analytic_event_observer(&stranger));
    assert_eq!(f.handler.observer_count(), 1);

    f.session.analytic_update();
    assert_eq!(entries(&log), vec!["a:analytic_update"]);
}

/// Observer that unregisters itself the first time it sees a break start
struct OneShotObserver {
    handler: OnceLock<Weak<AdHandler>>,
    me: OnceLock<Weak<dyn AnalyticEventObserver>>,
    log: test_helpers::CallLog,
}

impl AnalyticEventObserver for OneShotObserver {
    fn on_advert_break_start(&self, _ad_break: &AdBreak, _session: &dyn SessionManager) {
        self.log.lock().unwrap().push("one_shot".to_string());
        let handler = self.handler.get().and_then(Weak::upgrade);
        let me = self.me.get().and_then(Weak::upgrade);
        if let (Some(handler), Some(me)) = (handler, me) {
            handler.unregister_analytic_event_observer(&me);
        }
    }
}

#[test]
fn test_observer_may_unregister_itself_during_dispatch() {
    let session = ScriptedSession::new();
    let handler = Arc::new(AdHandler::new(
        Some(&*session as &dyn SessionManager),
        RecordingUi::new(),
        TestPlayer::new(),
    ));
    let log = new_log();

    let one_shot = Arc::new(OneShotObserver {
        handler: OnceLock::new(),
        me: OnceLock::new(),
        log: log.clone(),
    });
    let as_dyn: Arc<dyn AnalyticEventObserver> = one_shot.clone();
    one_shot.handler.set(Arc::downgrade(&handler)).unwrap();
    one_shot.me.set(Arc::downgrade(&as_dyn)).unwrap();

    let tail = RecordingObserver::new("tail", &log);
    handler.register_analytic_event_observer(&as_dyn);
    handler.register_analytic_event_observer(&tail);

    session.advert_break_start(&ad_break("b1"));
    session.advert_break_start(&ad_break("b2"));

    assert_eq!(
        entries(&log),
        vec!["one_shot", "tail:break_start(b1)", "tail:break_start(b2)"]
    );
    assert_eq!(handler.observer_count(), 1);
}

#[test]
fn test_dropped_observer_is_not_notified() {
    let f = fixture();
    let log = new_log();
    let a = RecordingObserver::new("a", &log);
    let b = RecordingObserver::new("b", &log);
    f.handler.register_analytic_event_observer(&a);
    f.handler.register_analytic_event_observer(&b);

    drop(a);
    f.session.advert_break_end();

    assert_eq!(entries(&log), vec!["b:break_end"]);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_clears_observers_and_ui() {
    let f = fixture();
    let log = new_log();
    let a = RecordingObserver::new("a", &log);
    f.handler.register_analytic_event_observer(&a);

    f.handler.reset();

    assert_eq!(f.handler.observer_count(), 0);
    assert_eq!(f.ui.calls(), vec![UiCall::RemoveAll, UiCall::Reset]);

    f.session.advert_break_start(&ad_break("brk"));
    f.session.analytic_update();
    assert!(entries(&log).is_empty());
}

#[test]
fn test_session_binding_survives_reset() {
    let f = fixture();
    f.handler.reset();

    let log = new_log();
    let a = RecordingObserver::new("a", &log);
    f.handler.register_analytic_event_observer(&a);
    f.session.advert_break_end();

    assert_eq!(entries(&log), vec!["a:break_end"]);
    assert_eq!(f.session.observer_count(), 1);
}

#[test]
fn test_reset_cancels_pending_activation() {
    let f = fixture();
    f.session.advert_start(&linear_advert("a", "https://x/a"));
    assert_eq!(f.player.listener_count(), 1);

    f.handler.reset();
    assert_eq!(f.player.listener_count(), 0);
    assert_eq!(f.handler.activation_state(), ActivationState::Idle);

    f.player.play();
    assert!(f.ui.linear_calls().is_empty());
}

// ============================================================================
// Playback-gated activation
// ============================================================================

#[test]
fn test_advert_start_deferred_until_play() {
    let f = fixture();
    let log = new_log();
    let a = RecordingObserver::new("a", &log);
    f.handler.register_analytic_event_observer(&a);

    f.session.advert_start(&linear_advert("A", "https://x/a"));

    // Observers hear about it immediately, the UI does not
    assert_eq!(entries(&log), vec!["a:advert_start(A)"]);
    assert!(f.ui.calls().is_empty());
    assert_eq!(f.handler.activation_state(), ActivationState::Armed);

    f.player.play();

    assert_eq!(f.ui.linear_calls(), vec![YospaceLinearAd::new("https://x/a")]);
    assert_eq!(f.handler.activation_state(), ActivationState::Activated);
    assert_eq!(f.player.listener_count(), 0);
    assert_eq!(entries(&log).len(), 1);
}

#[test]
fn test_later_advert_start_replaces_pending_one() {
    let f = fixture();

    f.session.advert_start(&linear_advert("A", "https://x/a"));
    f.session.advert_start(&linear_advert("B", "https://x/b"));
    assert_eq!(f.player.listener_count(), 1);

    f.player.play();

    assert_eq!(f.ui.linear_calls(), vec![YospaceLinearAd::new("https://x/b")]);
    assert_eq!(f.player.listener_count(), 0);
}

#[test]
fn test_started_playing_activates_synchronously() {
    let f = fixture();
    f.player.set_playing(true);

    f.session.advert_start(&linear_advert("A", "https://x/a"));

    assert_eq!(f.ui.linear_calls(), vec![YospaceLinearAd::new("https://x/a")]);
    assert_eq!(f.player.listener_count(), 0);
    assert_eq!(f.handler.activation_state(), ActivationState::Activated);
}

#[test]
fn test_playing_flag_is_queried_per_advert() {
    let f = fixture();

    f.session.advert_start(&linear_advert("A", "https://x/a"));
    assert!(f.ui.calls().is_empty());

    // Playback begins without a play signal reaching the pending listener
    f.player.set_playing(true);
    f.session.advert_start(&linear_advert("B", "https://x/b"));

    assert_eq!(f.ui.linear_calls(), vec![YospaceLinearAd::new("https://x/b")]);
    assert_eq!(f.player.listener_count(), 0);
}

#[test]
fn test_activation_happens_before_observer_notification() {
    let log = new_log();
    let session = ScriptedSession::new();
    let player = TestPlayer::new();
    player.set_playing(true);
    let ui = RecordingUi::with_log(log.clone());
    let handler = AdHandler::new(Some(&*session as &dyn SessionManager), ui, player);

    let a = RecordingObserver::new("a", &log);
    handler.register_analytic_event_observer(&a);
    session.advert_start(&linear_advert("A", "https://x/a"));

    let log = entries(&log);
    assert_eq!(log.len(), 2);
    assert!(log[0].starts_with("ui:Linear"));
    assert_eq!(log[1], "a:advert_start(A)");
}

#[test]
fn test_player_firing_during_listener_registration() {
    let f = fixture();
    f.player.set_fire_on_add(true);

    f.session.advert_start(&linear_advert("A", "https://x/a"));

    assert_eq!(f.ui.linear_calls(), vec![YospaceLinearAd::new("https://x/a")]);
    assert_eq!(f.player.listener_count(), 0);
    assert_eq!(f.handler.activation_state(), ActivationState::Activated);
}

#[test]
fn test_linear_only_advert_scenario() {
    let f = fixture();
    f.player.set_playing(true);

    f.session.advert_start(&linear_advert("A", "https://x/click"));

    assert_eq!(
        f.ui.linear_calls(),
        vec![YospaceLinearAd {
            click_through_url: "https://x/click".to_string()
        }]
    );
    assert!(f.ui.non_linear_calls().is_empty());
}

#[test]
fn test_static_overlay_advert_scenario() {
    let f = fixture();
    f.player.set_playing(true);

    f.session
        .advert_start(&static_overlay_advert("B", &["img1", "img2"]));

    assert!(f.ui.linear_calls().is_empty());
    assert_eq!(
        f.ui.non_linear_calls(),
        vec![
            YospaceNonLinearAd::new("https://x/overlay/0", "img1"),
            YospaceNonLinearAd::new("https://x/overlay/1", "img2"),
        ]
    );
}

// ============================================================================
// Advert end
// ============================================================================

#[test]
fn test_advert_end_always_removes_ads() {
    let f = fixture();

    // No activation at all
    f.session.advert_end();
    assert_eq!(f.ui.count(&UiCall::RemoveAll), 1);

    // After an activation
    f.player.set_playing(true);
    f.session.advert_start(&linear_advert("A", "https://x/a"));
    f.session.advert_end();
    assert_eq!(f.ui.count(&UiCall::RemoveAll), 2);
    assert_eq!(f.handler.activation_state(), ActivationState::Idle);
}

#[test]
fn test_advert_end_cancels_stale_deferral_by_default() {
    let f = fixture();

    f.session.advert_start(&linear_advert("A", "https://x/a"));
    f.session.advert_end();

    assert_eq!(f.player.listener_count(), 0);
    assert_eq!(f.handler.activation_state(), ActivationState::Idle);

    f.player.play();
    assert!(f.ui.linear_calls().is_empty());
}

#[test]
fn test_legacy_config_keeps_deferral_across_advert_end() {
    let f = fixture_with(HandlerConfig::legacy());

    f.session.advert_start(&linear_advert("A", "https://x/a"));
    f.session.advert_end();
    assert_eq!(f.handler.activation_state(), ActivationState::Armed);

    f.player.play();
    assert_eq!(f.ui.linear_calls(), vec![YospaceLinearAd::new("https://x/a")]);
}

// ============================================================================
// Observer failures
// ============================================================================

#[test]
fn test_panicking_observer_is_isolated() {
    let f = fixture();
    let log = new_log();
    let a = RecordingObserver::new("a", &log);
    let boom: Arc<dyn AnalyticEventObserver> = Arc::new(PanickingObserver);
    let c = RecordingObserver::new("c", &log);
    f.handler.register_analytic_event_observer(&a);
    f.handler.register_analytic_event_observer(&boom);
    f.handler.register_analytic_event_observer(&c);

    f.session.advert_start(&linear_advert("A", "https://x/a"));

    assert_eq!(entries(&log), vec!["a:advert_start(A)", "c:advert_start(A)"]);
    assert_eq!(f.handler.observer_count(), 3);
}

#[test]
fn test_strict_config_propagates_observer_panic() {
    let f = fixture_with(HandlerConfig::strict());
    let log = new_log();
    let a = RecordingObserver::new("a", &log);
    let boom: Arc<dyn AnalyticEventObserver> = Arc::new(PanickingObserver);
    let c = RecordingObserver::new("c", &log);
    f.handler.register_analytic_event_observer(&a);
    f.handler.register_analytic_event_observer(&boom);
    f.handler.register_analytic_event_observer(&c);

    let advert = linear_advert("A", "https://x/a");
    let result = panic::catch_unwind(AssertUnwindSafe(|| f.session.advert_start(&advert)));

    assert!(result.is_err());
    assert_eq!(entries(&log), vec!["a:advert_start(A)"]);
}

// ============================================================================
// Drop
// ============================================================================

#[test]
fn test_drop_detaches_pending_listener_and_ignores_later_events() {
    let f = fixture();
    let log = new_log();
    let a = RecordingObserver::new("a", &log);
    f.handler.register_analytic_event_observer(&a);

    f.session.advert_start(&linear_advert("A", "https://x/a"));
    assert_eq!(f.player.listener_count(), 1);

    let Fixture {
        session,
        player,
        ui,
        handler,
    } = f;
    drop(handler);

    assert_eq!(player.listener_count(), 0);

    session.advert_start(&linear_advert("B", "https://x/b"));
    session.advert_end();
    player.play();

    assert_eq!(entries(&log), vec!["a:advert_start(A)"]);
    assert!(ui.calls().is_empty());
}
