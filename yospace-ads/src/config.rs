//! Configuration for the ad handler
//!
//! Controls how observer failures are treated and whether a pending
//! deferred activation survives the end of its advert.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AdsError, Result};

const OBSERVER_FAILURE_ENV: &str = "YOSPACE_OBSERVER_FAILURE";
const CANCEL_DEFERRED_ENV: &str = "YOSPACE_CANCEL_DEFERRED_ON_ADVERT_END";

/// What to do when an analytic observer panics during a callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObserverFailurePolicy {
    /// Catch the panic, log it and keep notifying the remaining observers
    #[default]
    Isolate,
    /// Let the panic unwind; later observers miss the event
    Propagate,
}

impl FromStr for ObserverFailurePolicy {
    type Err = AdsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isolate" => Ok(ObserverFailurePolicy::Isolate),
            "propagate" => Ok(ObserverFailurePolicy::Propagate),
            _ => Err(AdsError::InvalidPolicy(s.to_string())),
        }
    }
}

/// Configuration for [`AdHandler`](crate::AdHandler)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Observer panic handling
    /// Default: Isolate
    pub observer_failure: ObserverFailurePolicy,

    /// Drop a still-armed deferred activation when its advert ends, so a
    /// late play signal cannot flash UI for an advert that is already over
    /// Default: true
    pub cancel_deferred_on_advert_end: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            observer_failure: ObserverFailurePolicy::Isolate,
            cancel_deferred_on_advert_end: true,
        }
    }
}

impl HandlerConfig {
    /// Fail fast on observer panics
    pub fn strict() -> Self {
        Self {
            observer_failure: ObserverFailurePolicy::Propagate,
            ..Default::default()
        }
    }

    /// Behave exactly like the first-generation handler: observer panics
    /// propagate and a deferred activation outlives its advert
    pub fn legacy() -> Self {
        Self {
            observer_failure: ObserverFailurePolicy::Propagate,
            cancel_deferred_on_advert_end: false,
        }
    }

    /// Build a config from environment variables, falling back to defaults
    ///
    /// - `YOSPACE_OBSERVER_FAILURE`: `isolate` or `propagate`
    /// - `YOSPACE_CANCEL_DEFERRED_ON_ADVERT_END`: `true` or `false`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Decode a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(OBSERVER_FAILURE_ENV) {
            config.observer_failure = value.parse().map_err(|_| AdsError::InvalidEnv {
                var: OBSERVER_FAILURE_ENV,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(CANCEL_DEFERRED_ENV) {
            config.cancel_deferred_on_advert_end = parse_bool(CANCEL_DEFERRED_ENV, &value)?;
        }

        Ok(config)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AdsError::InvalidEnv {
            var,
            value: value.to_string(),
        }),
    }
}
