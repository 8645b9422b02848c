//! Adverts and ad breaks

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::creative::{LinearCreative, NonLinearCreative};
use super::resource_type::ResourceType;

/// One ad unit within a break
///
/// Delivered to observers as `Arc<AdVert>` so that consumers may hold on to
/// it past the callback, e.g. until the player actually starts playing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdVert {
    identifier: String,
    duration: Duration,
    linear: Option<LinearCreative>,
    non_linear: Vec<NonLinearCreative>,
}

impl AdVert {
    pub fn new(identifier: impl Into<String>, duration: Duration) -> Self {
        Self {
            identifier: identifier.into(),
            duration,
            linear: None,
            non_linear: Vec::new(),
        }
    }

    /// Set the linear creative
    pub fn with_linear(mut self, creative: LinearCreative) -> Self {
        self.linear = Some(creative);
        self
    }

    /// Append a non-linear creative
    pub fn with_non_linear(mut self, creative: NonLinearCreative) -> Self {
        self.non_linear.push(creative);
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The linear creative, if the advert has one
    pub fn linear_creative(&self) -> Option<&LinearCreative> {
        self.linear.as_ref()
    }

    /// Non-linear creatives of the given declared type, in creative order
    pub fn non_linear_creatives_by_type(
        &self,
        resource_type: ResourceType,
    ) -> Vec<&NonLinearCreative> {
        self.non_linear
            .iter()
            .filter(|c| c.resource_type() == resource_type)
            .collect()
    }
}

/// A contiguous group of adverts
///
/// Passed through to observers unmodified.
#[derive(Debug, Clone)]
pub struct AdBreak {
    identifier: String,
    start: Duration,
    duration: Duration,
    adverts: Vec<Arc<AdVert>>,
}

impl AdBreak {
    pub fn new(identifier: impl Into<String>, start: Duration, duration: Duration) -> Self {
        Self {
            identifier: identifier.into(),
            start,
            duration,
            adverts: Vec::new(),
        }
    }

    pub fn with_advert(mut self, advert: Arc<AdVert>) -> Self {
        self.adverts.push(advert);
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Offset of the break from the start of the stream
    pub fn start(&self) -> Duration {
        self.start
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn adverts(&self) -> &[Arc<AdVert>] {
        &self.adverts
    }
}
