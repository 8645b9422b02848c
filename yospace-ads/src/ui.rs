//! UI collaborator contract and the ad descriptors handed to it

use serde::{Deserialize, Serialize};
use yospace_session::{LinearCreative, NonLinearCreative, Resource};

/// Click-through target for a linear (full-screen) advert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YospaceLinearAd {
    pub click_through_url: String,
}

impl YospaceLinearAd {
    pub fn new(click_through_url: impl Into<String>) -> Self {
        Self {
            click_through_url: click_through_url.into(),
        }
    }
}

impl From<&LinearCreative> for YospaceLinearAd {
    fn from(creative: &LinearCreative) -> Self {
        Self::new(creative.click_through_url())
    }
}

/// Overlay to render for a non-linear advert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YospaceNonLinearAd {
    pub click_through_url: String,
    /// Resource payload, e.g. the banner image URL
    pub resource_data: String,
}

impl YospaceNonLinearAd {
    pub fn new(click_through_url: impl Into<String>, resource_data: impl Into<String>) -> Self {
        Self {
            click_through_url: click_through_url.into(),
            resource_data: resource_data.into(),
        }
    }

    pub(crate) fn from_creative(creative: &NonLinearCreative, resource: &Resource) -> Self {
        Self::new(creative.click_through_url(), resource.string_data())
    }
}

/// Renders ad click-throughs and overlays on top of the player
///
/// All calls are fire-and-forget.
pub trait UiHandler: Send + Sync {
    fn create_linear_click_through(&self, ad: YospaceLinearAd);

    fn create_non_linear(&self, ad: YospaceNonLinearAd);

    /// Remove every rendered click-through and overlay
    fn remove_all_ads(&self);

    /// Return the UI to its initial state
    fn reset(&self);
}
