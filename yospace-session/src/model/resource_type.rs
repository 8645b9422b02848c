//! Creative resource kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of resource a non-linear creative carries
///
/// Mirrors the VAST resource families: a static resource is typically an
/// image URL, HTML and iframe resources carry markup or a frame source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Static resource (image URL)
    Static,
    /// Inline HTML markup
    Html,
    /// Iframe source URL
    IFrame,
}

impl ResourceType {
    /// Name used by the session SDK for this resource type
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Static => "STATIC",
            ResourceType::Html => "HTML",
            ResourceType::IFrame => "IFRAME",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ResourceType::Static.to_string(), "STATIC");
        assert_eq!(ResourceType::IFrame.to_string(), "IFRAME");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ResourceType::IFrame).unwrap();
        assert_eq!(json, "\"iframe\"");

        let parsed: ResourceType = serde_json::from_str("\"static\"").unwrap();
        assert_eq!(parsed, ResourceType::Static);
    }
}
