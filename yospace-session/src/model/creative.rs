//! Linear and non-linear creatives attached to an advert

use serde::{Deserialize, Serialize};

use super::resource_type::ResourceType;

/// A resource payload exposed by a non-linear creative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    resource_type: ResourceType,
    data: String,
}

impl Resource {
    /// Create a resource of the given type holding string-encoded data
    pub fn new(resource_type: ResourceType, data: impl Into<String>) -> Self {
        Self {
            resource_type,
            data: data.into(),
        }
    }

    /// Type of this resource
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// String-encoded resource data (an image URL for static resources)
    pub fn string_data(&self) -> &str {
        &self.data
    }
}

/// Full-screen video creative with a click-through destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearCreative {
    click_through_url: String,
}

impl LinearCreative {
    pub fn new(click_through_url: impl Into<String>) -> Self {
        Self {
            click_through_url: click_through_url.into(),
        }
    }

    pub fn click_through_url(&self) -> &str {
        &self.click_through_url
    }
}

/// Overlay creative (banner and the like)
///
/// A creative declares the resource type it was authored for, but the
/// session SDK does not guarantee that a resource of that type is actually
/// present. Callers must treat [`NonLinearCreative::resource`] returning
/// `None` as "nothing to render".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonLinearCreative {
    resource_type: ResourceType,
    click_through_url: String,
    resources: Vec<Resource>,
}

impl NonLinearCreative {
    /// Create a creative of the given declared type with no resources
    pub fn new(resource_type: ResourceType, click_through_url: impl Into<String>) -> Self {
        Self {
            resource_type,
            click_through_url: click_through_url.into(),
            resources: Vec::new(),
        }
    }

    /// Attach a resource
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Declared resource type
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn click_through_url(&self) -> &str {
        &self.click_through_url
    }

    /// Look up the first resource of the given type
    pub fn resource(&self, resource_type: ResourceType) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.resource_type == resource_type)
    }
}
