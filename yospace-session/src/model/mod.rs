//! Data model delivered by the ad-insertion session

pub mod advert;
pub mod creative;
pub mod resource_type;
pub mod session_error;

pub use advert::{AdBreak, AdVert};
pub use creative::{LinearCreative, NonLinearCreative, Resource};
pub use resource_type::ResourceType;
pub use session_error::{SessionErrorCode, TrackingError};
