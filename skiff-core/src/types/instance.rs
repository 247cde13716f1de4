//! Compute instance resources.

use super::ResourceId;
use serde::{Deserialize, Serialize};

/// Declared compute instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSpec {
    /// Instance name, unique within the stack
    pub name: String,

    /// Machine image identifier
    pub image: String,

    /// Datacenter region
    pub region: String,

    /// Size class
    pub size: String,

    /// Tags attached to this instance, by engine-assigned identifier
    pub tags: Vec<ResourceId>,

    /// Boot script, passed to the instance verbatim
    pub user_data: String,
}

/// Handle returned when an instance is registered.
#[derive(Debug, Clone)]
pub struct InstanceHandle {
    /// Engine-assigned identifier
    pub id: ResourceId,

    /// Instance name
    pub name: String,
}
