//! Tag resources.
//!
//! A tag is a named label; its name is its identity under the engine's
//! convergence rules. Other resources reference a tag in two distinct
//! forms: instances attach tags by engine-assigned identifier, while a
//! load balancer selects backends by tag *name*, because the provider's
//! tag-based routing operates on names. Both forms are kept side by side
//! rather than collapsed.

use super::ResourceId;
use serde::{Deserialize, Serialize};

/// Declared tag resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSpec {
    /// Tag name
    pub name: String,
}

impl TagSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Handle returned when a tag is registered.
#[derive(Debug, Clone)]
pub struct TagHandle {
    /// Engine-assigned identifier, used when attaching to instances
    pub id: ResourceId,

    /// Tag name, used when a load balancer selects backends
    pub name: String,
}
