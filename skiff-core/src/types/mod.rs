//! Core domain types for Skiff.

pub mod instance;
pub mod loadbalancer;
pub mod tag;

// Re-exports
pub use instance::{InstanceHandle, InstanceSpec};
pub use loadbalancer::{
    ForwardingRule, HealthCheckSpec, LoadBalancerHandle, LoadBalancerSpec, Protocol,
};
pub use tag::{TagHandle, TagSpec};

use serde::{Deserialize, Serialize};

/// Engine-assigned resource identifier.
///
/// Assigned when a resource is registered with the graph; other resources
/// reference it where the provider API wants identifiers rather than names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4().as_simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
