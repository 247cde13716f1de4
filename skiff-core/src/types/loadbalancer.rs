//! Load balancer resources.

use super::ResourceId;
use crate::output::Output;
use serde::{Deserialize, Serialize};

/// Wire protocol for forwarding rules and health checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
    Tcp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Https => write!(f, "https"),
            Self::Tcp => write!(f, "tcp"),
        }
    }
}

/// Mapping from a listening port/protocol to a backend port/protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardingRule {
    pub entry_port: u16,
    pub entry_protocol: Protocol,
    pub target_port: u16,
    pub target_protocol: Protocol,
}

/// Periodic probe deciding whether a backend is eligible for traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckSpec {
    pub port: u16,
    pub protocol: Protocol,
}

/// Declared load balancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerSpec {
    /// Load balancer name
    pub name: String,

    /// Backend selector: the *name* of a declared tag, not its identifier
    pub droplet_tag: String,

    /// Forwarding rules
    pub forwarding_rules: Vec<ForwardingRule>,

    /// Backend health check
    pub healthcheck: HealthCheckSpec,

    /// Datacenter region; must match the backends' region
    pub region: String,
}

/// Handle returned when a load balancer is registered.
#[derive(Debug)]
pub struct LoadBalancerHandle {
    /// Engine-assigned identifier
    pub id: ResourceId,

    /// Public address, deferred until the engine reports the balancer ready
    pub ip: Output<String>,
}
