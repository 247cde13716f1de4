//! In-memory engine for development and tests.

use crate::engine::{ApplySummary, ProvisioningEngine};
use crate::error::Result;
use crate::graph::ResourceGraph;
use async_trait::async_trait;
use std::net::Ipv4Addr;
use tracing::{info, instrument};

/// Engine that "provisions" resources in memory.
///
/// Walks the declaration in registration order (which already respects
/// the recorded data dependencies) and assigns public addresses from a
/// fixed pool. Stands in for a real engine behind the same trait; nothing
/// outlives the process.
pub struct LocalEngine {
    pool_start: Ipv4Addr,
}

impl LocalEngine {
    pub fn new() -> Self {
        Self { pool_start: Ipv4Addr::new(10, 88, 0, 10) }
    }
}

impl Default for LocalEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProvisioningEngine for LocalEngine {
    #[instrument(skip(self, graph))]
    async fn apply(&self, graph: &mut ResourceGraph) -> Result<ApplySummary> {
        let mut next_addr = u32::from(self.pool_start);

        let records: Vec<_> = graph
            .resources()
            .iter()
            .map(|r| (r.id.clone(), r.decl.kind(), r.decl.name().to_string()))
            .collect();

        let mut created = 0;
        for (id, kind, name) in records {
            if let Some(slot) = graph.take_ip_slot(&id) {
                let addr = Ipv4Addr::from(next_addr);
                next_addr += 1;
                info!(kind, name = %name, ip = %addr, "Provisioned resource");
                slot.fulfill(addr.to_string());
            } else {
                info!(kind, name = %name, "Provisioned resource");
            }
            created += 1;
        }

        Ok(ApplySummary { created })
    }

    fn name(&self) -> &str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ForwardingRule, HealthCheckSpec, LoadBalancerSpec, Protocol, TagSpec};

    #[tokio::test]
    async fn test_apply_fulfills_balancer_address() {
        let mut graph = ResourceGraph::new();
        graph.register_tag(TagSpec::new("fleet")).unwrap();
        let lb = graph
            .register_load_balancer(LoadBalancerSpec {
                name: "public".to_string(),
                droplet_tag: "fleet".to_string(),
                forwarding_rules: vec![ForwardingRule {
                    entry_port: 80,
                    entry_protocol: Protocol::Http,
                    target_port: 80,
                    target_protocol: Protocol::Http,
                }],
                healthcheck: HealthCheckSpec { port: 80, protocol: Protocol::Tcp },
                region: "nyc3".to_string(),
            })
            .unwrap();

        let engine = LocalEngine::new();
        let summary = engine.apply(&mut graph).await.unwrap();
        assert_eq!(summary.created, 2);

        let ip = lb.ip.resolve().await.unwrap();
        assert_eq!(ip, "10.88.0.10");
    }
}
