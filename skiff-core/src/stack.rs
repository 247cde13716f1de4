//! The fleet stack declaration.
//!
//! Declares a fixed-size fleet of web instances, each carrying its own
//! tag plus a shared fleet tag, and one load balancer that discovers the
//! fleet by the shared tag. The balancer's public endpoint is exported as
//! the stack's sole output. All provisioning is the engine's job; this
//! module only declares.

use crate::config::StackConfig;
use crate::error::Result;
use crate::graph::ResourceGraph;
use crate::types::{
    ForwardingRule, HealthCheckSpec, InstanceSpec, LoadBalancerSpec, Protocol, TagHandle, TagSpec,
};
use tracing::{info, instrument};

/// Number of instances in the fleet.
pub const INSTANCE_COUNT: usize = 3;

/// Machine image for every instance.
pub const IMAGE: &str = "ubuntu-20-04-x64";

/// Size class for every instance.
pub const SIZE: &str = "512mb";

/// Shared tag the load balancer selects backends by.
pub const FLEET_TAG: &str = "demo-app";

/// Load balancer resource name.
pub const LOAD_BALANCER_NAME: &str = "public";

/// Name of the exported stack output.
pub const ENDPOINT_EXPORT: &str = "endpoint";

/// Boot script attached to every instance.
///
/// Installs nginx; the forwarding rules and health check below assume the
/// web server actually listens on port 80.
pub const USER_DATA: &str = "#!/bin/bash
  sudo apt-get update
  sudo apt-get install -y nginx
";

/// Declare the whole stack into `graph`.
///
/// Reads the required `region` configuration key first; if it is missing
/// the declaration aborts with nothing registered, since every resource
/// depends on it.
#[instrument(skip(config, graph))]
pub fn declare(config: &StackConfig, graph: &mut ResourceGraph) -> Result<()> {
    let region = config.require("region")?.to_string();
    info!(region = %region, instances = INSTANCE_COUNT, "Declaring fleet stack");

    let fleet_tag = graph.register_tag(TagSpec::new(FLEET_TAG))?;
    declare_fleet(graph, &fleet_tag, &region, INSTANCE_COUNT)?;

    let balancer = graph.register_load_balancer(LoadBalancerSpec {
        name: LOAD_BALANCER_NAME.to_string(),
        // Backend selection is by tag name, not identifier: the
        // provider's tag routing operates on names.
        droplet_tag: fleet_tag.name.clone(),
        forwarding_rules: vec![ForwardingRule {
            entry_port: 80,
            entry_protocol: Protocol::Http,
            target_port: 80,
            target_protocol: Protocol::Http,
        }],
        healthcheck: HealthCheckSpec { port: 80, protocol: Protocol::Tcp },
        region,
    })?;

    let endpoint = balancer.ip.map(|ip| format!("http://{}", ip));
    graph.export(ENDPOINT_EXPORT, endpoint);
    Ok(())
}

/// Declare `count` instances named `web-<index>`, each tagged with its own
/// uniquely-named tag plus the shared fleet tag.
fn declare_fleet(
    graph: &mut ResourceGraph,
    fleet_tag: &TagHandle,
    region: &str,
    count: usize,
) -> Result<()> {
    for index in 0..count {
        let name = format!("web-{}", index);
        let name_tag = graph.register_tag(TagSpec::new(name.as_str()))?;

        graph.register_instance(InstanceSpec {
            name,
            image: IMAGE.to_string(),
            region: region.to_string(),
            size: SIZE.to_string(),
            tags: vec![name_tag.id, fleet_tag.id.clone()],
            user_data: USER_DATA.to_string(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ResourceDecl;

    #[test]
    fn test_fleet_of_one() {
        let mut graph = ResourceGraph::new();
        let fleet_tag = graph.register_tag(TagSpec::new(FLEET_TAG)).unwrap();

        declare_fleet(&mut graph, &fleet_tag, "nyc3", 1).unwrap();

        let instances: Vec<_> = graph
            .resources()
            .iter()
            .filter_map(|r| match &r.decl {
                ResourceDecl::Instance(spec) => Some(spec),
                _ => None,
            })
            .collect();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].name, "web-0");
    }

    #[test]
    fn test_instance_tag_order_is_own_then_fleet() {
        let mut graph = ResourceGraph::new();
        let fleet_tag = graph.register_tag(TagSpec::new(FLEET_TAG)).unwrap();

        declare_fleet(&mut graph, &fleet_tag, "nyc3", 1).unwrap();

        let own_tag_id = graph
            .resources()
            .iter()
            .find_map(|r| match &r.decl {
                ResourceDecl::Tag(spec) if spec.name == "web-0" => Some(r.id.clone()),
                _ => None,
            })
            .unwrap();

        let instance = graph
            .resources()
            .iter()
            .find_map(|r| match &r.decl {
                ResourceDecl::Instance(spec) => Some(spec),
                _ => None,
            })
            .unwrap();
        assert_eq!(instance.tags, vec![own_tag_id, fleet_tag.id.clone()]);
    }

    #[test]
    fn test_boot_script_is_verbatim() {
        assert!(USER_DATA.starts_with("#!/bin/bash\n"));
        assert!(USER_DATA.contains("apt-get update"));
        assert!(USER_DATA.contains("apt-get install -y nginx"));
        assert!(USER_DATA.ends_with('\n'));
    }
}
