//! Declarative resource graph.
//!
//! Resources are registered here in a single synchronous pass; the graph
//! is then handed to a provisioning engine, which owns every lifecycle
//! (ordering, convergence, rollback). This code owns only the
//! declaration: what exists, how resources reference each other, and
//! which outputs the stack exports.
//!
//! References double as data dependencies: an instance's tag identifiers
//! and a balancer's selector tag must already be declared, and the graph
//! records the edges so an engine is free to create independent resources
//! in any order.

use crate::error::{Result, SkiffError};
use crate::output::{Output, OutputSlot};
use crate::types::{
    InstanceHandle, InstanceSpec, LoadBalancerHandle, LoadBalancerSpec, ResourceId, TagHandle,
    TagSpec,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// One declared resource, in the engine wire schema.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceDecl {
    Tag(TagSpec),
    Instance(InstanceSpec),
    LoadBalancer(LoadBalancerSpec),
}

impl ResourceDecl {
    /// Resource kind, as used for name uniqueness and display.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tag(_) => "tag",
            Self::Instance(_) => "instance",
            Self::LoadBalancer(_) => "load_balancer",
        }
    }

    /// Resource name.
    pub fn name(&self) -> &str {
        match self {
            Self::Tag(spec) => &spec.name,
            Self::Instance(spec) => &spec.name,
            Self::LoadBalancer(spec) => &spec.name,
        }
    }
}

/// A registered resource with its identity and recorded dependencies.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRecord {
    /// Engine-assigned identifier
    pub id: ResourceId,

    #[serde(flatten)]
    pub decl: ResourceDecl,

    /// Resources that must be resolvable before this one is fully specified
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<ResourceId>,
}

/// The declaration registry handed to a provisioning engine.
#[derive(Debug, Default)]
pub struct ResourceGraph {
    resources: Vec<ResourceRecord>,
    names: HashSet<(&'static str, String)>,
    tags_by_name: HashMap<String, ResourceId>,
    tag_ids: HashSet<ResourceId>,
    ip_slots: HashMap<ResourceId, OutputSlot<String>>,
    exports: HashMap<String, Output<String>>,
}

impl ResourceGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn claim_name(&mut self, kind: &'static str, name: &str) -> Result<()> {
        if !self.names.insert((kind, name.to_string())) {
            return Err(SkiffError::DuplicateResource { kind, name: name.to_string() });
        }
        Ok(())
    }

    /// Register a tag resource.
    #[instrument(skip(self, spec), fields(name = %spec.name))]
    pub fn register_tag(&mut self, spec: TagSpec) -> Result<TagHandle> {
        self.claim_name("tag", &spec.name)?;

        let id = ResourceId::generate();
        self.tags_by_name.insert(spec.name.clone(), id.clone());
        self.tag_ids.insert(id.clone());

        let handle = TagHandle { id: id.clone(), name: spec.name.clone() };
        debug!(id = %id, "Registered tag");

        self.resources.push(ResourceRecord {
            id,
            decl: ResourceDecl::Tag(spec),
            depends_on: Vec::new(),
        });
        Ok(handle)
    }

    /// Register a compute instance resource.
    ///
    /// Every tag reference must name an already-declared tag; the
    /// references become the instance's dependency edges.
    #[instrument(skip(self, spec), fields(name = %spec.name))]
    pub fn register_instance(&mut self, spec: InstanceSpec) -> Result<InstanceHandle> {
        for tag in &spec.tags {
            if !self.tag_ids.contains(tag) {
                return Err(SkiffError::UnknownTag { reference: tag.to_string() });
            }
        }
        self.claim_name("instance", &spec.name)?;

        let id = ResourceId::generate();
        let handle = InstanceHandle { id: id.clone(), name: spec.name.clone() };
        debug!(id = %id, tags = spec.tags.len(), "Registered instance");

        let depends_on = spec.tags.clone();
        self.resources.push(ResourceRecord { id, decl: ResourceDecl::Instance(spec), depends_on });
        Ok(handle)
    }

    /// Register a load balancer resource.
    ///
    /// The backend selector references a tag by name; that tag must
    /// already be declared so the name is resolvable. The balancer's
    /// public address is returned as a pending [`Output`].
    #[instrument(skip(self, spec), fields(name = %spec.name))]
    pub fn register_load_balancer(&mut self, spec: LoadBalancerSpec) -> Result<LoadBalancerHandle> {
        let selector = self.tags_by_name.get(&spec.droplet_tag).cloned().ok_or_else(|| {
            SkiffError::UnknownTag { reference: spec.droplet_tag.clone() }
        })?;
        self.claim_name("load_balancer", &spec.name)?;

        let id = ResourceId::generate();
        let (slot, ip) = Output::pending(format!("{}.ip", spec.name));
        self.ip_slots.insert(id.clone(), slot);
        debug!(id = %id, selector = %spec.droplet_tag, "Registered load balancer");

        self.resources.push(ResourceRecord {
            id: id.clone(),
            decl: ResourceDecl::LoadBalancer(spec),
            depends_on: vec![selector],
        });
        Ok(LoadBalancerHandle { id, ip })
    }

    /// Publish a named stack output.
    pub fn export(&mut self, name: &str, output: Output<String>) {
        debug!(name, "Exporting stack output");
        self.exports.insert(name.to_string(), output.named(name));
    }

    /// Take a named stack output for resolution. Each output has exactly
    /// one consumer, so this removes it from the graph.
    pub fn take_export(&mut self, name: &str) -> Option<Output<String>> {
        self.exports.remove(name)
    }

    /// Names of the currently exported outputs.
    pub fn export_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.exports.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The declared resources, in registration order.
    pub fn resources(&self) -> &[ResourceRecord] {
        &self.resources
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Engine side: take the producer slot for a load balancer's address.
    pub fn take_ip_slot(&mut self, id: &ResourceId) -> Option<OutputSlot<String>> {
        self.ip_slots.remove(id)
    }
}
