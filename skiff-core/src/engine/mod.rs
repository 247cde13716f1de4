//! Provisioning engine seam.
//!
//! The engine is an external collaborator: it owns resource lifecycles,
//! creation order, convergence against prior state, and rollback. Skiff
//! hands it a declared [`ResourceGraph`] and consumes the outputs it
//! fulfills. Any engine failure is fatal to the run and surfaces
//! unmodified.

use crate::error::Result;
use crate::graph::ResourceGraph;
use async_trait::async_trait;

pub mod local;

pub use local::LocalEngine;

/// Summary of an applied declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplySummary {
    /// Number of resources the engine created
    pub created: usize,
}

/// A provisioning engine that can apply a declared resource graph.
#[async_trait]
pub trait ProvisioningEngine: Send + Sync {
    /// Apply a declaration.
    ///
    /// The engine must fulfill the deferred output of every resource that
    /// reaches a provisioned state (via [`ResourceGraph::take_ip_slot`]).
    /// Independent resources may be created in any order; the recorded
    /// dependency edges are the only ordering constraint.
    async fn apply(&self, graph: &mut ResourceGraph) -> Result<ApplySummary>;

    /// Engine name for logs.
    fn name(&self) -> &str;
}
