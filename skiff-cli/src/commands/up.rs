//! `skiff up` command

use anyhow::{Context, Result};
use colored::Colorize;
use skiff_core::{stack, LocalEngine, ProvisioningEngine, ResourceGraph};
use tracing::info;

/// Evaluate the declaration, apply it through an engine, and print the
/// resolved stack outputs.
pub async fn run(config_path: Option<&str>, overrides: &[String]) -> Result<()> {
    let config = super::load_config(config_path, overrides)?;

    let mut graph = ResourceGraph::new();
    stack::declare(&config, &mut graph)?;

    let engine = LocalEngine::new();
    info!(engine = engine.name(), "Applying declaration");
    println!("{} Applying {} resources", "→".cyan().bold(), graph.resources().len());

    let summary = engine.apply(&mut graph).await?;
    println!("{} {} resources created", "✓".green().bold(), summary.created);

    let endpoint = graph
        .take_export(stack::ENDPOINT_EXPORT)
        .context("stack declared no endpoint output")?
        .resolve()
        .await?;
    println!("  {}: {}", stack::ENDPOINT_EXPORT.bold(), endpoint.cyan());

    Ok(())
}
