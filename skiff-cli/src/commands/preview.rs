//! `skiff preview` command

use anyhow::Result;
use skiff_core::{stack, ResourceGraph};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "KIND")]
    kind: &'static str,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "DEPS")]
    deps: usize,
}

/// Evaluate the declaration and print the plan without applying it.
pub fn run(config_path: Option<&str>, overrides: &[String], json: bool) -> Result<()> {
    let config = super::load_config(config_path, overrides)?;

    let mut graph = ResourceGraph::new();
    stack::declare(&config, &mut graph)?;

    if json {
        println!("{}", serde_json::to_string_pretty(graph.resources())?);
        return Ok(());
    }

    let rows: Vec<ResourceRow> = graph
        .resources()
        .iter()
        .map(|record| ResourceRow {
            kind: record.decl.kind(),
            name: record.decl.name().to_string(),
            id: record.id.as_str()[..8].to_string(),
            deps: record.depends_on.len(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());

    println!("{}", table);
    println!(
        "{} resources to create, outputs: {}",
        graph.resources().len(),
        graph.export_names().join(", ")
    );

    Ok(())
}
