use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "skiff")]
#[command(about = "Declarative fleet provisioning CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the declared resource plan without applying it
    Preview {
        /// Path to the stack configuration JSON
        #[arg(short, long)]
        config: Option<String>,

        /// Configuration overrides (KEY=VALUE)
        #[arg(short, long)]
        set: Vec<String>,

        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate the declaration, apply it, and print the stack outputs
    Up {
        /// Path to the stack configuration JSON
        #[arg(short, long)]
        config: Option<String>,

        /// Configuration overrides (KEY=VALUE)
        #[arg(short, long)]
        set: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Preview { config, set, json } => {
            commands::preview::run(config.as_deref(), &set, json)
        }
        Commands::Up { config, set } => commands::up::run(config.as_deref(), &set).await,
    }
}
