//! CLI entry point for the socli dataset importer.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use socli_core::config::DEFAULT_CONFIG_PATH;
use socli_core::ConfigFile;
use socli_graph::{GraphClient, GraphConfig};

use socli_import::identity::DEFAULT_PASSWORD;
use socli_import::{import_dataset, Dataset, DEFAULT_BATCH_SIZE};

#[derive(Parser)]
#[command(name = "socli-import")]
#[command(about = "Import an ego-network dataset into the socli graph")]
struct Cli {
    /// Directory holding `<ego>.edges` and optional `<ego>.circles` files.
    dataset_dir: PathBuf,

    /// Path to the TOML config file with the [neo4j] table.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Number of users or edges sent per query.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let logs = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if cli.log_json {
        logs.json().init();
    } else {
        logs.init();
    }

    if !cli.dataset_dir.is_dir() {
        anyhow::bail!("{} is not a valid directory", cli.dataset_dir.display());
    }

    let settings = ConfigFile::load(&cli.config)?.ok_or_else(|| {
        anyhow::anyhow!(
            "No Neo4j configuration at {}; run socli once or set SOCLI__NEO4J__URI",
            cli.config.display()
        )
    })?;

    let dataset = Dataset::load(&cli.dataset_dir)?;
    tracing::info!(
        users = dataset.users.len(),
        follows = dataset.edges.len(),
        circles = dataset.circles.len(),
        "Loaded dataset"
    );

    let graph = GraphClient::connect(&GraphConfig::from(&settings)).await?;
    let summary = import_dataset(&graph, &dataset, cli.batch_size).await?;

    println!("Import completed successfully!");
    println!(
        "Imported {} users and {} follow relationships ({} self-loops skipped)",
        summary.users, summary.follows, summary.self_loops
    );
    if summary.circles > 0 {
        println!(
            "Imported {} circles with {} memberships",
            summary.circles, summary.circle_members
        );
    }
    println!("Default password for all imported users: '{DEFAULT_PASSWORD}'");
    println!("Log in as any imported user with username format 'fb<id>' (e.g. 'fb123')");
    Ok(())
}
