//! CLI entry point for the socli shell.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use socli_cli::{setup, Console, Shell};
use socli_core::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(name = "socli")]
#[command(about = "Interactive shell for the socli social network")]
struct Cli {
    /// Path to the TOML config file with the [neo4j] table.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with command output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut console = Console::new()?;

    let settings = setup::resolve_settings(&cli.config, &mut console)?;
    let store = setup::connect(&settings, &mut console).await;

    let mut shell = Shell::new(store, console);
    shell.run().await;
    Ok(())
}
