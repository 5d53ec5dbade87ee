//! wikidex CLI — interview-catalogue synchronizer.
//!
//! Rebuilds a wiki's interview catalogue page from the interview namespace:
//! infobox fields + category tags, sorted by publication date, written back
//! as one JSON document.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
