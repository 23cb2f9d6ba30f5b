//! CLI entry point for virtual plate screen generation

use clap::Parser;
use platepattern::io::cli::{Cli, ScreenProcessor};
use tracing::Level;

fn main() -> platepattern::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet { Level::WARN } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    ScreenProcessor::new(cli).process()
}
