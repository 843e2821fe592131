//! `tourforge` command-line solver.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => {
            tourforge_console::init();
            let report = commands::solve(&args)?;
            println!(
                "{} tour of {} vertices, cost {}, written to {}",
                "✓".bright_green().bold(),
                report.tour.len(),
                report.cost.bright_yellow(),
                report.output.display()
            );
        }
        Commands::Info { instance } => commands::info(&instance)?,
    }

    Ok(())
}
