//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use tourforge_config::TourRepresentation;

#[derive(Parser)]
#[command(name = "tourforge")]
#[command(about = "TSP and GTSP local search on TSPLIB instances", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Solve a TSPLIB instance and write the tour
    Solve(SolveArgs),

    /// Print a summary of a TSPLIB instance
    Info {
        /// TSPLIB problem file
        instance: PathBuf,
    },
}

#[derive(clap::Args)]
pub struct SolveArgs {
    /// TSPLIB problem file (.tsp or .gtsp)
    pub instance: PathBuf,

    /// Solver configuration file (TOML or YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum 2-opt sweeps, overriding the configuration
    #[arg(long)]
    pub max_sweeps: Option<usize>,

    /// Take the best 2-opt move per vertex instead of the first
    #[arg(long)]
    pub best: bool,

    /// Tour representation used by 2-opt
    #[arg(long, value_enum)]
    pub representation: Option<RepresentationArg>,

    /// Tour output file [default: instance path with a .tour extension]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use exact floating-point distances instead of TSPLIB integer rounding
    #[arg(long)]
    pub exact: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RepresentationArg {
    Array,
    Linked,
}

impl From<RepresentationArg> for TourRepresentation {
    fn from(arg: RepresentationArg) -> Self {
        match arg {
            RepresentationArg::Array => TourRepresentation::Array,
            RepresentationArg::Linked => TourRepresentation::Linked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solve() {
        let cli = Cli::try_parse_from([
            "tourforge",
            "solve",
            "berlin52.tsp",
            "--max-sweeps",
            "50",
            "--best",
            "--representation",
            "array",
            "-o",
            "out.tour",
        ])
        .unwrap();

        let Commands::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.instance, PathBuf::from("berlin52.tsp"));
        assert_eq!(args.max_sweeps, Some(50));
        assert!(args.best);
        assert!(!args.exact);
        assert_eq!(args.representation, Some(RepresentationArg::Array));
        assert_eq!(args.output, Some(PathBuf::from("out.tour")));
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_parse_info() {
        let cli = Cli::try_parse_from(["tourforge", "info", "a.gtsp"]).unwrap();
        assert!(matches!(cli.command, Commands::Info { .. }));
    }

    #[test]
    fn test_rejects_unknown_representation() {
        assert!(Cli::try_parse_from(["tourforge", "solve", "a.tsp", "--representation", "tree"]).is_err());
    }
}
