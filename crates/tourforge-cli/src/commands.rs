//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::info;

use tourforge_config::{ImprovementMode, SolverConfig};
use tourforge_core::{ArrayTour, CostOracle, CyclicTour, PointGraph};
use tourforge_solver::{farthest_insertion, solve_gtsp, solve_tsp};
use tourforge_tsplib::{TsplibProblem, TsplibTour};

use crate::cli::SolveArgs;

/// Outcome of `solve`, as written to disk.
pub struct SolveReport {
    pub output: PathBuf,
    pub tour: Vec<usize>,
    pub cost: String,
}

pub fn solve(args: &SolveArgs) -> Result<SolveReport> {
    let config = load_config(args)?;
    let problem = TsplibProblem::from_file(&args.instance)
        .with_context(|| format!("failed to read {}", args.instance.display()))?;
    let points = problem.to_point_graph()?;

    let (tour, cost) = if args.exact {
        solve_problem(&points, &points, &config)?
    } else {
        let matrix = points.explicitize(1.0)?;
        solve_problem(&points, &matrix, &config)?
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.instance.with_extension("tour"));
    let name = if problem.name.is_empty() {
        stem(&args.instance)
    } else {
        problem.name.clone()
    };
    let mut tour_file = TsplibTour::from_tour(name, &tour);
    tour_file.comment_lines.push(format!("cost {cost}"));
    tour_file
        .write_to_file(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        event = "tour_written",
        output = %output.display(),
        cost = %cost,
    );

    Ok(SolveReport {
        output,
        tour: tour_file.tour,
        cost,
    })
}

pub fn info(instance: &Path) -> Result<()> {
    let problem = TsplibProblem::from_file(instance)
        .with_context(|| format!("failed to read {}", instance.display()))?;

    println!("{:<18}{}", "Name:".bright_black(), problem.name.bright_white().bold());
    println!("{:<18}{}", "Type:".bright_black(), problem.problem_type);
    println!("{:<18}{}", "Dimension:".bright_black(), problem.dimension);
    println!("{:<18}{}", "Edge weights:".bright_black(), problem.edge_weight_type);
    for comment in &problem.comment_lines {
        println!("{:<18}{}", "Comment:".bright_black(), comment);
    }
    if let Some(clustering) = problem.clustering()? {
        let smallest = clustering.smallest_cluster();
        println!("{:<18}{}", "Clusters:".bright_black(), clustering.num_clusters());
        println!(
            "{:<18}{} ({} vertices)",
            "Smallest cluster:".bright_black(),
            smallest + 1,
            clustering.cluster_size(smallest)
        );
    }
    Ok(())
}

fn load_config(args: &SolveArgs) -> Result<SolverConfig> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SolverConfig::default(),
    };
    if let Some(max_sweeps) = args.max_sweeps {
        config = config.with_max_sweeps(max_sweeps);
    }
    if args.best {
        config = config.with_improvement(ImprovementMode::Best);
    }
    if let Some(representation) = args.representation {
        config = config.with_representation(representation.into());
    }
    config.validate()?;
    Ok(config)
}

// Solves on `oracle`; GTSP cluster order comes from the point geometry.
fn solve_problem<G>(
    points: &PointGraph<f64>,
    oracle: &G,
    config: &SolverConfig,
) -> Result<(ArrayTour, String)>
where
    G: CostOracle,
{
    let n = oracle.num_vertices();
    if oracle.is_clustered() {
        let means = points.cluster_means()?;
        let order = farthest_insertion(&means, 0)?.to_sequence();
        let solution = solve_gtsp(oracle, &order, config)?;
        let tour = ArrayTour::partial(solution.tour, n)?;
        Ok((tour, solution.cost.to_string()))
    } else {
        let solution = solve_tsp(oracle, config)?;
        let tour = ArrayTour::hamiltonian(solution.tour, n)?;
        Ok((tour, solution.cost.to_string()))
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tour".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_PLUS: &str = "\
NAME : five
TYPE : TSP
DIMENSION : 5
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0 0
2 10 10
3 10 0
4 0 10
5 5 0
EOF
";

    const TWO_SETS: &str = "\
NAME : pairs
TYPE : GTSP
DIMENSION : 4
GTSP_SETS : 2
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0 0
2 10 0
3 3 0
4 20 0
GTSP_SET_SECTION
1 1 2 -1
2 3 4 -1
EOF
";

    fn args(instance: PathBuf) -> SolveArgs {
        SolveArgs {
            instance,
            config: None,
            max_sweeps: None,
            best: false,
            representation: None,
            output: None,
            exact: false,
        }
    }

    #[test]
    fn test_solve_tsp_writes_tour() {
        let dir = tempfile::tempdir().unwrap();
        let instance = dir.path().join("five.tsp");
        std::fs::write(&instance, TRIANGLE_PLUS).unwrap();

        let report = solve(&args(instance)).unwrap();

        assert_eq!(report.output, dir.path().join("five.tour"));
        assert_eq!(report.cost, "40");
        let read = TsplibTour::from_file(&report.output).unwrap();
        assert_eq!(read.tour, report.tour);
        assert_eq!(read.name, "five");
        assert_eq!(read.dimension, 5);
    }

    #[test]
    fn test_solve_gtsp_exact() {
        let dir = tempfile::tempdir().unwrap();
        let instance = dir.path().join("pairs.gtsp");
        std::fs::write(&instance, TWO_SETS).unwrap();
        let output = dir.path().join("out.tour");

        let mut solve_args = args(instance);
        solve_args.exact = true;
        solve_args.output = Some(output.clone());
        let report = solve(&solve_args).unwrap();

        assert_eq!(report.output, output);
        assert_eq!(report.cost, "6");
        let mut tour = report.tour.clone();
        tour.sort_unstable();
        assert_eq!(tour, vec![0, 2]);
    }

    #[test]
    fn test_solve_missing_instance() {
        let dir = tempfile::tempdir().unwrap();
        assert!(solve(&args(dir.path().join("missing.tsp"))).is_err());
    }

    #[test]
    fn test_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("solver.toml");
        std::fs::write(&config_path, "[two_opt]\nmax_sweeps = 3\n").unwrap();

        let mut solve_args = args(PathBuf::from("unused.tsp"));
        solve_args.config = Some(config_path);
        solve_args.best = true;
        let config = load_config(&solve_args).unwrap();
        assert_eq!(config.two_opt.max_sweeps, 3);
        assert_eq!(config.two_opt.improvement, ImprovementMode::Best);

        solve_args.max_sweeps = Some(9);
        assert_eq!(load_config(&solve_args).unwrap().two_opt.max_sweeps, 9);
    }

    #[test]
    fn test_info() {
        let dir = tempfile::tempdir().unwrap();
        let instance = dir.path().join("pairs.gtsp");
        std::fs::write(&instance, TWO_SETS).unwrap();
        assert!(info(&instance).is_ok());
    }
}
