//! Configuration system for TourForge.
//!
//! Load solver configuration from TOML or YAML to choose the construction
//! heuristic, the 2-opt sweep budget and the GTSP rounds without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use tourforge_config::{ConstructionConfig, ImprovementMode, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     [construction]
//!     type = "farthest_insertion"
//!     first_vertex = 3
//!
//!     [two_opt]
//!     max_sweeps = 50
//!     improvement = "best"
//! "#).unwrap();
//!
//! assert_eq!(config.construction, ConstructionConfig::FarthestInsertion { first_vertex: 3 });
//! assert_eq!(config.two_opt.max_sweeps, 50);
//! assert_eq!(config.two_opt.improvement, ImprovementMode::Best);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use tourforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("tourforge.toml").unwrap_or_default();
//! assert_eq!(config.two_opt.max_sweeps, 10);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Random seed for reproducible random construction.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Initial tour construction.
    #[serde(default)]
    pub construction: ConstructionConfig,

    /// Priority 2-opt local search.
    #[serde(default)]
    pub two_opt: TwoOptConfig,

    /// GTSP cluster optimization.
    #[serde(default)]
    pub cluster_optimization: ClusterOptimizationConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, TOML unless the extension says YAML.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, does not parse, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        let config = if is_yaml {
            Self::from_yaml_file(path)?
        } else {
            Self::from_toml_file(path)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cluster_optimization.max_rounds == 0 {
            return Err(ConfigError::Invalid(
                "cluster_optimization.max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the construction heuristic.
    pub fn with_construction(mut self, construction: ConstructionConfig) -> Self {
        self.construction = construction;
        self
    }

    /// Sets the maximum number of 2-opt sweeps.
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.two_opt.max_sweeps = max_sweeps;
        self
    }

    /// Sets the move selection rule of the 2-opt search.
    pub fn with_improvement(mut self, improvement: ImprovementMode) -> Self {
        self.two_opt.improvement = improvement;
        self
    }

    /// Sets the tour representation the 2-opt engine runs on.
    pub fn with_representation(mut self, representation: TourRepresentation) -> Self {
        self.two_opt.representation = representation;
        self
    }

    /// Sets the cluster used to cut the GTSP dynamic program.
    pub fn with_cut_cluster(mut self, cluster: usize) -> Self {
        self.cluster_optimization.cut_cluster = Some(cluster);
        self
    }
}

/// Initial tour construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstructionConfig {
    /// Repeatedly insert the vertex farthest from the partial tour at its
    /// cheapest position.
    FarthestInsertion {
        /// Vertex the partial tour starts from.
        #[serde(default)]
        first_vertex: usize,
    },

    /// Uniformly random permutation, seeded by `random_seed`.
    Random,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self::FarthestInsertion { first_vertex: 0 }
    }
}

/// Which improving move a 2-opt search returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementMode {
    /// The first improving move met.
    #[default]
    First,

    /// The most improving move over the whole scan.
    Best,
}

/// Tour data structure used during local search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TourRepresentation {
    /// Permutation array.
    Array,

    /// Doubly-linked records.
    #[default]
    Linked,
}

/// Priority 2-opt configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TwoOptConfig {
    /// Maximum number of sweeps over all vertices.
    #[serde(default = "default_max_sweeps")]
    pub max_sweeps: usize,

    #[serde(default)]
    pub improvement: ImprovementMode,

    #[serde(default)]
    pub representation: TourRepresentation,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            max_sweeps: default_max_sweeps(),
            improvement: ImprovementMode::default(),
            representation: TourRepresentation::default(),
        }
    }
}

/// GTSP cluster optimization configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClusterOptimizationConfig {
    /// Cluster the dynamic program is cut at; the smallest one if unset.
    #[serde(default)]
    pub cut_cluster: Option<usize>,

    /// Maximum rounds of cluster optimization followed by 2-opt.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
}

impl Default for ClusterOptimizationConfig {
    fn default() -> Self {
        Self {
            cut_cluster: None,
            max_rounds: default_max_rounds(),
        }
    }
}

fn default_max_sweeps() -> usize {
    10
}

fn default_max_rounds() -> usize {
    10
}
