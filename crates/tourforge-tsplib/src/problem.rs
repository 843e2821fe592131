//! TSPLIB problem files (`.tsp`, `.gtsp`).

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use tourforge_core::{Clustering, Norm, PointGraph};

use crate::error::{Result, TsplibError};

const NODE_COORD_SECTION: &str = "NODE_COORD_SECTION";
const GTSP_SET_SECTION: &str = "GTSP_SET_SECTION";
const EOF_MARKER: &str = "EOF";
const SECTION_END_MARKER: i64 = -1;
const TSPLIB_NODE_ID_BASE: usize = 1;

/// TSPLIB `TYPE` values handled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType {
    Tsp,
    Gtsp,
}

impl ProblemType {
    fn parse(value: &str, line: usize) -> Result<Self> {
        match value {
            "TSP" => Ok(Self::Tsp),
            "GTSP" => Ok(Self::Gtsp),
            "ATSP" | "AGTSP" | "TOUR" => Err(TsplibError::Unsupported(format!(
                "problem type {value}"
            ))),
            _ => Err(TsplibError::parse(
                line,
                format!("Unrecognized TSPLIB file type: {value}"),
            )),
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tsp => f.write_str("TSP"),
            Self::Gtsp => f.write_str("GTSP"),
        }
    }
}

/// TSPLIB `EDGE_WEIGHT_TYPE` values handled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeWeightType {
    Euc2d,
    Euc3d,
    Man2d,
    Man3d,
}

impl EdgeWeightType {
    fn parse(value: &str, line: usize) -> Result<Self> {
        match value {
            "EUC_2D" => Ok(Self::Euc2d),
            "EUC_3D" => Ok(Self::Euc3d),
            "MAN_2D" => Ok(Self::Man2d),
            "MAN_3D" => Ok(Self::Man3d),
            "EXPLICIT" => Err(TsplibError::Unsupported(format!(
                "edge weight type {value}"
            ))),
            _ => Err(TsplibError::parse(
                line,
                format!("Unrecognized TSPLIB EDGE_WEIGHT_TYPE: {value}"),
            )),
        }
    }

    /// Coordinates per node.
    pub fn dim(self) -> usize {
        match self {
            Self::Euc2d | Self::Man2d => 2,
            Self::Euc3d | Self::Man3d => 3,
        }
    }

    pub fn norm(self) -> Norm {
        match self {
            Self::Euc2d | Self::Euc3d => Norm::Euclidean,
            Self::Man2d | Self::Man3d => Norm::Manhattan,
        }
    }
}

impl fmt::Display for EdgeWeightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Euc2d => "EUC_2D",
            Self::Euc3d => "EUC_3D",
            Self::Man2d => "MAN_2D",
            Self::Man3d => "MAN_3D",
        };
        f.write_str(s)
    }
}

/// A geometric TSP or GTSP instance read from TSPLIB.
///
/// Node IDs are converted to zero-based vertex IDs.
///
/// # Example
///
/// ```
/// use tourforge_core::CostOracle;
/// use tourforge_tsplib::{ProblemType, TsplibProblem};
///
/// let problem = TsplibProblem::parse(
///     "NAME : tiny
///      TYPE : GTSP
///      DIMENSION : 4
///      GTSP_SETS : 2
///      EDGE_WEIGHT_TYPE : EUC_2D
///      NODE_COORD_SECTION
///      1 0 0
///      2 3 4
///      3 6 8
///      4 0 8
///      GTSP_SET_SECTION
///      1 1 2 -1
///      2 3 4 -1
///      EOF",
/// )
/// .unwrap();
///
/// assert_eq!(problem.problem_type, ProblemType::Gtsp);
/// let g = problem.to_point_graph().unwrap();
/// assert_eq!(g.num_clusters(), 2);
/// assert_eq!(g.edge_cost(0, 1), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TsplibProblem {
    pub name: String,
    pub comment_lines: Vec<String>,
    pub problem_type: ProblemType,
    pub dimension: usize,
    pub edge_weight_type: EdgeWeightType,
    /// Coordinates of vertex `v`, `edge_weight_type.dim()` values each.
    pub coords: Vec<Vec<f64>>,
    /// Zero-based members of every cluster; `Some` for GTSP only.
    pub clusters: Option<Vec<Vec<usize>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    NodeCoords,
    GtspSets,
}

#[derive(Default)]
struct Header {
    name: Option<String>,
    comment_lines: Vec<String>,
    problem_type: Option<ProblemType>,
    dimension: Option<usize>,
    num_sets: Option<usize>,
    edge_weight_type: Option<EdgeWeightType>,
}

// Token-level state of GTSP_SET_SECTION: each row is `id member... -1`.
struct SetScanner {
    clusters: Vec<Vec<usize>>,
    current: usize,
    expecting_id: bool,
}

impl TsplibProblem {
    /// Reads and parses a TSPLIB problem file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "parsing TSPLIB problem");
        Self::parse(&text)
    }

    /// Parses TSPLIB problem text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut header = Header::default();
        let mut section = Section::Header;
        let mut coords: Vec<Option<Vec<f64>>> = Vec::new();
        let mut sets: Option<SetScanner> = None;

        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case(EOF_MARKER) {
                break;
            }

            if section == Section::NodeCoords && starts_with_number(line) {
                parse_coord_line(line, line_no, &mut coords)?;
                continue;
            }
            if section == Section::GtspSets {
                if let Some(scanner) = sets.as_mut() {
                    if !scanner.is_complete() {
                        scanner.scan_line(line, line_no, header.dimension.unwrap_or(0))?;
                        continue;
                    }
                }
            }

            if line == NODE_COORD_SECTION {
                let dimension = header.dimension.ok_or_else(|| {
                    TsplibError::parse(line_no, "NODE_COORD_SECTION before DIMENSION")
                })?;
                coords = vec![None; dimension];
                section = Section::NodeCoords;
            } else if line == GTSP_SET_SECTION {
                let num_sets = header.num_sets.ok_or_else(|| {
                    TsplibError::parse(line_no, "GTSP_SET_SECTION before GTSP_SETS")
                })?;
                sets = Some(SetScanner::new(num_sets));
                section = Section::GtspSets;
            } else if let Some((key, value)) = line.split_once(':') {
                section = Section::Header;
                header.apply(key.trim(), value.trim(), line_no)?;
            } else if line.ends_with("_SECTION") {
                return Err(TsplibError::Unsupported(format!("section {line}")));
            } else {
                return Err(TsplibError::parse(
                    line_no,
                    format!("unexpected line: {line}"),
                ));
            }
        }

        Self::assemble(header, coords, sets)
    }

    fn assemble(header: Header, coords: Vec<Option<Vec<f64>>>, sets: Option<SetScanner>) -> Result<Self> {
        let problem_type = header
            .problem_type
            .ok_or_else(|| TsplibError::parse(0, "missing TYPE"))?;
        let dimension = header
            .dimension
            .ok_or_else(|| TsplibError::parse(0, "missing DIMENSION"))?;
        let edge_weight_type = header
            .edge_weight_type
            .ok_or_else(|| TsplibError::parse(0, "missing EDGE_WEIGHT_TYPE"))?;
        if coords.is_empty() {
            return Err(TsplibError::parse(0, "missing NODE_COORD_SECTION"));
        }

        let mut points = Vec::with_capacity(dimension);
        for (v, point) in coords.into_iter().enumerate() {
            let point = point.ok_or_else(|| {
                TsplibError::parse(
                    0,
                    format!("node {} has no coordinates", v + TSPLIB_NODE_ID_BASE),
                )
            })?;
            if point.len() != edge_weight_type.dim() {
                return Err(TsplibError::parse(
                    0,
                    format!(
                        "node {} has {} coordinates, {edge_weight_type} needs {}",
                        v + TSPLIB_NODE_ID_BASE,
                        point.len(),
                        edge_weight_type.dim()
                    ),
                ));
            }
            points.push(point);
        }

        let clusters = match problem_type {
            ProblemType::Tsp => {
                if sets.is_some() {
                    warn!("ignoring GTSP_SET_SECTION in a TSP file");
                }
                None
            }
            ProblemType::Gtsp => {
                let scanner =
                    sets.ok_or_else(|| TsplibError::parse(0, "Failed to find GTSP_SET_SECTION."))?;
                if !scanner.is_complete() {
                    return Err(TsplibError::parse(0, "Incomplete GTSP_SET_SECTION"));
                }
                Some(scanner.clusters)
            }
        };

        Ok(Self {
            name: header.name.unwrap_or_default(),
            comment_lines: header.comment_lines,
            problem_type,
            dimension,
            edge_weight_type,
            coords: points,
            clusters,
        })
    }

    pub fn num_clusters(&self) -> Option<usize> {
        self.clusters.as_ref().map(Vec::len)
    }

    /// Validated clustering of a GTSP instance.
    pub fn clustering(&self) -> Result<Option<Arc<Clustering>>> {
        match &self.clusters {
            Some(clusters) => Ok(Some(Arc::new(Clustering::new(
                self.dimension,
                clusters.clone(),
            )?))),
            None => Ok(None),
        }
    }

    /// Geometric cost oracle of the instance, clustered for GTSP.
    ///
    /// Distances are not rounded; use
    /// [`PointGraph::explicitize`] for TSPLIB integer costs.
    pub fn to_point_graph(&self) -> Result<PointGraph<f64>> {
        let graph = PointGraph::from_points(&self.coords, self.edge_weight_type.norm())?;
        match self.clustering()? {
            Some(clustering) => Ok(graph.with_clustering(clustering)?),
            None => Ok(graph),
        }
    }
}

impl Header {
    fn apply(&mut self, key: &str, value: &str, line: usize) -> Result<()> {
        match key.to_ascii_uppercase().as_str() {
            "NAME" => self.name = Some(value.to_string()),
            "COMMENT" => self.comment_lines.push(value.to_string()),
            "TYPE" => self.problem_type = Some(ProblemType::parse(value, line)?),
            "DIMENSION" => {
                let dimension = parse_count(value, line, "DIMENSION")?;
                if dimension == 0 {
                    return Err(TsplibError::parse(line, "DIMENSION must be positive"));
                }
                self.dimension = Some(dimension);
            }
            "GTSP_SETS" => {
                let num_sets = parse_count(value, line, "GTSP_SETS")?;
                if num_sets < 2 {
                    return Err(TsplibError::parse(
                        line,
                        format!("GTSP_SETS must be >= 2, got {num_sets}"),
                    ));
                }
                self.num_sets = Some(num_sets);
            }
            "EDGE_WEIGHT_TYPE" => {
                self.edge_weight_type = Some(EdgeWeightType::parse(value, line)?);
            }
            _ => warn!(line, key, "ignoring unknown TSPLIB header"),
        }
        Ok(())
    }
}

impl SetScanner {
    fn new(num_sets: usize) -> Self {
        Self {
            clusters: vec![Vec::new(); num_sets],
            current: 0,
            expecting_id: true,
        }
    }

    fn is_complete(&self) -> bool {
        self.current == self.clusters.len()
    }

    fn scan_line(&mut self, line: &str, line_no: usize, num_vertices: usize) -> Result<()> {
        for token in line.split_whitespace() {
            if self.is_complete() {
                return Err(TsplibError::parse(
                    line_no,
                    format!("unexpected value {token} after the last GTSP set"),
                ));
            }
            let value: i64 = token.parse().map_err(|_| {
                TsplibError::parse(line_no, format!("expected an integer, got {token}"))
            })?;

            let cluster_id = self.current + TSPLIB_NODE_ID_BASE;
            if self.expecting_id {
                if value != cluster_id as i64 {
                    warn!(
                        line = line_no,
                        cluster_id, value, "GTSP set row begins with an unexpected value"
                    );
                }
                self.expecting_id = false;
            } else if value == SECTION_END_MARKER {
                self.current += 1;
                self.expecting_id = true;
            } else if value >= TSPLIB_NODE_ID_BASE as i64 && value <= num_vertices as i64 {
                self.clusters[self.current].push(value as usize - TSPLIB_NODE_ID_BASE);
            } else {
                return Err(TsplibError::parse(
                    line_no,
                    format!(
                        "Unexpected value {value} while scanning for cluster {cluster_id}: permitted values are -1 or 1, ..., {num_vertices}"
                    ),
                ));
            }
        }
        Ok(())
    }
}

fn starts_with_number(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+')
}

fn parse_count(value: &str, line: usize, key: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| TsplibError::parse(line, format!("{key} must be a non-negative integer, got {value}")))
}

fn parse_coord_line(line: &str, line_no: usize, coords: &mut [Option<Vec<f64>>]) -> Result<()> {
    let mut fields = line.split_whitespace();
    let id: usize = fields
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| TsplibError::parse(line_no, "expected a node id"))?;
    if id < TSPLIB_NODE_ID_BASE || id > coords.len() {
        return Err(TsplibError::parse(
            line_no,
            format!("node id {id} is outside 1..={}", coords.len()),
        ));
    }

    let point = fields
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| TsplibError::parse(line_no, format!("bad coordinate {s}")))
        })
        .collect::<Result<Vec<f64>>>()?;
    if !(2..=3).contains(&point.len()) {
        return Err(TsplibError::parse(
            line_no,
            format!("expected 2 or 3 coordinates, got {}", point.len()),
        ));
    }

    let slot = &mut coords[id - TSPLIB_NODE_ID_BASE];
    if slot.is_some() {
        return Err(TsplibError::parse(
            line_no,
            format!("node {id} appears twice"),
        ));
    }
    *slot = Some(point);
    Ok(())
}
