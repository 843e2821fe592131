//! TSPLIB tour files (`.tour`).

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;

use tourforge_core::{ArrayTour, CyclicTour};

use crate::error::{Result, TsplibError};

const TOUR_SECTION_HEADER: &str = "TOUR_SECTION";
const TOUR_END_MARKER: &str = "-1";
const EOF_MARKER: &str = "EOF";
const TSPLIB_NODE_ID_OFFSET: usize = 1;

/// A tour as stored in a TSPLIB `.tour` file, with zero-based vertex IDs.
///
/// # Example
///
/// ```
/// use tourforge_core::ArrayTour;
/// use tourforge_tsplib::TsplibTour;
///
/// let tour = ArrayTour::new(vec![2, 0, 1]).unwrap();
/// let text = TsplibTour::from_tour("tiny", &tour).to_string();
///
/// assert_eq!(
///     text,
///     "NAME : tiny\nTYPE : TOUR\nDIMENSION : 3\nTOUR_SECTION\n3\n1\n2\n-1\nEOF\n"
/// );
/// assert_eq!(TsplibTour::parse(&text).unwrap().tour, vec![2, 0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsplibTour {
    pub name: String,
    pub comment_lines: Vec<String>,
    pub dimension: usize,
    pub tour: Vec<usize>,
}

impl TsplibTour {
    /// Captures `tour` walked from its depot.
    pub fn from_tour<T: CyclicTour + ?Sized>(name: impl Into<String>, tour: &T) -> Self {
        let tour = tour.to_sequence();
        Self {
            name: name.into(),
            comment_lines: Vec::new(),
            dimension: tour.len(),
            tour,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    /// Parses tour text. Unknown headers are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut name = String::new();
        let mut comment_lines = Vec::new();
        let mut dimension = None;
        let mut tour = Vec::new();
        let mut in_tour_section = false;
        let mut terminated = false;

        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case(EOF_MARKER) {
                break;
            }

            if in_tour_section {
                if terminated {
                    return Err(TsplibError::parse(
                        line_no,
                        format!("unexpected line after the tour terminator: {line}"),
                    ));
                }
                for token in line.split_whitespace() {
                    if token == TOUR_END_MARKER {
                        terminated = true;
                        break;
                    }
                    let id: usize = token.parse().map_err(|_| {
                        TsplibError::parse(line_no, format!("bad node id {token}"))
                    })?;
                    if id < TSPLIB_NODE_ID_OFFSET {
                        return Err(TsplibError::parse(
                            line_no,
                            format!("Bad node id {id}; TSPLIB ids must be >= {TSPLIB_NODE_ID_OFFSET}"),
                        ));
                    }
                    tour.push(id - TSPLIB_NODE_ID_OFFSET);
                }
                continue;
            }

            if line.eq_ignore_ascii_case(TOUR_SECTION_HEADER) {
                in_tour_section = true;
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                let value = value.trim();
                match key.trim().to_ascii_uppercase().as_str() {
                    "NAME" => name = value.to_string(),
                    "COMMENT" => comment_lines.push(value.to_string()),
                    "TYPE" if !value.eq_ignore_ascii_case("TOUR") => {
                        return Err(TsplibError::Unsupported(format!(
                            "tour file of type {value}"
                        )));
                    }
                    "DIMENSION" => {
                        dimension = Some(value.parse::<usize>().map_err(|_| {
                            TsplibError::parse(line_no, format!("bad DIMENSION {value}"))
                        })?);
                    }
                    _ => {}
                }
            }
        }

        if !in_tour_section {
            return Err(TsplibError::parse(0, "missing TOUR_SECTION"));
        }
        let dimension = dimension.unwrap_or(tour.len());
        if dimension != tour.len() {
            return Err(TsplibError::parse(
                0,
                format!(
                    "DIMENSION is {dimension} but TOUR_SECTION lists {} nodes",
                    tour.len()
                ),
            ));
        }

        Ok(Self {
            name,
            comment_lines,
            dimension,
            tour,
        })
    }

    /// Tour over the vertices `0..max_len`.
    pub fn to_array_tour(&self, max_len: usize) -> Result<ArrayTour> {
        Ok(ArrayTour::partial(self.tour.clone(), max_len)?)
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl Display for TsplibTour {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "NAME : {}", self.name)?;
        for comment in &self.comment_lines {
            writeln!(f, "COMMENT : {comment}")?;
        }
        writeln!(f, "TYPE : TOUR")?;
        writeln!(f, "DIMENSION : {}", self.dimension)?;
        writeln!(f, "{TOUR_SECTION_HEADER}")?;
        for &v in &self.tour {
            writeln!(f, "{}", v + TSPLIB_NODE_ID_OFFSET)?;
        }
        writeln!(f, "{TOUR_END_MARKER}")?;
        writeln!(f, "{EOF_MARKER}")
    }
}
