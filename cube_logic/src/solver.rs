//! Hand-off to the external two-phase solver and the classifier fallback around it.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classification::Classification;
use crate::cube::CubeString;
use crate::hue::classify_by_hue;
use crate::moves::{SolverMove, parse_solution};
use crate::palette::classify_by_distance;
use crate::scan::CubeScan;
use crate::sides::HueThresholds;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub moves: Vec<SolverMove>,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}

/// What the solver answered for one cube string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverReply {
    Solution(Solution),
    /// The solver's own error text, e.g. for a string without 9 facelets of every face.
    Error(String),
}

impl SolverReply {
    /// Parses the solver's textual answer: `"R1 U2 F3 (3f)"`, a bare move list, or a message
    /// starting with `Error`.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.starts_with("Error") {
            return SolverReply::Error(text.to_string());
        }
        let moves = text.split_once('(').map_or(text, |(moves, _)| moves);
        match parse_solution(moves) {
            Ok(moves) => SolverReply::Solution(Solution { moves }),
            Err(e) => SolverReply::Error(format!("Error: unreadable solver output ({e})")),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SolverReply::Error(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolverReply::Solution(s) => Some(s),
            SolverReply::Error(_) => None,
        }
    }
}

impl fmt::Display for SolverReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverReply::Solution(s) => write!(f, "{} moves  {s}", s.len()),
            SolverReply::Error(e) => f.write_str(e),
        }
    }
}

/// The external solver. It is also the validator of the cube string.
pub trait Solver {
    fn solve(&mut self, cube: &CubeString) -> SolverReply;
}

impl<F> Solver for F
where
    F: FnMut(&CubeString) -> SolverReply,
{
    fn solve(&mut self, cube: &CubeString) -> SolverReply {
        self(cube)
    }
}

/// Which classifier produced the string the solver accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectMethod {
    Distance,
    Hue,
    /// Both classifiers failed; the operator has to rescan.
    Failed,
}

impl fmt::Display for DetectMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DetectMethod::Distance => "BGR",
            DetectMethod::Hue => "HSV",
            DetectMethod::Failed => "Error",
        })
    }
}

#[derive(Debug, Clone)]
pub struct CubeRead {
    pub method: DetectMethod,
    /// Last classification attempted; `None` when the hue fallback could not even name the
    /// six sides.
    pub classification: Option<Classification>,
    pub cube_string: Option<CubeString>,
    pub reply: SolverReply,
}

impl CubeRead {
    pub fn succeeded(&self) -> bool {
        self.method != DetectMethod::Failed
    }
}

/// Classifies a scan and asks the solver for a solution, falling back to the hue classifier
/// when the solver rejects the distance classifier's string.
pub fn read_cube<S: Solver + ?Sized>(
    scan: &CubeScan,
    solver: &mut S,
    thresholds: &HueThresholds,
) -> CubeRead {
    let (classification, _) = classify_by_distance(scan, thresholds);
    let cube_string = classification.cube_string();
    let reply = solver.solve(&cube_string);
    if !reply.is_error() {
        info!(%cube_string, "cube status via color distance");
        return CubeRead {
            method: DetectMethod::Distance,
            classification: Some(classification),
            cube_string: Some(cube_string),
            reply,
        };
    }
    warn!(%cube_string, %reply, "solver rejected distance classification, trying hue");

    match classify_by_hue(scan, thresholds) {
        Ok(classification) => {
            let cube_string = classification.cube_string();
            let reply = solver.solve(&cube_string);
            let method = if reply.is_error() {
                warn!(%cube_string, %reply, "solver rejected hue classification");
                DetectMethod::Failed
            } else {
                info!(%cube_string, "cube status via hue");
                DetectMethod::Hue
            };
            CubeRead {
                method,
                classification: Some(classification),
                cube_string: Some(cube_string),
                reply,
            }
        }
        Err(e) => {
            warn!("hue classification failed: {e}");
            CubeRead {
                method: DetectMethod::Failed,
                classification: None,
                cube_string: None,
                reply: SolverReply::Error(format!("Error: {e}")),
            }
        }
    }
}
