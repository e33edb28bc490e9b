//! Translation of solver moves into robot actions.
//!
//! The robot cannot turn an arbitrary face. It can only:
//! - Spin the whole cube about the vertical axis while it rests on its bottom face,
//! - Flip the whole cube so the front face becomes the bottom face,
//! - Rotate the bottom layer while holding the two layers above.
//!
//! Every solver move `<face><turns>` therefore becomes: spin so the wanted face is in front
//! (when it is a side face), flip it down, rotate the bottom layer. Spin and rotate counts are
//! positive clockwise when looking at the bottom face; the solver's 3 quarter turns become -1.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cube::Face;
use crate::error::ParseMoveError;
use crate::solver::SolverReply;

/// Which face rests on the robot (down) and which faces the flipper (front).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawOrientation", into = "RawOrientation")]
pub struct Orientation {
    down: Face,
    front: Face,
}

#[derive(Serialize, Deserialize)]
struct RawOrientation {
    down: Face,
    front: Face,
}

impl Orientation {
    /// Down D, front F: the solver's reference orientation.
    pub const HOME: Orientation = Orientation {
        down: Face::D,
        front: Face::F,
    };

    /// Down R, front B: where the robot leaves the cube after the last scan photo.
    pub const AFTER_ROBOT_SCAN: Orientation = Orientation {
        down: Face::R,
        front: Face::B,
    };

    /// `None` unless the two faces are adjacent (24 valid orientations).
    pub fn new(down: Face, front: Face) -> Option<Self> {
        (down != front && down.opposite() != front).then_some(Self { down, front })
    }

    pub fn down(&self) -> Face {
        self.down
    }

    pub fn front(&self) -> Face {
        self.front
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::HOME
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.down, self.front)
    }
}

impl TryFrom<RawOrientation> for Orientation {
    type Error = String;

    fn try_from(raw: RawOrientation) -> Result<Self, Self::Error> {
        Orientation::new(raw.down, raw.front)
            .ok_or_else(|| format!("{} and {} are not adjacent faces", raw.down, raw.front))
    }
}

impl From<Orientation> for RawOrientation {
    fn from(o: Orientation) -> Self {
        Self {
            down: o.down,
            front: o.front,
        }
    }
}

/// Spin that brings `target` in front while the bottom face stays down.
///
/// Each row lists, for one orientation, the face brought in front by a clockwise quarter
/// spin, a counter-clockwise quarter spin and a half spin. A target already in front, or on
/// the top/bottom axis, needs no spin.
pub fn spin_to_front(orientation: Orientation, target: Face) -> i8 {
    use Face::*;
    let (cw, ccw, half) = match (orientation.down, orientation.front) {
        (D, F) => (L, R, B),
        (F, U) => (L, R, D),
        (U, B) => (L, R, F),
        (B, D) => (L, R, U),
        (D, L) => (B, F, R),
        (D, R) => (F, B, L),
        (D, B) => (R, L, F),
        (F, L) => (D, U, R),
        (F, R) => (U, D, L),
        (F, D) => (R, L, U),
        (B, L) => (U, D, R),
        (B, U) => (R, L, D),
        (B, R) => (D, U, L),
        (U, L) => (F, B, R),
        (U, R) => (B, F, L),
        (U, F) => (R, L, B),
        (L, U) => (B, F, D),
        (L, B) => (D, U, F),
        (L, F) => (U, D, B),
        (L, D) => (F, B, U),
        (R, U) => (F, B, D),
        (R, F) => (D, U, B),
        (R, B) => (U, D, F),
        (R, D) => (B, F, U),
        // Orientation::new rejects same-axis pairs.
        _ => return 0,
    };
    if target == cw {
        1
    } else if target == ccw {
        -1
    } else if target == half {
        2
    } else {
        0
    }
}

/// The six cyclic orders in which faces reach the bottom when the cube is flipped
/// repeatedly. Within a sequence the face after the bottom one is the front face.
pub const FLIP_SEQUENCES: [[Face; 4]; 6] = {
    use Face::*;
    [
        [D, F, U, B],
        [D, L, U, R],
        [D, R, U, L],
        [D, B, U, F],
        [F, L, B, R],
        [F, R, B, L],
    ]
};

/// Forward steps from `from` to `to` along a flip sequence, `None` if either is absent.
fn flip_distance(seq: &[Face; 4], from: Face, to: Face) -> Option<u8> {
    let start = seq.iter().position(|f| *f == from)?;
    (0..4u8).find(|step| seq[(start + *step as usize) % 4] == to)
}

/// The flip sequence a cube in `orientation` currently travels along.
fn current_sequence(orientation: Orientation) -> &'static [Face; 4] {
    FLIP_SEQUENCES
        .iter()
        .find(|seq| {
            (0..4).any(|i| seq[i] == orientation.down && seq[(i + 1) % 4] == orientation.front)
        })
        .unwrap_or(&FLIP_SEQUENCES[0])
}

/// Number of flips (0 to 2) bringing `next_down` to the bottom, and the face left in front.
///
/// Among the sequences containing both faces the one with fewest flips wins; for the
/// opposite face (2 flips) the cube stays on its current sequence.
pub fn flips_to_bottom(orientation: Orientation, next_down: Face) -> (u8, Face) {
    let current = current_sequence(orientation);
    let seq = if orientation.down == next_down {
        current
    } else {
        let mut best: Option<(usize, u8)> = None;
        for (k, seq) in FLIP_SEQUENCES.iter().enumerate() {
            if let Some(d) = flip_distance(seq, orientation.down, next_down)
                && best.is_none_or(|(_, bd)| d < bd)
            {
                best = Some((k, d));
            }
        }
        match best {
            Some((k, d)) if d != 2 => &FLIP_SEQUENCES[k],
            _ => current,
        }
    };

    let flips = flip_distance(seq, orientation.down, next_down).unwrap_or(0);
    let next_pos = seq.iter().position(|f| *f == next_down).unwrap_or(0);
    (flips, seq[(next_pos + 1) % 4])
}

/// One solver token such as `R1`, `U2` or `F3` (quarter turns clockwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolverMove {
    pub face: Face,
    pub turns: u8,
}

impl SolverMove {
    /// Bottom layer rotation in robot notation: 3 quarter turns become -1.
    pub fn rotation(&self) -> i8 {
        match self.turns {
            3 => -1,
            t => t as i8,
        }
    }
}

impl fmt::Display for SolverMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.turns)
    }
}

impl FromStr for SolverMove {
    type Err = ParseMoveError;

    /// Accepts the solver's digit form (`R3`) as well as `R`, `R2` and `R'`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoveError::SolverMove(s.to_string());
        let mut chars = s.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(err)?;
        let turns = match chars.as_str() {
            "" | "1" => 1,
            "2" => 2,
            "3" | "'" => 3,
            _ => return Err(err()),
        };
        Ok(Self { face, turns })
    }
}

/// Parses a whitespace separated solution. An empty string is an empty solution.
pub fn parse_solution(solution: &str) -> Result<Vec<SolverMove>, ParseMoveError> {
    solution.split_whitespace().map(str::parse).collect()
}

/// One robot step: spin, then flip, then rotate the bottom layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RobotMove {
    /// Quarter spins, positive clockwise seen from the bottom face; -1, 0, 1 or 2.
    pub spin: i8,
    /// Flips, always forward.
    pub flips: u8,
    /// Bottom layer quarter turns, positive clockwise seen from the bottom face.
    pub rotate: i8,
}

impl RobotMove {
    pub fn new(spin: i8, flips: u8, rotate: i8) -> Self {
        Self { spin, flips, rotate }
    }

    /// Physical actuations: a spin or a rotation of any size is a single action, every
    /// flip is one action.
    pub fn actions(&self) -> u32 {
        (self.spin != 0) as u32 + self.flips as u32 + (self.rotate != 0) as u32
    }
}

impl fmt::Display for RobotMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}F{}R{}", self.spin, self.flips, self.rotate)
    }
}

impl FromStr for RobotMove {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoveError::RobotMove(s.to_string());
        let rest = s.trim().strip_prefix('S').ok_or_else(err)?;
        let (spin, rest) = rest.split_once('F').ok_or_else(err)?;
        let (flips, rotate) = rest.split_once('R').ok_or_else(err)?;
        Ok(Self {
            spin: spin.parse().map_err(|_| err())?,
            flips: flips.parse().map_err(|_| err())?,
            rotate: rotate.parse().map_err(|_| err())?,
        })
    }
}

/// Robot steps for a whole solution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RobotPlan {
    pub moves: Vec<RobotMove>,
    pub total_actions: u32,
}

impl RobotPlan {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Actions still to perform once the first `done` moves are complete.
    pub fn remaining_actions(&self, done: usize) -> u32 {
        self.moves.iter().skip(done).map(RobotMove::actions).sum()
    }
}

/// Keeps track of the cube orientation while solver moves are translated one by one.
#[derive(Debug, Clone)]
pub struct MoveTranslator {
    orientation: Orientation,
}

impl MoveTranslator {
    pub fn new(start: Orientation) -> Self {
        Self { orientation: start }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn translate(&mut self, mv: SolverMove) -> RobotMove {
        let current = self.orientation;
        let spin = spin_to_front(current, mv.face);
        let (flips, front) = flips_to_bottom(current, mv.face);
        let robot = RobotMove::new(spin, flips, mv.rotation());

        // Rotating the bottom layer does not move the cube as a whole.
        self.orientation = Orientation::new(mv.face, front).unwrap_or(current);
        debug!(%mv, %robot, from = %current, to = %self.orientation, "move translated");
        robot
    }
}

/// Translates a sequence of solver moves starting from `start`.
pub fn translate(moves: &[SolverMove], start: Orientation) -> RobotPlan {
    let mut translator = MoveTranslator::new(start);
    let moves: Vec<RobotMove> = moves.iter().map(|mv| translator.translate(*mv)).collect();
    let total_actions = moves.iter().map(RobotMove::actions).sum();
    RobotPlan {
        moves,
        total_actions,
    }
}

/// Parses and translates a solution string.
pub fn plan_solution(solution: &str, start: Orientation) -> Result<RobotPlan, ParseMoveError> {
    Ok(translate(&parse_solution(solution)?, start))
}

/// Plan for a solver reply; a solver error yields the empty plan.
pub fn plan_reply(reply: &SolverReply, start: Orientation) -> RobotPlan {
    match reply {
        SolverReply::Solution(solution) => translate(&solution.moves, start),
        SolverReply::Error(_) => RobotPlan::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_distance_wraps_around() {
        let seq = &FLIP_SEQUENCES[0];
        assert_eq!(flip_distance(seq, Face::U, Face::D), Some(2));
        assert_eq!(flip_distance(seq, Face::B, Face::F), Some(2));
        assert_eq!(flip_distance(seq, Face::B, Face::D), Some(1));
        assert_eq!(flip_distance(seq, Face::D, Face::R), None);
    }

    #[test]
    fn every_orientation_has_one_sequence() {
        for down in Face::URFDLB {
            for front in Face::URFDLB {
                let Some(o) = Orientation::new(down, front) else {
                    continue;
                };
                let hits = FLIP_SEQUENCES
                    .iter()
                    .filter(|seq| (0..4).any(|i| seq[i] == down && seq[(i + 1) % 4] == front))
                    .count();
                assert_eq!(hits, 1, "{o}");
            }
        }
    }
}
