use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseMoveError;

pub const FACELETS: usize = 54;

/// Center facelet of each face, in URFDLB order.
pub const CENTERS: [usize; 6] = [4, 13, 22, 31, 40, 49];

/// Cube face in solver notation. Declaration order is the solver's URFDLB face order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    pub const URFDLB: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Face> {
        Self::URFDLB.get(i).copied()
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::B => Face::F,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    pub fn from_letter(c: char) -> Option<Face> {
        match c {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    /// Center facelet index of this face.
    pub fn center(self) -> usize {
        CENTERS[self.index()]
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Face {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next().and_then(Face::from_letter), chars.next()) {
            (Some(face), None) => Ok(face),
            _ => Err(ParseMoveError::Face(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CubeColor {
    White,
    Red,
    Green,
    Yellow,
    Orange,
    Blue,
}

impl CubeColor {
    /// Conventional color scheme, position i colors face `Face::URFDLB[i]`.
    pub const CONVENTIONAL: [CubeColor; 6] = [
        CubeColor::White,
        CubeColor::Red,
        CubeColor::Green,
        CubeColor::Yellow,
        CubeColor::Orange,
        CubeColor::Blue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CubeColor::White => "white",
            CubeColor::Red => "red",
            CubeColor::Green => "green",
            CubeColor::Yellow => "yellow",
            CubeColor::Orange => "orange",
            CubeColor::Blue => "blue",
        }
    }
}

impl fmt::Display for CubeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Colors found on the six centers, in URFDLB order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSequence(pub [CubeColor; 6]);

impl ColorSequence {
    pub fn conventional() -> Self {
        Self(CubeColor::CONVENTIONAL)
    }

    pub fn color_of(&self, face: Face) -> CubeColor {
        self.0[face.index()]
    }

    /// Face whose center shows `color`.
    pub fn face_of(&self, color: CubeColor) -> Option<Face> {
        self.0
            .iter()
            .position(|c| *c == color)
            .and_then(Face::from_index)
    }

    pub fn is_conventional(&self) -> bool {
        self.0 == CubeColor::CONVENTIONAL
    }
}

/// 54 face letters in URFDLB facelet order, the solver's input format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeString(String);

impl CubeString {
    pub fn from_faces(faces: &[Face]) -> Self {
        Self(faces.iter().map(|f| f.letter()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Facelets per face letter, URFDLB order. A solvable state has 9 of each; the solver
    /// remains the judge, this is for reporting.
    pub fn face_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for face in self.0.chars().filter_map(Face::from_letter) {
            counts[face.index()] += 1;
        }
        counts
    }
}

impl fmt::Display for CubeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CubeString {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.chars().count() != FACELETS || s.chars().any(|c| Face::from_letter(c).is_none()) {
            return Err(ParseMoveError::CubeString(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}
