use crate::cube::{ColorSequence, CubeColor, CubeString, Face};

/// Outcome of classifying one scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Face each facelet belongs to (the center it matched), URFDLB facelet order.
    pub faces: Vec<Face>,
    /// Color shown by each center; `None` when the six sides could not be told apart.
    pub color_sequence: Option<ColorSequence>,
}

impl Classification {
    pub fn cube_string(&self) -> CubeString {
        CubeString::from_faces(&self.faces)
    }

    /// Whether the side/color inference found six distinct colors.
    pub fn analysis_ok(&self) -> bool {
        self.color_sequence.is_some()
    }

    /// Color of every facelet, available once the color sequence is known.
    pub fn colors(&self) -> Option<Vec<CubeColor>> {
        let seq = self.color_sequence?;
        Some(self.faces.iter().map(|f| seq.color_of(*f)).collect())
    }

    /// Facelets assigned to `face`.
    pub fn count(&self, face: Face) -> usize {
        self.faces.iter().filter(|f| **f == face).count()
    }
}
