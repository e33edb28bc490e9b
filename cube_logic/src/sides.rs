//! Which color each of the six centers shows, inferred from hue and (value - saturation).
//!
//! White has the largest V - S; yellow sits opposite white. Red and orange are told apart by
//! comparing each remaining center with the one across from it, because red straddles the
//! hue wrap point (close to 180 or just above 0). Of the last two, blue has the higher hue.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cube::{CENTERS, ColorSequence, CubeColor, Face};
use crate::error::ClassifyError;
use crate::scan::CubeScan;

/// Empirically tuned hue constants (camera half-degree scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueThresholds {
    /// Size of the circular hue space.
    pub hue_range: i32,
    /// Below this a hue is a warm red/orange.
    pub warm_max: i32,
    /// Above this a hue is red past the wrap point.
    pub wrapped_red_min: i32,
    /// Both red and orange high: the lower of the pair above this is red.
    pub high_red_min: i32,
    /// Opposite center above this while this center is above `high_red_min`.
    pub high_opposite_min: i32,
    /// Weight of the hue distance from the white center in the white score.
    pub white_hue_weight: i32,
    /// Fewer non-white facelets than this above the red/blue midpoint means red wrapped to
    /// low hues on part of its face.
    pub wrapped_red_count: usize,
}

impl Default for HueThresholds {
    fn default() -> Self {
        Self {
            hue_range: 180,
            warm_max: 30,
            wrapped_red_min: 150,
            high_red_min: 160,
            high_opposite_min: 170,
            white_hue_weight: 3,
            wrapped_red_count: 5,
        }
    }
}

impl HueThresholds {
    fn is_red(&self, hc: i32, h_opp: i32) -> bool {
        (hc > self.wrapped_red_min && h_opp < self.warm_max)
            || (hc < self.warm_max && h_opp < self.warm_max && hc < h_opp)
            || (hc > self.high_red_min && h_opp > self.high_opposite_min && hc < h_opp)
    }

    fn is_orange(&self, hc: i32, h_opp: i32) -> bool {
        (hc < self.warm_max && h_opp > self.wrapped_red_min)
            || (hc < self.warm_max && hc > h_opp)
            || (hc > self.high_opposite_min && hc > h_opp)
    }
}

/// Assigns a color to each of the six centers.
///
/// Fails when red, orange, blue or green cannot be singled out, which is what happens when a
/// side was presented twice.
pub fn retrieve_color_order(
    scan: &CubeScan,
    thresholds: &HueThresholds,
) -> Result<ColorSequence, ClassifyError> {
    let hue = |face: Face| scan.get(face.center()).hsv.h as i32;

    // First maximum wins on ties.
    let mut white = Face::U;
    for face in Face::URFDLB {
        let vs = scan.get(face.center()).value_minus_saturation();
        if vs > scan.get(white.center()).value_minus_saturation() {
            white = face;
        }
    }
    let yellow = white.opposite();

    let mut red = None;
    let mut orange = None;
    for face in Face::URFDLB {
        if face == white || face == yellow {
            continue;
        }
        let (hc, h_opp) = (hue(face), hue(face.opposite()));
        if thresholds.is_red(hc, h_opp) {
            red = Some(face);
        } else if thresholds.is_orange(hc, h_opp) {
            orange = Some(face);
        }
    }
    debug!(?white, ?red, ?orange, hues = ?CENTERS.map(|c| scan.get(c).hsv.h), "center hues");

    let red = red.ok_or(ClassifyError::MissingCenter(CubeColor::Red))?;
    let orange = orange.ok_or(ClassifyError::MissingCenter(CubeColor::Orange))?;

    let rest: Vec<Face> = Face::URFDLB
        .into_iter()
        .filter(|f| ![white, yellow, red, orange].contains(f))
        .collect();
    let [a, b] = rest[..] else {
        return Err(ClassifyError::MissingCenter(CubeColor::Blue));
    };
    if hue(a) == hue(b) {
        return Err(ClassifyError::AmbiguousBlueGreen(hue(a) as u8));
    }
    let (blue, green) = if hue(a) > hue(b) { (a, b) } else { (b, a) };

    let mut seq = [CubeColor::White; 6];
    for (face, color) in [
        (white, CubeColor::White),
        (yellow, CubeColor::Yellow),
        (red, CubeColor::Red),
        (orange, CubeColor::Orange),
        (blue, CubeColor::Blue),
        (green, CubeColor::Green),
    ] {
        seq[face.index()] = color;
    }
    Ok(ColorSequence(seq))
}
