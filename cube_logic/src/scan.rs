//! Facelet samples and the device-specific geometry that maps a scan onto solver order.
//!
//! A laptop user presents the faces in URFDLB order, upright. The robot flips and spins the
//! cube between photos, so it sees the sides in its own order and some of them rotated.

use serde::{Deserialize, Serialize};

use crate::color::{Bgr, Hsv};
use crate::cube::{FACELETS, Face};
use crate::error::ClassifyError;
use crate::moves::Orientation;

/// Color used for faces not scanned yet when previewing a partial scan.
pub const UNSCANNED: Bgr = Bgr::new(230, 230, 230);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceletSample {
    pub bgr: Bgr,
    pub hsv: Hsv,
}

impl FaceletSample {
    pub fn from_bgr(bgr: Bgr) -> Self {
        Self {
            bgr,
            hsv: bgr.to_hsv(),
        }
    }

    pub fn value_minus_saturation(&self) -> i32 {
        self.hsv.v as i32 - self.hsv.s as i32
    }
}

/// All 54 facelet samples of one scan cycle, in URFDLB facelet order.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeScan {
    samples: Vec<FaceletSample>,
}

impl CubeScan {
    pub fn new(samples: Vec<FaceletSample>) -> Result<Self, ClassifyError> {
        if samples.len() != FACELETS {
            return Err(ClassifyError::FaceletCount(samples.len()));
        }
        Ok(Self { samples })
    }

    /// Builds the scan from colors already in URFDLB order, deriving hue/saturation/value.
    pub fn from_bgr(colors: &[Bgr]) -> Result<Self, ClassifyError> {
        Self::new(colors.iter().copied().map(FaceletSample::from_bgr).collect())
    }

    pub fn samples(&self) -> &[FaceletSample] {
        &self.samples
    }

    pub fn get(&self, facelet: usize) -> &FaceletSample {
        &self.samples[facelet]
    }

    pub fn colors(&self) -> impl Iterator<Item = Bgr> + '_ {
        self.samples.iter().map(|s| s.bgr)
    }
}

/// In-plane rotation needed to bring a scanned face to the solver's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceRotation {
    #[default]
    None,
    Half,
    QuarterCw,
}

impl FaceRotation {
    const QUARTER_CW: [usize; 9] = [2, 5, 8, 1, 4, 7, 0, 3, 6];

    /// Reorders the 9 facelets of one face, read row-major from the camera.
    pub fn apply<T: Copy>(self, facelets: &[T; 9]) -> [T; 9] {
        match self {
            FaceRotation::None => *facelets,
            FaceRotation::Half => {
                let mut out = *facelets;
                out.reverse();
                out
            }
            FaceRotation::QuarterCw => Self::QUARTER_CW.map(|i| facelets[i]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedSide {
    pub face: Face,
    pub rotation: FaceRotation,
}

/// Order in which a device photographs the six sides, and how each one lands in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanGeometry {
    pub sides: [ScannedSide; 6],
}

impl ScanGeometry {
    /// Sides presented by hand in solver order.
    pub fn urfdlb() -> Self {
        Self {
            sides: Face::URFDLB.map(|face| ScannedSide {
                face,
                rotation: FaceRotation::None,
            }),
        }
    }

    /// Robot scan cycle: U, B, D, F, R, L with the camera seeing some sides turned.
    pub fn robot() -> Self {
        use FaceRotation::*;
        let side = |face, rotation| ScannedSide { face, rotation };
        Self {
            sides: [
                side(Face::U, Half),
                side(Face::B, None),
                side(Face::D, Half),
                side(Face::F, Half),
                side(Face::R, QuarterCw),
                side(Face::L, QuarterCw),
            ],
        }
    }

    /// Reorders a possibly partial scan (whole faces in scan order) into URFDLB order. Faces
    /// not scanned yet are filled with [`UNSCANNED`].
    pub fn to_urfdlb(&self, scanned: &[Bgr]) -> Vec<Bgr> {
        let mut out = vec![UNSCANNED; FACELETS];
        for (side, chunk) in self.sides.iter().zip(scanned.chunks_exact(9)) {
            let mut face = [UNSCANNED; 9];
            face.copy_from_slice(chunk);
            let start = side.face.index() * 9;
            out[start..start + 9].copy_from_slice(&side.rotation.apply(&face));
        }
        out
    }

    /// Builds a complete scan; every one of the 54 facelets must be present.
    pub fn assemble(&self, scanned: &[Bgr]) -> Result<CubeScan, ClassifyError> {
        if scanned.len() != FACELETS {
            return Err(ClassifyError::FaceletCount(scanned.len()));
        }
        CubeScan::from_bgr(&self.to_urfdlb(scanned))
    }
}

impl Default for ScanGeometry {
    fn default() -> Self {
        Self::urfdlb()
    }
}

/// Device capabilities the classifier and translator depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub scan: ScanGeometry,
    /// Cube orientation (down, front) when the first solving move starts.
    pub start: Orientation,
}

impl DeviceProfile {
    pub fn laptop() -> Self {
        Self {
            scan: ScanGeometry::urfdlb(),
            start: Orientation::HOME,
        }
    }

    /// The robot leaves the cube where the last scan photo was taken: R down, B in front.
    pub fn robot() -> Self {
        Self {
            scan: ScanGeometry::robot(),
            start: Orientation::AFTER_ROBOT_SCAN,
        }
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::laptop()
    }
}
