//! Color recognition and move planning for a 3x3 cube solving robot.
//!
//! A scan of 54 facelet colors is turned into a URFDLB cube string, either by CIEDE2000
//! distance to adaptive per-side references or, as a fallback, by hue. Solver output is then
//! translated into robot steps (spin, flip, rotate) while tracking the cube orientation.

pub mod classification;
pub mod color;
pub mod cube;
pub mod error;
pub mod hue;
pub mod moves;
pub mod palette;
pub mod sampler;
pub mod scan;
pub mod scramble;
pub mod sides;
pub mod solver;

pub use classification::Classification;
pub use color::{Bgr, Hsv, Lab, ciede2000};
pub use cube::{CENTERS, ColorSequence, CubeColor, CubeString, FACELETS, Face};
pub use error::{ClassifyError, ParseMoveError, SampleError};
pub use hue::classify_by_hue;
pub use moves::{
    MoveTranslator, Orientation, RobotMove, RobotPlan, SolverMove, parse_solution, plan_reply,
    plan_solution, translate,
};
pub use palette::{ReferencePalette, classify_by_distance};
pub use sampler::{FaceletPatch, SampleConfig, sample_face};
pub use scan::{CubeScan, DeviceProfile, FaceletSample, ScanGeometry};
pub use sides::{HueThresholds, retrieve_color_order};
pub use solver::{CubeRead, DetectMethod, Solution, Solver, SolverReply, read_cube};
