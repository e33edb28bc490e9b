use anyhow::{Context, Result};
use cube_logic::{DeviceProfile, HueThresholds, Orientation, SampleConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileName {
    #[default]
    Laptop,
    Robot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub profile: ProfileName,
    /// Overrides the profile's start orientation.
    pub start_orientation: Option<Orientation>,
    pub hue_thresholds: HueThresholds,
    pub sampler: SampleConfig,
    /// Solver program and its leading arguments; the cube string is appended.
    pub solver_command: Vec<String>,
    pub solve_log: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: ProfileName::default(),
            start_orientation: None,
            hue_thresholds: HueThresholds::default(),
            sampler: SampleConfig::default(),
            solver_command: vec![
                "python3".into(),
                "-c".into(),
                "import sys, twophase.solver as sv; print(sv.solve(sys.argv[1], 20, 2))".into(),
            ],
            solve_log: None,
        }
    }
}

impl Settings {
    /// Reads the settings file; a missing file means all defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing settings {}", path.display()))
    }

    pub fn device_profile(&self) -> DeviceProfile {
        let mut profile = match self.profile {
            ProfileName::Laptop => DeviceProfile::laptop(),
            ProfileName::Robot => DeviceProfile::robot(),
        };
        if let Some(start) = self.start_orientation {
            profile.start = start;
        }
        profile
    }
}
