use anyhow::{bail, Context, Result};
use cube_logic::{sample_face, Bgr, SampleConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// PNG files directly inside `dir`, sorted by name (the scan order).
pub fn face_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let p = entry.path();
        if p.extension().is_some_and(|e| e.eq_ignore_ascii_case("png")) {
            paths.push(p.to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Samples the nine facelets of every face image, in file order.
pub fn sample_faces(paths: &[PathBuf], config: &SampleConfig) -> Result<Vec<Bgr>> {
    if paths.len() > 6 {
        bail!("expected at most 6 face images, found {}", paths.len());
    }
    let mut colors = Vec::with_capacity(paths.len() * 9);
    for p in paths {
        let img = image::open(p)
            .with_context(|| format!("opening {}", p.display()))?
            .into_rgb8();
        let (w, h) = img.dimensions();
        let patches = sample_face(img.as_raw(), w as usize, h as usize, config)
            .with_context(|| format!("sampling {}", p.display()))?;
        for (i, patch) in patches.iter().enumerate() {
            debug!(
                file = %p.display(),
                facelet = i,
                color = ?patch.color,
                variance = patch.variance,
                "facelet sampled"
            );
        }
        info!("{}: {} facelets", p.display(), patches.len());
        colors.extend(patches.iter().map(|p| p.color));
    }
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn only_top_level_pngs_sorted() {
        let dir = std::env::temp_dir().join(format!("cube_planner_faces_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("old")).unwrap();
        for name in ["b.png", "a.PNG", "c.jpg", "notes.txt", "old/d.png"] {
            fs::write(dir.join(name), b"").unwrap();
        }

        let paths = face_images(&dir).unwrap();
        assert_eq!(paths, vec![dir.join("a.PNG"), dir.join("b.png")]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = std::env::temp_dir().join(format!("cube_planner_no_faces_{}", std::process::id()));
        assert!(face_images(&dir).is_err());
    }

    #[test]
    fn more_than_six_faces_rejected() {
        let paths: Vec<PathBuf> = (0..7).map(|i| PathBuf::from(format!("{}.png", i))).collect();
        assert!(sample_faces(&paths, &SampleConfig::default()).is_err());
    }
}
