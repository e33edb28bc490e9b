//! Average facelet colors from a single face image, laid out as a 3x3 grid.

use serde::{Deserialize, Serialize};

use crate::color::Bgr;
use crate::error::SampleError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Side of the sampled square as a fraction of the grid cell.
    pub patch_ratio: f64,
    /// Share of the patch pixels, closest to the patch mean, kept for the average.
    pub keep_percent: u8,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            patch_ratio: 0.4,
            keep_percent: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceletPatch {
    pub color: Bgr,
    pub pixel_count: u32,
    /// Sum of the per-channel variances of the kept pixels.
    pub variance: u32,
}

/// Samples the nine facelets of a face image given as packed RGB bytes.
///
/// Facelets come out in reading order (row by row, top left first).
pub fn sample_face(
    rgb: &[u8],
    width: usize,
    height: usize,
    config: &SampleConfig,
) -> Result<[FaceletPatch; 9], SampleError> {
    let expected = width * height * 3;
    if rgb.len() < expected {
        return Err(SampleError::BufferSize {
            width,
            height,
            expected,
            actual: rgb.len(),
        });
    }
    let (cell_w, cell_h) = (width / 3, height / 3);
    if cell_w == 0 || cell_h == 0 {
        return Err(SampleError::TooSmall { width, height });
    }

    let side = ((cell_w.min(cell_h) as f64 * config.patch_ratio.clamp(0.0, 1.0)) as usize).max(1);
    let mut patches = [FaceletPatch {
        color: Bgr::new(0, 0, 0),
        pixel_count: 0,
        variance: 0,
    }; 9];
    let mut pixels: Vec<([i32; 3], u32)> = Vec::with_capacity(side * side);

    for (cell, patch) in patches.iter_mut().enumerate() {
        let (row, col) = (cell / 3, cell % 3);
        let x0 = col * cell_w + (cell_w - side) / 2;
        let y0 = row * cell_h + (cell_h - side) / 2;

        pixels.clear();
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                let i = (y * width + x) * 3;
                pixels.push(([rgb[i] as i32, rgb[i + 1] as i32, rgb[i + 2] as i32], 0));
            }
        }
        *patch = filtered_patch(&mut pixels, config.keep_percent);
    }
    Ok(patches)
}

fn filtered_patch(pixels: &mut [([i32; 3], u32)], keep_percent: u8) -> FaceletPatch {
    let n = pixels.len() as i32;
    let mut mean = [0i32; 3];
    for (p, _) in pixels.iter() {
        for c in 0..3 {
            mean[c] += p[c];
        }
    }
    let mean = mean.map(|s| s / n);

    for (p, dist) in pixels.iter_mut() {
        *dist = (0..3).map(|c| (p[c] - mean[c]).pow(2) as u32).sum();
    }
    pixels.sort_by_key(|&(_, dist)| dist);

    let keep = (pixels.len() * keep_percent.min(100) as usize / 100).max(1);
    let kept = &pixels[..keep];

    // RMS average per channel.
    let mut sum_sq = [0f64; 3];
    let mut sum = [0f64; 3];
    for (p, _) in kept {
        for c in 0..3 {
            sum[c] += p[c] as f64;
            sum_sq[c] += (p[c] * p[c]) as f64;
        }
    }
    let k = keep as f64;
    let rms = sum_sq.map(|s| (s / k).sqrt().round().min(255.0) as u8);
    let variance: f64 = (0..3)
        .map(|c| (sum_sq[c] / k - (sum[c] / k).powi(2)).max(0.0))
        .sum();

    FaceletPatch {
        color: Bgr::new(rms[2], rms[1], rms[0]),
        pixel_count: keep as u32,
        variance: variance.round() as u32,
    }
}
