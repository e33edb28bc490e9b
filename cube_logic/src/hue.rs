//! Fallback classifier working on hue alone, used when the distance classifier produced a
//! state the solver rejected (typically red/orange swaps under strong light).
//!
//! White facelets are the nine with the highest `V + (V - S) - w * |H - H_white|`. Every other
//! facelet takes the color of the colored center nearest in hue, on the circular hue scale.

use std::collections::BTreeMap;

use tracing::debug;

use crate::classification::Classification;
use crate::cube::{CubeColor, FACELETS, Face};
use crate::error::ClassifyError;
use crate::scan::CubeScan;
use crate::sides::{HueThresholds, retrieve_color_order};

pub fn classify_by_hue(
    scan: &CubeScan,
    thresholds: &HueThresholds,
) -> Result<Classification, ClassifyError> {
    let sequence = retrieve_color_order(scan, thresholds)?;
    let white_center = sequence
        .face_of(CubeColor::White)
        .ok_or(ClassifyError::MissingCenter(CubeColor::White))?;

    let hw = scan.get(white_center.center()).hsv.h as i32;
    let mut by_score: Vec<(usize, i32)> = scan
        .samples()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (h, sat, v) = (s.hsv.h as i32, s.hsv.s as i32, s.hsv.v as i32);
            (i, v + v - sat - (thresholds.white_hue_weight * (h - hw)).abs())
        })
        .collect();
    // Stable ascending sort: the whites are the last nine.
    by_score.sort_by_key(|&(_, score)| score);
    let whites: Vec<usize> = by_score[FACELETS - 9..].iter().map(|&(i, _)| i).collect();
    debug!(?whites, "white facelets");

    let colored_centers: Vec<Face> = Face::URFDLB
        .into_iter()
        .filter(|f| *f != white_center)
        .collect();
    if let Some(center) = colored_centers
        .iter()
        .map(|f| f.center())
        .find(|c| whites.contains(c))
    {
        return Err(ClassifyError::DuplicateSide(center));
    }

    // Hues of the non-white facelets.
    let hues: BTreeMap<usize, i32> = (0..FACELETS)
        .filter(|i| !whites.contains(i))
        .map(|i| (i, scan.get(i).hsv.h as i32))
        .collect();
    let center_hues: Vec<i32> = colored_centers.iter().map(|f| hues[&f.center()]).collect();

    let hue_of = |color: CubeColor| {
        sequence
            .face_of(color)
            .map(|f| hues[&f.center()])
            .ok_or(ClassifyError::MissingCenter(color))
    };
    let red_blue_mid = (hue_of(CubeColor::Red)? + hue_of(CubeColor::Blue)?) / 2;

    // Few hues above the red/blue midpoint: part of the red face reads just above 0. Hues past
    // the midpoint are then folded onto 0 so all reds cluster together.
    let above_mid = hues.values().filter(|h| **h > red_blue_mid).count();
    let wrapped = above_mid < thresholds.wrapped_red_count;
    debug!(red_blue_mid, above_mid, wrapped, "hue wrap check");

    let mut faces = [Face::U; FACELETS];
    for &i in &whites {
        faces[i] = white_center;
    }
    for (&facelet, &h) in &hues {
        let mut h = h;
        let mut best = (0, i32::MAX);
        for (k, &hc) in center_hues.iter().enumerate() {
            let mut hc = hc;
            if wrapped {
                if h > red_blue_mid {
                    h = 0;
                }
                if hc > red_blue_mid {
                    hc = 0;
                }
            }
            let dist = (h - hc).abs().min(thresholds.hue_range - hc + h);
            if dist < best.1 {
                best = (k, dist);
            }
        }
        faces[facelet] = colored_centers[best.0];
    }

    Ok(Classification {
        faces: faces.to_vec(),
        color_sequence: Some(sequence),
    })
}
