//! Primary classifier: nearest reference by CIEDE2000 distance, with references adapted as
//! confident matches come in.
//!
//! Uneven lighting and lens vignetting shift colors across the frame (red/orange swaps under
//! bright light were the typical failure). Facelets are therefore assigned in order of
//! increasing distance to their closest center, and every assignment pulls that center's
//! reference towards the facelet just matched.

use tracing::{debug, warn};

use crate::classification::Classification;
use crate::color::{Bgr, Lab, ciede2000, rms_blend};
use crate::cube::{CENTERS, FACELETS, Face};
use crate::scan::CubeScan;
use crate::sides::{HueThresholds, retrieve_color_order};

/// One adaptive reference color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceEntry {
    /// Blended BGR channels; fractional because of repeated averaging.
    pub bgr: [f64; 3],
    pub lab: Lab,
    /// Facelets assigned so far. The seed itself is not counted; the center is counted when
    /// it is assigned like any other facelet.
    pub count: u32,
}

impl ReferenceEntry {
    pub fn new(bgr: Bgr) -> Self {
        let bgr = [bgr.b as f64, bgr.g as f64, bgr.r as f64];
        Self {
            bgr,
            lab: Lab::from_bgr_f64(bgr[0], bgr[1], bgr[2]),
            count: 0,
        }
    }

    /// Root-mean-square blend of the current reference with a newly matched facelet.
    pub fn add(&mut self, bgr: Bgr) {
        self.bgr = rms_blend(self.bgr, [bgr.b as f64, bgr.g as f64, bgr.r as f64]);
        self.lab = Lab::from_bgr_f64(self.bgr[0], self.bgr[1], self.bgr[2]);
        self.count += 1;
    }
}

/// The six face references, indexed by URFDLB face.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePalette {
    entries: [ReferenceEntry; 6],
}

impl ReferencePalette {
    /// Seeds each reference from the center facelet of its face.
    pub fn from_centers(scan: &CubeScan) -> Self {
        Self {
            entries: CENTERS.map(|c| ReferenceEntry::new(scan.get(c).bgr)),
        }
    }

    pub fn entry(&self, face: Face) -> &ReferenceEntry {
        &self.entries[face.index()]
    }

    pub fn distances(&self, lab: &Lab) -> [f64; 6] {
        self.entries.map(|e| ciede2000(lab, &e.lab))
    }

    /// Nearest reference and its distance. Ties go to the earlier face.
    pub fn nearest(&self, lab: &Lab) -> (Face, f64) {
        let mut best = (Face::U, f64::INFINITY);
        for (face, dist) in Face::URFDLB.into_iter().zip(self.distances(lab)) {
            if dist < best.1 {
                best = (face, dist);
            }
        }
        best
    }

    pub fn add_sample(&mut self, face: Face, bgr: Bgr) {
        self.entries[face.index()].add(bgr);
    }
}

/// Classifies every facelet against adaptive references seeded from the six centers.
///
/// Returns the classification together with the references as adapted at the end of the
/// pass. The color sequence (which color each center actually shows) comes from the hue
/// heuristics and is `None` when they could not tell the six sides apart; the face
/// assignment is produced regardless and left to the solver to judge.
pub fn classify_by_distance(
    scan: &CubeScan,
    thresholds: &HueThresholds,
) -> (Classification, ReferencePalette) {
    let mut palette = ReferencePalette::from_centers(scan);
    let labs: Vec<Lab> = scan.colors().map(|c| c.to_lab()).collect();

    // Most confident facelets first. Stable sort keeps facelet order on equal distances.
    let mut order: Vec<(usize, f64)> = labs
        .iter()
        .enumerate()
        .map(|(i, lab)| (i, palette.nearest(lab).1))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut faces = [Face::U; FACELETS];
    for (facelet, seed_dist) in order {
        let (face, dist) = palette.nearest(&labs[facelet]);
        debug!(facelet, %face, seed_dist, dist, "facelet matched");
        faces[facelet] = face;
        palette.add_sample(face, scan.get(facelet).bgr);
    }

    let color_sequence = match retrieve_color_order(scan, thresholds) {
        Ok(seq) => Some(seq),
        Err(e) => {
            warn!("side colors not resolved: {e}");
            None
        }
    };

    (
        Classification {
            faces: faces.to_vec(),
            color_sequence,
        },
        palette,
    )
}
