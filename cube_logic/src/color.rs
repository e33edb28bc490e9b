use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Average color of one facelet as delivered by the camera, in BGR channel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

/// Hue/saturation/value in the 8-bit camera convention: hue is half-degrees (0..180),
/// saturation and value span 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// CIE L*a*b* coordinates (D65, 2° observer).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Bgr {
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    pub fn to_lab(&self) -> Lab {
        Lab::from_bgr_f64(self.b as f64, self.g as f64, self.r as f64)
    }

    pub fn to_hsv(&self) -> Hsv {
        Hsv::from_bgr(self)
    }
}

impl From<[u8; 3]> for Bgr {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl Hsv {
    pub fn from_bgr(c: &Bgr) -> Self {
        let (b, g, r) = (c.b as f64, c.g as f64, c.r as f64);
        let max = b.max(g).max(r);
        let min = b.min(g).min(r);
        let diff = max - min;

        let s = if max == 0.0 {
            0.0
        } else {
            (diff * 255.0 / max).round()
        };

        let h_deg = if diff == 0.0 {
            0.0
        } else if max == r {
            60.0 * (g - b) / diff
        } else if max == g {
            120.0 + 60.0 * (b - r) / diff
        } else {
            240.0 + 60.0 * (r - g) / diff
        };
        let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

        // Half-degrees, 180 folds back onto 0.
        let mut h = (h_deg / 2.0).round() as u32;
        if h >= 180 {
            h -= 180;
        }

        Self {
            h: h as u8,
            s: s as u8,
            v: max as u8,
        }
    }
}

impl Lab {
    /// Converts BGR channels on the 0..=255 scale; fractional channels are accepted because
    /// adapted references are blends of measurements.
    pub fn from_bgr_f64(b: f64, g: f64, r: f64) -> Self {
        let r = srgb_to_linear(r / 255.0) * 100.0;
        let g = srgb_to_linear(g / 255.0) * 100.0;
        let b = srgb_to_linear(b / 255.0) * 100.0;

        let x = (r * 0.4124 + g * 0.3576 + b * 0.1805) / 95.047;
        let y = (r * 0.2126 + g * 0.7152 + b * 0.0722) / 100.000;
        let z = (r * 0.0193 + g * 0.1192 + b * 0.9505) / 108.883;

        let x = lab_f(x);
        let y = lab_f(y);
        let z = lab_f(z);

        Self {
            l: 116.0 * y - 16.0,
            a: 500.0 * (x - y),
            b: 200.0 * (y - z),
        }
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

fn lab_f(t: f64) -> f64 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

const POW25_7: f64 = 6_103_515_625.0;

/// CIEDE2000 color difference with unit weighting factors (kL = kC = kH = 1).
///
/// Symmetric in its arguments and zero exactly when both colors share the same coordinates.
pub fn ciede2000(lab1: &Lab, lab2: &Lab) -> f64 {
    let c1 = lab1.a.hypot(lab1.b);
    let c2 = lab2.a.hypot(lab2.b);
    let c_avg = (c1 + c2) / 2.0;
    let c_avg7 = c_avg.powi(7);
    let g = 0.5 * (1.0 - (c_avg7 / (c_avg7 + POW25_7)).sqrt());

    let a1p = (1.0 + g) * lab1.a;
    let a2p = (1.0 + g) * lab2.a;
    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);
    let h1p = hue_angle(a1p, lab1.b);
    let h2p = hue_angle(a2p, lab2.b);
    let c1c2 = c1p * c2p;

    let dl = lab2.l - lab1.l;
    let dc = c2p - c1p;
    let mut dh = h2p - h1p;
    if c1c2 == 0.0 {
        dh = 0.0;
    } else if dh > PI {
        dh -= 2.0 * PI;
    } else if dh < -PI {
        dh += 2.0 * PI;
    }
    let d_big_h = 2.0 * c1c2.sqrt() * (dh / 2.0).sin();

    let l_avg = (lab1.l + lab2.l) / 2.0;
    let cp_avg = (c1p + c2p) / 2.0;

    let h_sum = h1p + h2p;
    let h_avg = if c1c2 == 0.0 {
        h_sum
    } else if (h1p - h2p).abs() <= PI {
        h_sum / 2.0
    } else if h_sum < 2.0 * PI {
        h_sum / 2.0 + PI
    } else {
        h_sum / 2.0 - PI
    };

    let t = 1.0 - 0.17 * (h_avg - PI / 6.0).cos()
        + 0.24 * (2.0 * h_avg).cos()
        + 0.32 * (3.0 * h_avg + PI / 30.0).cos()
        - 0.20 * (4.0 * h_avg - 63.0_f64.to_radians()).cos();

    let mut h_avg_deg = h_avg.to_degrees();
    if h_avg_deg < 0.0 {
        h_avg_deg += 360.0;
    } else if h_avg_deg > 360.0 {
        h_avg_deg -= 360.0;
    }
    // Rotation term, only relevant in the blue region.
    let d_theta = 30.0 * (-((h_avg_deg - 275.0) / 25.0).powi(2)).exp();

    let cp_avg7 = cp_avg.powi(7);
    let r_c = 2.0 * (cp_avg7 / (cp_avg7 + POW25_7)).sqrt();
    let s_c = 1.0 + 0.045 * cp_avg;
    let s_h = 1.0 + 0.015 * cp_avg * t;
    let lm50 = (l_avg - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * lm50 / (20.0 + lm50).sqrt();
    let r_t = -(2.0 * d_theta).to_radians().sin() * r_c;

    let f_l = dl / s_l;
    let f_c = dc / s_c;
    let f_h = d_big_h / s_h;

    (f_l * f_l + f_c * f_c + f_h * f_h + r_t * f_c * f_h).sqrt()
}

fn hue_angle(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        0.0
    } else {
        let h = b.atan2(a);
        if h < 0.0 { h + 2.0 * PI } else { h }
    }
}

/// Root-mean-square blend of two channel triples: sqrt((x² + y²) / 2) per channel.
pub fn rms_blend(x: [f64; 3], y: [f64; 3]) -> [f64; 3] {
    [
        ((x[0] * x[0] + y[0] * y[0]) / 2.0).sqrt(),
        ((x[1] * x[1] + y[1] * y[1]) / 2.0).sqrt(),
        ((x[2] * x[2] + y[2] * y[2]) / 2.0).sqrt(),
    ]
}
