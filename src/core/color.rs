//! Colors: sRGB values, CIE HCL conversion and interpolation
//!
//! The choropleth ramp interpolates in HCL so lightness falls evenly from
//! the accent color to black. Conversions use the D50 Lab white point.

use serde::{Deserialize, Serialize};

/// 8-bit sRGB color, serialized as `#rrggbb`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Bright green used for the low end of the map ramp
pub const ACCENT: Rgb = Rgb(0x39, 0xff, 0x14);
/// High end of the map ramp
pub const BLACK: Rgb = Rgb(0, 0, 0);
/// Hover / linked highlight (orange)
pub const HIGHLIGHT: Rgb = Rgb(0xff, 0xa5, 0x00);
/// No data / no join (flat gray)
pub const NO_DATA: Rgb = Rgb(0xc0, 0xc0, 0xc0);

impl Rgb {
    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Desaturated, lightened variant used for de-emphasized regions
    pub fn dulled(self) -> Self {
        let hcl = Hcl::from(self);
        Hcl {
            h: hcl.h,
            c: hcl.c.map(|c| c * 0.15),
            l: hcl.l + (100.0 - hcl.l) * 0.6,
        }
        .into()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&s).ok_or_else(|| format!("invalid hex color '{}'", s))
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

// ============================================================================
// Lab / HCL
// ============================================================================

const XN: f64 = 0.96422;
const YN: f64 = 1.0;
const ZN: f64 = 0.82521;
const T0: f64 = 4.0 / 29.0;
const T1: f64 = 6.0 / 29.0;
const T2: f64 = 3.0 * T1 * T1;
const T3: f64 = T1 * T1 * T1;

fn rgb_to_linear(channel: u8) -> f64 {
    let x = channel as f64 / 255.0;
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_rgb(x: f64) -> u8 {
    let v = if x <= 0.003_130_8 {
        12.92 * x
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    };
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn xyz_to_lab(t: f64) -> f64 {
    if t > T3 {
        t.cbrt()
    } else {
        t / T2 + T0
    }
}

fn lab_to_xyz(t: f64) -> f64 {
    if t > T1 {
        t * t * t
    } else {
        T2 * (t - T0)
    }
}

/// CIE Lab color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl From<Rgb> for Lab {
    fn from(c: Rgb) -> Self {
        let r = rgb_to_linear(c.0);
        let g = rgb_to_linear(c.1);
        let b = rgb_to_linear(c.2);
        let y = xyz_to_lab((0.222_504_5 * r + 0.716_878_6 * g + 0.060_616_9 * b) / YN);
        let (x, z) = if c.0 == c.1 && c.1 == c.2 {
            (y, y)
        } else {
            (
                xyz_to_lab((0.436_074_7 * r + 0.385_064_9 * g + 0.143_080_4 * b) / XN),
                xyz_to_lab((0.013_932_2 * r + 0.097_104_5 * g + 0.714_173_3 * b) / ZN),
            )
        };
        Lab {
            l: 116.0 * y - 16.0,
            a: 500.0 * (x - y),
            b: 200.0 * (y - z),
        }
    }
}

impl From<Lab> for Rgb {
    fn from(lab: Lab) -> Self {
        let y = (lab.l + 16.0) / 116.0;
        let x = y + lab.a / 500.0;
        let z = y - lab.b / 200.0;
        let x = XN * lab_to_xyz(x);
        let y = YN * lab_to_xyz(y);
        let z = ZN * lab_to_xyz(z);
        Rgb(
            linear_to_rgb(3.133_856_1 * x - 1.616_866_7 * y - 0.490_614_6 * z),
            linear_to_rgb(-0.978_768_4 * x + 1.916_141_5 * y + 0.033_454_0 * z),
            linear_to_rgb(0.071_945_3 * x - 0.228_991_4 * y + 1.405_242_7 * z),
        )
    }
}

/// Cylindrical Lab. Hue and chroma are undefined for achromatic colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hcl {
    /// Hue in degrees
    pub h: Option<f64>,
    pub c: Option<f64>,
    pub l: f64,
}

impl From<Lab> for Hcl {
    fn from(lab: Lab) -> Self {
        if lab.a == 0.0 && lab.b == 0.0 {
            // Pure black and white carry no chroma either
            let c = (lab.l > 0.0 && lab.l < 100.0).then_some(0.0);
            return Hcl { h: None, c, l: lab.l };
        }
        let h = lab.b.atan2(lab.a).to_degrees();
        Hcl {
            h: Some(if h < 0.0 { h + 360.0 } else { h }),
            c: Some((lab.a * lab.a + lab.b * lab.b).sqrt()),
            l: lab.l,
        }
    }
}

impl From<Hcl> for Lab {
    fn from(hcl: Hcl) -> Self {
        match hcl.h {
            None => Lab { l: hcl.l, a: 0.0, b: 0.0 },
            Some(h) => {
                let c = hcl.c.unwrap_or(0.0);
                let h = h.to_radians();
                Lab {
                    l: hcl.l,
                    a: h.cos() * c,
                    b: h.sin() * c,
                }
            }
        }
    }
}

impl From<Rgb> for Hcl {
    fn from(c: Rgb) -> Self {
        Hcl::from(Lab::from(c))
    }
}

impl From<Hcl> for Rgb {
    fn from(c: Hcl) -> Self {
        Rgb::from(Lab::from(c))
    }
}

/// Linear blend where an undefined endpoint takes the other endpoint's value
fn lerp_defined(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Hue blend along the shorter arc
fn lerp_hue(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => {
            let mut d = b - a;
            if d > 180.0 {
                d -= 360.0;
            } else if d < -180.0 {
                d += 360.0;
            }
            Some((a + d * t).rem_euclid(360.0))
        }
        _ => lerp_defined(a, b, t),
    }
}

/// Interpolate between two colors in HCL space, `t` in `[0, 1]`
pub fn interpolate_hcl(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let a = Hcl::from(from);
    let b = Hcl::from(to);
    Hcl {
        h: lerp_hue(a.h, b.h, t),
        c: lerp_defined(a.c, b.c, t),
        l: a.l + (b.l - a.l) * t,
    }
    .into()
}
