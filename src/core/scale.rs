//! Scales and the shared categorical color mapping
//!
//! - `LinearScale`: numeric domain to pixel range, with d3-style nice ticks
//! - `ColorScale`: numeric domain to an HCL color ramp
//! - `ScaleRegistry`: one categorical color per attribute plus domain rules

use serde::{Deserialize, Serialize};

use super::color::{interpolate_hcl, Rgb};
use super::record::{is_sentinel, Attribute, AttributeKind, Dataset};

// ============================================================================
// Linear scale
// ============================================================================

/// Maps `domain` linearly onto `range`. No clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Degenerate domains map every input to the middle of the range
    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (v - d0) / span };
        r0 + (r1 - r0) * t
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        let t = if span == 0.0 { 0.5 } else { (px - r0) / span };
        d0 + (d1 - d0) * t
    }

    /// Roughly `count` round-numbered values inside the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        ticks(lo, hi, count as f64)
    }
}

fn tick_bounds(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = (start * k).round();
        i2 = (stop * k).round();
        if i1 / k < start {
            i1 += 1.0;
        }
        if i2 / k > stop {
            i2 -= 1.0;
        }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = (start / k).round();
        i2 = (stop / k).round();
        if i1 * k < start {
            i1 += 1.0;
        }
        if i2 * k > stop {
            i2 -= 1.0;
        }
        inc = k;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_bounds(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Nice tick values in `[start, stop]` (`start <= stop`)
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (i1, i2, inc) = tick_bounds(start, stop, count);
    if !(i2 >= i1) || !inc.is_finite() {
        return Vec::new();
    }
    let n = (i2 - i1 + 1.0) as usize;
    (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect()
}

// ============================================================================
// Color scale
// ============================================================================

/// Linear color ramp between two colors, interpolated in HCL
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScale {
    pub domain: (f64, f64),
    pub low: Rgb,
    pub high: Rgb,
}

impl ColorScale {
    pub fn new(domain: (f64, f64), low: Rgb, high: Rgb) -> Self {
        Self { domain, low, high }
    }

    pub fn apply(&self, v: f64) -> Rgb {
        let (d0, d1) = self.domain;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (v - d0) / span };
        interpolate_hcl(self.low, self.high, t)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        LinearScale::new(self.domain, (0.0, 1.0)).ticks(count)
    }
}

// ============================================================================
// Domains
// ============================================================================

/// Min and max of the non-sentinel values
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| !is_sentinel(*v) && v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// `[0, max]` over non-sentinel values; `[0, 0]` when there are none
pub fn zero_based_domain(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    match extent(values) {
        Some((_, hi)) => (0.0, hi.max(0.0)),
        None => (0.0, 0.0),
    }
}

// ============================================================================
// Registry
// ============================================================================

/// How the scatterplot and histogram are tinted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// One green for every attribute
    SingleHue,
    /// One color per attribute, golds for wealth and greens for health
    #[default]
    MultiHue,
}

const SINGLE_HUE: Rgb = Rgb(0x3c, 0xb3, 0x71);

fn multi_hue(attr: Attribute) -> Rgb {
    match attr {
        Attribute::MedianHouseholdIncome => Rgb(0xd4, 0xa0, 0x17),
        Attribute::PovertyPerc => Rgb(0xb8, 0x86, 0x0b),
        Attribute::PercentHighCholesterol => Rgb(0x2e, 0x8b, 0x57),
        Attribute::PercentStroke => Rgb(0x3c, 0xb3, 0x71),
        Attribute::PercentCoronaryHeartDisease => Rgb(0x20, 0xb2, 0xaa),
        Attribute::PercentHighBloodPressure => Rgb(0x22, 0x8b, 0x22),
        Attribute::PercentSmoking => Rgb(0x6b, 0x8e, 0x23),
        Attribute::PercentInactive => Rgb(0x66, 0xcd, 0xaa),
    }
}

/// Shared encodings: the categorical attribute colors and domain policy.
/// Holds no per-attribute domain cache; domains are derived on request.
#[derive(Clone, Debug)]
pub struct ScaleRegistry {
    colors: [Rgb; Attribute::COUNT],
    zero_baseline_for_wealth: bool,
}

impl ScaleRegistry {
    pub fn new(mode: ColorMode, zero_baseline_for_wealth: bool) -> Self {
        let mut colors = [SINGLE_HUE; Attribute::COUNT];
        if mode == ColorMode::MultiHue {
            for attr in Attribute::ALL {
                colors[attr.idx()] = multi_hue(attr);
            }
        }
        Self {
            colors,
            zero_baseline_for_wealth,
        }
    }

    /// Categorical color for an attribute, identical across views
    pub fn color(&self, attr: Attribute) -> Rgb {
        self.colors[attr.idx()]
    }

    /// Continuous domain for `attr`. Health attributes always start at zero
    /// so higher percentages read darker.
    pub fn domain(&self, dataset: &Dataset, attr: Attribute) -> (f64, f64) {
        let values = dataset.values(attr);
        match attr.kind() {
            AttributeKind::Wealth if !self.zero_baseline_for_wealth => {
                extent(values).unwrap_or((0.0, 0.0))
            }
            _ => zero_based_domain(values),
        }
    }
}

impl Default for ScaleRegistry {
    fn default() -> Self {
        Self::new(ColorMode::default(), true)
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Integer when whole, otherwise up to two decimals with trailing zeros trimmed
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        return format!("{:.0}", v);
    }
    let s = format!("{:.2}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn group_thousands(v: f64) -> String {
    let digits = format!("{:.0}", v.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if v < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// Axis tick label: `$45K` for income, `12%` otherwise
pub fn format_tick(attr: Attribute, v: f64) -> String {
    if attr.is_currency() {
        format!("${}K", format_number(v / 1000.0))
    } else {
        format!("{}%", format_number(v))
    }
}

/// Tooltip value: `$45,120` for income, `12.3%` otherwise
pub fn format_value(attr: Attribute, v: f64) -> String {
    if attr.is_currency() {
        format!("${}", group_thousands(v))
    } else {
        format!("{}%", format_number(v))
    }
}
