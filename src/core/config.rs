//! Dashboard configuration
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the stock layout.

use serde::{Deserialize, Serialize};

use super::color::{Rgb, HIGHLIGHT, NO_DATA};
use super::error::LoadError;
use super::scale::ColorMode;

/// Where the dashboard looks for its data when nothing else is configured
pub const DEFAULT_CSV_PATH: &str = "data/national_health_data_2024.csv";
pub const DEFAULT_TOPOLOGY_PATH: &str = "data/counties-10m.json";

/// CSV and topology naming
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub id_column: String,
    pub name_column: String,
    /// Pad numeric ids shorter than this with leading zeros
    pub id_width: usize,
    pub counties_object: String,
    pub states_object: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            id_column: "cnty_fips".to_string(),
            name_column: "display_name".to_string(),
            id_width: 5,
            counties_object: "counties".to_string(),
            states_object: "states".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const ZERO: Margin = Margin::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Margin {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Outer container size and margins shared by every chart
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Frame {
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub frame: Frame,
    pub tooltip_padding: f64,
    pub point_radius: f64,
    /// Radius of a point highlighted from another view
    pub focus_radius: f64,
    /// Pointer distance (px) that still counts as over a point
    pub hit_radius: f64,
    pub tick_count: usize,
    pub highlight_color: Rgb,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            frame: Frame {
                width: 300.0,
                height: 300.0,
                margin: Margin::new(25.0, 20.0, 30.0, 35.0),
            },
            tooltip_padding: 15.0,
            point_radius: 2.0,
            focus_radius: 6.0,
            hit_radius: 5.0,
            tick_count: 6,
            highlight_color: HIGHLIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    pub frame: Frame,
    pub tooltip_padding: f64,
    pub num_bins: usize,
    pub tick_count: usize,
    pub highlight_color: Rgb,
    /// Outline drawn around clicked bars
    pub selected_stroke: Rgb,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            frame: Frame {
                width: 500.0,
                height: 200.0,
                margin: Margin::new(25.0, 20.0, 20.0, 35.0),
            },
            tooltip_padding: 15.0,
            num_bins: 8,
            tick_count: 6,
            highlight_color: HIGHLIGHT,
            selected_stroke: Rgb(0, 0, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoroplethConfig {
    pub frame: Frame,
    pub tooltip_padding: f64,
    /// Horizontal shift of the map inside its frame, leaves room for the legend
    pub map_offset_x: f64,
    pub low_color: Rgb,
    pub high_color: Rgb,
    pub highlight_color: Rgb,
    /// Fill for counties with no data or no join
    pub sentinel_color: Rgb,
    pub legend_bottom: f64,
    pub legend_left: f64,
    pub legend_height: f64,
    pub legend_width: f64,
    /// Horizontal offset of the legend axis labels
    pub legend_scale_x: f64,
    pub legend_ticks: usize,
}

impl Default for ChoroplethConfig {
    fn default() -> Self {
        Self {
            frame: Frame {
                width: 1100.0,
                height: 500.0,
                margin: Margin::ZERO,
            },
            tooltip_padding: 10.0,
            map_offset_x: -75.0,
            low_color: super::color::ACCENT,
            high_color: super::color::BLACK,
            highlight_color: HIGHLIGHT,
            sentinel_color: NO_DATA,
            legend_bottom: 50.0,
            legend_left: 100.0,
            legend_height: 200.0,
            legend_width: 12.0,
            legend_scale_x: -65.0,
            legend_ticks: 5,
        }
    }
}

/// What survives an attribute switch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Drop locked ranges and locked counties
    #[default]
    ClearAll,
    /// Keep locked counties; ranges are always dropped
    KeepLockedRegions,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub loader: LoaderConfig,
    pub scatter: ScatterConfig,
    pub histogram: HistogramConfig,
    pub choropleth: ChoroplethConfig,
    pub color_mode: ColorMode,
    pub zero_baseline_for_wealth: Option<bool>,
    pub selection_policy: SelectionPolicy,
}

impl DashboardConfig {
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Wealth domains start at zero unless turned off
    pub fn zero_baseline_for_wealth(&self) -> bool {
        self.zero_baseline_for_wealth.unwrap_or(true)
    }
}
