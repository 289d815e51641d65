//! Chart view models
//!
//! Each view owns its scales and the marks it would draw, in pixel
//! coordinates relative to its own container. Pointer input is hit-tested
//! here; the egui layer only paints marks and forwards the pointer.
//! Views report interactions through `on_*` callback slots and never hold a
//! reference to another view.

pub mod choropleth;
pub mod histogram;
pub mod scatter;

pub use choropleth::{Choropleth, JoinedValue};
pub use histogram::Histogram;
pub use scatter::Scatterplot;

use crate::core::bins::BinRange;
use crate::core::record::{Attribute, AttributeKind};
use crate::core::scale::{format_tick, LinearScale};

/// Pixel position inside a view's container
pub type Pos = [f64; 2];

/// Interaction reported by a view, queued for the coordinator
#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    PointEnter { value: f64, region_id: String },
    ValueEnter(f64),
    PointExit,
    BarEnter(BinRange),
    BarExit,
    BarClick { range: BinRange, selected: bool },
    RegionEnter { region_id: String, value: Option<f64> },
    RegionExit,
    RegionClick { region_id: String, selected: bool },
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::PointEnter { .. } => "PointEnter",
            ViewEvent::ValueEnter(_) => "ValueEnter",
            ViewEvent::PointExit => "PointExit",
            ViewEvent::BarEnter(_) => "BarEnter",
            ViewEvent::BarExit => "BarExit",
            ViewEvent::BarClick { .. } => "BarClick",
            ViewEvent::RegionEnter { .. } => "RegionEnter",
            ViewEvent::RegionExit => "RegionExit",
            ViewEvent::RegionClick { .. } => "RegionClick",
        }
    }
}

/// The two picked attributes and which one was picked last
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeSelection {
    pub wealth: Attribute,
    pub health: Attribute,
    pub active: AttributeKind,
}

impl AttributeSelection {
    pub fn active_attribute(&self) -> Attribute {
        match self.active {
            AttributeKind::Wealth => self.wealth,
            AttributeKind::Health => self.health,
        }
    }
}

impl Default for AttributeSelection {
    fn default() -> Self {
        Self {
            wealth: Attribute::MedianHouseholdIncome,
            health: Attribute::PercentStroke,
            active: AttributeKind::Health,
        }
    }
}

/// Hover box content, anchored at `pos`
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub pos: Pos,
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Pixel position along the axis
    pub offset: f64,
    pub label: String,
}

/// Tick marks for one axis plus an optional title
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Axis {
    pub ticks: Vec<Tick>,
    pub title: Option<String>,
}

impl Axis {
    pub fn new(scale: &LinearScale, count: usize, attr: Attribute) -> Self {
        Self::with_format(scale, count, |v| format_tick(attr, v))
    }

    pub fn with_format(scale: &LinearScale, count: usize, format: impl Fn(f64) -> String) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|value| Tick {
                value,
                offset: scale.apply(value),
                label: format(value),
            })
            .collect();
        Self { ticks, title: None }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Chart title placed in the container
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub pos: Pos,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_attribute_follows_kind() {
        let mut sel = AttributeSelection::default();
        assert_eq!(sel.active_attribute(), Attribute::PercentStroke);
        sel.active = AttributeKind::Wealth;
        assert_eq!(sel.active_attribute(), Attribute::MedianHouseholdIncome);
    }

    #[test]
    fn test_axis_ticks_are_positioned() {
        let scale = LinearScale::new((0.0, 10.0), (35.0, 280.0));
        let axis = Axis::new(&scale, 5, Attribute::PercentStroke).titled("Stroke");
        assert_eq!(axis.ticks.len(), 6);
        assert_eq!(axis.ticks[0].offset, 35.0);
        assert_eq!(axis.ticks[5].offset, 280.0);
        assert_eq!(axis.ticks[1].label, "2%");
        assert_eq!(axis.title.as_deref(), Some("Stroke"));
    }
}
