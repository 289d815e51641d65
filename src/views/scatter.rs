//! Scatterplot of a wealth attribute (x) against a health attribute (y)

use std::collections::HashSet;
use std::rc::Rc;

use tracing::{debug, trace};

use super::{Axis, AttributeSelection, Label, Pos, Tooltip};
use crate::core::bins::BinRange;
use crate::core::color::Rgb;
use crate::core::config::ScatterConfig;
use crate::core::record::Dataset;
use crate::core::scale::{format_value, zero_based_domain, LinearScale, ScaleRegistry};

/// One record projected onto the two picked attributes
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPoint {
    pub region_id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Value of the active attribute (one of `x` / `y`)
    pub active: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointMark {
    pub center: Pos,
    pub radius: f64,
    pub fill: Rgb,
}

pub struct Scatterplot {
    config: ScatterConfig,
    registry: Rc<ScaleRegistry>,
    dataset: Rc<Dataset>,
    selection: Option<AttributeSelection>,
    points: Vec<ScatterPoint>,
    x_scale: LinearScale,
    y_scale: LinearScale,
    x_axis: Axis,
    y_axis: Axis,
    marks: Vec<PointMark>,
    /// Active-attribute range painted in the highlight color
    range_highlight: Option<BinRange>,
    /// Regions drawn enlarged
    focused: HashSet<String>,
    hovered: Option<usize>,
    tooltip: Option<Tooltip>,
    on_point_enter: Option<Box<dyn FnMut(f64, &str)>>,
    on_value_enter: Option<Box<dyn FnMut(f64)>>,
    on_point_exit: Option<Box<dyn FnMut()>>,
    detached: bool,
}

impl Scatterplot {
    /// Fix the layout. Nothing is drawn until `update`.
    pub fn new(config: ScatterConfig, dataset: Rc<Dataset>, registry: Rc<ScaleRegistry>) -> Self {
        let frame = config.frame;
        let left = frame.margin.left;
        let top = frame.margin.top;
        let x_scale = LinearScale::new((0.0, 0.0), (left, left + frame.inner_width()));
        let y_scale = LinearScale::new((0.0, 0.0), (top + frame.inner_height(), top));
        Self {
            config,
            registry,
            dataset,
            selection: None,
            points: Vec::new(),
            x_scale,
            y_scale,
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            marks: Vec::new(),
            range_highlight: None,
            focused: HashSet::new(),
            hovered: None,
            tooltip: None,
            on_point_enter: None,
            on_value_enter: None,
            on_point_exit: None,
            detached: false,
        }
    }

    pub fn on_point_enter(&mut self, f: impl FnMut(f64, &str) + 'static) {
        self.on_point_enter = Some(Box::new(f));
    }

    pub fn on_value_enter(&mut self, f: impl FnMut(f64) + 'static) {
        self.on_value_enter = Some(Box::new(f));
    }

    pub fn on_point_exit(&mut self, f: impl FnMut() + 'static) {
        self.on_point_exit = Some(Box::new(f));
    }

    /// Re-project records for `selection`, optionally swapping the dataset,
    /// then render. Records missing either attribute are left out.
    pub fn update(&mut self, selection: AttributeSelection, dataset: Option<Rc<Dataset>>) {
        if let Some(ds) = dataset {
            self.dataset = ds;
        }
        let x_attr = selection.wealth;
        let y_attr = selection.health;
        let active = selection.active_attribute();

        self.points = self
            .dataset
            .with_required(&[x_attr, y_attr])
            .map(|r| ScatterPoint {
                region_id: r.region_id().to_string(),
                name: r.display_name().to_string(),
                x: r.value(x_attr),
                y: r.value(y_attr),
                active: r.value(active),
            })
            .collect();

        self.x_scale.domain = zero_based_domain(self.points.iter().map(|p| p.x));
        self.y_scale.domain = zero_based_domain(self.points.iter().map(|p| p.y));
        self.x_axis = Axis::new(&self.x_scale, self.config.tick_count, x_attr).titled(x_attr.label());
        self.y_axis = Axis::new(&self.y_scale, self.config.tick_count, y_attr)
            .titled(format!("Percent with {}", y_attr.label()));

        self.selection = Some(selection);
        self.range_highlight = None;
        self.focused.clear();
        self.hovered = None;
        self.tooltip = None;

        debug!(
            x = x_attr.column(),
            y = y_attr.column(),
            points = self.points.len(),
            "Scatterplot updated"
        );
        self.render();
    }

    /// Rebuild marks from the current projections and highlight state
    pub fn render(&mut self) {
        if self.detached {
            return;
        }
        let Some(selection) = self.selection else {
            self.marks.clear();
            return;
        };
        let base = self.registry.color(selection.active_attribute());
        self.marks = self
            .points
            .iter()
            .map(|p| {
                let (fill, radius) = if self.focused.contains(&p.region_id) {
                    (self.config.highlight_color, self.config.focus_radius)
                } else if self.range_highlight.is_some_and(|r| r.contains(p.active)) {
                    (self.config.highlight_color, self.config.point_radius)
                } else {
                    (base, self.config.point_radius)
                };
                PointMark {
                    center: [self.x_scale.apply(p.x), self.y_scale.apply(p.y)],
                    radius,
                    fill,
                }
            })
            .collect();
        trace!(marks = self.marks.len(), "Scatterplot rendered");
    }

    /// Paint points whose active value is inside `range` with the highlight color
    pub fn highlight_by_range(&mut self, range: BinRange) {
        self.range_highlight = Some(range);
        self.render();
    }

    /// Drop the range highlight
    pub fn reset_filter(&mut self) {
        self.range_highlight = None;
        self.render();
    }

    /// Enlarge and recolor the point(s) of one region
    pub fn highlight_by_region(&mut self, region_id: &str) {
        self.focused.insert(region_id.to_string());
        self.render();
    }

    /// Shrink one region back, or every region with `None`
    pub fn reset_size_by_region(&mut self, region_id: Option<&str>) {
        match region_id {
            Some(id) => {
                self.focused.remove(id);
            }
            None => self.focused.clear(),
        }
        self.render();
    }

    /// Clear range and region highlights
    pub fn reset_highlight(&mut self) {
        self.range_highlight = None;
        self.focused.clear();
        self.render();
    }

    /// Pointer moved to `pos` (container pixels), or left the chart with `None`
    pub fn pointer_move(&mut self, pos: Option<Pos>) {
        if self.detached {
            return;
        }
        let hit = pos.and_then(|p| self.hit_test(p));
        if hit.is_some() && hit == self.hovered {
            if let (Some(p), Some(tip)) = (pos, self.tooltip.as_mut()) {
                tip.pos = [p[0] + self.config.tooltip_padding, p[1] + self.config.tooltip_padding];
            }
            return;
        }

        if self.hovered.take().is_some() {
            self.tooltip = None;
            if let Some(cb) = self.on_point_exit.as_mut() {
                cb();
            }
        }

        if let (Some(idx), Some(p)) = (hit, pos) {
            self.hovered = Some(idx);
            self.tooltip = self.tooltip_for(idx, p);
            let point = &self.points[idx];
            trace!(region_id = %point.region_id, value = point.active, "Point entered");
            if let Some(cb) = self.on_point_enter.as_mut() {
                cb(point.active, point.region_id.as_str());
            }
            if let Some(cb) = self.on_value_enter.as_mut() {
                cb(point.active);
            }
        }
    }

    /// Nearest point within the hit radius; on ties the later (top-most) mark wins
    fn hit_test(&self, pos: Pos) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, mark) in self.marks.iter().enumerate() {
            let dx = mark.center[0] - pos[0];
            let dy = mark.center[1] - pos[1];
            let d2 = dx * dx + dy * dy;
            let reach = self.config.hit_radius.max(mark.radius);
            if d2 <= reach * reach && best.map_or(true, |(_, b)| d2 <= b) {
                best = Some((i, d2));
            }
        }
        best.map(|(i, _)| i)
    }

    fn tooltip_for(&self, idx: usize, pos: Pos) -> Option<Tooltip> {
        let selection = self.selection?;
        let point = self.points.get(idx)?;
        Some(Tooltip {
            pos: [pos[0] + self.config.tooltip_padding, pos[1] + self.config.tooltip_padding],
            title: point.name.clone(),
            lines: vec![
                format!(
                    "{}: {}",
                    selection.wealth.label(),
                    format_value(selection.wealth, point.x)
                ),
                format!(
                    "{}: {}",
                    selection.health.label(),
                    format_value(selection.health, point.y)
                ),
            ],
        })
    }

    /// Remove marks and tooltip and drop every callback
    pub fn detach(&mut self) {
        self.marks.clear();
        self.tooltip = None;
        self.hovered = None;
        self.on_point_enter = None;
        self.on_value_enter = None;
        self.on_point_exit = None;
        self.detached = true;
        debug!("Scatterplot detached");
    }

    pub fn config(&self) -> &ScatterConfig {
        &self.config
    }

    pub fn points(&self) -> &[ScatterPoint] {
        &self.points
    }

    pub fn marks(&self) -> &[PointMark] {
        &self.marks
    }

    /// Last mark drawn for a region
    pub fn mark_for(&self, region_id: &str) -> Option<&PointMark> {
        self.points
            .iter()
            .zip(&self.marks)
            .filter(|(p, _)| p.region_id == region_id)
            .map(|(_, m)| m)
            .last()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    pub fn title(&self) -> Option<Label> {
        let selection = self.selection?;
        Some(Label {
            pos: [self.config.frame.width / 2.0, self.config.frame.margin.top / 2.0],
            text: format!(
                "{} vs. {}",
                selection.health.label(),
                selection.wealth.label()
            ),
        })
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}
