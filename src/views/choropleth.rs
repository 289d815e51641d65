//! County choropleth of the active attribute
//!
//! Geometry is projected once in `new` and never changes. Each `update`
//! builds a fresh region id -> value join; fills are derived from the join,
//! the color scale, the locked selection and the current highlight.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use geo::algorithm::bounding_rect::BoundingRect;
use geo::algorithm::contains::Contains;
use geo::algorithm::intersects::Intersects;
use geo::{Coord, MultiPolygon, Point, Rect, Translate};
use tracing::{debug, trace, warn};

use super::{Axis, Label, Pos, Tooltip};
use crate::core::bins::BinRange;
use crate::core::color::Rgb;
use crate::core::config::{ChoroplethConfig, LoaderConfig};
use crate::core::error::LoadError;
use crate::core::projection::{fill_triangles, AlbersUsa};
use crate::core::record::{Attribute, Dataset};
use crate::core::scale::{format_tick, format_value, ColorScale, LinearScale, ScaleRegistry};
use crate::core::topology::Topology;

/// Join result for one region
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JoinedValue {
    Value(f64),
    /// The record exists but has no value for the attribute
    NoData,
}

impl JoinedValue {
    pub fn value(self) -> Option<f64> {
        match self {
            JoinedValue::Value(v) => Some(v),
            JoinedValue::NoData => None,
        }
    }
}

/// A projected county
#[derive(Clone, Debug, PartialEq)]
pub struct CountyShape {
    pub id: String,
    pub name: String,
    /// Container pixels
    pub geometry: MultiPolygon<f64>,
    pub bounds: Rect<f64>,
    /// Fill triangles in container pixels
    pub triangles: Vec<[Pos; 3]>,
}

impl CountyShape {
    /// `None` for a shape with no vertices
    pub fn new(id: String, name: String, geometry: MultiPolygon<f64>) -> Option<Self> {
        let bounds = geometry.bounding_rect()?;
        let triangles = fill_triangles(&geometry);
        Some(Self {
            id,
            name,
            geometry,
            bounds,
            triangles,
        })
    }

    /// Inside some polygon and outside its holes
    pub fn contains(&self, p: Pos) -> bool {
        self.bounds.intersects(&Coord::from(p)) && self.geometry.contains(&Point::new(p[0], p[1]))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// 0 at the bottom of the legend bar, 1 at the top
    pub offset: f64,
    pub color: Rgb,
}

/// Vertical gradient bar with its value axis
#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub stops: Vec<GradientStop>,
    /// Horizontal position of the axis line
    pub axis_x: f64,
    /// Tick offsets are vertical container pixels
    pub axis: Axis,
}

#[derive(Clone, Debug, PartialEq)]
enum Highlight {
    None,
    Range(BinRange),
    Region(String),
}

pub struct Choropleth {
    config: ChoroplethConfig,
    registry: Rc<ScaleRegistry>,
    dataset: Rc<Dataset>,
    attribute: Option<Attribute>,
    shapes: Vec<CountyShape>,
    borders: Vec<Vec<Pos>>,
    join: HashMap<String, JoinedValue>,
    color_scale: ColorScale,
    locked_ranges: Vec<BinRange>,
    locked_regions: HashSet<String>,
    highlight: Highlight,
    fills: Vec<Rgb>,
    legend: Option<Legend>,
    hovered: Option<usize>,
    tooltip: Option<Tooltip>,
    on_region_enter: Option<Box<dyn FnMut(&str, Option<f64>)>>,
    on_region_exit: Option<Box<dyn FnMut()>>,
    on_region_click: Option<Box<dyn FnMut(&str, bool)>>,
    detached: bool,
}

impl Choropleth {
    /// Project the county shapes and the state border mesh into the frame
    pub fn new(
        config: ChoroplethConfig,
        topology: &Topology,
        loader: &LoaderConfig,
        registry: Rc<ScaleRegistry>,
    ) -> Result<Self, LoadError> {
        let frame = config.frame;
        let projection = AlbersUsa::fit(frame.inner_width(), frame.inner_height());
        let offset = [frame.margin.left + config.map_offset_x, frame.margin.top];
        let shift = |p: [f64; 2]| [p[0] + offset[0], p[1] + offset[1]];

        let features = topology.features(&loader.counties_object, loader.id_width)?;
        let total = features.len();
        let mut shapes = Vec::with_capacity(total);
        for feature in features {
            let Some(projected) = projection.project_polygons(&feature.polygons) else {
                trace!(id = %feature.id, "County outside the projection");
                continue;
            };
            let geometry = projected.translate(offset[0], offset[1]);
            match CountyShape::new(feature.id, feature.name, geometry) {
                Some(shape) => shapes.push(shape),
                None => trace!("Empty county shape dropped"),
            }
        }
        if shapes.len() < total {
            warn!(skipped = total - shapes.len(), "Counties outside the map were dropped");
        }

        let borders: Vec<Vec<Pos>> = if topology.has_object(&loader.states_object) {
            topology
                .interior_mesh(&loader.states_object)?
                .iter()
                .filter_map(|line| projection.project_path(line))
                .map(|line| line.into_iter().map(shift).collect())
                .collect()
        } else {
            warn!(object = %loader.states_object, "No state object, borders not drawn");
            Vec::new()
        };

        debug!(counties = shapes.len(), borders = borders.len(), "Choropleth constructed");
        Ok(Self {
            color_scale: ColorScale::new((0.0, 0.0), config.low_color, config.high_color),
            config,
            registry,
            dataset: Rc::new(Dataset::default()),
            attribute: None,
            shapes,
            borders,
            join: HashMap::new(),
            locked_ranges: Vec::new(),
            locked_regions: HashSet::new(),
            highlight: Highlight::None,
            fills: Vec::new(),
            legend: None,
            hovered: None,
            tooltip: None,
            on_region_enter: None,
            on_region_exit: None,
            on_region_click: None,
            detached: false,
        })
    }

    pub fn on_region_enter(&mut self, f: impl FnMut(&str, Option<f64>) + 'static) {
        self.on_region_enter = Some(Box::new(f));
    }

    pub fn on_region_exit(&mut self, f: impl FnMut() + 'static) {
        self.on_region_exit = Some(Box::new(f));
    }

    pub fn on_region_click(&mut self, f: impl FnMut(&str, bool) + 'static) {
        self.on_region_click = Some(Box::new(f));
    }

    /// Rebuild the join, color scale and legend for `attribute`, then render.
    /// Locked ranges are dropped since they are in the old attribute's units.
    pub fn update(&mut self, attribute: Attribute, dataset: Option<Rc<Dataset>>) {
        if let Some(ds) = dataset {
            self.dataset = ds;
        }
        self.join = self
            .dataset
            .records()
            .iter()
            .map(|r| {
                let joined = match r.get(attribute) {
                    Some(v) => JoinedValue::Value(v),
                    None => JoinedValue::NoData,
                };
                (r.region_id().to_string(), joined)
            })
            .collect();

        let domain = self.registry.domain(&self.dataset, attribute);
        self.color_scale = ColorScale::new(domain, self.config.low_color, self.config.high_color);
        self.legend = Some(self.build_legend(attribute));
        self.attribute = Some(attribute);
        self.locked_ranges.clear();
        self.highlight = Highlight::None;
        self.hovered = None;
        self.tooltip = None;

        let unmatched = self
            .shapes
            .iter()
            .filter(|s| !self.join.contains_key(&s.id))
            .count();
        debug!(
            attribute = attribute.column(),
            joined = self.shapes.len() - unmatched,
            unmatched,
            domain_max = domain.1,
            "Choropleth updated"
        );
        self.render();
    }

    fn build_legend(&self, attribute: Attribute) -> Legend {
        let c = &self.config;
        let x = c.legend_left + c.legend_scale_x;
        let y = c.frame.height - c.legend_bottom - c.legend_height;

        let ticks = self.color_scale.ticks(10);
        let last = ticks.len().saturating_sub(1).max(1) as f64;
        let stops = ticks
            .iter()
            .enumerate()
            .map(|(i, &v)| GradientStop {
                offset: i as f64 / last,
                color: self.color_scale.apply(v),
            })
            .collect();

        let axis_scale = LinearScale::new(self.color_scale.domain, (y + c.legend_height, y));
        Legend {
            x,
            y,
            width: c.legend_width,
            height: c.legend_height,
            stops,
            axis_x: c.legend_left + c.legend_width + c.legend_scale_x,
            axis: Axis::with_format(&axis_scale, c.legend_ticks, |v| format_tick(attribute, v)),
        }
    }

    /// Recompute every county fill from the current state
    pub fn render(&mut self) {
        if self.detached {
            return;
        }
        if self.attribute.is_none() {
            self.fills.clear();
            return;
        }
        self.fills = self.shapes.iter().map(|s| self.fill_for(s)).collect();
        trace!(counties = self.fills.len(), "Choropleth rendered");
    }

    /// Color-scale fill, or the no-data color for sentinels and missing joins
    fn base_fill(&self, shape: &CountyShape) -> Rgb {
        match self.join.get(&shape.id) {
            Some(JoinedValue::Value(v)) => self.color_scale.apply(*v),
            Some(JoinedValue::NoData) | None => self.config.sentinel_color,
        }
    }

    fn has_selection(&self) -> bool {
        !self.locked_ranges.is_empty() || !self.locked_regions.is_empty()
    }

    fn is_selected(&self, shape: &CountyShape) -> bool {
        if self.locked_regions.contains(&shape.id) {
            return true;
        }
        match self.join.get(&shape.id) {
            Some(JoinedValue::Value(v)) => self.locked_ranges.iter().any(|r| r.contains(*v)),
            _ => false,
        }
    }

    /// Fill with selection emphasis applied but no transient highlight
    fn baseline_fill(&self, shape: &CountyShape) -> Rgb {
        let base = self.base_fill(shape);
        if self.has_selection() && !self.is_selected(shape) {
            base.dulled()
        } else {
            base
        }
    }

    fn fill_for(&self, shape: &CountyShape) -> Rgb {
        let highlighted = match &self.highlight {
            Highlight::None => false,
            Highlight::Range(r) => matches!(
                self.join.get(&shape.id),
                Some(JoinedValue::Value(v)) if r.contains(*v)
            ),
            Highlight::Region(id) => shape.id == *id,
        };
        if highlighted {
            self.config.highlight_color
        } else {
            self.baseline_fill(shape)
        }
    }

    /// Counties whose value is inside `range` take the highlight color
    pub fn highlight_by_range(&mut self, range: BinRange) {
        self.highlight = Highlight::Range(range);
        self.render();
    }

    pub fn highlight_by_region(&mut self, region_id: &str) {
        self.highlight = Highlight::Region(region_id.to_string());
        self.render();
    }

    /// Back to exactly what `render` produces without a highlight
    pub fn reset_highlight(&mut self) {
        self.highlight = Highlight::None;
        self.render();
    }

    /// Keep counties inside any of `ranges` in full color, dull the rest
    pub fn apply_multi_range_selection(&mut self, ranges: &[BinRange]) {
        self.locked_ranges = ranges.to_vec();
        debug!(ranges = ranges.len(), "Range selection applied");
        self.render();
    }

    /// Keep the counties in `ids` in full color, dull the rest
    pub fn apply_locked_regions<'a>(&mut self, ids: impl IntoIterator<Item = &'a String>) {
        self.locked_regions = ids.into_iter().cloned().collect();
        debug!(regions = self.locked_regions.len(), "Region selection applied");
        self.render();
    }

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
            if let Some(cb) = self.on_region_exit.as_mut() {
                cb();
            }
        }

        if let (Some(idx), Some(p)) = (hit, pos) {
            self.hovered = Some(idx);
            self.tooltip = self.tooltip_for(idx, p);
            let shape = &self.shapes[idx];
            let value = self.join.get(&shape.id).and_then(|j| j.value());
            trace!(region_id = %shape.id, ?value, "Region entered");
            if let Some(cb) = self.on_region_enter.as_mut() {
                cb(shape.id.as_str(), value);
            }
        }
    }

    /// Toggle the locked state of the clicked county and report it
    pub fn click(&mut self, pos: Pos) {
        if self.detached {
            return;
        }
        let Some(idx) = self.hit_test(pos) else {
            return;
        };
        let id = self.shapes[idx].id.clone();
        let now = !self.locked_regions.remove(&id);
        if now {
            self.locked_regions.insert(id.clone());
        }
        debug!(region_id = %id, selected = now, "Region clicked");
        self.render();
        if let Some(cb) = self.on_region_click.as_mut() {
            cb(id.as_str(), now);
        }
    }

    fn hit_test(&self, pos: Pos) -> Option<usize> {
        if self.attribute.is_none() {
            return None;
        }
        self.shapes.iter().rposition(|s| s.contains(pos))
    }

    fn tooltip_for(&self, idx: usize, pos: Pos) -> Option<Tooltip> {
        let attribute = self.attribute?;
        let shape = self.shapes.get(idx)?;
        let line = match self.join.get(&shape.id) {
            Some(JoinedValue::Value(v)) => {
                format!("{}: {}", attribute.label(), format_value(attribute, *v))
            }
            _ => "No data available".to_string(),
        };
        Some(Tooltip {
            pos: [pos[0] + self.config.tooltip_padding, pos[1] + self.config.tooltip_padding],
            title: shape.name.clone(),
            lines: vec![line],
        })
    }

    pub fn detach(&mut self) {
        self.fills.clear();
        self.legend = None;
        self.tooltip = None;
        self.hovered = None;
        self.on_region_enter = None;
        self.on_region_exit = None;
        self.on_region_click = None;
        self.detached = true;
        debug!("Choropleth detached");
    }

    /// Joined value for a region, `None` when no record matched
    pub fn col_value(&self, region_id: &str) -> Option<JoinedValue> {
        self.join.get(region_id).copied()
    }

    pub fn shapes(&self) -> &[CountyShape] {
        &self.shapes
    }

    /// Fills parallel to `shapes`, empty before the first update
    pub fn fills(&self) -> &[Rgb] {
        &self.fills
    }

    pub fn fill_of(&self, region_id: &str) -> Option<Rgb> {
        let idx = self.shapes.iter().position(|s| s.id == region_id)?;
        self.fills.get(idx).copied()
    }

    pub fn borders(&self) -> &[Vec<Pos>] {
        &self.borders
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn color_scale(&self) -> &ColorScale {
        &self.color_scale
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn config(&self) -> &ChoroplethConfig {
        &self.config
    }

    pub fn title(&self) -> Option<Label> {
        let attribute = self.attribute?;
        Some(Label {
            pos: [self.config.frame.width / 2.0, 30.0],
            text: format!("Spatial Distribution of {}", attribute.label()),
        })
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Screen center of a county's bounding box
    pub fn center_of(&self, region_id: &str) -> Option<Pos> {
        self.shapes
            .iter()
            .find(|s| s.id == region_id)
            .map(|s| {
                let c = s.bounds.center();
                [c.x, c.y]
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::NO_DATA;
    use crate::core::record::{Record, SENTINEL};
    use crate::core::topology::tests::US_SQUARES;
    use std::cell::RefCell;

    fn dataset(records: &[(&str, f64)]) -> Rc<Dataset> {
        Rc::new(Dataset::from_records(
            records
                .iter()
                .map(|&(id, v)| Record::with_values(id, id, &[(Attribute::PercentStroke, v)]))
                .collect(),
        ))
    }

    fn map(records: &[(&str, f64)]) -> Choropleth {
        let topo = Topology::from_json_str(US_SQUARES).unwrap();
        let mut m = Choropleth::new(
            ChoroplethConfig::default(),
            &topo,
            &LoaderConfig::default(),
            Rc::new(ScaleRegistry::default()),
        )
        .unwrap();
        m.update(Attribute::PercentStroke, Some(dataset(records)));
        m
    }

    #[test]
    fn test_construct_projects_shapes_and_borders() {
        let m = map(&[]);
        assert_eq!(m.shapes().len(), 2);
        assert_eq!(m.borders().len(), 1);
        let b = m.shapes()[0].bounds;
        assert!(b.min().x > 0.0 && b.max().x < 1100.0);
        assert!(b.min().y > 0.0 && b.max().y < 500.0);
        assert!(m.shapes().iter().all(|s| s.triangles.len() == 2));
    }

    #[test]
    fn test_county_shape_hole_is_outside() {
        use geo::{LineString, Polygon};
        let outer: LineString<f64> = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]].into();
        let hole: LineString<f64> = vec![[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0]].into();
        let geometry = MultiPolygon::new(vec![Polygon::new(outer, vec![hole])]);
        let shape = CountyShape::new("01001".into(), "Ring".into(), geometry).unwrap();
        assert!(shape.contains([1.0, 1.0]));
        assert!(!shape.contains([5.0, 5.0]));
        assert!(!shape.contains([11.0, 5.0]));
        assert!(CountyShape::new("x".into(), "x".into(), MultiPolygon::new(vec![])).is_none());
    }

    #[test]
    fn test_join_round_trip() {
        let m = map(&[("01001", 5.0), ("01003", SENTINEL), ("99999", 7.0)]);
        assert_eq!(m.col_value("01001"), Some(JoinedValue::Value(5.0)));
        assert_eq!(m.col_value("01003"), Some(JoinedValue::NoData));
        assert_eq!(m.fill_of("01003"), Some(NO_DATA));
        assert_eq!(m.fill_of("01001"), Some(m.color_scale().apply(5.0)));
        assert_ne!(m.fill_of("01001"), Some(NO_DATA));
    }

    #[test]
    fn test_missing_join_uses_no_data_color() {
        let m = map(&[("01001", 5.0)]);
        assert_eq!(m.col_value("01003"), None);
        assert_eq!(m.fill_of("01003"), Some(NO_DATA));
    }

    #[test]
    fn test_domain_starts_at_zero() {
        let m = map(&[("01001", 5.0), ("01003", 15.0)]);
        assert_eq!(m.color_scale().domain, (0.0, 15.0));
        let legend = m.legend().unwrap();
        assert_eq!(legend.stops.first().map(|s| s.offset), Some(0.0));
        assert_eq!(legend.stops.last().map(|s| s.offset), Some(1.0));
        assert_eq!(legend.stops[0].color, m.config().low_color);
        assert_eq!(legend.y, 500.0 - 50.0 - 200.0);
        assert_eq!(legend.x, 35.0);
        // axis grows upward
        let ticks = &legend.axis.ticks;
        assert!(ticks.first().unwrap().offset > ticks.last().unwrap().offset);
        assert_eq!(ticks[0].label, "0%");
        assert_eq!(m.title().unwrap().text, "Spatial Distribution of Stroke");
    }

    #[test]
    fn test_reset_restores_render() {
        let mut m = map(&[("01001", 5.0), ("01003", 15.0)]);
        let rendered = m.fills().to_vec();
        let hl = m.config().highlight_color;

        m.highlight_by_range(BinRange::new(0.0, 10.0));
        assert_eq!(m.fill_of("01001"), Some(hl));
        assert_eq!(m.fill_of("01003"), Some(rendered[1]));

        m.highlight_by_region("01003");
        assert_eq!(m.fill_of("01003"), Some(hl));
        assert_eq!(m.fill_of("01001"), Some(rendered[0]));

        m.reset_highlight();
        assert_eq!(m.fills(), &rendered[..]);
        m.render();
        assert_eq!(m.fills(), &rendered[..]);
    }

    #[test]
    fn test_range_highlight_skips_sentinel() {
        let mut m = map(&[("01001", 0.0), ("01003", SENTINEL)]);
        m.highlight_by_range(BinRange::new(-5.0, 5.0));
        assert_eq!(m.fill_of("01001"), Some(m.config().highlight_color));
        assert_eq!(m.fill_of("01003"), Some(NO_DATA));
    }

    #[test]
    fn test_multi_range_selection_dulls_the_rest() {
        let mut m = map(&[("01001", 5.0), ("01003", 15.0)]);
        let rendered = m.fills().to_vec();
        m.apply_multi_range_selection(&[BinRange::new(10.0, 20.0)]);
        assert_eq!(m.fill_of("01003"), Some(rendered[1]));
        assert_eq!(m.fill_of("01001"), Some(rendered[0].dulled()));

        // reset keeps the selection emphasis
        m.highlight_by_region("01003");
        m.reset_highlight();
        assert_eq!(m.fill_of("01001"), Some(rendered[0].dulled()));

        m.apply_multi_range_selection(&[]);
        assert_eq!(m.fills(), &rendered[..]);

        // a closed range keeps the county sitting on its upper bound
        m.apply_multi_range_selection(&[BinRange::closed(10.0, 15.0)]);
        assert_eq!(m.fill_of("01003"), Some(rendered[1]));
        m.apply_multi_range_selection(&[BinRange::new(10.0, 15.0)]);
        assert_eq!(m.fill_of("01003"), Some(rendered[1].dulled()));
    }

    #[test]
    fn test_locked_regions() {
        let mut m = map(&[("01001", 5.0), ("01003", 15.0)]);
        let rendered = m.fills().to_vec();
        let ids = vec!["01001".to_string()];
        m.apply_locked_regions(&ids);
        assert_eq!(m.fill_of("01001"), Some(rendered[0]));
        assert_eq!(m.fill_of("01003"), Some(rendered[1].dulled()));
        m.apply_locked_regions(&Vec::new());
        assert_eq!(m.fills(), &rendered[..]);
    }

    #[test]
    fn test_hover_and_click() {
        let mut m = map(&[("01001", 5.0)]);
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        m.on_region_enter(move |id, v| l.borrow_mut().push(format!("enter {} {:?}", id, v)));
        let l = log.clone();
        m.on_region_exit(move || l.borrow_mut().push("exit".to_string()));
        let l = log.clone();
        m.on_region_click(move |id, sel| l.borrow_mut().push(format!("click {} {}", id, sel)));

        let left = m.center_of("01001").unwrap();
        let right = m.center_of("01003").unwrap();
        m.pointer_move(Some(left));
        let tip = m.tooltip().unwrap();
        assert_eq!(tip.title, "Left");
        assert_eq!(tip.lines, vec!["Stroke: 5%".to_string()]);

        m.pointer_move(Some(right));
        assert_eq!(m.tooltip().unwrap().lines, vec!["No data available".to_string()]);
        m.click(right);
        assert_eq!(m.fill_of("01001"), Some(m.color_scale().apply(5.0).dulled()));
        m.pointer_move(None);
        m.detach();

        assert_eq!(
            *log.borrow(),
            vec![
                "enter 01001 Some(5.0)",
                "exit",
                "enter 01003 None",
                "click 01003 true",
                "exit",
            ]
        );
    }

    #[test]
    fn test_attribute_switch_drops_ranges_and_highlight() {
        let mut m = map(&[("01001", 5.0), ("01003", 15.0)]);
        m.apply_multi_range_selection(&[BinRange::new(10.0, 20.0)]);
        m.highlight_by_region("01001");
        m.update(Attribute::PercentStroke, None);
        let hl = m.config().highlight_color;
        assert!(m.fills().iter().all(|c| *c != hl));
        assert_eq!(m.fill_of("01001"), Some(m.color_scale().apply(5.0)));
    }

    #[test]
    fn test_missing_county_object_is_error() {
        let topo = Topology::from_json_str(US_SQUARES).unwrap();
        let loader = LoaderConfig {
            counties_object: "nope".to_string(),
            ..LoaderConfig::default()
        };
        let res = Choropleth::new(
            ChoroplethConfig::default(),
            &topo,
            &loader,
            Rc::new(ScaleRegistry::default()),
        );
        assert!(matches!(res, Err(LoadError::MissingObject(_))));
    }
}
