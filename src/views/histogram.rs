//! Histogram of the active attribute

use std::rc::Rc;

use tracing::{debug, trace};

use super::{Axis, Label, Pos, Tooltip};
use crate::core::bins::{BinRange, Binning};
use crate::core::color::Rgb;
use crate::core::config::HistogramConfig;
use crate::core::record::{Attribute, Dataset};
use crate::core::scale::{format_number, LinearScale, ScaleRegistry};

/// One bar in container pixels
#[derive(Clone, Debug, PartialEq)]
pub struct BarMark {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    /// Clicked on; drawn with an outline
    pub selected: bool,
}

impl BarMark {
    fn contains(&self, p: Pos) -> bool {
        p[0] >= self.x && p[0] <= self.x + self.width && p[1] >= self.y && p[1] <= self.y + self.height
    }
}

pub struct Histogram {
    config: HistogramConfig,
    registry: Rc<ScaleRegistry>,
    dataset: Rc<Dataset>,
    attribute: Option<Attribute>,
    binning: Binning,
    /// Per-bin click state, reset whenever bins are recomputed
    selected: Vec<bool>,
    highlighted: Option<usize>,
    x_scale: LinearScale,
    y_scale: LinearScale,
    x_axis: Axis,
    y_axis: Axis,
    marks: Vec<BarMark>,
    hovered: Option<usize>,
    tooltip: Option<Tooltip>,
    on_bar_enter: Option<Box<dyn FnMut(BinRange)>>,
    on_bar_exit: Option<Box<dyn FnMut()>>,
    on_bar_click: Option<Box<dyn FnMut(BinRange, bool)>>,
    detached: bool,
}

impl Histogram {
    pub fn new(config: HistogramConfig, dataset: Rc<Dataset>, registry: Rc<ScaleRegistry>) -> Self {
        let frame = config.frame;
        let left = frame.margin.left;
        let top = frame.margin.top;
        let x_scale = LinearScale::new((0.0, 0.0), (left, left + frame.inner_width()));
        let y_scale = LinearScale::new((0.0, 0.0), (top + frame.inner_height(), top));
        Self {
            config,
            registry,
            dataset,
            attribute: None,
            binning: Binning {
                bins: Vec::new(),
                extent: (0.0, 0.0),
            },
            selected: Vec::new(),
            highlighted: None,
            x_scale,
            y_scale,
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            marks: Vec::new(),
            hovered: None,
            tooltip: None,
            on_bar_enter: None,
            on_bar_exit: None,
            on_bar_click: None,
            detached: false,
        }
    }

    pub fn on_bar_enter(&mut self, f: impl FnMut(BinRange) + 'static) {
        self.on_bar_enter = Some(Box::new(f));
    }

    pub fn on_bar_exit(&mut self, f: impl FnMut() + 'static) {
        self.on_bar_exit = Some(Box::new(f));
    }

    pub fn on_bar_click(&mut self, f: impl FnMut(BinRange, bool) + 'static) {
        self.on_bar_click = Some(Box::new(f));
    }

    /// Rebin `attribute` and render. Records with no value are not counted.
    pub fn update(&mut self, attribute: Attribute, dataset: Option<Rc<Dataset>>) {
        if let Some(ds) = dataset {
            self.dataset = ds;
        }
        let values: Vec<f64> = self
            .dataset
            .with_required(&[attribute])
            .map(|r| r.value(attribute))
            .collect();
        self.binning = Binning::new(values.iter().copied(), self.config.num_bins);
        self.selected = vec![false; self.binning.bins.len()];
        self.highlighted = None;
        self.hovered = None;
        self.tooltip = None;
        self.attribute = Some(attribute);

        self.x_scale.domain = self.binning.extent;
        self.y_scale.domain = (0.0, self.binning.max_count() as f64);
        self.x_axis = Axis::new(&self.x_scale, self.config.num_bins, attribute);
        self.y_axis = Axis::with_format(&self.y_scale, self.config.tick_count, format_number);

        debug!(
            attribute = attribute.column(),
            values = values.len(),
            bins = self.binning.bins.len(),
            "Histogram updated"
        );
        self.render();
    }

    pub fn render(&mut self) {
        if self.detached {
            return;
        }
        let Some(attribute) = self.attribute else {
            self.marks.clear();
            return;
        };
        let base = self.registry.color(attribute);
        let baseline = self.y_scale.apply(0.0);
        self.marks = self
            .binning
            .bins
            .iter()
            .enumerate()
            .map(|(i, bin)| {
                let x = self.x_scale.apply(bin.x0);
                let y = self.y_scale.apply(bin.count as f64);
                BarMark {
                    x,
                    y,
                    width: (self.x_scale.apply(bin.x1) - x - 1.0).max(0.0),
                    height: (baseline - y).max(0.0),
                    fill: if self.highlighted == Some(i) {
                        self.config.highlight_color
                    } else {
                        base
                    },
                    selected: self.selected.get(i).copied().unwrap_or(false),
                }
            })
            .collect();
        trace!(bars = self.marks.len(), "Histogram rendered");
    }

    /// Recolor the one bar holding `value`; every other bar goes back to normal
    pub fn highlight_bin_for_value(&mut self, value: f64) {
        self.highlighted = self.binning.index_of(value);
        self.render();
    }

    pub fn reset_highlight(&mut self) {
        self.highlighted = None;
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
            if let Some(cb) = self.on_bar_exit.as_mut() {
                cb();
            }
        }

        if let (Some(idx), Some(p)) = (hit, pos) {
            self.hovered = Some(idx);
            self.tooltip = self.tooltip_for(idx, p);
            let range = self.binning.bins[idx].range();
            trace!(idx, x0 = range.x0, x1 = range.x1, closed = range.closed, "Bar entered");
            if let Some(cb) = self.on_bar_enter.as_mut() {
                cb(range);
            }
        }
    }

    /// Toggle the clicked bar and report its new state
    pub fn click(&mut self, pos: Pos) {
        if self.detached {
            return;
        }
        let Some(idx) = self.hit_test(pos) else {
            return;
        };
        let now = !self.selected[idx];
        self.selected[idx] = now;
        let range = self.binning.bins[idx].range();
        debug!(idx, x0 = range.x0, x1 = range.x1, selected = now, "Bar clicked");
        self.render();
        if let Some(cb) = self.on_bar_click.as_mut() {
            cb(range, now);
        }
    }

    fn hit_test(&self, pos: Pos) -> Option<usize> {
        self.marks.iter().rposition(|m| m.width > 0.0 && m.contains(pos))
    }

    fn tooltip_for(&self, idx: usize, pos: Pos) -> Option<Tooltip> {
        let attribute = self.attribute?;
        let bin = self.binning.bins.get(idx)?;
        let unit = if attribute.is_currency() { "" } else { "%" };
        let prefix = if attribute.is_currency() { "$" } else { "" };
        Some(Tooltip {
            pos: [pos[0] + self.config.tooltip_padding, pos[1] + self.config.tooltip_padding],
            title: format!(
                "{}{} - {}{}{}: {} Counties",
                prefix,
                format_number(bin.x0),
                prefix,
                format_number(bin.x1),
                unit,
                bin.count
            ),
            lines: Vec::new(),
        })
    }

    pub fn detach(&mut self) {
        self.marks.clear();
        self.tooltip = None;
        self.hovered = None;
        self.on_bar_enter = None;
        self.on_bar_exit = None;
        self.on_bar_click = None;
        self.detached = true;
        debug!("Histogram detached");
    }

    pub fn config(&self) -> &HistogramConfig {
        &self.config
    }

    pub fn binning(&self) -> &Binning {
        &self.binning
    }

    pub fn marks(&self) -> &[BarMark] {
        &self.marks
    }

    /// Ranges of the bars currently clicked on
    pub fn selected_ranges(&self) -> Vec<BinRange> {
        self.binning
            .bins
            .iter()
            .zip(&self.selected)
            .filter(|(_, s)| **s)
            .map(|(b, _)| b.range())
            .collect()
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

    pub fn title(&self) -> Option<Label> {
        let attribute = self.attribute?;
        Some(Label {
            pos: [self.config.frame.width / 2.0, self.config.frame.margin.top / 2.0],
            text: format!("Dist. of {}", attribute.label()),
        })
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{Record, SENTINEL};
    use std::cell::RefCell;

    fn dataset(values: &[f64]) -> Rc<Dataset> {
        Rc::new(Dataset::from_records(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    Record::with_values(format!("{:05}", i), format!("County {}", i), &[(Attribute::PercentStroke, v)])
                })
                .collect(),
        ))
    }

    fn histogram(values: &[f64]) -> Histogram {
        let mut h = Histogram::new(
            HistogramConfig::default(),
            dataset(values),
            Rc::new(ScaleRegistry::default()),
        );
        h.update(Attribute::PercentStroke, None);
        h
    }

    fn center(m: &BarMark) -> Pos {
        [m.x + m.width / 2.0, m.y + m.height / 2.0]
    }

    #[test]
    fn test_bars_follow_bins() {
        let h = histogram(&[0.0, 1.0, 1.5, 8.0, SENTINEL]);
        assert_eq!(h.marks().len(), 8);
        assert_eq!(h.binning().total(), 4);
        // inner width 445 over an extent of 8: one bin is 55.625 px, minus the gutter
        let first = &h.marks()[0];
        assert_eq!(first.x, 35.0);
        assert!((first.width - 54.625).abs() < 1e-9);
        // tallest bar spans the full inner height
        let second = &h.marks()[1];
        assert_eq!(second.y, 25.0);
        assert_eq!(second.height, 155.0);
        assert_eq!(h.marks()[2].height, 0.0);
        assert_eq!(h.title().unwrap().text, "Dist. of Stroke");
    }

    #[test]
    fn test_identical_values_render_zero_width() {
        let h = histogram(&[5.0, 5.0]);
        assert_eq!(h.marks().len(), 8);
        assert!(h.marks().iter().all(|m| m.width == 0.0));
    }

    #[test]
    fn test_hover_reports_range_and_tooltip() {
        let mut h = histogram(&[0.0, 1.0, 1.5, 8.0]);
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        h.on_bar_enter(move |r| l.borrow_mut().push(format!("enter {}-{}", r.x0, r.x1)));
        let l = log.clone();
        h.on_bar_exit(move || l.borrow_mut().push("exit".to_string()));

        let c = center(&h.marks()[1]);
        h.pointer_move(Some(c));
        assert_eq!(h.tooltip().unwrap().title, "1 - 2%: 2 Counties");
        h.pointer_move(None);
        assert!(h.tooltip().is_none());
        assert_eq!(*log.borrow(), vec!["enter 1-2", "exit"]);
    }

    #[test]
    fn test_click_toggles_selection() {
        let mut h = histogram(&[0.0, 1.0, 1.5, 8.0]);
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let c = clicks.clone();
        h.on_bar_click(move |r, sel| c.borrow_mut().push((r, sel)));

        let p = center(&h.marks()[7]);
        h.click(p);
        assert!(h.marks()[7].selected);
        assert_eq!(h.selected_ranges(), vec![BinRange::closed(7.0, 8.0)]);
        h.click(p);
        assert!(!h.marks()[7].selected);
        h.click([0.0, 0.0]);
        let last = BinRange::closed(7.0, 8.0);
        assert_eq!(*clicks.borrow(), vec![(last, true), (last, false)]);
    }

    #[test]
    fn test_highlight_bin_for_value() {
        let mut h = histogram(&[0.0, 1.0, 1.5, 8.0]);
        let normal = h.marks()[0].fill;
        let color = h.config().highlight_color;
        h.highlight_bin_for_value(1.2);
        assert_eq!(h.marks()[1].fill, color);
        assert_eq!(h.marks().iter().filter(|m| m.fill == color).count(), 1);

        h.highlight_bin_for_value(8.0);
        assert_eq!(h.marks()[7].fill, color);
        assert_eq!(h.marks()[1].fill, normal);

        h.highlight_bin_for_value(42.0);
        assert!(h.marks().iter().all(|m| m.fill == normal));

        h.highlight_bin_for_value(1.2);
        h.reset_highlight();
        assert!(h.marks().iter().all(|m| m.fill == normal));
    }

    #[test]
    fn test_update_clears_bar_flags() {
        let mut h = histogram(&[0.0, 1.0, 1.5, 8.0]);
        h.click(center(&h.marks()[1]));
        h.update(Attribute::PercentStroke, None);
        assert!(h.selected_ranges().is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let mut h = histogram(&[]);
        assert!(h.marks().is_empty());
        h.pointer_move(Some([100.0, 100.0]));
        h.click([100.0, 100.0]);
        h.highlight_bin_for_value(3.0);
        assert!(h.tooltip().is_none());
    }
}
