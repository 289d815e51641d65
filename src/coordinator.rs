//! Interaction coordinator
//!
//! `Dashboard` owns the three views, the shared dataset and the locked
//! selection. View callbacks only enqueue `ViewEvent`s; the queue is drained
//! after every pointer interaction and each event is fanned out to the other
//! views. No view holds a reference to another.

use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use tracing::{debug, error, info, trace, warn};

use crate::core::bins::BinRange;
use crate::core::config::{DashboardConfig, SelectionPolicy};
use crate::core::error::LoadError;
use crate::core::record::{Attribute, AttributeKind, Dataset};
use crate::core::scale::ScaleRegistry;
use crate::core::topology::Topology;
use crate::views::{AttributeSelection, Choropleth, Histogram, Pos, Scatterplot, ViewEvent};

type EventQueue = Rc<RefCell<VecDeque<ViewEvent>>>;

pub struct Dashboard {
    config: DashboardConfig,
    registry: Rc<ScaleRegistry>,
    dataset: Rc<Dataset>,
    /// The CSV has arrived (possibly empty after a failed load)
    dataset_ready: bool,
    selection: AttributeSelection,
    scatter: Scatterplot,
    histogram: Histogram,
    /// Built once the topology arrives
    choropleth: Option<Choropleth>,
    locked_ranges: Vec<BinRange>,
    locked_regions: BTreeSet<String>,
    queue: EventQueue,
    torn_down: bool,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let registry = Rc::new(ScaleRegistry::new(
            config.color_mode,
            config.zero_baseline_for_wealth(),
        ));
        let dataset = Rc::new(Dataset::default());
        let queue: EventQueue = Rc::new(RefCell::new(VecDeque::new()));

        let mut scatter = Scatterplot::new(config.scatter.clone(), dataset.clone(), registry.clone());
        wire_scatter(&mut scatter, &queue);
        let mut histogram = Histogram::new(config.histogram.clone(), dataset.clone(), registry.clone());
        wire_histogram(&mut histogram, &queue);

        Self {
            config,
            registry,
            dataset,
            dataset_ready: false,
            selection: AttributeSelection::default(),
            scatter,
            histogram,
            choropleth: None,
            locked_ranges: Vec::new(),
            locked_regions: BTreeSet::new(),
            queue,
            torn_down: false,
        }
    }

    // ========================================================================
    // Data arrival
    // ========================================================================

    /// Install a freshly loaded dataset. Clears every selection.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        if self.torn_down {
            debug!("Dataset arrived after teardown, ignoring");
            return;
        }
        info!(records = dataset.len(), "Dataset installed");
        self.dataset = Rc::new(dataset);
        self.dataset_ready = true;
        self.locked_ranges.clear();
        self.locked_regions.clear();
        self.check_columns();

        let active = self.selection.active_attribute();
        self.scatter.update(self.selection, Some(self.dataset.clone()));
        self.histogram.update(active, Some(self.dataset.clone()));
        if let Some(map) = self.choropleth.as_mut() {
            map.update(active, Some(self.dataset.clone()));
            map.apply_locked_regions(&self.locked_regions);
        }
    }

    /// Build the map from the topology. It renders once the dataset is in too.
    pub fn set_topology(&mut self, topology: &Topology) -> Result<(), LoadError> {
        if self.torn_down {
            debug!("Topology arrived after teardown, ignoring");
            return Ok(());
        }
        let mut map = Choropleth::new(
            self.config.choropleth.clone(),
            topology,
            &self.config.loader,
            self.registry.clone(),
        )?;
        wire_choropleth(&mut map, &self.queue);
        if self.dataset_ready {
            map.update(self.selection.active_attribute(), Some(self.dataset.clone()));
            map.apply_locked_regions(&self.locked_regions);
        }
        if let Some(mut old) = self.choropleth.replace(map) {
            old.detach();
        }
        info!("Map ready");
        Ok(())
    }

    // ========================================================================
    // Attribute picking
    // ========================================================================

    /// Pick a health attribute; it becomes the active one
    pub fn select_health(&mut self, attr: Attribute) {
        if attr.kind() != AttributeKind::Health {
            warn!(attribute = attr.column(), "Not a health attribute");
            return;
        }
        self.selection.health = attr;
        self.selection.active = AttributeKind::Health;
        self.apply_selection();
    }

    /// Pick a wealth attribute; it becomes the active one
    pub fn select_wealth(&mut self, attr: Attribute) {
        if attr.kind() != AttributeKind::Wealth {
            warn!(attribute = attr.column(), "Not a wealth attribute");
            return;
        }
        self.selection.wealth = attr;
        self.selection.active = AttributeKind::Wealth;
        self.apply_selection();
    }

    fn apply_selection(&mut self) {
        if self.torn_down {
            return;
        }
        let active = self.selection.active_attribute();
        debug!(
            active = active.column(),
            wealth = self.selection.wealth.column(),
            health = self.selection.health.column(),
            "Attribute selection changed"
        );
        self.locked_ranges.clear();
        if self.config.selection_policy == SelectionPolicy::ClearAll {
            self.locked_regions.clear();
        }
        self.check_columns();

        self.scatter.update(self.selection, None);
        self.histogram.update(active, None);
        if self.dataset_ready {
            if let Some(map) = self.choropleth.as_mut() {
                map.update(active, None);
                map.apply_locked_regions(&self.locked_regions);
            }
        }
    }

    /// A picked attribute missing from a non-empty dataset is a wiring bug
    fn check_columns(&self) {
        if self.dataset.is_empty() {
            return;
        }
        for attr in [self.selection.wealth, self.selection.health] {
            if !self.dataset.has_column(attr) {
                error!(column = attr.column(), "Selected attribute not in dataset");
                debug_assert!(false, "selected attribute {} not in dataset", attr.column());
            }
        }
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    pub fn scatter_pointer(&mut self, pos: Option<Pos>) {
        self.scatter.pointer_move(pos);
        self.dispatch();
    }

    pub fn histogram_pointer(&mut self, pos: Option<Pos>) {
        self.histogram.pointer_move(pos);
        self.dispatch();
    }

    pub fn histogram_click(&mut self, pos: Pos) {
        self.histogram.click(pos);
        self.dispatch();
    }

    pub fn map_pointer(&mut self, pos: Option<Pos>) {
        if let Some(map) = self.choropleth.as_mut() {
            map.pointer_move(pos);
        }
        self.dispatch();
    }

    pub fn map_click(&mut self, pos: Pos) {
        if let Some(map) = self.choropleth.as_mut() {
            map.click(pos);
        }
        self.dispatch();
    }

    /// Drain queued view events. A failing handler is logged and skipped.
    pub fn dispatch(&mut self) {
        self.dispatch_with(Self::handle);
    }

    fn dispatch_with(&mut self, mut handler: impl FnMut(&mut Self, &ViewEvent)) {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            trace!(event = event.name(), "Dispatching");
            let outcome = catch_unwind(AssertUnwindSafe(|| handler(self, &event)));
            if outcome.is_err() {
                error!(event = event.name(), "Event handler panicked, continuing");
            }
        }
    }

    fn handle(&mut self, event: &ViewEvent) {
        match event {
            ViewEvent::PointEnter { region_id, .. } => {
                if let Some(map) = self.choropleth.as_mut() {
                    map.highlight_by_region(region_id);
                }
            }
            ViewEvent::ValueEnter(value) => {
                self.histogram.highlight_bin_for_value(*value);
            }
            ViewEvent::PointExit => {
                self.histogram.reset_highlight();
                if let Some(map) = self.choropleth.as_mut() {
                    map.reset_highlight();
                }
            }
            ViewEvent::BarEnter(range) => {
                self.scatter.highlight_by_range(*range);
                if let Some(map) = self.choropleth.as_mut() {
                    map.highlight_by_range(*range);
                }
            }
            ViewEvent::BarExit => {
                self.scatter.reset_filter();
                if let Some(map) = self.choropleth.as_mut() {
                    map.reset_highlight();
                }
            }
            ViewEvent::BarClick { range, selected } => {
                if *selected {
                    if !self.locked_ranges.contains(range) {
                        self.locked_ranges.push(*range);
                    }
                } else {
                    self.locked_ranges.retain(|r| r != range);
                }
                debug!(locked = self.locked_ranges.len(), "Locked ranges changed");
                if let Some(map) = self.choropleth.as_mut() {
                    map.apply_multi_range_selection(&self.locked_ranges);
                }
            }
            ViewEvent::RegionEnter { region_id, value } => {
                self.scatter.highlight_by_region(region_id);
                if let Some(v) = value {
                    self.histogram.highlight_bin_for_value(*v);
                }
            }
            ViewEvent::RegionExit => {
                self.scatter.reset_size_by_region(None);
                self.histogram.reset_highlight();
            }
            ViewEvent::RegionClick {
                region_id,
                selected,
            } => {
                if *selected {
                    self.locked_regions.insert(region_id.clone());
                } else {
                    self.locked_regions.remove(region_id);
                }
                debug!(locked = self.locked_regions.len(), "Locked regions changed");
                if let Some(map) = self.choropleth.as_mut() {
                    map.apply_locked_regions(&self.locked_regions);
                }
            }
        }
    }

    /// Detach every view. Later data arrivals and input are ignored.
    pub fn teardown(&mut self) {
        self.scatter.detach();
        self.histogram.detach();
        if let Some(map) = self.choropleth.as_mut() {
            map.detach();
        }
        self.queue.borrow_mut().clear();
        self.torn_down = true;
        info!("Dashboard torn down");
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Rc<Dataset> {
        &self.dataset
    }

    pub fn is_dataset_ready(&self) -> bool {
        self.dataset_ready
    }

    pub fn selection(&self) -> AttributeSelection {
        self.selection
    }

    pub fn registry(&self) -> &ScaleRegistry {
        &self.registry
    }

    pub fn scatter(&self) -> &Scatterplot {
        &self.scatter
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn choropleth(&self) -> Option<&Choropleth> {
        self.choropleth.as_ref()
    }

    pub fn locked_ranges(&self) -> &[BinRange] {
        &self.locked_ranges
    }

    pub fn locked_regions(&self) -> &BTreeSet<String> {
        &self.locked_regions
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

// ============================================================================
// Callback wiring
// ============================================================================

fn wire_scatter(view: &mut Scatterplot, queue: &EventQueue) {
    let q = queue.clone();
    view.on_point_enter(move |value, region_id| {
        q.borrow_mut().push_back(ViewEvent::PointEnter {
            value,
            region_id: region_id.to_string(),
        });
    });
    let q = queue.clone();
    view.on_value_enter(move |value| q.borrow_mut().push_back(ViewEvent::ValueEnter(value)));
    let q = queue.clone();
    view.on_point_exit(move || q.borrow_mut().push_back(ViewEvent::PointExit));
}

fn wire_histogram(view: &mut Histogram, queue: &EventQueue) {
    let q = queue.clone();
    view.on_bar_enter(move |range| q.borrow_mut().push_back(ViewEvent::BarEnter(range)));
    let q = queue.clone();
    view.on_bar_exit(move || q.borrow_mut().push_back(ViewEvent::BarExit));
    let q = queue.clone();
    view.on_bar_click(move |range, selected| {
        q.borrow_mut()
            .push_back(ViewEvent::BarClick { range, selected });
    });
}

fn wire_choropleth(view: &mut Choropleth, queue: &EventQueue) {
    let q = queue.clone();
    view.on_region_enter(move |region_id, value| {
        q.borrow_mut().push_back(ViewEvent::RegionEnter {
            region_id: region_id.to_string(),
            value,
        });
    });
    let q = queue.clone();
    view.on_region_exit(move || q.borrow_mut().push_back(ViewEvent::RegionExit));
    let q = queue.clone();
    view.on_region_click(move |region_id, selected| {
        q.borrow_mut().push_back(ViewEvent::RegionClick {
            region_id: region_id.to_string(),
            selected,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::HistogramConfig;
    use crate::core::record::Record;
    use crate::core::topology::tests::US_SQUARES;
    use crate::views::histogram::BarMark;

    fn record(id: &str, income: f64, stroke: f64) -> Record {
        Record::with_values(
            id,
            id,
            &[
                (Attribute::MedianHouseholdIncome, income),
                (Attribute::PovertyPerc, income / 5_000.0),
                (Attribute::PercentStroke, stroke),
                (Attribute::PercentSmoking, stroke * 2.0),
            ],
        )
    }

    /// A = 5 and B = 15 sit on the map; two bins split the extent [0, 20] at 10
    fn dashboard(policy: SelectionPolicy) -> Dashboard {
        build(
            policy,
            vec![
                record("01001", 40_000.0, 5.0),
                record("01003", 80_000.0, 15.0),
                record("01005", 60_000.0, 20.0),
                record("01007", 20_000.0, 0.0),
            ],
        )
    }

    fn build(policy: SelectionPolicy, records: Vec<Record>) -> Dashboard {
        let config = DashboardConfig {
            histogram: HistogramConfig {
                num_bins: 2,
                ..HistogramConfig::default()
            },
            selection_policy: policy,
            ..DashboardConfig::default()
        };
        let mut dash = Dashboard::new(config);
        dash.set_topology(&Topology::from_json_str(US_SQUARES).unwrap())
            .unwrap();
        dash.set_dataset(Dataset::from_records(records));
        dash
    }

    fn center(m: &BarMark) -> Pos {
        [m.x + m.width / 2.0, m.y + m.height / 2.0]
    }

    fn map(dash: &Dashboard) -> &Choropleth {
        dash.choropleth().unwrap()
    }

    #[test]
    fn test_bar_hover_highlights_scatter_and_map() {
        let mut dash = dashboard(SelectionPolicy::ClearAll);
        let hl = dash.config().scatter.highlight_color;
        let map_hl = dash.config().choropleth.highlight_color;
        let scatter_a = dash.scatter().mark_for("01001").unwrap().fill;
        let scatter_b = dash.scatter().mark_for("01003").unwrap().fill;
        let map_a = map(&dash).fill_of("01001").unwrap();
        let map_b = map(&dash).fill_of("01003").unwrap();

        let bar = dash.histogram().marks()[1].clone();
        assert_eq!(dash.histogram().binning().bins[1].range(), BinRange::closed(10.0, 20.0));
        dash.histogram_pointer(Some(center(&bar)));

        assert_eq!(dash.scatter().mark_for("01003").unwrap().fill, hl);
        // 01005 holds the maximum, counted by the last bar
        assert_eq!(dash.scatter().mark_for("01005").unwrap().fill, hl);
        assert_eq!(map(&dash).fill_of("01003"), Some(map_hl));
        assert_eq!(dash.scatter().mark_for("01001").unwrap().fill, scatter_a);
        assert_eq!(map(&dash).fill_of("01001"), Some(map_a));

        dash.histogram_pointer(None);
        assert_eq!(dash.scatter().mark_for("01003").unwrap().fill, scatter_b);
        assert_eq!(map(&dash).fill_of("01003"), Some(map_b));
        assert_eq!(dash.scatter().mark_for("01001").unwrap().fill, scatter_a);
        assert_eq!(map(&dash).fill_of("01001"), Some(map_a));
    }

    #[test]
    fn test_point_hover_highlights_bin_and_county() {
        let mut dash = dashboard(SelectionPolicy::ClearAll);
        let hl = dash.config().histogram.highlight_color;
        let normal_bar = dash.histogram().marks()[0].fill;
        let map_a = map(&dash).fill_of("01001").unwrap();

        let p = dash.scatter().mark_for("01001").unwrap().center;
        dash.scatter_pointer(Some(p));
        assert_eq!(dash.histogram().marks()[0].fill, hl);
        assert_eq!(dash.histogram().marks()[1].fill, normal_bar);
        assert_eq!(
            map(&dash).fill_of("01001"),
            Some(dash.config().choropleth.highlight_color)
        );

        dash.scatter_pointer(None);
        assert_eq!(dash.histogram().marks()[0].fill, normal_bar);
        assert_eq!(map(&dash).fill_of("01001"), Some(map_a));
    }

    #[test]
    fn test_region_hover_enlarges_point() {
        let mut dash = dashboard(SelectionPolicy::ClearAll);
        let focus = dash.config().scatter.focus_radius;
        let radius = dash.config().scatter.point_radius;

        let c = map(&dash).center_of("01003").unwrap();
        dash.map_pointer(Some(c));
        assert_eq!(dash.scatter().mark_for("01003").unwrap().radius, focus);
        assert_eq!(
            dash.histogram().marks()[1].fill,
            dash.config().histogram.highlight_color
        );

        dash.map_pointer(None);
        assert_eq!(dash.scatter().mark_for("01003").unwrap().radius, radius);
        assert_ne!(
            dash.histogram().marks()[1].fill,
            dash.config().histogram.highlight_color
        );
    }

    #[test]
    fn test_bar_click_locks_ranges() {
        let mut dash = dashboard(SelectionPolicy::ClearAll);
        let map_a = map(&dash).fill_of("01001").unwrap();
        let map_b = map(&dash).fill_of("01003").unwrap();

        let bar = dash.histogram().marks()[1].clone();
        dash.histogram_click(center(&bar));
        assert_eq!(dash.locked_ranges(), &[BinRange::closed(10.0, 20.0)]);
        assert_eq!(map(&dash).fill_of("01003"), Some(map_b));
        assert_eq!(map(&dash).fill_of("01001"), Some(map_a.dulled()));

        dash.histogram_click(center(&bar));
        assert!(dash.locked_ranges().is_empty());
        assert_eq!(map(&dash).fill_of("01001"), Some(map_a));
    }

    #[test]
    fn test_last_bar_covers_maximum_county() {
        // 01003 on the map holds the maximum of the extent [0, 20]
        let mut dash = build(
            SelectionPolicy::ClearAll,
            vec![
                record("01001", 40_000.0, 5.0),
                record("01003", 80_000.0, 20.0),
                record("01007", 20_000.0, 0.0),
            ],
        );
        let hl = dash.config().scatter.highlight_color;
        let map_hl = dash.config().choropleth.highlight_color;
        let map_a = map(&dash).fill_of("01001").unwrap();
        let map_b = map(&dash).fill_of("01003").unwrap();
        assert_eq!(dash.histogram().binning().bins[1].count, 1);

        let bar = dash.histogram().marks()[1].clone();
        dash.histogram_pointer(Some(center(&bar)));
        assert_eq!(dash.scatter().mark_for("01003").unwrap().fill, hl);
        assert_eq!(map(&dash).fill_of("01003"), Some(map_hl));
        assert_ne!(map(&dash).fill_of("01001"), Some(map_hl));
        dash.histogram_pointer(None);

        dash.histogram_click(center(&bar));
        assert_eq!(map(&dash).fill_of("01003"), Some(map_b));
        assert_eq!(map(&dash).fill_of("01001"), Some(map_a.dulled()));
    }

    #[test]
    fn test_panicking_handler_is_skipped() {
        let mut dash = dashboard(SelectionPolicy::ClearAll);
        let hl = dash.config().scatter.highlight_color;
        let bar_hl = dash.config().histogram.highlight_color;
        {
            let mut q = dash.queue.borrow_mut();
            q.push_back(ViewEvent::BarEnter(BinRange::new(0.0, 10.0)));
            q.push_back(ViewEvent::BarEnter(BinRange::closed(10.0, 20.0)));
        }

        let mut first = true;
        dash.dispatch_with(|d, event| {
            if std::mem::take(&mut first) {
                panic!("handler failure");
            }
            d.handle(event);
        });

        // the first event was dropped, the second still ran
        assert!(dash.queue.borrow().is_empty());
        assert_ne!(dash.scatter().mark_for("01001").unwrap().fill, hl);
        assert_eq!(dash.scatter().mark_for("01003").unwrap().fill, hl);

        // later input still reaches the views
        let p = dash.scatter().mark_for("01001").unwrap().center;
        dash.scatter_pointer(Some(p));
        assert_eq!(dash.histogram().marks()[0].fill, bar_hl);
    }

    #[test]
    fn test_region_click_locks_counties() {
        let mut dash = dashboard(SelectionPolicy::ClearAll);
        let map_b = map(&dash).fill_of("01003").unwrap();
        let c = map(&dash).center_of("01001").unwrap();

        dash.map_click(c);
        assert!(dash.locked_regions().contains("01001"));
        assert_eq!(map(&dash).fill_of("01003"), Some(map_b.dulled()));

        dash.map_click(c);
        assert!(dash.locked_regions().is_empty());
        assert_eq!(map(&dash).fill_of("01003"), Some(map_b));
    }

    #[test]
    fn test_attribute_switch_clears_selection() {
        let mut dash = dashboard(SelectionPolicy::ClearAll);
        let bar = dash.histogram().marks()[1].clone();
        dash.histogram_click(center(&bar));
        let c = map(&dash).center_of("01001").unwrap();
        dash.map_click(c);

        dash.select_health(Attribute::PercentSmoking);
        assert!(dash.locked_ranges().is_empty());
        assert!(dash.locked_regions().is_empty());
        assert!(dash.histogram().selected_ranges().is_empty());
        assert_eq!(dash.selection().active_attribute(), Attribute::PercentSmoking);
        assert_eq!(map(&dash).color_scale().domain, (0.0, 40.0));
        assert_eq!(
            map(&dash).col_value("01003").and_then(|v| v.value()),
            Some(30.0)
        );
    }

    #[test]
    fn test_keep_locked_regions_policy() {
        let mut dash = dashboard(SelectionPolicy::KeepLockedRegions);
        let c = map(&dash).center_of("01001").unwrap();
        dash.map_click(c);
        let bar = dash.histogram().marks()[1].clone();
        dash.histogram_click(center(&bar));

        dash.select_wealth(Attribute::PovertyPerc);
        assert!(dash.locked_ranges().is_empty());
        assert!(dash.locked_regions().contains("01001"));
        let b = map(&dash).fill_of("01003").unwrap();
        let expected = map(&dash).color_scale().apply(16.0).dulled();
        assert_eq!(b, expected);
    }

    #[test]
    fn test_wrong_kind_is_ignored() {
        let mut dash = dashboard(SelectionPolicy::ClearAll);
        dash.select_health(Attribute::PovertyPerc);
        dash.select_wealth(Attribute::PercentStroke);
        assert_eq!(dash.selection(), AttributeSelection::default());
    }

    #[test]
    fn test_map_waits_for_dataset() {
        let mut dash = Dashboard::new(DashboardConfig::default());
        dash.set_topology(&Topology::from_json_str(US_SQUARES).unwrap())
            .unwrap();
        assert!(map(&dash).fills().is_empty());
        assert!(map(&dash).legend().is_none());

        dash.set_dataset(Dataset::from_records(vec![record("01001", 1.0, 2.0)]));
        assert_eq!(map(&dash).fills().len(), 2);
        assert_eq!(dash.scatter().marks().len(), 1);
    }

    #[test]
    fn test_wealth_active_drives_histogram_and_map() {
        let mut dash = dashboard(SelectionPolicy::ClearAll);
        dash.select_wealth(Attribute::MedianHouseholdIncome);
        assert_eq!(dash.histogram().binning().extent, (20_000.0, 80_000.0));
        assert_eq!(map(&dash).color_scale().domain, (0.0, 80_000.0));
        assert_eq!(
            dash.histogram().title().unwrap().text,
            "Dist. of Median Household Income"
        );
    }

    #[test]
    fn test_teardown_ignores_late_data() {
        let mut dash = dashboard(SelectionPolicy::ClearAll);
        dash.teardown();
        assert!(dash.scatter().is_detached());
        assert!(map(&dash).is_detached());

        dash.set_dataset(Dataset::from_records(vec![record("09001", 1.0, 1.0)]));
        assert_eq!(dash.dataset().len(), 4);
        assert!(dash
            .set_topology(&Topology::from_json_str(US_SQUARES).unwrap())
            .is_ok());
        dash.scatter_pointer(Some([100.0, 100.0]));
        assert!(dash.scatter().marks().is_empty());
    }

    #[test]
    fn test_empty_dataset_renders_empty() {
        let mut dash = Dashboard::new(DashboardConfig::default());
        dash.set_dataset(Dataset::default());
        assert!(dash.scatter().marks().is_empty());
        assert!(dash.histogram().marks().is_empty());
        dash.histogram_pointer(Some([50.0, 50.0]));
        dash.map_pointer(Some([50.0, 50.0]));
    }
}
