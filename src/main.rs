//! Headless CLI for the dashboard data pipeline
//!
//! Loads the CSV and topology, builds the linked views and logs what they
//! would show. Run with: cargo run --features cli --bin county-cli
//!
//! Environment:
//! - COUNTY_VIS_CSV: dataset path
//! - COUNTY_VIS_TOPOLOGY: TopoJSON path
//! - COUNTY_VIS_CONFIG: optional JSON config

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use county_vis::core::config::{DEFAULT_CSV_PATH, DEFAULT_TOPOLOGY_PATH};
    use county_vis::core::{parse_dataset, DashboardConfig, Dataset, LoadError, Topology};
    use county_vis::{Dashboard, LoadState};
    use tracing::{error, info};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,county_vis=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::var("COUNTY_VIS_CONFIG") {
        Ok(path) => {
            info!(path = %path, "Loading config");
            DashboardConfig::from_json_str(&tokio::fs::read_to_string(&path).await?)?
        }
        Err(_) => DashboardConfig::default(),
    };
    let csv_path =
        std::env::var("COUNTY_VIS_CSV").unwrap_or_else(|_| DEFAULT_CSV_PATH.to_string());
    let topo_path = std::env::var("COUNTY_VIS_TOPOLOGY")
        .unwrap_or_else(|_| DEFAULT_TOPOLOGY_PATH.to_string());

    info!(csv = %csv_path, topology = %topo_path, "Loading data");
    let (csv_text, topo_text) = tokio::join!(
        tokio::fs::read_to_string(&csv_path),
        tokio::fs::read_to_string(&topo_path)
    );

    let mut dash = Dashboard::new(config);
    let mut state = LoadState::default();

    let parsed = csv_text
        .map_err(LoadError::from)
        .and_then(|text| parse_dataset(&text, &dash.config().loader));
    match parsed {
        Ok(dataset) => {
            dash.set_dataset(dataset);
            state.dataset_loaded();
        }
        Err(e) => {
            error!(error = %e, path = %csv_path, "Dataset unavailable, views stay empty");
            dash.set_dataset(Dataset::default());
            state.fail(e.to_string());
        }
    }

    let topology = topo_text
        .map_err(LoadError::from)
        .and_then(|text| Topology::from_json_str(&text))
        .and_then(|topo| dash.set_topology(&topo));
    match topology {
        Ok(()) => state.topology_loaded(),
        Err(e) => {
            error!(error = %e, path = %topo_path, "Topology unavailable, map not drawn");
            state.fail(e.to_string());
        }
    }

    report::attributes(&dash);
    report::coverage(&dash);
    report::replay_fullest_bin(&mut dash);

    info!(status = %state.label(), "Done");
    dash.teardown();
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
mod report {
    use county_vis::core::{Attribute, Binning};
    use county_vis::views::JoinedValue;
    use county_vis::Dashboard;
    use tracing::{info, warn};

    /// Domain and bin counts for every attribute present in the dataset
    pub fn attributes(dash: &Dashboard) {
        let dataset = dash.dataset();
        let num_bins = dash.config().histogram.num_bins;
        for attr in Attribute::ALL {
            if !dataset.has_column(attr) {
                warn!(attribute = attr.column(), "Column missing from dataset");
                continue;
            }
            let domain = dash.registry().domain(dataset, attr);
            let values: Vec<f64> = dataset.values(attr).collect();
            let binning = Binning::new(values.iter().copied(), num_bins);
            let counts: Vec<usize> = binning.bins.iter().map(|b| b.count).collect();
            info!(
                attribute = attr.column(),
                values = binning.total(),
                domain_max = domain.1,
                bins = ?counts,
                "Attribute"
            );
        }
    }

    /// How many map counties found a record
    pub fn coverage(dash: &Dashboard) {
        let Some(map) = dash.choropleth() else {
            warn!("No map, skipping join coverage");
            return;
        };
        let (mut joined, mut no_data, mut unmatched) = (0usize, 0usize, 0usize);
        for shape in map.shapes() {
            match map.col_value(&shape.id) {
                Some(JoinedValue::Value(_)) => joined += 1,
                Some(JoinedValue::NoData) => no_data += 1,
                None => unmatched += 1,
            }
        }
        info!(
            counties = map.shapes().len(),
            joined,
            no_data,
            unmatched,
            borders = map.borders().len(),
            "Join coverage"
        );
    }

    /// Hover the fullest histogram bar and count what lights up elsewhere
    pub fn replay_fullest_bin(dash: &mut Dashboard) {
        let fullest = dash
            .histogram()
            .binning()
            .bins
            .iter()
            .enumerate()
            .max_by_key(|(_, b)| b.count)
            .map(|(i, b)| (i, b.range()));
        let Some((idx, range)) = fullest else {
            warn!("No bins, nothing to replay");
            return;
        };
        let Some(bar) = dash.histogram().marks().get(idx) else {
            return;
        };
        let center = [bar.x + bar.width / 2.0, bar.y + bar.height / 2.0];

        dash.histogram_pointer(Some(center));
        let scatter_hl = dash.config().scatter.highlight_color;
        let points = dash
            .scatter()
            .marks()
            .iter()
            .filter(|m| m.fill == scatter_hl)
            .count();
        let counties = dash.choropleth().map_or(0, |map| {
            let hl = map.config().highlight_color;
            map.fills().iter().filter(|f| **f == hl).count()
        });
        info!(
            attribute = dash.selection().active_attribute().column(),
            x0 = range.x0,
            x1 = range.x1,
            points,
            counties,
            "Hovered fullest bin"
        );
        dash.histogram_pointer(None);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
