//! Platform-agnostic core - shared between the WASM dashboard and the CLI

pub mod bins;
pub mod color;
pub mod config;
pub mod error;
pub mod loader;
pub mod projection;
pub mod record;
pub mod scale;
pub mod topology;

pub use bins::{Bin, BinRange, Binning};
pub use color::Rgb;
pub use config::{
    ChoroplethConfig, DashboardConfig, HistogramConfig, LoaderConfig, ScatterConfig,
    SelectionPolicy,
};
pub use error::LoadError;
pub use loader::{load_dataset, parse_dataset};
pub use projection::AlbersUsa;
pub use record::{Attribute, AttributeKind, Dataset, Record, SENTINEL};
pub use scale::{ColorMode, ColorScale, LinearScale, ScaleRegistry};
pub use topology::{GeoFeature, Topology};
