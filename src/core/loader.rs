//! CSV loader and normalizer
//!
//! Turns the raw county CSV into a `Dataset`. Numeric cells that fail to
//! parse become the sentinel; rows are only dropped when they have no id.

use csv::ReaderBuilder;
use tracing::{debug, error, trace, warn};

use super::config::LoaderConfig;
use super::error::LoadError;
use super::record::{Attribute, Dataset, Record, SENTINEL};

/// Parse a numeric cell. Empty, unparseable and non-finite cells are `SENTINEL`.
pub fn coerce(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => SENTINEL,
    }
}

/// Left-pad all-digit ids to `width`. Other ids pass through trimmed.
pub fn normalize_id(raw: &str, width: usize) -> String {
    let id = raw.trim();
    if !id.is_empty() && id.len() < width && id.bytes().all(|b| b.is_ascii_digit()) {
        format!("{:0>width$}", id, width = width)
    } else {
        id.to_string()
    }
}

/// Parse CSV text into a dataset, surfacing structural problems as errors
pub fn parse_dataset(text: &str, config: &LoaderConfig) -> Result<Dataset, LoadError> {
    if text.trim().is_empty() {
        return Err(LoadError::Empty);
    }

    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = rdr.headers()?.clone();

    let id_idx = headers
        .iter()
        .position(|h| h == config.id_column)
        .ok_or_else(|| LoadError::MissingColumn(config.id_column.clone()))?;
    let name_idx = headers.iter().position(|h| h == config.name_column);
    if name_idx.is_none() {
        warn!(column = %config.name_column, "Name column missing, using ids as names");
    }

    let attr_idx: Vec<(Attribute, usize)> = Attribute::ALL
        .iter()
        .filter_map(|&attr| {
            headers
                .iter()
                .position(|h| h == attr.column())
                .map(|i| (attr, i))
        })
        .collect();
    for attr in Attribute::ALL {
        if !attr_idx.iter().any(|(a, _)| *a == attr) {
            debug!(column = attr.column(), "Attribute column absent");
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (line, row) in rdr.records().enumerate() {
        let row = row?;
        let id = normalize_id(row.get(id_idx).unwrap_or(""), config.id_width);
        if id.is_empty() {
            skipped += 1;
            warn!(line = line + 2, "Skipping row without region id");
            continue;
        }
        let name = name_idx
            .and_then(|i| row.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(id.as_str())
            .to_string();

        let mut values = [SENTINEL; Attribute::COUNT];
        for &(attr, idx) in &attr_idx {
            values[attr.idx()] = row.get(idx).map(coerce).unwrap_or(SENTINEL);
        }
        trace!(id = %id, "Parsed record");
        records.push(Record::new(id, name, values));
    }

    let columns = attr_idx.into_iter().map(|(a, _)| a).collect();
    debug!(records = records.len(), skipped, "Dataset parsed");
    Ok(Dataset::new(records, columns))
}

/// Like `parse_dataset`, but a failure is logged and yields an empty dataset
pub fn load_dataset(text: &str, config: &LoaderConfig) -> Dataset {
    match parse_dataset(text, config) {
        Ok(ds) => ds,
        Err(e) => {
            error!(error = %e, "Failed to load dataset");
            Dataset::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
cnty_fips,display_name,median_household_income,poverty_perc,percent_stroke,percent_smoking
1001,\"Autauga County, AL\",58786,15.2,4.1,19.3
01003,\"Baldwin County, AL\",55962,10.4,-,17.1
,\"Nowhere\",1,2,3,4
06037,\"Los Angeles County, CA\",,14.9,NaN,11.2
";

    #[test]
    fn test_coerce() {
        assert_eq!(coerce("4.5"), 4.5);
        assert_eq!(coerce(" 12 "), 12.0);
        assert_eq!(coerce(""), SENTINEL);
        assert_eq!(coerce("n/a"), SENTINEL);
        assert_eq!(coerce("inf"), SENTINEL);
        assert_eq!(coerce("0"), 0.0);
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("1001", 5), "01001");
        assert_eq!(normalize_id("06037", 5), "06037");
        assert_eq!(normalize_id(" 42 ", 5), "00042");
        assert_eq!(normalize_id("AB1", 5), "AB1");
        assert_eq!(normalize_id("", 5), "");
    }

    #[test]
    fn test_parse_quoted_names_and_sentinels() {
        let ds = parse_dataset(CSV, &LoaderConfig::default()).unwrap();
        assert_eq!(ds.len(), 3);

        let autauga = &ds.records()[0];
        assert_eq!(autauga.region_id(), "01001");
        assert_eq!(autauga.display_name(), "Autauga County, AL");
        assert_eq!(autauga.get(Attribute::MedianHouseholdIncome), Some(58786.0));

        let baldwin = &ds.records()[1];
        assert_eq!(baldwin.get(Attribute::PercentStroke), None);
        assert_eq!(baldwin.get(Attribute::PercentSmoking), Some(17.1));

        let la = &ds.records()[2];
        assert_eq!(la.get(Attribute::MedianHouseholdIncome), None);
        assert_eq!(la.get(Attribute::PercentStroke), None);
        // column absent from the header
        assert_eq!(la.get(Attribute::PercentInactive), None);
    }

    #[test]
    fn test_present_columns_are_recorded() {
        let ds = parse_dataset(CSV, &LoaderConfig::default()).unwrap();
        assert!(ds.has_column(Attribute::PercentStroke));
        assert!(ds.has_column(Attribute::PovertyPerc));
        assert!(!ds.has_column(Attribute::PercentInactive));
    }

    #[test]
    fn test_missing_id_column_is_an_error() {
        let err = parse_dataset("fips,display_name\n1,a\n", &LoaderConfig::default());
        assert!(matches!(err, Err(LoadError::MissingColumn(c)) if c == "cnty_fips"));
        assert!(load_dataset("fips,display_name\n1,a\n", &LoaderConfig::default()).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse_dataset("  \n", &LoaderConfig::default()),
            Err(LoadError::Empty)
        ));
        assert!(load_dataset("", &LoaderConfig::default()).is_empty());
    }

    #[test]
    fn test_custom_columns() {
        let config = LoaderConfig {
            id_column: "fips".to_string(),
            name_column: "county".to_string(),
            ..LoaderConfig::default()
        };
        let ds = parse_dataset("fips,county,percent_stroke\n5,Five,3.5\n", &config).unwrap();
        assert_eq!(ds.records()[0].region_id(), "00005");
        assert_eq!(ds.records()[0].display_name(), "Five");
        assert_eq!(ds.records()[0].get(Attribute::PercentStroke), Some(3.5));
    }

    #[test]
    fn test_missing_name_falls_back_to_id() {
        let ds = parse_dataset("cnty_fips,percent_stroke\n1001,3\n", &LoaderConfig::default())
            .unwrap();
        assert_eq!(ds.records()[0].display_name(), "01001");
    }
}
