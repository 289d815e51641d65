//! County records and the attribute catalogue
//!
//! A `Record` is one county row after normalization. Attribute values are
//! stored in a fixed array indexed by `Attribute`, with `SENTINEL` standing
//! in for "no data".

use serde::{Deserialize, Serialize};

/// Marks a missing or unparseable attribute value. Distinct from zero.
pub const SENTINEL: f64 = -1.0;

/// True when `value` is the no-data marker
#[inline]
pub fn is_sentinel(value: f64) -> bool {
    value == SENTINEL
}

/// Whether an attribute describes economic status or a health outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Wealth,
    Health,
}

/// Numeric columns the dashboard knows how to display
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    MedianHouseholdIncome,
    PovertyPerc,
    PercentHighCholesterol,
    PercentStroke,
    PercentCoronaryHeartDisease,
    PercentHighBloodPressure,
    PercentSmoking,
    PercentInactive,
}

impl Attribute {
    pub const COUNT: usize = 8;

    pub const ALL: [Attribute; Self::COUNT] = [
        Attribute::MedianHouseholdIncome,
        Attribute::PovertyPerc,
        Attribute::PercentHighCholesterol,
        Attribute::PercentStroke,
        Attribute::PercentCoronaryHeartDisease,
        Attribute::PercentHighBloodPressure,
        Attribute::PercentSmoking,
        Attribute::PercentInactive,
    ];

    pub const WEALTH: &'static [Attribute] =
        &[Attribute::MedianHouseholdIncome, Attribute::PovertyPerc];

    pub const HEALTH: &'static [Attribute] = &[
        Attribute::PercentHighCholesterol,
        Attribute::PercentStroke,
        Attribute::PercentCoronaryHeartDisease,
        Attribute::PercentHighBloodPressure,
        Attribute::PercentSmoking,
        Attribute::PercentInactive,
    ];

    /// Position in `Record` value storage
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    /// CSV column name
    pub fn column(self) -> &'static str {
        match self {
            Attribute::MedianHouseholdIncome => "median_household_income",
            Attribute::PovertyPerc => "poverty_perc",
            Attribute::PercentHighCholesterol => "percent_high_cholesterol",
            Attribute::PercentStroke => "percent_stroke",
            Attribute::PercentCoronaryHeartDisease => "percent_coronary_heart_disease",
            Attribute::PercentHighBloodPressure => "percent_high_blood_pressure",
            Attribute::PercentSmoking => "percent_smoking",
            Attribute::PercentInactive => "percent_inactive",
        }
    }

    /// Human readable name for titles, buttons and tooltips
    pub fn label(self) -> &'static str {
        match self {
            Attribute::MedianHouseholdIncome => "Median Household Income",
            Attribute::PovertyPerc => "Poverty",
            Attribute::PercentHighCholesterol => "High Cholesterol",
            Attribute::PercentStroke => "Stroke",
            Attribute::PercentCoronaryHeartDisease => "Coronary Heart Disease",
            Attribute::PercentHighBloodPressure => "High Blood Pressure",
            Attribute::PercentSmoking => "Smoking",
            Attribute::PercentInactive => "Physically Inactive",
        }
    }

    pub fn kind(self) -> AttributeKind {
        match self {
            Attribute::MedianHouseholdIncome | Attribute::PovertyPerc => AttributeKind::Wealth,
            _ => AttributeKind::Health,
        }
    }

    /// Income is shown as dollars, everything else as a percentage
    pub fn is_currency(self) -> bool {
        matches!(self, Attribute::MedianHouseholdIncome)
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.column() == column)
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One county row. Immutable once built by the loader.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    region_id: String,
    display_name: String,
    values: [f64; Attribute::COUNT],
}

impl Record {
    pub fn new(
        region_id: impl Into<String>,
        display_name: impl Into<String>,
        values: [f64; Attribute::COUNT],
    ) -> Self {
        Self {
            region_id: region_id.into(),
            display_name: display_name.into(),
            values,
        }
    }

    /// Build a record with every attribute set to the sentinel, then apply `set`
    pub fn with_values(
        region_id: impl Into<String>,
        display_name: impl Into<String>,
        set: &[(Attribute, f64)],
    ) -> Self {
        let mut values = [SENTINEL; Attribute::COUNT];
        for &(attr, v) in set {
            values[attr.idx()] = v;
        }
        Self::new(region_id, display_name, values)
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[inline]
    pub fn value(&self, attr: Attribute) -> f64 {
        self.values[attr.idx()]
    }

    /// Value for `attr`, or `None` for the sentinel
    #[inline]
    pub fn get(&self, attr: Attribute) -> Option<f64> {
        let v = self.value(attr);
        (!is_sentinel(v)).then_some(v)
    }

    pub fn has_all(&self, attrs: &[Attribute]) -> bool {
        attrs.iter().all(|&a| !is_sentinel(self.value(a)))
    }
}

/// The shared, read-only dataset snapshot handed to every view
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<Record>,
    /// Attribute columns that were present in the source header
    columns: Vec<Attribute>,
}

impl Dataset {
    pub fn new(records: Vec<Record>, columns: Vec<Attribute>) -> Self {
        Self { records, columns }
    }

    /// Dataset where every attribute column counts as present
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::new(records, Attribute::ALL.to_vec())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, attr: Attribute) -> bool {
        self.columns.contains(&attr)
    }

    /// Records with no sentinel in any of `required`
    pub fn with_required<'a>(
        &'a self,
        required: &'a [Attribute],
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| r.has_all(required))
    }

    /// Non-sentinel values of one attribute
    pub fn values(&self, attr: Attribute) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().filter_map(move |r| r.get(attr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_columns_round_trip() {
        for attr in Attribute::ALL {
            assert_eq!(Attribute::from_column(attr.column()), Some(attr));
        }
        assert_eq!(Attribute::from_column("cnty_fips"), None);
    }

    #[test]
    fn test_attribute_kinds_partition() {
        assert_eq!(Attribute::WEALTH.len() + Attribute::HEALTH.len(), Attribute::COUNT);
        assert!(Attribute::WEALTH.iter().all(|a| a.kind() == AttributeKind::Wealth));
        assert!(Attribute::HEALTH.iter().all(|a| a.kind() == AttributeKind::Health));
    }

    #[test]
    fn test_sentinel_is_not_zero() {
        let r = Record::with_values(
            "01001",
            "Autauga County, AL",
            &[(Attribute::PercentStroke, 0.0)],
        );
        assert_eq!(r.get(Attribute::PercentStroke), Some(0.0));
        assert_eq!(r.get(Attribute::PercentSmoking), None);
        assert!(!r.has_all(&[Attribute::PercentStroke, Attribute::PercentSmoking]));
    }

    #[test]
    fn test_dataset_required_filter() {
        let ds = Dataset::from_records(vec![
            Record::with_values("A", "a", &[(Attribute::PercentStroke, 3.0)]),
            Record::with_values(
                "B",
                "b",
                &[(Attribute::PercentStroke, 4.0), (Attribute::PovertyPerc, 12.0)],
            ),
        ]);
        let ids: Vec<&str> = ds
            .with_required(&[Attribute::PercentStroke, Attribute::PovertyPerc])
            .map(|r| r.region_id())
            .collect();
        assert_eq!(ids, vec!["B"]);
        assert_eq!(ds.values(Attribute::PercentStroke).count(), 2);
        assert_eq!(ds.values(Attribute::PovertyPerc).count(), 1);
    }
}
