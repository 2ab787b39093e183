//! In-memory dataset model: indexed records over named dimensions.

use ahash::AHashMap;

use crate::selection::SelectionSet;

/// A single cell value. Numeric when the source cell parses as a number,
/// raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Numeric view of the value. Non-finite numbers are treated as absent
    /// rather than substituted.
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Value::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }
}

/// One dataset row. Identity for selection membership is the `index`,
/// assigned once at load time and never reused or reassigned.
#[derive(Debug, Clone)]
pub struct Record {
    index: usize,
    values: AHashMap<String, Value>,
}

impl Record {
    pub fn new(index: usize, values: AHashMap<String, Value>) -> Self {
        Self { index, values }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, dimension: &str) -> Option<&Value> {
        self.values.get(dimension)
    }

    /// Finite numeric value for a dimension, if the record has one.
    pub fn numeric(&self, dimension: &str) -> Option<f64> {
        self.values.get(dimension).and_then(Value::as_finite)
    }
}

/// The loaded record collection. Immutable for the session; record indices
/// are sequential 0..N-1 in source order.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    records: Vec<Record>,
}

impl DataSet {
    pub fn new(records: Vec<Record>) -> Self {
        debug_assert!(records.iter().enumerate().all(|(i, r)| r.index() == i));
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Resolve a selection into record references, in selection order.
    /// Indices outside the dataset are skipped.
    pub fn select(&self, selection: &SelectionSet) -> Vec<&Record> {
        selection
            .indices()
            .iter()
            .filter_map(|&i| self.records.get(i))
            .collect()
    }

    /// Min/max over the finite values of a dimension. `None` when the
    /// dimension has no finite values at all.
    pub fn numeric_extent(&self, dimension: &str) -> Option<(f64, f64)> {
        let mut extent: Option<(f64, f64)> = None;
        for record in &self.records {
            if let Some(v) = record.numeric(dimension) {
                extent = Some(match extent {
                    Some((min, max)) => (min.min(v), max.max(v)),
                    None => (v, v),
                });
            }
        }
        extent
    }

    /// Quantile threshold over the finite values of a dimension: ascending
    /// sort, element at `floor(q * count)`. Used with q = 0.75 by the
    /// heatmap's top-quartile click heuristic.
    pub fn percentile_threshold(&self, dimension: &str, q: f64) -> Option<f64> {
        let mut values: Vec<f64> = self
            .records
            .iter()
            .filter_map(|r| r.numeric(dimension))
            .collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((values.len() as f64 * q).floor() as usize).min(values.len() - 1);
        Some(values[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, pairs: &[(&str, Value)]) -> Record {
        let values = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Record::new(index, values)
    }

    fn numeric_dataset(dimension: &str, values: &[f64]) -> DataSet {
        DataSet::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| record(i, &[(dimension, Value::Number(v))]))
                .collect(),
        )
    }

    #[test]
    fn numeric_skips_text_and_non_finite() {
        let r = record(
            0,
            &[
                ("area", Value::Number(500.0)),
                ("label", Value::Text("yes".into())),
                ("bad", Value::Number(f64::NAN)),
                ("inf", Value::Number(f64::INFINITY)),
            ],
        );
        assert_eq!(r.numeric("area"), Some(500.0));
        assert_eq!(r.numeric("label"), None);
        assert_eq!(r.numeric("bad"), None);
        assert_eq!(r.numeric("inf"), None);
        assert_eq!(r.numeric("missing"), None);
    }

    #[test]
    fn extent_over_finite_values() {
        let ds = numeric_dataset("area", &[500.0, 1000.0, 700.0]);
        assert_eq!(ds.numeric_extent("area"), Some((500.0, 1000.0)));
        assert_eq!(ds.numeric_extent("price"), None);
    }

    #[test]
    fn percentile_uses_floor_index() {
        // 20 values 1..=20: floor(20 * 0.75) = 15, sorted[15] = 16.
        let values: Vec<f64> = (1..=20).map(|v| v as f64).collect();
        let ds = numeric_dataset("x", &values);
        assert_eq!(ds.percentile_threshold("x", 0.75), Some(16.0));
    }

    #[test]
    fn percentile_of_missing_dimension_is_none() {
        let ds = numeric_dataset("x", &[1.0, 2.0]);
        assert_eq!(ds.percentile_threshold("y", 0.75), None);
        assert_eq!(DataSet::default().percentile_threshold("x", 0.75), None);
    }

    #[test]
    fn select_resolves_in_selection_order() {
        let ds = numeric_dataset("x", &[10.0, 11.0, 12.0]);
        let selected = ds.select(&SelectionSet::new(vec![2, 0]));
        let indices: Vec<usize> = selected.iter().map(|r| r.index()).collect();
        assert_eq!(indices, vec![2, 0]);
    }
}
