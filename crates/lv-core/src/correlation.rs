//! Pairwise Pearson correlation over a record subset.
//!
//! Pure functions of (records, dimensions); recomputed on demand whenever
//! the active subset changes, never cached across selection changes.

use crate::dataset::Record;

/// One cell of a correlation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationCell {
    pub row: String,
    pub col: String,
    pub value: f64,
}

/// The full ordered dims x dims matrix for a dimension list.
#[derive(Debug, Clone, Default)]
pub struct CorrelationMatrix {
    dimensions: Vec<String>,
    cells: Vec<CorrelationCell>,
}

impl CorrelationMatrix {
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn cells(&self) -> &[CorrelationCell] {
        &self.cells
    }

    pub fn cell(&self, row: &str, col: &str) -> Option<&CorrelationCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    /// Largest absolute value present, used as the symmetric color-scale
    /// domain of the heatmap. 0.0 for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        self.cells.iter().map(|c| c.value.abs()).fold(0.0, f64::max)
    }
}

/// Compute the correlation matrix for a dimension list over a record
/// subset. Diagonal cells are exactly 1 by convention, everything else is
/// the clamped Pearson coefficient over the pairwise-clean values.
pub fn compute_matrix(records: &[&Record], dimensions: &[String]) -> CorrelationMatrix {
    let mut cells = Vec::with_capacity(dimensions.len() * dimensions.len());
    for (i, row) in dimensions.iter().enumerate() {
        for (j, col) in dimensions.iter().enumerate() {
            let value = if i == j {
                1.0
            } else {
                pairwise_pearson(records, row, col)
            };
            cells.push(CorrelationCell {
                row: row.clone(),
                col: col.clone(),
                value,
            });
        }
    }
    CorrelationMatrix {
        dimensions: dimensions.to_vec(),
        cells,
    }
}

/// Pearson coefficient over the records where both dimensions have a
/// finite numeric value. Degenerate inputs (fewer than 2 clean pairs, zero
/// variance on either side) fall back to 0 rather than erroring.
fn pairwise_pearson(records: &[&Record], x_dim: &str, y_dim: &str) -> f64 {
    let pairs: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|r| Some((r.numeric(x_dim)?, r.numeric(y_dim)?)))
        .collect();

    if pairs.len() < 2 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    // Sample standard deviation (n - 1 denominator).
    let std_x = (var_x / (n - 1.0)).sqrt();
    let std_y = (var_y / (n - 1.0)).sqrt();
    if std_x == 0.0 || std_y == 0.0 {
        return 0.0;
    }

    let r = cov / ((n - 1.0) * std_x * std_y);
    if r.is_nan() {
        0.0
    } else {
        r.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DataSet, Record, Value};
    use ahash::AHashMap;

    fn dataset(dimensions: &[&str], rows: &[&[f64]]) -> DataSet {
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut values = AHashMap::new();
                for (dim, &v) in dimensions.iter().zip(row.iter()) {
                    values.insert(dim.to_string(), Value::Number(v));
                }
                Record::new(i, values)
            })
            .collect();
        DataSet::new(records)
    }

    fn dims(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn diagonal_is_exactly_one() {
        let ds = dataset(&["a", "b"], &[&[1.0, 9.0], &[2.0, 4.0], &[3.0, 1.0]]);
        let refs: Vec<&Record> = ds.records().iter().collect();
        let matrix = compute_matrix(&refs, &dims(&["a", "b"]));
        assert_eq!(matrix.cell("a", "a").unwrap().value, 1.0);
        assert_eq!(matrix.cell("b", "b").unwrap().value, 1.0);
    }

    #[test]
    fn perfectly_linear_dimensions_correlate_at_one() {
        let ds = dataset(
            &["area", "price"],
            &[&[500.0, 1000.0], &[600.0, 1200.0], &[700.0, 1400.0]],
        );
        let refs: Vec<&Record> = ds.records().iter().collect();
        let matrix = compute_matrix(&refs, &dims(&["area", "price"]));
        let r = matrix.cell("area", "price").unwrap().value;
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_relationship_correlates_at_minus_one() {
        let ds = dataset(&["a", "b"], &[&[1.0, 3.0], &[2.0, 2.0], &[3.0, 1.0]]);
        let refs: Vec<&Record> = ds.records().iter().collect();
        let matrix = compute_matrix(&refs, &dims(&["a", "b"]));
        let r = matrix.cell("a", "b").unwrap().value;
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn values_stay_within_bounds() {
        let ds = dataset(
            &["a", "b", "c"],
            &[
                &[1.0, 2.0, -3.5],
                &[4.0, -1.0, 2.25],
                &[2.5, 8.0, 0.0],
                &[9.0, 3.0, -7.0],
                &[5.5, 5.5, 1.5],
            ],
        );
        let refs: Vec<&Record> = ds.records().iter().collect();
        let matrix = compute_matrix(&refs, &dims(&["a", "b", "c"]));
        for cell in matrix.cells() {
            assert!(cell.value >= -1.0 && cell.value <= 1.0, "{:?}", cell);
        }
    }

    #[test]
    fn constant_dimension_falls_back_to_zero() {
        // `bedrooms` is constant = 3: zero variance pairs it with every
        // other dimension at 0, while its diagonal stays 1.
        let ds = dataset(
            &["area", "bedrooms"],
            &[&[500.0, 3.0], &[700.0, 3.0], &[900.0, 3.0]],
        );
        let refs: Vec<&Record> = ds.records().iter().collect();
        let matrix = compute_matrix(&refs, &dims(&["area", "bedrooms"]));
        assert_eq!(matrix.cell("area", "bedrooms").unwrap().value, 0.0);
        assert_eq!(matrix.cell("bedrooms", "area").unwrap().value, 0.0);
        assert_eq!(matrix.cell("bedrooms", "bedrooms").unwrap().value, 1.0);
    }

    #[test]
    fn pairs_with_non_finite_values_are_dropped() {
        let mut rows: Vec<Vec<f64>> = vec![
            vec![1.0, 2.0],
            vec![2.0, 4.0],
            vec![3.0, 6.0],
            vec![4.0, f64::NAN],
        ];
        rows.push(vec![f64::INFINITY, 10.0]);
        let refs_rows: Vec<&[f64]> = rows.iter().map(|r| r.as_slice()).collect();
        let ds = dataset(&["a", "b"], &refs_rows);
        let refs: Vec<&Record> = ds.records().iter().collect();
        let matrix = compute_matrix(&refs, &dims(&["a", "b"]));
        // Only the three clean pairs remain, and they are perfectly linear.
        let r = matrix.cell("a", "b").unwrap().value;
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fewer_than_two_clean_pairs_falls_back_to_zero() {
        let ds = dataset(&["a", "b"], &[&[1.0, 2.0]]);
        let refs: Vec<&Record> = ds.records().iter().collect();
        let matrix = compute_matrix(&refs, &dims(&["a", "b"]));
        assert_eq!(matrix.cell("a", "b").unwrap().value, 0.0);

        let empty = compute_matrix(&[], &dims(&["a", "b"]));
        assert_eq!(empty.cell("a", "b").unwrap().value, 0.0);
        assert_eq!(empty.cell("a", "a").unwrap().value, 1.0);
    }

    #[test]
    fn max_abs_tracks_the_displayed_matrix() {
        let ds = dataset(&["a", "b"], &[&[1.0, 3.0], &[2.0, 2.0], &[3.0, 1.0]]);
        let refs: Vec<&Record> = ds.records().iter().collect();
        let matrix = compute_matrix(&refs, &dims(&["a", "b"]));
        assert!((matrix.max_abs() - 1.0).abs() < 1e-12);
        assert_eq!(CorrelationMatrix::default().max_abs(), 0.0);
    }
}
