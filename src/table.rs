//! Named-column tabular data: CSV loading, feature/label projection, and the
//! synthetic dataset generator.
use crate::error::{Error, Result};
use crate::layers::Matrix;
use csv::{ReaderBuilder, WriterBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// An ordered sequence of fixed-width numeric records with named columns.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Build a table from a header and rows. Every row must be exactly as
    /// wide as the header; a ragged row is a schema error, reported by the
    /// name of the first column it lacks.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(row) = rows.iter().find(|r| r.len() != columns.len()) {
            return Err(Error::schema(
                columns.get(row.len()).map(String::as_str).unwrap_or("?"),
            ));
        }
        Ok(Self { columns, rows })
    }

    /// Load a headered CSV where every cell is numeric.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let mut row = Vec::with_capacity(columns.len());
            for (i, field) in record.iter().enumerate() {
                let value: f64 = field.trim().parse().map_err(|_| {
                    Error::schema(columns.get(i).map(String::as_str).unwrap_or("?"))
                })?;
                row.push(value);
            }
            rows.push(row);
        }
        Ok(Self { columns, rows })
    }

    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_path(path)?;
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(|v| v.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::schema(name))
    }

    /// Project named feature columns and a label column into
    /// `(features: [n][f], labels: [n])`. Pure; the table is unchanged.
    pub fn project(&self, feature_names: &[&str], label_name: &str) -> Result<(Matrix, Vec<f64>)> {
        let feature_idx: Vec<usize> = feature_names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<_>>()?;
        let label_idx = self.column_index(label_name)?;
        let features = self
            .rows
            .iter()
            .map(|row| feature_idx.iter().map(|&i| row[i]).collect())
            .collect();
        let labels = self.rows.iter().map(|row| row[label_idx]).collect();
        Ok((features, labels))
    }

    /// New table holding the given rows, in the given order.
    pub(crate) fn take(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

/// Generate the synthetic dataset: three uniform [0,1) features and a binary
/// label `0.2·x1 + 0.5·x2 + 0.3·x3 > 0.7`.
pub fn generate_synthetic(n_samples: usize, seed: u64) -> Table {
    let mut rng = StdRng::seed_from_u64(seed);
    let columns = ["x1", "x2", "x3", "labels"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows = (0..n_samples)
        .map(|_| {
            let x1: f64 = rng.gen();
            let x2: f64 = rng.gen();
            let x3: f64 = rng.gen();
            let label = (x1 * 0.2 + x2 * 0.5 + x3 * 0.3 > 0.7) as u8 as f64;
            vec![x1, x2, x3, label]
        })
        .collect();
    Table { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor_table() -> Table {
        Table::new(
            vec!["smoke".into(), "flame".into(), "gas".into(), "label".into()],
            vec![
                vec![0.1, 0.2, 0.3, 0.0],
                vec![0.9, 0.8, 0.7, 1.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn project_extracts_features_and_labels() {
        let table = sensor_table();
        let (features, labels) = table.project(&["smoke", "flame", "gas"], "label").unwrap();
        assert_eq!(features, vec![vec![0.1, 0.2, 0.3], vec![0.9, 0.8, 0.7]]);
        assert_eq!(labels, vec![0.0, 1.0]);
    }

    #[test]
    fn project_missing_column_is_a_schema_error() {
        let table = Table::new(
            vec!["smoke".into(), "gas".into(), "label".into()],
            vec![vec![0.1, 0.3, 0.0]],
        )
        .unwrap();
        let err = table.project(&["smoke", "flame", "gas"], "label").unwrap_err();
        match err {
            Error::Schema { column } => assert_eq!(column, "flame"),
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn ragged_row_is_a_schema_error() {
        let err = Table::new(
            vec!["smoke".into(), "flame".into(), "gas".into(), "label".into()],
            vec![vec![0.1, 0.2, 0.3, 0.0], vec![0.9, 0.8]],
        )
        .unwrap_err();
        match err {
            Error::Schema { column } => assert_eq!(column, "gas"),
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn synthetic_generation_is_seed_deterministic() {
        let a = generate_synthetic(50, 7);
        let b = generate_synthetic(50, 7);
        let (fa, la) = a.project(&["x1", "x2", "x3"], "labels").unwrap();
        let (fb, lb) = b.project(&["x1", "x2", "x3"], "labels").unwrap();
        assert_eq!(fa, fb);
        assert_eq!(la, lb);
    }

    #[test]
    fn synthetic_labels_follow_the_rule() {
        let table = generate_synthetic(200, 42);
        let (features, labels) = table.project(&["x1", "x2", "x3"], "labels").unwrap();
        for (x, &y) in features.iter().zip(&labels) {
            let expected = (x[0] * 0.2 + x[1] * 0.5 + x[2] * 0.3 > 0.7) as u8 as f64;
            assert_eq!(y, expected);
        }
    }

    #[test]
    fn csv_round_trip_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let table = generate_synthetic(20, 3);
        table.to_csv(&path).unwrap();
        let reloaded = Table::from_csv(&path).unwrap();
        assert_eq!(reloaded.columns(), table.columns());
        assert_eq!(reloaded.len(), table.len());
        let (orig, _) = table.project(&["x1", "x2", "x3"], "labels").unwrap();
        let (back, _) = reloaded.project(&["x1", "x2", "x3"], "labels").unwrap();
        assert_eq!(orig, back);
    }
}
