//! Column-oriented tabular data
//!
//! [`DataFrame`] is the in-memory table every dataset wraps: an ordered set
//! of equal-length [`Series`] columns. It deliberately stays small - enough
//! table algebra for data understanding work (selection, heads,
//! concatenation, summaries) without trying to be a query engine.

mod describe;
mod display;
mod series;

pub use describe::{describe, Description};
pub use series::{DataType, Series};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FrameError;

/// An ordered collection of equal-length named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    columns: IndexMap<String, Series>,
}

impl DataFrame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from `(name, series)` pairs.
    pub fn from_columns<S: Into<String>>(
        pairs: impl IntoIterator<Item = (S, Series)>,
    ) -> Result<Self, FrameError> {
        let mut frame = DataFrame::new();
        for (name, series) in pairs {
            frame.insert_column(name, series)?;
        }
        Ok(frame)
    }

    /// Insert a column at the end of the frame.
    ///
    /// Fails when the name already exists or the length differs from the
    /// frame's row count (unless the frame is still empty).
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        series: Series,
    ) -> Result<(), FrameError> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(FrameError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && series.len() != self.n_rows() {
            return Err(FrameError::LengthMismatch {
                name,
                expected: self.n_rows(),
                got: series.len(),
            });
        }
        self.columns.insert(name, series);
        Ok(())
    }

    /// Borrow a column by name.
    pub fn column(&self, name: &str) -> Result<&Series, FrameError> {
        self.columns
            .get(name)
            .ok_or_else(|| FrameError::UnknownColumn(name.to_string()))
    }

    /// Remove and return a column.
    pub fn remove_column(&mut self, name: &str) -> Result<Series, FrameError> {
        self.columns
            .shift_remove(name)
            .ok_or_else(|| FrameError::UnknownColumn(name.to_string()))
    }

    /// Column names in frame order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Iterate `(name, series)` pairs in frame order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.columns.values().next().map_or(0, Series::len)
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    /// True when the frame holds no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// A new frame containing only the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<DataFrame, FrameError> {
        let mut out = DataFrame::new();
        for &name in names {
            let series = self.column(name)?;
            out.insert_column(name, series.clone())?;
        }
        Ok(out)
    }

    /// The first `n` rows as a new frame.
    pub fn head(&self, n: usize) -> DataFrame {
        let columns = self
            .columns
            .iter()
            .map(|(name, series)| (name.clone(), series.head(n)))
            .collect();
        DataFrame { columns }
    }

    /// Row-concatenate `other` onto a copy of this frame.
    ///
    /// Column names, order and dtypes must match exactly.
    pub fn concat_rows(&self, other: &DataFrame) -> Result<DataFrame, FrameError> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if self.column_names() != other.column_names() {
            return Err(FrameError::SchemaMismatch(format!(
                "columns {:?} vs {:?}",
                self.column_names(),
                other.column_names()
            )));
        }
        let mut merged = self.clone();
        for (name, series) in merged.columns.iter_mut() {
            let incoming = &other.columns[name.as_str()];
            if !series.extend_from(incoming) {
                return Err(FrameError::SchemaMismatch(format!(
                    "column {name} is {} on one side and {} on the other",
                    series.dtype(),
                    incoming.dtype()
                )));
            }
        }
        Ok(merged)
    }

    /// Count columns by element type.
    pub fn dtype_counts(&self) -> IndexMap<DataType, usize> {
        let mut counts: IndexMap<DataType, usize> = IndexMap::new();
        for series in self.columns.values() {
            *counts.entry(series.dtype()).or_insert(0) += 1;
        }
        counts
    }

    /// Quantitative and qualitative column summaries.
    pub fn describe(&self) -> Description {
        describe(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        DataFrame::from_columns([
            ("score", Series::float([1.0, 2.0, 3.0])),
            ("label", Series::str(["a", "b", "c"])),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape() {
        assert_eq!(sample().shape(), (3, 2));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut frame = sample();
        let err = frame.insert_column("score", Series::int([1, 2, 3]));
        assert!(matches!(err, Err(FrameError::DuplicateColumn(_))));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut frame = sample();
        let err = frame.insert_column("extra", Series::int([1]));
        assert!(matches!(err, Err(FrameError::LengthMismatch { .. })));
    }

    #[test]
    fn test_select_preserves_order() {
        let selected = sample().select(&["label", "score"]).unwrap();
        assert_eq!(selected.column_names(), vec!["label", "score"]);
    }

    #[test]
    fn test_concat_rows() {
        let merged = sample().concat_rows(&sample()).unwrap();
        assert_eq!(merged.shape(), (6, 2));
    }

    #[test]
    fn test_concat_schema_mismatch() {
        let other = DataFrame::from_columns([("score", Series::float([1.0]))]).unwrap();
        assert!(sample().concat_rows(&other).is_err());
    }
}
