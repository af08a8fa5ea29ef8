//! Typed column storage

use serde::{Deserialize, Serialize};

/// The element type of a [`Series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit float; missing values are NaN
    Float,
    /// 64-bit signed integer
    Int,
    /// Boolean
    Bool,
    /// UTF-8 string
    Str,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataType::Float => "float",
            DataType::Int => "int",
            DataType::Bool => "bool",
            DataType::Str => "str",
        };
        f.write_str(name)
    }
}

/// A single column of homogeneous values.
///
/// Floats carry missing values as `NaN`; the other variants use `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Series {
    /// Floating point column
    Float(Vec<f64>),
    /// Integer column
    Int(Vec<Option<i64>>),
    /// Boolean column
    Bool(Vec<Option<bool>>),
    /// String column
    Str(Vec<Option<String>>),
}

impl Series {
    /// Build a float series.
    pub fn float(values: impl IntoIterator<Item = f64>) -> Self {
        Series::Float(values.into_iter().collect())
    }

    /// Build an integer series with no missing values.
    pub fn int(values: impl IntoIterator<Item = i64>) -> Self {
        Series::Int(values.into_iter().map(Some).collect())
    }

    /// Build a boolean series with no missing values.
    pub fn bool(values: impl IntoIterator<Item = bool>) -> Self {
        Series::Bool(values.into_iter().map(Some).collect())
    }

    /// Build a string series with no missing values.
    pub fn str<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Series::Str(values.into_iter().map(|s| Some(s.into())).collect())
    }

    /// Number of elements, including missing ones.
    pub fn len(&self) -> usize {
        match self {
            Series::Float(v) => v.len(),
            Series::Int(v) => v.len(),
            Series::Bool(v) => v.len(),
            Series::Str(v) => v.len(),
        }
    }

    /// True when the series holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element type.
    pub fn dtype(&self) -> DataType {
        match self {
            Series::Float(_) => DataType::Float,
            Series::Int(_) => DataType::Int,
            Series::Bool(_) => DataType::Bool,
            Series::Str(_) => DataType::Str,
        }
    }

    /// Count of missing elements.
    pub fn null_count(&self) -> usize {
        match self {
            Series::Float(v) => v.iter().filter(|x| x.is_nan()).count(),
            Series::Int(v) => v.iter().filter(|x| x.is_none()).count(),
            Series::Bool(v) => v.iter().filter(|x| x.is_none()).count(),
            Series::Str(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// True for float and int series.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Series::Float(_) | Series::Int(_))
    }

    /// Present numeric values as `f64`, missing values dropped.
    ///
    /// Returns `None` for non-numeric series.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            Series::Float(v) => Some(v.iter().copied().filter(|x| !x.is_nan()).collect()),
            Series::Int(v) => Some(v.iter().flatten().map(|&x| x as f64).collect()),
            _ => None,
        }
    }

    /// Format the element at `idx` for table display; missing renders empty.
    pub fn format_cell(&self, idx: usize) -> String {
        match self {
            Series::Float(v) => match v.get(idx) {
                Some(x) if !x.is_nan() => format_float(*x),
                _ => String::new(),
            },
            Series::Int(v) => match v.get(idx) {
                Some(Some(x)) => x.to_string(),
                _ => String::new(),
            },
            Series::Bool(v) => match v.get(idx) {
                Some(Some(x)) => x.to_string(),
                _ => String::new(),
            },
            Series::Str(v) => match v.get(idx) {
                Some(Some(x)) => x.clone(),
                _ => String::new(),
            },
        }
    }

    /// Append all elements of `other` to this series.
    ///
    /// Callers guarantee matching dtypes; a mismatch is reported as `false`
    /// so the frame layer can raise a schema error with context.
    pub(crate) fn extend_from(&mut self, other: &Series) -> bool {
        match (self, other) {
            (Series::Float(a), Series::Float(b)) => {
                a.extend_from_slice(b);
                true
            }
            (Series::Int(a), Series::Int(b)) => {
                a.extend_from_slice(b);
                true
            }
            (Series::Bool(a), Series::Bool(b)) => {
                a.extend_from_slice(b);
                true
            }
            (Series::Str(a), Series::Str(b)) => {
                a.extend(b.iter().cloned());
                true
            }
            _ => false,
        }
    }

    /// First `n` elements as a new series.
    pub fn head(&self, n: usize) -> Series {
        match self {
            Series::Float(v) => Series::Float(v.iter().copied().take(n).collect()),
            Series::Int(v) => Series::Int(v.iter().copied().take(n).collect()),
            Series::Bool(v) => Series::Bool(v.iter().copied().take(n).collect()),
            Series::Str(v) => Series::Str(v.iter().cloned().take(n).collect()),
        }
    }
}

/// Trim trailing zeros the way a report table expects.
fn format_float(x: f64) -> String {
    if x == x.trunc() && x.abs() < 1e15 {
        format!("{x:.1}")
    } else {
        let s = format!("{x:.6}");
        let trimmed = s.trim_end_matches('0');
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_and_len() {
        let s = Series::int([1, 2, 3]);
        assert_eq!(s.dtype(), DataType::Int);
        assert_eq!(s.len(), 3);
        assert!(s.is_numeric());
    }

    #[test]
    fn test_null_count() {
        let s = Series::Float(vec![1.0, f64::NAN, 2.0]);
        assert_eq!(s.null_count(), 1);
        assert_eq!(s.to_f64().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_format_cell() {
        let s = Series::str(["a", "b"]);
        assert_eq!(s.format_cell(1), "b");
        assert_eq!(s.format_cell(9), "");
    }
}
