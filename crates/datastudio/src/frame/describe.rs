//! Descriptive summaries of frame columns

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{DataFrame, Series};

/// Output of [`describe`]: one summary table for numeric columns and one
/// for string columns. Either may be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Description {
    /// count / mean / std / min / quartiles / max per numeric column
    pub quantitative: DataFrame,
    /// count / unique / top / freq per string column
    pub qualitative: DataFrame,
}

/// Summarize every column of the frame.
///
/// Numeric columns get count, mean, sample standard deviation, min,
/// quartiles and max (missing values excluded). String columns get count,
/// distinct count, the modal value and its frequency.
pub fn describe(frame: &DataFrame) -> Description {
    let mut quant_names = Vec::new();
    let mut count = Vec::new();
    let mut mean = Vec::new();
    let mut std = Vec::new();
    let mut min = Vec::new();
    let mut q25 = Vec::new();
    let mut median = Vec::new();
    let mut q75 = Vec::new();
    let mut max = Vec::new();

    let mut qual_names = Vec::new();
    let mut qual_count = Vec::new();
    let mut qual_unique = Vec::new();
    let mut qual_top = Vec::new();
    let mut qual_freq = Vec::new();

    for (name, series) in frame.iter() {
        if let Some(values) = series.to_f64() {
            quant_names.push(name.to_string());
            count.push(values.len() as i64);
            if values.is_empty() {
                for slot in [&mut mean, &mut std, &mut min, &mut q25, &mut median, &mut q75, &mut max]
                {
                    slot.push(f64::NAN);
                }
                continue;
            }
            let m = values.iter().sum::<f64>() / values.len() as f64;
            mean.push(m);
            std.push(sample_std(&values, m));
            let mut sorted = values.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            min.push(sorted[0]);
            q25.push(percentile(&sorted, 0.25));
            median.push(percentile(&sorted, 0.50));
            q75.push(percentile(&sorted, 0.75));
            max.push(sorted[sorted.len() - 1]);
        } else if let Series::Str(values) = series {
            qual_names.push(name.to_string());
            let present: Vec<&String> = values.iter().flatten().collect();
            qual_count.push(present.len() as i64);
            let mut freqs: HashMap<&str, i64> = HashMap::new();
            for v in &present {
                *freqs.entry(v.as_str()).or_insert(0) += 1;
            }
            qual_unique.push(freqs.len() as i64);
            // Deterministic tie-break: highest frequency, then lexicographic.
            let top = freqs
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
                .map(|(k, _)| k.to_string())
                .unwrap_or_default();
            qual_freq.push(freqs.get(top.as_str()).copied().unwrap_or(0));
            qual_top.push(top);
        }
    }

    let quantitative = DataFrame::from_columns([
        ("column", Series::str(quant_names)),
        ("count", Series::int(count)),
        ("mean", Series::Float(mean)),
        ("std", Series::Float(std)),
        ("min", Series::Float(min)),
        ("25%", Series::Float(q25)),
        ("50%", Series::Float(median)),
        ("75%", Series::Float(q75)),
        ("max", Series::Float(max)),
    ])
    .unwrap_or_default();
    let qualitative = DataFrame::from_columns([
        ("column", Series::str(qual_names)),
        ("count", Series::int(qual_count)),
        ("unique", Series::int(qual_unique)),
        ("top", Series::str(qual_top)),
        ("freq", Series::int(qual_freq)),
    ])
    .unwrap_or_default();

    Description {
        quantitative,
        qualitative,
    }
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let ss: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Linear-interpolation percentile over an already-sorted slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = q * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{DataFrame, Series};

    #[test]
    fn test_quantitative_summary() {
        let frame = DataFrame::from_columns([(
            "x",
            Series::float([1.0, 2.0, 3.0, 4.0]),
        )])
        .unwrap();
        let summary = frame.describe();
        assert_eq!(summary.quantitative.n_rows(), 1);
        let mean = summary.quantitative.column("mean").unwrap().to_f64().unwrap();
        assert!((mean[0] - 2.5).abs() < 1e-12);
        let med = summary.quantitative.column("50%").unwrap().to_f64().unwrap();
        assert!((med[0] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_qualitative_summary() {
        let frame =
            DataFrame::from_columns([("k", Series::str(["a", "b", "a"]))]).unwrap();
        let summary = frame.describe();
        assert_eq!(summary.qualitative.n_rows(), 1);
        assert_eq!(summary.qualitative.column("top").unwrap().format_cell(0), "a");
        assert_eq!(summary.qualitative.column("freq").unwrap().format_cell(0), "2");
    }
}
