//! Comprehensive tests for frames, series and summaries

use pretty_assertions::assert_eq;

use datastudio::frame::{DataFrame, DataType, Series};

fn people() -> DataFrame {
    DataFrame::from_columns([
        ("age", Series::int([34, 29, 41, 29, 52])),
        ("income", Series::float([48_000.0, 52_500.0, 61_250.0, f64::NAN, 75_000.0])),
        (
            "city",
            Series::str(["lyon", "lyon", "paris", "nice", "paris"]),
        ),
        ("active", Series::bool([true, false, true, true, false])),
    ])
    .unwrap()
}

#[test]
fn test_shape_and_dtypes() {
    let frame = people();
    assert_eq!(frame.shape(), (5, 4));
    assert_eq!(frame.column("age").unwrap().dtype(), DataType::Int);
    assert_eq!(frame.column("income").unwrap().dtype(), DataType::Float);
    assert_eq!(frame.column("city").unwrap().dtype(), DataType::Str);
    assert_eq!(frame.column("active").unwrap().dtype(), DataType::Bool);
    assert!(frame.column("salary").is_err());
}

#[test]
fn test_null_counts() {
    let frame = people();
    assert_eq!(frame.column("age").unwrap().null_count(), 0);
    assert_eq!(frame.column("income").unwrap().null_count(), 1);
}

#[test]
fn test_select_preserves_order() {
    let frame = people();
    let narrow = frame.select(&["city", "age"]).unwrap();
    assert_eq!(narrow.column_names(), vec!["city", "age"]);
    assert_eq!(narrow.shape(), (5, 2));
    assert!(frame.select(&["nope"]).is_err());
}

#[test]
fn test_head() {
    let head = people().head(2);
    assert_eq!(head.shape(), (2, 4));
}

#[test]
fn test_dtype_counts() {
    let counts = people().dtype_counts();
    assert_eq!(counts.get(&DataType::Int), Some(&1));
    assert_eq!(counts.get(&DataType::Float), Some(&1));
    assert_eq!(counts.get(&DataType::Str), Some(&1));
    assert_eq!(counts.get(&DataType::Bool), Some(&1));
}

#[test]
fn test_concat_rows() {
    let doubled = people().concat_rows(&people()).unwrap();
    assert_eq!(doubled.shape(), (10, 4));

    let other = DataFrame::from_columns([("age", Series::int([1]))]).unwrap();
    assert!(people().concat_rows(&other).is_err());
}

#[test]
fn test_describe_quantitative() {
    let description = people().describe();
    let quant = &description.quantitative;
    // age and income are numeric, bool columns are numeric too
    let labels = quant.column("column").unwrap();
    assert_eq!(labels.format_cell(0), "age");

    // income: missing value excluded from the count
    let counts = quant.column("count").unwrap();
    assert_eq!(counts.format_cell(0), "5");
    assert_eq!(counts.format_cell(1), "4");

    // age mean = (34+29+41+29+52)/5 = 37
    let means = quant.column("mean").unwrap();
    assert_eq!(means.format_cell(0), "37.0");
}

#[test]
fn test_describe_qualitative() {
    let description = people().describe();
    let qual = &description.qualitative;
    assert_eq!(qual.n_rows(), 1);
    let top = qual.column("top").unwrap();
    // lyon and paris both appear twice; ties break lexicographically
    assert_eq!(top.format_cell(0), "lyon");
    let freq = qual.column("freq").unwrap();
    assert_eq!(freq.format_cell(0), "2");
}

#[test]
fn test_display_contains_headers_and_rule() {
    let rendered = format!("{}", people());
    assert!(rendered.contains("age"));
    assert!(rendered.contains("income"));
    let rendered_empty = format!("{}", DataFrame::new());
    assert!(rendered_empty.contains("empty"));
}

#[test]
fn test_display_elides_long_frames() {
    let long = DataFrame::from_columns([("n", Series::int(0..100i64))]).unwrap();
    let rendered = format!("{long}");
    assert!(rendered.contains("100 rows total"));
}
