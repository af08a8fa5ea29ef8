//! CSV reading and writing
//!
//! A small RFC-4180-style codec: quoted fields may contain commas, doubled
//! quotes and embedded newlines. On read, column types are inferred from
//! the data (int, then float, then bool, then string); empty cells are
//! missing values.

use std::io::{Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{DataStudioError, FrameError, Result};
use crate::frame::{DataFrame, Series};

/// Read a CSV file (optionally gzip-compressed) into a frame.
pub fn read_csv(path: &Path, gzip: bool) -> Result<DataFrame> {
    let file = std::fs::File::open(path).map_err(|e| DataStudioError::io(path, e))?;
    let mut raw = String::new();
    if gzip {
        GzDecoder::new(file)
            .read_to_string(&mut raw)
            .map_err(|e| DataStudioError::io(path, e))?;
    } else {
        let mut file = file;
        file.read_to_string(&mut raw)
            .map_err(|e| DataStudioError::io(path, e))?;
    }
    parse(&raw).map_err(DataStudioError::Frame)
}

/// Write a frame as CSV (optionally gzip-compressed).
pub fn write_csv(path: &Path, frame: &DataFrame, gzip: bool) -> Result<()> {
    let body = render(frame);
    let file = std::fs::File::create(path).map_err(|e| DataStudioError::io(path, e))?;
    if gzip {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(body.as_bytes())
            .and_then(|_| encoder.finish().map(|_| ()))
            .map_err(|e| DataStudioError::io(path, e))?;
    } else {
        let mut file = file;
        file.write_all(body.as_bytes())
            .map_err(|e| DataStudioError::io(path, e))?;
    }
    Ok(())
}

/// Parse CSV text into a frame. The first record is the header.
pub fn parse(input: &str) -> std::result::Result<DataFrame, FrameError> {
    let records = split_records(input);
    let mut records = records.into_iter();
    let header = match records.next() {
        Some(h) => h,
        None => return Ok(DataFrame::new()),
    };
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); header.len()];
    // Short rows pad out with missing cells; extra fields are an error.
    for (row, record) in records.enumerate() {
        if record.len() > header.len() {
            return Err(FrameError::RaggedRow {
                row,
                expected: header.len(),
                got: record.len(),
            });
        }
        for (idx, slot) in columns.iter_mut().enumerate() {
            slot.push(record.get(idx).cloned().unwrap_or_default());
        }
    }
    let mut frame = DataFrame::new();
    for (name, cells) in header.into_iter().zip(columns) {
        frame.insert_column(name, infer_series(&cells))?;
    }
    Ok(frame)
}

/// Render a frame as CSV text with a header row.
pub fn render(frame: &DataFrame) -> String {
    let mut out = String::new();
    for (idx, name) in frame.column_names().iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(&quote(name));
    }
    out.push('\n');
    for row in 0..frame.n_rows() {
        for (idx, (_, series)) in frame.iter().enumerate() {
            if idx > 0 {
                out.push(',');
            }
            out.push_str(&quote(&series.format_cell(row)));
        }
        out.push('\n');
    }
    out
}

/// Split raw CSV text into records of fields, honoring quoting.
fn split_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();
    let mut saw_any = false;

    while let Some(c) = chars.next() {
        saw_any = true;
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => record.push(std::mem::take(&mut field)),
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                _ => field.push(c),
            }
        }
    }
    if saw_any && (!field.is_empty() || !record.is_empty()) {
        record.push(field);
        records.push(record);
    }
    // A trailing blank line produces a single empty field; drop it.
    records.retain(|r| !(r.len() == 1 && r[0].is_empty()));
    records
}

/// Quote a field when it contains a delimiter, quote or newline.
fn quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Infer the narrowest series type that holds every non-empty cell.
fn infer_series(cells: &[String]) -> Series {
    let present: Vec<&str> = cells
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();

    if !present.is_empty() && present.iter().all(|c| c.parse::<i64>().is_ok()) {
        return Series::Int(
            cells
                .iter()
                .map(|c| c.trim().parse::<i64>().ok())
                .collect(),
        );
    }
    if !present.is_empty() && present.iter().all(|c| c.parse::<f64>().is_ok()) {
        return Series::Float(
            cells
                .iter()
                .map(|c| c.trim().parse::<f64>().unwrap_or(f64::NAN))
                .collect(),
        );
    }
    if !present.is_empty()
        && present
            .iter()
            .all(|c| matches!(c.to_ascii_lowercase().as_str(), "true" | "false"))
    {
        return Series::Bool(
            cells
                .iter()
                .map(|c| match c.trim().to_ascii_lowercase().as_str() {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                })
                .collect(),
        );
    }
    Series::Str(
        cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    None
                } else {
                    Some(c.clone())
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::DataType;

    #[test]
    fn test_parse_types() {
        let frame = parse("id,price,ok,city\n1,9.5,true,nyc\n2,8.25,false,sf\n").unwrap();
        assert_eq!(frame.column("id").unwrap().dtype(), DataType::Int);
        assert_eq!(frame.column("price").unwrap().dtype(), DataType::Float);
        assert_eq!(frame.column("ok").unwrap().dtype(), DataType::Bool);
        assert_eq!(frame.column("city").unwrap().dtype(), DataType::Str);
        assert_eq!(frame.shape(), (2, 4));
    }

    #[test]
    fn test_parse_missing_cells() {
        let frame = parse("a,b\n1,\n,2\n").unwrap();
        assert_eq!(frame.column("a").unwrap().null_count(), 1);
        assert_eq!(frame.column("b").unwrap().null_count(), 1);
    }

    #[test]
    fn test_parse_rejects_extra_fields() {
        let err = parse("a,b\n1,2\n3,4,5\n").unwrap_err();
        assert!(matches!(
            err,
            FrameError::RaggedRow {
                row: 1,
                expected: 2,
                got: 3
            }
        ));
        // a short row is padding, not an error
        assert!(parse("a,b\n1\n").is_ok());
    }

    #[test]
    fn test_quoted_fields() {
        let frame = parse("name,note\nx,\"a, \"\"quoted\"\" field\nwith newline\"\n").unwrap();
        assert_eq!(
            frame.column("note").unwrap().format_cell(0),
            "a, \"quoted\" field\nwith newline"
        );
    }

    #[test]
    fn test_round_trip_quoting() {
        let frame = parse("k,v\n\"a,b\",1\n").unwrap();
        let rendered = render(&frame);
        let reparsed = parse(&rendered).unwrap();
        assert_eq!(frame, reparsed);
    }

    #[test]
    fn test_crlf() {
        let frame = parse("a,b\r\n1,2\r\n").unwrap();
        assert_eq!(frame.shape(), (1, 2));
    }
}
