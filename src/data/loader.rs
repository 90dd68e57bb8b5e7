use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset};
use crate::config::LoadOptions;
use crate::error::LoadError;

/// Tokens read as missing, matching the usual Pandas `na_values` set.
const NA_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A",
    "<NA>",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – delimited text with a header row (comma by default)
/// * `.tsv`          – tab-delimited text with a header row
/// * `.json`         – `[{ "age": 39, "gender": "Male", ... }, ...]`
/// * `.parquet`      – flat columns of strings, numbers or booleans
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" | "txt" => {
            let bytes = read_bytes(path)?;
            let delimiter = options.delimiter.map(|d| d as u8).unwrap_or(b',');
            read_delimited(bytes.as_slice(), path, delimiter, options)?
        }
        "tsv" => {
            let bytes = read_bytes(path)?;
            let delimiter = options.delimiter.map(|d| d as u8).unwrap_or(b'\t');
            read_delimited(bytes.as_slice(), path, delimiter, options)?
        }
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.column_names(),
        path.display()
    );
    Ok(dataset)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: io::Error) -> LoadError {
    if source.kind() == io::ErrorKind::NotFound {
        LoadError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Blank names become `Unnamed: {i}`; duplicates are rejected.
fn normalize_header(path: &Path, names: Vec<String>) -> Result<Vec<String>, LoadError> {
    if names.is_empty() {
        return Err(LoadError::MalformedHeader {
            path: path.to_path_buf(),
            reason: "no header row".to_string(),
        });
    }
    let names: Vec<String> = names
        .into_iter()
        .enumerate()
        .map(|(i, n)| if n.trim().is_empty() { format!("Unnamed: {i}") } else { n })
        .collect();

    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.as_str()) {
            return Err(LoadError::MalformedHeader {
                path: path.to_path_buf(),
                reason: format!("duplicate column '{name}'"),
            });
        }
    }
    Ok(names)
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Parse delimited text with a header row. `source` only labels errors.
pub fn read_delimited<R: io::Read>(
    reader: R,
    source: &Path,
    delimiter: u8,
    options: &LoadOptions,
) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(if options.trim_whitespace {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::MalformedHeader {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let headers = normalize_header(source, headers)?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::MalformedRecord {
            path: source.to_path_buf(),
            record: row_no,
            reason: e.to_string(),
        })?;
        rows.push(
            record
                .iter()
                .map(|value| guess_cell_type(value, options))
                .collect(),
        );
    }

    Ok(Dataset::new(headers, rows))
}

/// Type a text cell: missing, then integer, float, boolean, else string.
pub fn guess_cell_type(s: &str, options: &LoadOptions) -> CellValue {
    if NA_TOKENS.contains(&s) || options.extra_na_values.iter().any(|na| na == s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        // `NAN`, `+nan` and friends parse as floats but are missing values.
        return float_cell(f);
    }
    match s {
        "True" | "true" => CellValue::Bool(true),
        "False" | "false" => CellValue::Bool(false),
        _ => CellValue::String(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "age": 39, "occupation": "Adm-clerical", "hours-per-week": 40 },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys in first-seen order; absent keys are null.
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let bytes = read_bytes(path)?;
    let root: JsonValue = serde_json::from_slice(&bytes).map_err(|e| LoadError::Malformed {
        path: path.to_path_buf(),
        reason: format!("parsing JSON: {e}"),
    })?;

    let records = root.as_array().ok_or_else(|| LoadError::Malformed {
        path: path.to_path_buf(),
        reason: "expected top-level JSON array".to_string(),
    })?;

    let mut columns: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::MalformedRecord {
            path: path.to_path_buf(),
            record: i,
            reason: "not a JSON object".to_string(),
        })?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    if columns.is_empty() {
        return Err(LoadError::MalformedHeader {
            path: path.to_path_buf(),
            reason: "no columns found in JSON records".to_string(),
        });
    }

    let rows = objects
        .iter()
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Dataset::new(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of flat columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Column types outside strings, integers,
/// floats and booleans are kept as their display text.
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let malformed = |reason: String| LoadError::Malformed {
        path: path.to_path_buf(),
        reason,
    };

    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| malformed(format!("reading parquet metadata: {e}")))?;

    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let columns = normalize_header(path, columns)?;

    let reader = builder
        .build()
        .map_err(|e| malformed(format!("building parquet reader: {e}")))?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(|e| malformed(format!("reading record batch: {e}")))?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell_value(col, row))
                    .collect(),
            );
        }
    }

    Ok(Dataset::new(columns, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => CellValue::Integer(col.as_primitive::<UInt8Type>().value(row) as i64),
        DataType::UInt16 => CellValue::Integer(col.as_primitive::<UInt16Type>().value(row) as i64),
        DataType::UInt32 => CellValue::Integer(col.as_primitive::<UInt32Type>().value(row) as i64),
        DataType::UInt64 => {
            let v = col.as_primitive::<UInt64Type>().value(row);
            i64::try_from(v)
                .map(CellValue::Integer)
                .unwrap_or(CellValue::Float(v as f64))
        }
        DataType::Float32 => {
            float_cell(col.as_primitive::<Float32Type>().value(row) as f64)
        }
        DataType::Float64 => float_cell(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        _ => match array_value_to_string(col.as_ref(), row) {
            Ok(text) => CellValue::String(text),
            Err(_) => CellValue::String(format!("{:?}", col.data_type())),
        },
    }
}

/// Pandas writes missing floats as NaN rather than null.
fn float_cell(v: f64) -> CellValue {
    if v.is_nan() {
        CellValue::Null
    } else {
        CellValue::Float(v)
    }
}
