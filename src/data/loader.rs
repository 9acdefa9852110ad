use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Frame, Value};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a score table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – Parquet file with `n1`, `n2`, `jac` columns
/// * `.json`    – `[{ "n1": "A", "n2": "B", "jac": 0.5 }, ...]`
/// * `.tsv`     – tab-delimited text with a header row
/// * anything else is read as comma-delimited text with a header row
pub fn load_file(path: &Path) -> Result<Frame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let frame = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "tsv" => load_delimited(path, b'\t'),
        _ => load_delimited(path, b','),
    }?;

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        frame.len(),
        frame.columns,
        path.display()
    );
    Ok(frame)
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per line. Every cell's type is
/// guessed independently (see [`Value::guess`]). A record shorter than the
/// header is padded with `Null`; a longer one is an error.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Frame> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let columns: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if columns.iter().all(|c| c.is_empty()) {
        bail!("No columns to parse from file");
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.context("parsing delimited text")?;
        if record.len() > columns.len() {
            let line = record.position().map_or(0, |p| p.line());
            bail!(
                "Expected {} fields in line {line}, saw {}",
                columns.len(),
                record.len()
            );
        }
        let mut cells: Vec<Value> = record.iter().map(Value::guess).collect();
        cells.resize(columns.len(), Value::Null);
        rows.push(cells);
    }

    Ok(Frame { columns, rows })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "n1": "A", "n2": "B", "jac": 0.5 },
///   { "n1": "C", "n2": "D", "jac": 0.25 }
/// ]
/// ```
///
/// Columns are ordered by first appearance; a key missing from a record
/// yields a `Null` cell.
fn load_json(path: &Path) -> Result<Frame> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map_or(Value::Null, json_to_value))
                .collect()
        })
        .collect();

    Ok(Frame { columns, rows })
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file. Every column becomes a frame column; cells keep the
/// Arrow column type where it maps onto [`Value`].
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Frame> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_value(col, row))
                    .collect(),
            );
        }
    }

    Ok(Frame { columns, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map_or(Value::Null, |s| Value::String(s.value(row).to_string())),
        DataType::LargeUtf8 => Value::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(Value::Null, |a| Value::Integer(i64::from(a.value(row)))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(Value::Null, |a| Value::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(Value::Null, |a| Value::Float(f64::from(a.value(row)))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(Value::Null, |a| Value::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(Value::Null, |a| Value::Bool(a.value(row))),
        other => Value::String(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use arrow::array::ArrayRef;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::io::Result<std::path::PathBuf> {
        let path = dir.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn csv_keeps_row_order_and_types() -> TestResult {
        let dir = TempDir::new()?;
        let path = write(&dir, "pairs.csv", "n1,n2,jac\nC,D,0.25\nA,B,0.5\n1,2,1\n")?;

        let frame = load_file(&path)?;

        assert_eq!(frame.columns, ["n1", "n2", "jac"]);
        assert_eq!(
            frame.rows,
            vec![
                vec![Value::String("C".into()), Value::String("D".into()), Value::Float(0.25)],
                vec![Value::String("A".into()), Value::String("B".into()), Value::Float(0.5)],
                vec![Value::Integer(1), Value::Integer(2), Value::Integer(1)],
            ]
        );
        Ok(())
    }

    #[test]
    fn tsv_uses_tab_delimiter() -> TestResult {
        let dir = TempDir::new()?;
        let path = write(&dir, "pairs.tsv", "n1\tn2\tjac\nA\tB\t0.5\n")?;

        let frame = load_file(&path)?;

        assert_eq!(frame.columns, ["n1", "n2", "jac"]);
        assert_eq!(frame.rows[0][2], Value::Float(0.5));
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_file(Path::new("/definitely/not/here.csv"));
        assert!(err.is_err());
    }

    #[test]
    fn short_row_is_padded_with_nulls() -> TestResult {
        let dir = TempDir::new()?;
        let path = write(&dir, "short.csv", "n1,n2,jac\nA,B,0.5\nC,D\n")?;

        let frame = load_file(&path)?;

        assert_eq!(
            frame.rows[1],
            vec![Value::String("C".into()), Value::String("D".into()), Value::Null]
        );
        Ok(())
    }

    #[test]
    fn long_row_is_an_error_naming_its_line() -> TestResult {
        let dir = TempDir::new()?;
        let path = write(&dir, "long.csv", "n1,n2,jac\nA,B,0.5\nC,D,0.1,extra\n")?;

        let err = load_file(&path).err().ok_or("expected failure")?;

        assert_eq!(format!("{err:#}"), "Expected 3 fields in line 3, saw 4");
        Ok(())
    }

    #[test]
    fn header_only_file_has_no_rows() -> TestResult {
        let dir = TempDir::new()?;
        let path = write(&dir, "header.csv", "n1,n2,jac\n")?;

        let frame = load_file(&path)?;

        assert_eq!(frame.columns, ["n1", "n2", "jac"]);
        assert!(frame.is_empty());
        Ok(())
    }

    #[test]
    fn empty_file_is_an_error() -> TestResult {
        let dir = TempDir::new()?;
        let path = write(&dir, "empty.csv", "")?;

        assert!(load_file(&path).is_err());
        Ok(())
    }

    #[test]
    fn json_records_fill_missing_keys_with_null() -> TestResult {
        let dir = TempDir::new()?;
        let path = write(
            &dir,
            "pairs.json",
            r#"[{"n1": "A", "n2": "B", "jac": 0.5}, {"n1": "C", "n2": "D"}]"#,
        )?;

        let frame = load_file(&path)?;

        assert_eq!(frame.columns, ["n1", "n2", "jac"]);
        assert_eq!(frame.rows[1][2], Value::Null);
        Ok(())
    }

    #[test]
    fn json_must_be_an_array() -> TestResult {
        let dir = TempDir::new()?;
        let path = write(&dir, "pairs.json", r#"{"n1": "A"}"#)?;

        assert!(load_file(&path).is_err());
        Ok(())
    }

    #[test]
    fn parquet_columns_map_to_values() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("pairs.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("n1", DataType::Utf8, false),
            Field::new("n2", DataType::Int64, false),
            Field::new("jac", DataType::Float64, true),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["A", "C"])),
            Arc::new(Int64Array::from(vec![2, 4])),
            Arc::new(Float64Array::from(vec![Some(0.5), None])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns)?;
        let mut writer = ArrowWriter::try_new(fs::File::create(&path)?, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;

        let frame = load_file(&path)?;

        assert_eq!(frame.columns, ["n1", "n2", "jac"]);
        assert_eq!(
            frame.rows,
            vec![
                vec![Value::String("A".into()), Value::Integer(2), Value::Float(0.5)],
                vec![Value::String("C".into()), Value::Integer(4), Value::Null],
            ]
        );
        Ok(())
    }
}
