use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Date32Array, Float32Array, Float64Array, Int32Array,
    Int64Array, StringArray,
};
use arrow::datatypes::{
    ArrowPrimitiveType, DataType, Date64Type, TimeUnit, TimestampMicrosecondType,
    TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType,
};
use arrow::temporal_conversions::as_datetime;
use arrow::util::display::array_value_to_string;
use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::dates::parse_date_text;
use super::model::{CellValue, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the first sheet of a hiring spreadsheet.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet, header row first
/// * `.csv`     – header row, one record per line
/// * `.json`    – `[{ "Ano": 2024, "Mês": 3, ... }, ...]`
/// * `.parquet` – flat columns, one record per row
pub fn load_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path),
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Header text for a blank header cell at `index`.
fn unnamed(index: usize) -> String {
    format!("Unnamed: {index}")
}

fn header_names<I, S>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    cells
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let name = c.to_string();
            if name.trim().is_empty() {
                unnamed(i)
            } else {
                name
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// Read the first worksheet. Row 0 is the header; fully empty rows are skipped.
fn load_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;
    if range.is_empty() {
        bail!("first worksheet is empty");
    }

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_names(header_row.iter()),
        None => bail!("first worksheet is empty"),
    };

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(workbook_cell).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|c| !c.is_null()))
        .collect();

    Ok(RawTable::new(headers, data))
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // `as_datetime` honours the workbook's 1904 date system.
        Data::DateTime(dt) if dt.is_datetime() => dt
            .as_datetime()
            .map(|d| CellValue::Date(d.date()))
            .unwrap_or(CellValue::Null),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => parse_date_text(s)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::String(s.clone())),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers = header_names(reader.headers().context("reading CSV headers")?.iter());

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(RawTable::new(headers, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, as `df.to_json(orient='records')` writes it):
///
/// ```json
/// [
///   { "Ano": 2024, "Mês": 3, "Superintendência": "TI", "Função": "Analista" },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys, in first-seen order.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .into_iter()
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) if s.trim().is_empty() => CellValue::Null,
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

/// Load a flat Parquet export of the hiring sheet.
///
/// Every column becomes a table column. Strings, integers, floats, booleans,
/// dates and timestamps are understood; other types are kept as their
/// display text.
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let headers: Vec<String> = builder
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
                    .map(|col| extract_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(RawTable::new(headers, rows))
}

// -- Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    let cell = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|s| CellValue::String(s.value(row).to_string())),
        DataType::LargeUtf8 => Some(CellValue::String(
            col.as_string::<i64>().value(row).to_string(),
        )),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row))),
        DataType::Date32 => any
            .downcast_ref::<Date32Array>()
            .and_then(|a| date32_to_date(a.value(row)))
            .map(CellValue::Date),
        DataType::Date64 => temporal_cell::<Date64Type>(col, row),
        DataType::Timestamp(TimeUnit::Second, _) => {
            temporal_cell::<TimestampSecondType>(col, row)
        }
        DataType::Timestamp(TimeUnit::Millisecond, _) => {
            temporal_cell::<TimestampMillisecondType>(col, row)
        }
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            temporal_cell::<TimestampMicrosecondType>(col, row)
        }
        DataType::Timestamp(TimeUnit::Nanosecond, _) => {
            temporal_cell::<TimestampNanosecondType>(col, row)
        }
        _ => array_value_to_string(col, row).ok().map(CellValue::String),
    };
    cell.unwrap_or(CellValue::Null)
}

/// Date part of an `i64`-backed temporal value (timestamps are read as UTC).
fn temporal_cell<T>(col: &Arc<dyn Array>, row: usize) -> Option<CellValue>
where
    T: ArrowPrimitiveType<Native = i64>,
{
    let value = col.as_primitive_opt::<T>()?.value(row);
    as_datetime::<T>(value).map(|dt| CellValue::Date(dt.date()))
}

/// `Date32` counts days since the Unix epoch.
fn date32_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(chrono::Duration::days(days as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn csv_cells_are_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Ano,Mês,Função,").unwrap();
        writeln!(f, "2024,3.0,Analista,x").unwrap();
        writeln!(f, "2025,,Gerente").unwrap();
        drop(f);

        let table = load_table(&path).unwrap();
        assert_eq!(table.headers, vec!["Ano", "Mês", "Função", "Unnamed: 3"]);
        assert_eq!(table.rows[0][0], CellValue::Integer(2024));
        assert_eq!(table.rows[0][1], CellValue::Float(3.0));
        assert_eq!(table.rows[1][1], CellValue::Null);
        assert_eq!(table.rows[1][3], CellValue::Null);
    }

    #[test]
    fn json_columns_are_union_of_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(
            &path,
            r#"[{"Ano": 2024, "Função": "Analista"}, {"Ano": 2025, "Mês": 7}]"#,
        )
        .unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.headers.len(), 3);
        let mes = table.column_index("Mês").unwrap();
        assert_eq!(table.rows[0][mes], CellValue::Null);
        assert_eq!(table.rows[1][mes], CellValue::Integer(7));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_table(Path::new("does/not/exist.xlsx")).unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.txt");
        std::fs::write(&path, "Ano\n2024\n").unwrap();
        let err = load_table(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    fn ymd(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn workbook_dates_follow_the_date_system() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};

        let cell = |value, kind, is_1904| Data::DateTime(ExcelDateTime::new(value, kind, is_1904));

        assert_eq!(
            workbook_cell(&cell(45366.0, ExcelDateTimeType::DateTime, false)),
            ymd(2024, 3, 15)
        );
        assert_eq!(
            workbook_cell(&cell(45366.0, ExcelDateTimeType::DateTime, true)),
            ymd(2028, 3, 16)
        );

        let duration = cell(1.5, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(workbook_cell(&duration), CellValue::Float(1.5));
    }

    #[test]
    fn arrow_timestamps_become_dates() {
        use arrow::array::{Date64Array, TimestampMillisecondArray, TimestampNanosecondArray};

        let nanos: Arc<dyn Array> =
            Arc::new(TimestampNanosecondArray::from(vec![Some(1_710_460_800_000_000_000), None]));
        assert_eq!(extract_cell(&nanos, 0), ymd(2024, 3, 15));
        assert_eq!(extract_cell(&nanos, 1), CellValue::Null);

        let millis: Arc<dyn Array> = Arc::new(
            TimestampMillisecondArray::from(vec![1_710_500_000_000]).with_timezone("UTC"),
        );
        assert_eq!(extract_cell(&millis, 0), ymd(2024, 3, 15));

        let date64: Arc<dyn Array> = Arc::new(Date64Array::from(vec![1_710_460_800_000]));
        assert_eq!(extract_cell(&date64, 0), ymd(2024, 3, 15));
    }

    #[test]
    fn other_arrow_types_keep_their_value_text() {
        use arrow::array::{Decimal128Array, UInt16Array};

        let decimal: Arc<dyn Array> = Arc::new(
            Decimal128Array::from(vec![12_345])
                .with_precision_and_scale(10, 2)
                .unwrap(),
        );
        assert_eq!(extract_cell(&decimal, 0), CellValue::String("123.45".into()));

        let unsigned: Arc<dyn Array> = Arc::new(UInt16Array::from(vec![7]));
        assert_eq!(extract_cell(&unsigned, 0), CellValue::String("7".into()));
    }

    #[test]
    fn date32_counts_from_epoch() {
        assert_eq!(
            date32_to_date(19_797),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }
}
