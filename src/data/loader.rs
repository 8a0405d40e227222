use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, ListingTable, RawListing, COL_PRICE, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listing dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with named columns (the usual export shape)
/// * `.json`    – records-oriented array: `[{ "Brand": ..., "Price": ... }, ...]`
/// * `.parquet` – flat scalar columns
///
/// Every format must carry the `Brand`, `Type`, `Condition` and `Price`
/// columns; a missing column is a schema error reported here, before any
/// row is normalized.
pub fn load_file(path: &Path) -> Result<ListingTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            load_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            load_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn check_schema(columns: &[String]) -> Result<()> {
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            bail!("dataset is missing required column '{required}'");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one listing per row. The
/// `Price` cell is kept as raw text so the normalizer sees exactly what
/// the file said; every other cell gets its type guessed.
fn load_csv<R: Read>(input: R) -> Result<ListingTable> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    check_schema(&headers)?;

    let price_idx = headers
        .iter()
        .position(|h| h == COL_PRICE)
        .context("CSV missing 'Price' column")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let price = CellValue::String(record.get(price_idx).unwrap_or("").to_string());

        let mut fields = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if col_idx == price_idx {
                continue;
            }
            let col_name = &headers[col_idx];
            fields.insert(col_name.clone(), guess_cell_type(value));
        }

        rows.push(RawListing { price, fields });
    }

    Ok(ListingTable::from_rows(headers, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
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

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Brand": "Dell", "Type": "Laptop", "Condition": "Used", "Price": "$100" },
///   ...
/// ]
/// ```
fn load_json(text: &str) -> Result<ListingTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let column_names: Vec<String> = records
        .first()
        .and_then(|rec| rec.as_object())
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default();
    check_schema(&column_names)?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let price = obj.get(COL_PRICE).map(json_to_cell).unwrap_or(CellValue::Null);

        let mut fields = BTreeMap::new();
        for (key, val) in obj {
            if key == COL_PRICE {
                continue;
            }
            fields.insert(key.clone(), json_to_cell(val));
        }

        rows.push(RawListing { price, fields });
    }

    Ok(ListingTable::from_rows(column_names, rows))
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

/// Load a Parquet file with flat scalar columns (strings, ints, floats,
/// bools). Works with files written by both **Pandas** (`df.to_parquet()`)
/// and **Polars** (`df.write_parquet()`); a numeric `Price` column is
/// accepted as already normalized input.
fn load_parquet(path: &Path) -> Result<ListingTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    check_schema(&column_names)?;

    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let price_idx = schema
            .index_of(COL_PRICE)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{COL_PRICE}' column"))?;

        let field_cols: Vec<(usize, String)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != price_idx)
            .map(|(i, f)| (i, f.name().clone()))
            .collect();

        for row in 0..batch.num_rows() {
            let price = extract_cell(batch.column(price_idx), row);

            let mut fields = BTreeMap::new();
            for (col_idx, col_name) in &field_cols {
                let value = extract_cell(batch.column(*col_idx), row);
                fields.insert(col_name.clone(), value);
            }

            rows.push(RawListing { price, fields });
        }
    }

    Ok(ListingTable::from_rows(column_names, rows))
}

/// Extract a single scalar cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                CellValue::String(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                CellValue::String(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            CellValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            CellValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            CellValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            CellValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            CellValue::Bool(arr.value(row))
        }
        _ => CellValue::String(format!("{:?}", col.data_type())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::COL_BRAND;

    const SAMPLE_CSV: &str = "\
Brand,Type,Condition,Price
Dell,Laptop,Used,$100
HP,Desktop,New,$50-$150
Acer,Laptop,For Parts,free
MSI,Laptop,Excellent,1200.50
";

    #[test]
    fn csv_rows_load_and_normalize() {
        let table = load_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.dropped_rows, 1);
        assert_eq!(table.listings[0].price, 100.0);
        assert_eq!(table.listings[1].price, 100.0);
        assert_eq!(table.listings[2].price, 1200.5);
        assert_eq!(
            table.column_names,
            ["Brand", "Type", "Condition", "Price"]
        );
    }

    #[test]
    fn csv_missing_column_is_a_schema_error() {
        let csv = "Brand,Type,Price\nDell,Laptop,$100\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Condition"));
    }

    #[test]
    fn json_records_load() {
        let json = r#"[
            {"Brand": "Dell", "Type": "Laptop", "Condition": "Used", "Price": "$80"},
            {"Brand": "HP", "Type": "Desktop", "Condition": "New", "Price": 300}
        ]"#;
        let table = load_json(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.listings[0].price, 80.0);
        assert_eq!(table.listings[1].price, 300.0);
        assert_eq!(
            table.listings[0].cell(COL_BRAND),
            &CellValue::String("Dell".into())
        );
    }

    #[test]
    fn json_missing_column_is_a_schema_error() {
        let json = r#"[{"Brand": "Dell", "Price": "$80"}]"#;
        assert!(load_json(json).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(load_file(Path::new("listings.xlsx")).is_err());
    }
}
