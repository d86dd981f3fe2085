//! Dataset files: loading `.json`/`.csv` and exporting rows.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use glimpsy_core::{Dataset, DatasetRecord, Row, Value};
use tracing::debug;

use crate::error::CliError;

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

/// Loads a dataset from a `.json` or `.csv` file.
///
/// JSON may be a dataset record (`{id, name, columns, data, row_count}`) or a
/// bare array of row objects. CSV needs a header row.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let dataset = match extension(path).as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        _ => return Err(CliError::UnsupportedFile(path.to_path_buf()).into()),
    };
    debug!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.columns().len(),
        "loaded dataset"
    );
    Ok(dataset)
}

fn load_json(path: &Path) -> Result<Dataset> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| CliError::Dataset(format!("{}: {e}", path.display())))?;

    match payload {
        serde_json::Value::Array(_) => {
            let rows: Vec<Row> = serde_json::from_value(payload)
                .map_err(|e| CliError::Dataset(format!("rows must be objects: {e}")))?;
            Ok(Dataset::from_rows(rows))
        }
        serde_json::Value::Object(_) => {
            let record: DatasetRecord = serde_json::from_value(payload)
                .map_err(|e| CliError::Dataset(format!("not a dataset record: {e}")))?;
            record
                .into_dataset()
                .map_err(|e| CliError::Dataset(e.to_string()).into())
        }
        _ => Err(CliError::Dataset("expected a dataset object or an array of rows".into()).into()),
    }
}

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("reading {}", path.display()))?;
    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = columns
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| (column.clone(), Value::from_cell(cell)))
            .collect();
        rows.push(row);
    }

    Dataset::new(columns, rows).map_err(|e| CliError::Dataset(e.to_string()).into())
}

/// Writes rows as CSV with a header row, using display strings.
pub fn write_csv<W: Write>(writer: W, columns: &[String], rows: &[Row]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(columns)?;
    for row in rows {
        wtr.write_record(columns.iter().map(|c| row.display(c)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Saves a dataset as `.csv`, or as a dataset record when the path ends
/// in `.json`.
pub fn save_dataset(path: &Path, name: &str, dataset: &Dataset) -> Result<()> {
    match extension(path).as_str() {
        "json" => {
            let record = DatasetRecord::from_dataset(1, name, dataset);
            fs::write(path, serde_json::to_string_pretty(&record)?)?;
        }
        "csv" => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_csv(file, dataset.columns(), dataset.rows())?;
        }
        _ => return Err(CliError::UnsupportedFile(path.to_path_buf()).into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_csv_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "name,score,note\nada, 12.5 ,\nbob,n/a,late\n").unwrap();

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.columns(), ["name", "score", "note"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows()[0].number("score"), Some(12.5));
        assert_eq!(dataset.rows()[0].get("note"), Some(&Value::Text(String::new())));
        assert_eq!(dataset.rows()[1].display("score"), "n/a");

        let out = dir.path().join("out.csv");
        save_dataset(&out, "data", &dataset).unwrap();
        let reloaded = load_dataset(&out).unwrap();
        assert_eq!(reloaded, dataset);
    }

    #[test]
    fn test_json_shapes() {
        let dir = TempDir::new().unwrap();

        let bare = dir.path().join("rows.json");
        fs::write(&bare, r#"[{"a": 1, "b": "x"}, {"a": 2, "c": true}]"#).unwrap();
        let dataset = load_dataset(&bare).unwrap();
        assert_eq!(dataset.columns(), ["a", "b", "c"]);

        let record = dir.path().join("record.json");
        fs::write(
            &record,
            r#"{"id": 1, "name": "t", "columns": ["a"], "data": [{"a": 1}], "row_count": 2}"#,
        )
        .unwrap();
        assert!(load_dataset(&record).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_dataset(Path::new("data.parquet")).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }
}
