use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::AsArray;
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Dataset, Reading, TimeBase};

/// Names of the four arrays every sensor file must provide.
pub const COLUMNS: [&str; 4] = ["humidity", "pressure", "temperature", "timestamp"];

/// Extensions accepted by [`load_file`], for file dialogs.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["parquet", "pq", "json", "csv"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sensor log from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – four numeric columns (recommended)
/// * `.json`    – `{ "humidity": [...], "pressure": [...], "temperature": [...], "timestamp": [...] }`
/// * `.csv`     – header row naming the four columns, one reading per row
///
/// Timestamps are unix epoch seconds and are converted with `time_base`.
pub fn load_file(path: &Path, time_base: TimeBase) -> Result<Dataset, LoadError> {
    std::fs::metadata(path).map_err(|e| LoadError::io(path, e.to_string()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let columns = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => {
            return Err(LoadError::io(
                path,
                format!("unsupported file extension: .{other}"),
            ))
        }
    };

    let dataset = columns.into_dataset(path, time_base)?;
    log::info!(
        "Loaded {} readings from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Column assembly (shared by every format)
// ---------------------------------------------------------------------------

/// The four arrays as found in the file; `None` cells are nulls.
#[derive(Debug, Default, Deserialize)]
struct RawColumns {
    humidity: Option<Vec<Option<f64>>>,
    pressure: Option<Vec<Option<f64>>>,
    temperature: Option<Vec<Option<f64>>>,
    timestamp: Option<Vec<Option<f64>>>,
}

impl RawColumns {
    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<Vec<Option<f64>>>> {
        match name {
            "humidity" => Some(&mut self.humidity),
            "pressure" => Some(&mut self.pressure),
            "temperature" => Some(&mut self.temperature),
            "timestamp" => Some(&mut self.timestamp),
            _ => None,
        }
    }

    /// Validate the arrays and zip them into row-oriented readings.
    fn into_dataset(self, path: &Path, time_base: TimeBase) -> Result<Dataset, LoadError> {
        let (humidity, pressure, temperature, timestamp) =
            match (self.humidity, self.pressure, self.temperature, self.timestamp) {
                (Some(h), Some(p), Some(t), Some(ts)) => (h, p, t, ts),
                (h, p, t, ts) => {
                    let missing: Vec<&str> = [
                        ("humidity", h.is_none()),
                        ("pressure", p.is_none()),
                        ("temperature", t.is_none()),
                        ("timestamp", ts.is_none()),
                    ]
                    .into_iter()
                    .filter(|(_, absent)| *absent)
                    .map(|(name, _)| name)
                    .collect();
                    return Err(LoadError::schema(
                        path,
                        format!("missing array(s): {}", missing.join(", ")),
                    ));
                }
            };

        let n = timestamp.len();
        if humidity.len() != n || pressure.len() != n || temperature.len() != n {
            return Err(LoadError::schema(
                path,
                format!(
                    "arrays have mismatched lengths: humidity={}, pressure={}, temperature={}, timestamp={}",
                    humidity.len(),
                    pressure.len(),
                    temperature.len(),
                    n
                ),
            ));
        }

        let mut readings = Vec::with_capacity(n);
        for (i, ts) in timestamp.into_iter().enumerate() {
            let seconds =
                ts.ok_or_else(|| LoadError::schema(path, format!("timestamp[{i}] is null")))?;
            let time = time_base.datetime_from_epoch(seconds).ok_or_else(|| {
                LoadError::schema(
                    path,
                    format!("timestamp[{i}] = {seconds} is not a valid epoch time"),
                )
            })?;
            readings.push(Reading {
                time,
                temperature: temperature[i].unwrap_or(f64::NAN),
                humidity: humidity[i].unwrap_or(f64::NAN),
                pressure: pressure[i].unwrap_or(f64::NAN),
            });
        }

        Ok(Dataset::new(readings, path))
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with `humidity`, `pressure`, `temperature` and
/// `timestamp` columns of any integer or floating-point type.
///
/// Works with files written by **Pandas** (`df.to_parquet()`), **Polars**
/// and the bundled `generate_sample` binary.
fn load_parquet(path: &Path) -> Result<RawColumns, LoadError> {
    let (schema, batches) =
        read_parquet_batches(path).map_err(|e| LoadError::io(path, format!("{e:#}")))?;

    let mut columns = RawColumns::default();
    for name in COLUMNS {
        let Ok(idx) = schema.index_of(name) else {
            continue;
        };
        let data_type = schema.field(idx).data_type();
        if !data_type.is_numeric() {
            return Err(LoadError::schema(
                path,
                format!("'{name}' column has type {data_type:?}, expected a numeric type"),
            ));
        }

        let mut values = Vec::new();
        for batch in &batches {
            let as_f64 = cast(batch.column(idx), &DataType::Float64)
                .map_err(|e| LoadError::schema(path, format!("'{name}' column: {e}")))?;
            values.extend(as_f64.as_primitive::<Float64Type>().iter());
        }
        if let Some(slot) = columns.slot_mut(name) {
            *slot = Some(values);
        }
    }

    Ok(columns)
}

fn read_parquet_batches(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let schema = builder.schema().clone();
    let reader = builder.build().context("building parquet reader")?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("reading parquet record batch")?;

    if log::log_enabled!(log::Level::Debug) {
        if let Some(first) = batches.first() {
            let head = first.slice(0, first.num_rows().min(5));
            if let Ok(table) = arrow::util::pretty::pretty_format_batches(&[head]) {
                log::debug!("{}: first rows\n{table}", path.display());
            }
        }
    }

    Ok((schema, batches))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (column-oriented, `df.to_dict(orient='list')`):
///
/// ```json
/// {
///   "humidity":    [48.2, 48.5, ...],
///   "pressure":    [1013.1, 1013.0, ...],
///   "temperature": [21.4, 21.3, ...],
///   "timestamp":   [1704067200, 1704067260, ...]
/// }
/// ```
fn load_json(path: &Path) -> Result<RawColumns, LoadError> {
    let root = read_json(path).map_err(|e| LoadError::io(path, format!("{e:#}")))?;
    serde_json::from_value(root).map_err(|e| LoadError::schema(path, e.to_string()))
}

fn read_json(path: &Path) -> Result<JsonValue> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    humidity: Option<f64>,
    pressure: Option<f64>,
    temperature: Option<f64>,
    timestamp: Option<f64>,
}

/// CSV layout: header row with column names, one reading per row.
/// Columns other than the four sensor arrays are ignored.
fn load_csv(path: &Path) -> Result<RawColumns, LoadError> {
    let mut reader = csv::Reader::from_path(path)
        .context("opening CSV")
        .map_err(|e| LoadError::io(path, format!("{e:#}")))?;
    let headers = reader
        .headers()
        .context("reading CSV headers")
        .map_err(|e| LoadError::io(path, format!("{e:#}")))?
        .clone();

    let mut columns = RawColumns::default();
    let present: Vec<&str> = COLUMNS
        .into_iter()
        .filter(|name| headers.iter().any(|h| h == *name))
        .collect();
    if present.len() < COLUMNS.len() {
        // Only report what is there; assembly names what is missing.
        for name in present {
            if let Some(slot) = columns.slot_mut(name) {
                *slot = Some(Vec::new());
            }
        }
        return Ok(columns);
    }

    let mut humidity = Vec::new();
    let mut pressure = Vec::new();
    let mut temperature = Vec::new();
    let mut timestamp = Vec::new();

    for (row_no, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.map_err(|e| LoadError::schema(path, format!("CSV row {row_no}: {e}")))?;
        humidity.push(row.humidity);
        pressure.push(row.pressure);
        temperature.push(row.temperature);
        timestamp.push(row.timestamp);
    }

    columns.humidity = Some(humidity);
    columns.pressure = Some(pressure);
    columns.temperature = Some(temperature);
    columns.timestamp = Some(timestamp);
    Ok(columns)
}
