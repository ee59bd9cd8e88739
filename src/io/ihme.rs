use anyhow::Context;
use serde::Deserialize;

use crate::model::record::{Record, RecordStore, Year};

/// Columns of the IHME opioid extract this crate reads. Other columns are ignored.
#[derive(Debug, Deserialize)]
struct IhmeRow {
    location_name: String,
    sex_name: String,
    year: Year,
    #[serde(deserialize_with = "csv::invalid_option")]
    val: Option<f64>,
}

impl From<IhmeRow> for Record {
    fn from(row: IhmeRow) -> Self {
        Record {
            entity_key: row.location_name,
            selector_value: row.sex_name,
            time: row.year,
            metric: row.val.unwrap_or(f64::NAN),
        }
    }
}

/// Read IHME rows from any CSV source with a header line.
///
/// `location_name` becomes the entity, `sex_name` the selector, `val` the metric.
/// A missing or non-numeric `val` is kept as NaN; a bad `year` rejects the row.
pub fn read_ihme_records<R: std::io::Read>(reader: R) -> anyhow::Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for result in rdr.deserialize::<IhmeRow>() {
        let row = result.context("Failed to parse IHME row")?;
        out.push(Record::from(row));
    }
    Ok(out)
}

/// Load the IHME CSV at `path` into a frozen record store.
pub fn load_ihme_csv(path: &str) -> anyhow::Result<RecordStore> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open IHME CSV: {}", path))?;
    let records = read_ihme_records(file).with_context(|| format!("Failed to read IHME CSV: {}", path))?;
    anyhow::ensure!(!records.is_empty(), "IHME CSV has no rows: {}", path);
    tracing::info!(path, rows = records.len(), "loaded IHME records");
    Ok(RecordStore::new(records))
}
