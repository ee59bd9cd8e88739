use anyhow::Context;
use postgres::{Client, NoTls};

use crate::model::record::{Record, RecordStore, Year};

fn select_sql(table: &str) -> anyhow::Result<String> {
    anyhow::ensure!(
        !table.is_empty() && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.'),
        "invalid table name '{}'",
        table
    );
    Ok(format!("SELECT location_name, sex_name, year, val FROM {} ORDER BY location_name, year", table))
}

/// Load IHME records from a Postgres table holding at least
/// `location_name TEXT, sex_name TEXT, year INTEGER, val DOUBLE PRECISION`.
///
/// NULL `val` is kept as NaN. Rows come back sorted by `location_name` then `year`,
/// so entities of a Postgres-loaded store are first seen in alphabetical order: ties
/// on average go to the alphabetically earlier entity and the time axis comes from
/// the alphabetically first entity of the selector.
///
/// `pg_conn_str` example:
/// "host=127.0.0.1 port=5432 user=airflow password=airflow dbname=viss"
pub fn load_ihme_pg(pg_conn_str: &str, table: &str) -> anyhow::Result<RecordStore> {
    let sql = select_sql(table)?;

    let mut client = Client::connect(pg_conn_str, NoTls)
        .with_context(|| "Failed to connect to Postgres")?;

    let rows = client
        .query(sql.as_str(), &[])
        .with_context(|| format!("Failed to query {}", table))?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let entity_key: String = row.get(0);
        let selector_value: String = row.get(1);
        let time: Year = row.get(2);
        let metric: Option<f64> = row.get(3);
        records.push(Record {
            entity_key,
            selector_value,
            time,
            metric: metric.unwrap_or(f64::NAN),
        });
    }

    anyhow::ensure!(!records.is_empty(), "table {} has no rows", table);
    tracing::info!(table, rows = records.len(), "loaded IHME records from Postgres");
    Ok(RecordStore::new(records))
}
