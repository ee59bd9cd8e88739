use mortrank::io::ihme_pg::load_ihme_pg;
use mortrank::select_top_k;

fn main() -> anyhow::Result<()> {
    // Example: connect to the same Postgres used by docker-compose (postgres-dev)
    // You can override with PG_CONN_STR env var.
    let pg_conn_str = std::env::var("PG_CONN_STR").unwrap_or_else(|_| {
        "host=127.0.0.1 port=5432 user=airflow password=airflow dbname=viss".to_string()
    });
    let table = std::env::var("PG_TABLE").unwrap_or_else(|_| "ihme_opioid".to_string());
    let k: usize = std::env::var("K").ok().and_then(|v| v.parse().ok()).unwrap_or(10);

    let store = load_ihme_pg(&pg_conn_str, &table)?;

    for selector in store.selector_values() {
        let result = select_top_k(&store, &selector, k)?;
        print!("year");
        for s in &result.series {
            print!(",{}", s.entity_key);
        }
        println!("  [{}]", selector);
        for (idx, year) in result.time_axis.as_slice().iter().enumerate() {
            print!("{}", year);
            for s in &result.series {
                print!(",{:.2}", s.values[idx]);
            }
            println!();
        }
    }

    Ok(())
}
