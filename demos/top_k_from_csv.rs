use mortrank::io::ihme::load_ihme_csv;
use mortrank::select_top_k;

fn main() -> anyhow::Result<()> {
    // You can override with DATA_CSV, SELECTOR and K env vars.
    let path = std::env::var("DATA_CSV").unwrap_or_else(|_| "data/IHME_opioid_data.csv".to_string());
    let selector = std::env::var("SELECTOR").unwrap_or_else(|_| "Male".to_string());
    let k: usize = std::env::var("K").ok().and_then(|v| v.parse().ok()).unwrap_or(5);

    let store = load_ihme_csv(&path)?;
    let result = select_top_k(&store, &selector, k)?;

    println!("rank,entity,average");
    for (i, a) in result.top_averages().iter().enumerate() {
        println!("{},{},{:.3}", i + 1, a.name, a.value);
    }

    // Hover in the middle of the chart
    if let (Some((t0, t1)), Some(vmax)) = (result.time_extent(), result.value_max()) {
        let qt = (f64::from(t0) + f64::from(t1)) / 2.0;
        let hit = result.locate(qt, vmax / 2.0)?;
        println!("hover({:.1},{:.3}) -> {} @ {}", qt, vmax / 2.0, hit.label(), hit.time);
    }

    Ok(())
}
