use std::time::Instant;

use mortrank::io::synth::synthetic_records;
use mortrank::{select_top_k, RecordStore};

fn main() -> anyhow::Result<()> {
    // Larger toy to amplify differences
    let store = RecordStore::new(synthetic_records(200, 1990..=2017, &["Male", "Female", "Both"]));

    let iters = 200;

    let t_start = Instant::now();
    let mut last = None;
    for _ in 0..iters {
        last = Some(select_top_k(&store, "Female", 10)?);
    }
    let agg = t_start.elapsed();

    let result = last.ok_or_else(|| anyhow::anyhow!("no iterations ran"))?;
    let vmax = result.value_max().unwrap_or(0.0);

    let t_start2 = Instant::now();
    let mut hits = 0usize;
    for i in 0..iters * 100 {
        let qt = 1990.0 + (i % 280) as f64 / 10.0;
        let qv = vmax * (i % 97) as f64 / 97.0;
        if result.locate(qt, qv).is_ok() {
            hits += 1;
        }
    }
    let loc = t_start2.elapsed();

    println!("rows,select_top_k_us,locate_ns,hits");
    println!(
        "{},{:.3},{:.1},{}",
        store.len(),
        agg.as_secs_f64() * 1e6 / iters as f64,
        loc.as_secs_f64() * 1e9 / (iters * 100) as f64,
        hits
    );

    Ok(())
}
