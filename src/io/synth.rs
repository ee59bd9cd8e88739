use std::ops::RangeInclusive;

use crate::model::record::{Record, Year};

/// Synthetic mortality records for tests and benchmarks.
///
/// This is NOT meant to be realistic. Entity `i` gets a base level that decreases with
/// `i` plus a small per-year wobble, so the ranking by average is `E000, E001, ...`
/// for every selector.
pub fn synthetic_records(n_entities: usize, years: RangeInclusive<Year>, selectors: &[&str]) -> Vec<Record> {
    let mut out = Vec::new();
    for (si, sel) in selectors.iter().enumerate() {
        for e in 0..n_entities {
            let base = 10.0 * (n_entities - e) as f64 + si as f64;
            for y in years.clone() {
                let d = (y - *years.start()) as f64;
                // wobble stays within +-1 so neighbours never swap averages
                let v = base + (0.7 * d).sin();
                out.push(Record::new(format!("E{:03}", e), *sel, y, v));
            }
        }
    }
    out
}
