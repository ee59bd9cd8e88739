use anyhow::Context;

use crate::model::series::SelectionResult;

/// Dump a selection as text: parameters, ranking, then one row per year with a column
/// per selected entity. Gaps are written as empty cells.
pub fn write_selection_debug_log(
    out_dir: impl AsRef<std::path::Path>,
    run_id: &str,
    selector: &str,
    k: usize,
    result: &SelectionResult,
) -> anyhow::Result<std::path::PathBuf> {
    use std::io::Write;

    std::fs::create_dir_all(out_dir.as_ref()).context("create logs dir failed")?;
    let path = out_dir.as_ref().join(format!("topk_{}.txt", run_id));
    let mut f = std::fs::File::create(&path)
        .with_context(|| format!("create debug log file failed (path={:?})", path))?;

    writeln!(f, "run_id={}", run_id)?;
    writeln!(f, "selector={}", selector)?;
    writeln!(f, "k={}", k)?;
    writeln!(f, "entities={}", result.ranking_snapshot.len())?;
    writeln!(f)?;
    writeln!(f, "rank,entity,average")?;
    for (i, a) in result.ranking_snapshot.iter().enumerate() {
        writeln!(f, "{},{},{:.6}", i + 1, a.entity_key, a.average)?;
    }
    writeln!(f)?;

    let header: Vec<&str> = result.series.iter().map(|s| s.entity_key.as_str()).collect();
    writeln!(f, "year,{}", header.join(","))?;
    for (idx, year) in result.time_axis.as_slice().iter().enumerate() {
        let mut cells = Vec::with_capacity(result.series.len());
        for s in &result.series {
            anyhow::ensure!(s.values.len() == result.time_axis.len(), "series {} misaligned", s.entity_key);
            let v = s.values[idx];
            cells.push(if v.is_nan() { String::new() } else { format!("{:.6}", v) });
        }
        writeln!(f, "{},{}", year, cells.join(","))?;
    }

    Ok(path)
}
