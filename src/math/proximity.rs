//! Hover lookup over a [`SelectionResult`]: pointer coordinates, already inverted into
//! year and metric units, resolve to a time index and the closest series at that index.

use serde::Serialize;

use crate::error::{RankError, Result};
use crate::model::record::Year;
use crate::model::series::{SelectionResult, Series, TimeAxis};

/// The series point nearest to a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityHit {
    pub time_index: usize,
    pub time: Year,
    pub entity_key: String,
    pub value: f64,
}

impl ProximityHit {
    /// Tooltip text, e.g. `"Russia 12.35"`.
    pub fn label(&self) -> String {
        format!("{} {:.2}", self.entity_key, self.value)
    }
}

/// Index of the axis point closest to `query_time`.
///
/// Bisects for the leftmost point `>= query_time` (never below position 1), then
/// compares against its left neighbour. An exact midpoint resolves to the earlier point.
/// Queries past either end clamp to the edge points.
pub fn nearest_time_index(time_axis: &TimeAxis, query_time: f64) -> Result<usize> {
    let axis = time_axis.as_slice();
    match axis.len() {
        0 => return Err(RankError::EmptyTimeAxis),
        1 => return Ok(0),
        _ => {}
    }
    if query_time.is_nan() {
        return Err(RankError::NoProximityMatch);
    }

    let i1 = (1 + axis[1..].partition_point(|&t| f64::from(t) < query_time)).min(axis.len() - 1);
    let i0 = i1 - 1;
    let (t0, t1) = (f64::from(axis[i0]), f64::from(axis[i1]));
    Ok(if query_time - t0 <= t1 - query_time { i0 } else { i1 })
}

/// Position in `series` of the entry whose value at `time_index` is closest to
/// `query_value`. NaN values are skipped; ties keep the earlier series.
/// A non-finite query value has no nearest series.
pub fn nearest_series(series: &[Series], time_index: usize, query_value: f64) -> Result<usize> {
    if !query_value.is_finite() {
        return Err(RankError::NoProximityMatch);
    }
    let mut best: Option<(usize, f64)> = None;
    for (pos, s) in series.iter().enumerate() {
        let v = s.values.get(time_index).copied().unwrap_or(f64::NAN);
        let d = (v - query_value).abs();
        if d.is_nan() {
            continue;
        }
        match best {
            Some((_, bd)) if bd <= d => {}
            _ => best = Some((pos, d)),
        }
    }
    best.map(|(pos, _)| pos).ok_or(RankError::NoProximityMatch)
}

/// Resolves a query point to the nearest time index and series.
pub fn locate(series: &[Series], time_axis: &TimeAxis, query_time: f64, query_value: f64) -> Result<ProximityHit> {
    let time_index = nearest_time_index(time_axis, query_time)?;
    let pos = nearest_series(series, time_index, query_value)?;
    let s = &series[pos];
    Ok(ProximityHit {
        time_index,
        time: time_axis.get(time_index).ok_or(RankError::EmptyTimeAxis)?,
        entity_key: s.entity_key.clone(),
        value: s.values[time_index],
    })
}

impl SelectionResult {
    pub fn locate(&self, query_time: f64, query_value: f64) -> Result<ProximityHit> {
        locate(&self.series, &self.time_axis, query_time, query_value)
    }
}
