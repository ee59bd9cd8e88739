use serde::Serialize;

use crate::error::{RankError, Result};
use crate::math::stats::nan_max;
use crate::model::aggregate::EntityAggregate;
use crate::model::record::{Record, Year};

/// Ascending, de-duplicated time points shared by every series of one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeAxis(Vec<Year>);

impl TimeAxis {
    /// Sorts and de-duplicates `times`. Fails when nothing is left.
    pub fn from_times<I>(times: I) -> Result<Self>
    where
        I: IntoIterator<Item = Year>,
    {
        let mut v: Vec<Year> = times.into_iter().collect();
        v.sort_unstable();
        v.dedup();
        if v.is_empty() {
            return Err(RankError::EmptyTimeAxis);
        }
        Ok(Self(v))
    }

    pub fn as_slice(&self) -> &[Year] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<Year> {
        self.0.get(idx).copied()
    }

    pub fn position(&self, t: Year) -> Option<usize> {
        self.0.binary_search(&t).ok()
    }
}

/// Metric values of one entity, positionally aligned to a [`TimeAxis`].
/// NaN marks a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub entity_key: String,
    pub values: Vec<f64>,
}

/// Name/value pair of the ranking view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAverage {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionResult {
    pub time_axis: TimeAxis,
    /// Top-K series in rank order.
    pub series: Vec<Series>,
    /// Every entity of the selector, in rank order.
    pub ranking_snapshot: Vec<EntityAggregate>,
}

impl SelectionResult {
    /// Averages of the selected entities, highest first.
    pub fn top_averages(&self) -> Vec<RankedAverage> {
        self.ranking_snapshot
            .iter()
            .take(self.series.len())
            .map(|a| RankedAverage {
                name: a.entity_key.clone(),
                value: a.average,
            })
            .collect()
    }

    pub fn time_extent(&self) -> Option<(Year, Year)> {
        let axis = self.time_axis.as_slice();
        Some((*axis.first()?, *axis.last()?))
    }

    /// Upper bound of the value domain; `None` when every value is a gap.
    pub fn value_max(&self) -> Option<f64> {
        nan_max(self.series.iter().flat_map(|s| s.values.iter().copied()))
    }
}

/// Reorders `partition`'s metrics onto `time_axis`.
///
/// Missing time points stay NaN. When a time point repeats, the last record wins.
/// Records whose time is not on the axis are dropped.
pub fn build_series(entity_key: &str, partition: &[Record], time_axis: &TimeAxis) -> Series {
    let mut values = vec![f64::NAN; time_axis.len()];
    let mut filled = vec![false; time_axis.len()];
    let mut dropped = 0usize;

    for r in partition {
        match time_axis.position(r.time) {
            Some(idx) => {
                if filled[idx] {
                    tracing::warn!(entity = entity_key, year = r.time, "duplicate time point, keeping last");
                }
                values[idx] = r.metric;
                filled[idx] = true;
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(entity = entity_key, dropped, "records outside the time axis");
    }

    Series {
        entity_key: entity_key.to_string(),
        values,
    }
}
