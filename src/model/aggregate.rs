use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::{RankError, Result};
use crate::math::stats::nan_mean;
use crate::model::record::{Record, RecordStore};
use crate::model::series::{build_series, SelectionResult, TimeAxis};

/// Historical average of one entity together with the records it was computed from.
#[derive(Debug, Clone, Serialize)]
pub struct EntityAggregate {
    pub entity_key: String,
    /// Mean of the non-NaN metrics; NaN when the entity has no defined value.
    pub average: f64,
    #[serde(skip)]
    pub raw_records: Vec<Record>,
}

/// Partitions records by entity. Partitions come out in first-seen order and keep
/// the records' original order.
fn group_by_entity<'a, I>(records: I) -> Vec<(String, Vec<Record>)>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Record>)> = Vec::new();
    for r in records {
        let slot = *index.entry(r.entity_key.as_str()).or_insert_with(|| {
            groups.push((r.entity_key.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(r.clone());
    }
    groups
}

// Descending; NaN sorts after every defined average.
fn by_average_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Averages every entity carrying `selector_value` and ranks them, highest first.
/// Ties keep first-seen order.
pub fn rank_entities(store: &RecordStore, selector_value: &str) -> Result<Vec<EntityAggregate>> {
    let groups = group_by_entity(
        store
            .records()
            .iter()
            .filter(|r| r.selector_value == selector_value),
    );
    if groups.is_empty() {
        return Err(RankError::InvalidSelector(selector_value.to_string()));
    }

    let mut ranked: Vec<EntityAggregate> = groups
        .into_iter()
        .map(|(entity_key, raw_records)| EntityAggregate {
            average: nan_mean(raw_records.iter().map(|r| r.metric)),
            entity_key,
            raw_records,
        })
        .collect();
    // stable: equal averages stay in first-seen order
    ranked.sort_by(|a, b| by_average_desc(a.average, b.average));
    Ok(ranked)
}

/// Ranks the entities of `selector_value` by historical average and reshapes the
/// top `k` into series aligned on a shared time axis.
///
/// The axis is taken from the first-seen entity; other entities are assumed to share
/// it and any missing year becomes a NaN gap. `k` larger than the entity count
/// returns every entity.
pub fn select_top_k(store: &RecordStore, selector_value: &str, k: usize) -> Result<SelectionResult> {
    if k == 0 {
        return Err(RankError::InvalidK);
    }

    let first_seen = store
        .records()
        .iter()
        .find(|r| r.selector_value == selector_value)
        .map(|r| r.entity_key.as_str())
        .ok_or_else(|| RankError::InvalidSelector(selector_value.to_string()))?;

    let ranking_snapshot = rank_entities(store, selector_value)?;

    let axis_source = ranking_snapshot
        .iter()
        .find(|a| a.entity_key == first_seen)
        .ok_or(RankError::EmptyTimeAxis)?;
    let time_axis = TimeAxis::from_times(axis_source.raw_records.iter().map(|r| r.time))?;

    let series: Vec<_> = ranking_snapshot
        .iter()
        .take(k)
        .map(|a| build_series(&a.entity_key, &a.raw_records, &time_axis))
        .collect();

    tracing::debug!(
        selector = selector_value,
        k,
        entities = ranking_snapshot.len(),
        selected = series.len(),
        years = time_axis.len(),
        "top-k selection"
    );

    Ok(SelectionResult {
        time_axis,
        series,
        ranking_snapshot,
    })
}
