use mortrank::io::synth::synthetic_records;
use mortrank::{build_series, rank_entities, select_top_k, RankError, Record, RecordStore, TimeAxis};

fn r(entity: &str, sel: &str, year: i32, v: f64) -> Record {
    Record::new(entity, sel, year, v)
}

fn tie_store() -> RecordStore {
    RecordStore::new(vec![
        r("A", "M", 2000, 10.0),
        r("A", "M", 2001, 20.0),
        r("B", "M", 2000, 5.0),
        r("B", "M", 2001, 25.0),
    ])
}

fn keys(result: &mortrank::SelectionResult) -> Vec<&str> {
    result.series.iter().map(|s| s.entity_key.as_str()).collect()
}

#[test]
fn tie_on_average_goes_to_first_seen_entity() {
    let result = select_top_k(&tie_store(), "M", 1).expect("select");
    assert_eq!(keys(&result), vec!["A"]);
    assert_eq!(result.time_axis.as_slice(), &[2000, 2001]);
    assert_eq!(result.series[0].values, vec![10.0, 20.0]);
    // snapshot still lists every entity
    let snapshot: Vec<_> = result.ranking_snapshot.iter().map(|a| (a.entity_key.as_str(), a.average)).collect();
    assert_eq!(snapshot, vec![("A", 15.0), ("B", 15.0)]);
}

#[test]
fn tie_order_follows_store_order() {
    let store = RecordStore::new(vec![
        r("B", "M", 2000, 5.0),
        r("B", "M", 2001, 25.0),
        r("A", "M", 2000, 10.0),
        r("A", "M", 2001, 20.0),
    ]);
    let result = select_top_k(&store, "M", 1).expect("select");
    assert_eq!(keys(&result), vec!["B"]);
}

#[test]
fn ranks_by_average_descending() {
    let store = RecordStore::new(vec![
        r("Low", "F", 2000, 1.0),
        r("High", "F", 2000, 9.0),
        r("Mid", "F", 2000, 5.0),
        r("Low", "F", 2001, 1.0),
        r("High", "F", 2001, 9.0),
        r("Mid", "F", 2001, 5.0),
    ]);
    let result = select_top_k(&store, "F", 2).expect("select");
    assert_eq!(keys(&result), vec!["High", "Mid"]);
    let avgs = result.top_averages();
    assert_eq!(avgs.len(), 2);
    assert_eq!(avgs[0].name, "High");
    assert_eq!(avgs[0].value, 9.0);
    assert_eq!(result.ranking_snapshot.len(), 3);
}

#[test]
fn k_larger_than_entity_count_returns_all() {
    let result = select_top_k(&tie_store(), "M", 50).expect("select");
    assert_eq!(result.series.len(), 2);
}

#[test]
fn returns_min_of_k_and_entity_count() {
    let store = RecordStore::new(synthetic_records(12, 2000..=2005, &["Male", "Female"]));
    for k in 1..=15 {
        let result = select_top_k(&store, "Male", k).expect("select");
        assert_eq!(result.series.len(), k.min(12));
        for s in &result.series {
            assert_eq!(s.values.len(), result.time_axis.len());
        }
    }
}

#[test]
fn synthetic_ranking_is_entity_order() {
    let store = RecordStore::new(synthetic_records(5, 1990..=2017, &["Female"]));
    let result = select_top_k(&store, "Female", 3).expect("select");
    assert_eq!(keys(&result), vec!["E000", "E001", "E002"]);
    assert_eq!(result.time_axis.len(), 28);
    assert_eq!(result.time_extent(), Some((1990, 2017)));
}

#[test]
fn zero_k_is_rejected() {
    assert_eq!(select_top_k(&tie_store(), "M", 0).unwrap_err(), RankError::InvalidK);
}

#[test]
fn unknown_selector_is_rejected() {
    let err = select_top_k(&tie_store(), "Other", 3).unwrap_err();
    assert_eq!(err, RankError::InvalidSelector("Other".to_string()));
    // the store is still usable afterwards
    assert!(select_top_k(&tie_store(), "M", 3).is_ok());
}

#[test]
fn selector_filters_records() {
    let store = RecordStore::new(vec![
        r("A", "Male", 2000, 1.0),
        r("B", "Female", 2000, 100.0),
        r("C", "Male", 2000, 2.0),
    ]);
    let result = select_top_k(&store, "Male", 5).expect("select");
    assert_eq!(keys(&result), vec!["C", "A"]);
    assert_eq!(store.selector_values(), vec!["Male".to_string(), "Female".to_string()]);
}

#[test]
fn nan_metrics_are_excluded_from_average() {
    let store = RecordStore::new(vec![
        r("A", "M", 2000, 4.0),
        r("A", "M", 2001, f64::NAN),
        r("B", "M", 2000, 3.0),
        r("B", "M", 2001, 3.0),
    ]);
    let ranked = rank_entities(&store, "M").expect("rank");
    assert_eq!(ranked[0].entity_key, "A");
    assert_eq!(ranked[0].average, 4.0);

    let result = select_top_k(&store, "M", 2).expect("select");
    assert!(result.series[0].values[1].is_nan());
    assert_eq!(result.value_max(), Some(4.0));
}

#[test]
fn all_nan_entity_ranks_last() {
    let store = RecordStore::new(vec![
        r("Empty", "M", 2000, f64::NAN),
        r("Empty", "M", 2001, f64::NAN),
        r("Small", "M", 2000, 0.5),
        r("Small", "M", 2001, 0.5),
        r("Big", "M", 2000, 7.0),
        r("Big", "M", 2001, 7.0),
    ]);
    let ranked = rank_entities(&store, "M").expect("rank");
    let order: Vec<_> = ranked.iter().map(|a| a.entity_key.as_str()).collect();
    assert_eq!(order, vec!["Big", "Small", "Empty"]);
    assert!(ranked[2].average.is_nan());

    // the axis still comes from the first-seen entity
    let result = select_top_k(&store, "M", 3).expect("select");
    assert_eq!(result.time_axis.as_slice(), &[2000, 2001]);
}

#[test]
fn repeated_runs_are_identical() {
    let store = RecordStore::new(vec![
        r("X", "M", 2000, 2.0),
        r("Y", "M", 2000, 2.0),
        r("Z", "M", 2000, 2.0),
        r("W", "M", 2000, 3.0),
    ]);
    let first = select_top_k(&store, "M", 4).expect("select");
    for _ in 0..10 {
        let again = select_top_k(&store, "M", 4).expect("select");
        assert_eq!(again.series, first.series);
        assert_eq!(again.time_axis, first.time_axis);
    }
    assert_eq!(keys(&first), vec!["W", "X", "Y", "Z"]);
}

#[test]
fn missing_year_becomes_gap() {
    let store = RecordStore::new(vec![
        r("A", "M", 2001, 1.0),
        r("A", "M", 2000, 2.0),
        r("A", "M", 2002, 3.0),
        r("B", "M", 2000, 9.0),
        r("B", "M", 2002, 9.0),
    ]);
    let result = select_top_k(&store, "M", 2).expect("select");
    assert_eq!(result.time_axis.as_slice(), &[2000, 2001, 2002]);
    let b = &result.series[0];
    assert_eq!(b.entity_key, "B");
    assert_eq!(b.values[0], 9.0);
    assert!(b.values[1].is_nan());
    assert_eq!(b.values[2], 9.0);
    // out-of-order input is realigned
    assert_eq!(result.series[1].values, vec![2.0, 1.0, 3.0]);
}

#[test]
fn duplicate_year_keeps_last_record() {
    let axis = TimeAxis::from_times([2000, 2001]).expect("axis");
    let partition = vec![
        r("A", "M", 2000, 1.0),
        r("A", "M", 2000, 5.0),
        r("A", "M", 2001, 2.0),
        r("A", "M", 1999, 8.0),
    ];
    let s = build_series("A", &partition, &axis);
    assert_eq!(s.values, vec![5.0, 2.0]);
}

#[test]
fn time_axis_sorts_and_dedups() {
    let axis = TimeAxis::from_times([2003, 2001, 2003, 2002]).expect("axis");
    assert_eq!(axis.as_slice(), &[2001, 2002, 2003]);
    assert_eq!(axis.position(2002), Some(1));
    assert_eq!(axis.position(1999), None);
    assert_eq!(TimeAxis::from_times(Vec::new()).unwrap_err(), RankError::EmptyTimeAxis);
}
