//! Tests for the flag filter

use super::*;
use crate::app::models::Flag;
use crate::app::services::filters::{
    Configurable, Filter, FlagFilter, FlagFilterArgs, build_from_kwargs,
};
use serde_json::json;

fn create_flagged_data() -> Data {
    let mut data = Data::new("SOx", "Gg");
    let flags = [
        Flag::Valid,
        Flag::Invalid,
        Flag::BelowThreshold,
        Flag::Valid,
        Flag::Invalid,
    ];
    for (i, flag) in flags.into_iter().enumerate() {
        let offset = i as i64;
        data.append(
            DataRow::new(i as f64, "station1", 60.0, 10.7, 100.0, day(offset), day(offset + 1))
                .with_flag(flag),
        )
        .unwrap();
    }
    data
}

#[test]
fn test_flag_filter_valid_and_below_threshold() {
    let filter = FlagFilter::from_args(FlagFilterArgs {
        include: vec![Flag::Valid, Flag::BelowThreshold],
        exclude: vec![],
    })
    .unwrap();
    assert_eq!(filter.init_kwargs()["include"][0], json!(Flag::Valid.code()));

    let (rows, stations) = apply_filters(vec![filter.into()]);
    assert_eq!(stations, 2);
    assert_eq!(rows, 208);
}

#[test]
fn test_flag_filter_invalid_only() {
    let filter: FlagFilter = build_from_kwargs(&json!({"include": [1]})).unwrap();
    let (rows, stations) = apply_filters(vec![filter.into()]);
    assert_eq!(stations, 2);
    assert_eq!(rows, 0);
}

#[test]
fn test_flag_filter_by_value() {
    let filter: FlagFilter = build_from_kwargs(&json!({"exclude": [1]})).unwrap();
    let data = filter
        .filter_data(create_flagged_data(), &create_test_stations(), &[])
        .unwrap();

    assert_eq!(data.values(), &[0.0, 2.0, 3.0]);
    assert!(data.flags().iter().all(|&f| f != Flag::Invalid.code()));
}

#[test]
fn test_flag_filter_include_minus_exclude() {
    let filter: FlagFilter =
        build_from_kwargs(&json!({"include": [0, 2], "exclude": [2]})).unwrap();
    assert_eq!(filter.valid_flags().len(), 1);
    assert!(filter.valid_flags().contains(&0));

    let data = filter
        .filter_data(create_flagged_data(), &create_test_stations(), &[])
        .unwrap();
    assert_eq!(data.len(), 2);
}

#[test]
fn test_flag_filter_unknown_code_rejected() {
    let result = build_from_kwargs::<FlagFilter>(&json!({"include": [9]}));
    assert!(matches!(result, Err(crate::Error::InvalidFilterArguments { .. })));
}

#[test]
fn test_flag_filter_identity_keeps_unnamed_codes() {
    let mut data = create_flagged_data();
    let row = DataRow::new(9.0, "station1", 60.0, 10.7, 100.0, day(9), day(10)).with_flag_code(42);
    data.append(row).unwrap();

    let identity = FlagFilter::default();
    let kept = identity
        .filter_data(data.clone(), &create_test_stations(), &[])
        .unwrap();
    assert_eq!(kept.len(), 6);

    let valid_only: FlagFilter = build_from_kwargs(&json!({"exclude": [1, 2]})).unwrap();
    let kept = valid_only
        .filter_data(data, &create_test_stations(), &[])
        .unwrap();
    assert_eq!(kept.len(), 2);
}
