// tests/encoder_scenarios.rs
//
// End-to-end encoder scenarios through the public library surface.

use resale_price_predictor::features::{
    build_feature_row, encode_block_batch, order_columns, Cell, CategoryTables, FEATURE_COLUMNS,
};
use resale_price_predictor::{FeatureEncoder, PredictError, RawRecord};

fn reference() -> RawRecord {
    RawRecord {
        month: "2024-11".into(),
        town: "BEDOK".into(),
        flat_type: "4 ROOM".into(),
        storey_range: "07 TO 09".into(),
        floor_area_sqm: 90.0,
        flat_model: "Improved".into(),
        lease_commence_date: 2000,
        remaining_lease: "54 years 05 months".into(),
        block: "123".into(),
        ..RawRecord::default()
    }
}

#[test]
fn reference_record_encodes_to_expected_row() {
    let row = build_feature_row(&reference(), &CategoryTables::builtin()).unwrap();
    assert_eq!(
        row.values(),
        [2024.0, 11.0, 1.0, 2.0, 2.0, 90.0, 0.0, 2000.0, 653.0, 0.0]
    );
}

#[test]
fn wrong_separator_is_a_validation_error() {
    let mut raw = reference();
    raw.month = "2024/11".into();
    let err = FeatureEncoder::default().build_feature_row(&raw).unwrap_err();
    assert!(matches!(err, PredictError::Validation { ref field, .. } if field == "month"));
}

#[test]
fn town_outside_enumeration_is_rejected() {
    let mut raw = reference();
    raw.town = "SENGKANG".into();
    let err = FeatureEncoder::default().build_feature_row(&raw).unwrap_err();
    assert_eq!(err.kind(), "unknown_category");
    assert_eq!(err.field(), Some("town"));
}

#[test]
fn every_categorical_field_rejects_unknown_labels() {
    let enc = FeatureEncoder::default();
    let cases: [(&str, fn(&mut RawRecord)); 4] = [
        ("town", |r| r.town = "PUNGGOL".into()),
        ("flat_type", |r| r.flat_type = "1 ROOM".into()),
        ("storey_range", |r| r.storey_range = "13 TO 15".into()),
        ("flat_model", |r| r.flat_model = "Maisonette".into()),
    ];
    for (field, mutate) in cases {
        let mut raw = reference();
        mutate(&mut raw);
        let err = enc.build_feature_row(&raw).unwrap_err();
        assert_eq!(err.field(), Some(field));
        assert_eq!(err.kind(), "unknown_category");
    }
}

#[test]
fn every_label_in_every_table_encodes() {
    let tables = CategoryTables::builtin();
    let enc = FeatureEncoder::new(tables.clone());
    for town in tables.town.labels() {
        let mut raw = reference();
        raw.town = town.to_string();
        let row = enc.build_feature_row(&raw).unwrap();
        assert_eq!(Some(row.town), tables.town.code_of(town));
    }
    for model in tables.flat_model.labels() {
        let mut raw = reference();
        raw.flat_model = model.to_string();
        let row = enc.build_feature_row(&raw).unwrap();
        assert_eq!(Some(row.flat_model), tables.flat_model.code_of(model));
    }
}

#[test]
fn widget_bounds_are_validated() {
    let mut raw = reference();
    raw.lease_commence_date = 1850;
    let err = FeatureEncoder::default().build_feature_row(&raw).unwrap_err();
    assert_eq!(err.field(), Some("lease_commence_date"));
}

#[test]
fn ordering_ignores_input_order() {
    let mut cols: Vec<(&str, Cell)> = FEATURE_COLUMNS
        .iter()
        .map(|n| (*n, Cell::Label(n.to_string())))
        .collect();
    cols.rotate_left(4);
    let ordered = order_columns(&cols).unwrap();
    for (cell, name) in ordered.iter().zip(FEATURE_COLUMNS) {
        assert_eq!(cell, &Cell::Label(name.to_string()));
    }
}

#[test]
fn block_codes_are_per_batch() {
    let single = build_feature_row(&reference(), &CategoryTables::builtin()).unwrap();
    assert_eq!(single.block, 0);
    // Same block, different batch → different code.
    assert_eq!(encode_block_batch(&["100", "123"]), vec![0, 1]);
}
