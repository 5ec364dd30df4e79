//! # Categorical Tables
//!
//! Closed label → code enumerations for the four categorical columns the
//! model was trained on. The tables are built once at startup and shared
//! read-only; lookups are exact (the form only offers the listed labels).

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{PredictError, PredictResult};

const TOWN: &[(&str, i64)] = &[
    ("ANG MO KIO", 0),
    ("BEDOK", 1),
    ("CHOA CHU KANG", 2),
    ("OTHER", 3),
];

const FLAT_TYPE: &[(&str, i64)] = &[
    ("2 ROOM", 0),
    ("3 ROOM", 1),
    ("4 ROOM", 2),
    ("5 ROOM", 3),
    ("EXECUTIVE", 4),
];

const STOREY_RANGE: &[(&str, i64)] = &[
    ("01 TO 03", 0),
    ("04 TO 06", 1),
    ("07 TO 09", 2),
    ("10 TO 12", 3),
];

const FLAT_MODEL: &[(&str, i64)] = &[
    ("Improved", 0),
    ("New Generation", 1),
    ("Simplified", 2),
    ("Type S1", 3),
    ("Type S2", 4),
];

/// One closed enumeration for a single column.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTable {
    pub field: &'static str,
    /// Labels in code order, as offered by the form.
    labels: Vec<&'static str>,
    #[serde(skip)]
    codes: HashMap<&'static str, i64>,
}

impl CategoryTable {
    fn from_pairs(field: &'static str, pairs: &[(&'static str, i64)]) -> Self {
        let mut sorted = pairs.to_vec();
        sorted.sort_by_key(|&(_, code)| code);
        Self {
            field,
            labels: sorted.iter().map(|&(label, _)| label).collect(),
            codes: pairs.iter().copied().collect(),
        }
    }

    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    pub fn code_of(&self, label: &str) -> Option<i64> {
        self.codes.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// All categorical tables, keyed by column.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTables {
    pub town: CategoryTable,
    pub flat_type: CategoryTable,
    pub storey_range: CategoryTable,
    pub flat_model: CategoryTable,
}

impl CategoryTables {
    /// The tables the shipped model was trained with.
    pub fn builtin() -> Self {
        Self {
            town: CategoryTable::from_pairs("town", TOWN),
            flat_type: CategoryTable::from_pairs("flat_type", FLAT_TYPE),
            storey_range: CategoryTable::from_pairs("storey_range", STOREY_RANGE),
            flat_model: CategoryTable::from_pairs("flat_model", FLAT_MODEL),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTable> {
        [&self.town, &self.flat_type, &self.storey_range, &self.flat_model].into_iter()
    }
}

impl Default for CategoryTables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Look up `raw_value` in `table`; values outside the enumeration are an error.
pub fn encode_categorical(
    field_name: &str,
    raw_value: &str,
    table: &CategoryTable,
) -> PredictResult<i64> {
    table
        .code_of(raw_value)
        .ok_or_else(|| PredictError::UnknownCategory {
            field: field_name.to_string(),
            value: raw_value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_labels_map_to_expected_codes() {
        let t = CategoryTables::builtin();
        assert_eq!(encode_categorical("town", "BEDOK", &t.town).unwrap(), 1);
        assert_eq!(encode_categorical("flat_type", "4 ROOM", &t.flat_type).unwrap(), 2);
        assert_eq!(
            encode_categorical("storey_range", "07 TO 09", &t.storey_range).unwrap(),
            2
        );
        assert_eq!(
            encode_categorical("flat_model", "Improved", &t.flat_model).unwrap(),
            0
        );
        assert_eq!(encode_categorical("flat_model", "Type S2", &t.flat_model).unwrap(), 4);
    }

    #[test]
    fn codes_are_unique_and_dense_per_table() {
        for table in CategoryTables::builtin().iter() {
            let codes: HashSet<i64> = table
                .labels()
                .iter()
                .map(|l| table.code_of(l).unwrap())
                .collect();
            assert_eq!(codes.len(), table.len(), "{}", table.field);
            assert_eq!(
                codes,
                (0..table.len() as i64).collect::<HashSet<_>>(),
                "{}",
                table.field
            );
        }
    }

    #[test]
    fn labels_are_listed_in_code_order() {
        let t = CategoryTables::builtin();
        assert_eq!(
            t.town.labels(),
            &["ANG MO KIO", "BEDOK", "CHOA CHU KANG", "OTHER"]
        );
    }

    #[test]
    fn unknown_or_differently_cased_labels_fail() {
        let t = CategoryTables::builtin();
        for raw in ["SENGKANG", "bedok", " BEDOK", ""] {
            let err = encode_categorical("town", raw, &t.town).unwrap_err();
            assert_eq!(
                err,
                PredictError::UnknownCategory {
                    field: "town".into(),
                    value: raw.into()
                }
            );
        }
    }
}
