//! Block coding.
//!
//! Codes are assigned per batch: the distinct block strings of the rows being
//! encoded together are sorted and each string gets its index in that order.
//! The same block can therefore get different codes in different batches, and
//! a single-row batch always yields 0.

use std::collections::BTreeSet;

/// Per-batch codes for `values`, aligned with the input order.
pub fn encode_block_batch<S: AsRef<str>>(values: &[S]) -> Vec<i64> {
    let distinct: BTreeSet<&str> = values.iter().map(AsRef::as_ref).collect();
    let sorted: Vec<&str> = distinct.into_iter().collect();

    values
        .iter()
        .map(|v| {
            // present by construction
            sorted.binary_search(&v.as_ref()).unwrap_or_default() as i64
        })
        .collect()
}

/// Code for a block encoded on its own (a batch of one).
pub fn encode_block(raw_value: &str) -> i64 {
    encode_block_batch(&[raw_value])[0]
}
