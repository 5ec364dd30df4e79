//! Remaining-lease parsing: "54 years 05 months" → 653.

use crate::error::{PredictError, PredictResult};

pub const LEASE_FIELD: &str = "remaining_lease";

/// Convert a free-text remaining lease into a total month count.
///
/// Only strings carrying both the `years` and `months` markers are parsed.
/// Anything else yields 0 months: a silent fallback kept for compatibility
/// with the trained model's inputs, logged at `warn`.
pub fn parse_remaining_lease(raw: &str) -> PredictResult<i64> {
    if !(raw.contains("years") && raw.contains("months")) {
        tracing::warn!(
            target: "features",
            len = raw.len(),
            "remaining lease without years/months markers, using 0 months"
        );
        return Ok(0);
    }

    // Segments between " years " markers; only the first two count.
    let mut segments = raw.split(" years ");
    let years_part = segments.next().unwrap_or_default();
    let months_part = segments
        .next()
        .ok_or_else(|| PredictError::validation(LEASE_FIELD, "expected '<Y> years <M> months'"))?
        .replace(" months", "");

    let years = parse_count(years_part, "years")?;
    let months = parse_count(&months_part, "months")?;

    years
        .checked_mul(12)
        .and_then(|y| y.checked_add(months))
        .ok_or_else(|| PredictError::validation(LEASE_FIELD, "lease duration out of range"))
}

fn parse_count(part: &str, unit: &str) -> PredictResult<i64> {
    let n: i64 = part.trim().parse().map_err(|_| {
        PredictError::validation(LEASE_FIELD, format!("'{}' is not a number of {unit}", part.trim()))
    })?;
    if n < 0 {
        return Err(PredictError::validation(
            LEASE_FIELD,
            format!("{unit} must not be negative"),
        ));
    }
    Ok(n)
}
