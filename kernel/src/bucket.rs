//! Bucketed admissibility correction.
//!
//! States are grouped by raw-heuristic magnitude into *cumulative*
//! buckets: the bucket for cutoff `c` holds every handle with
//! `h_raw <= c`, so buckets nest rather than partition. Each pass
//! measures the worst overestimation observed inside each bucket and
//! subtracts it (less a back-off margin) from every member of the
//! smallest bucket containing the state.
//!
//! The pass is pure and stateless: same `(h_raw, h_admissible, backoff)`
//! in, same `h_corrected` out, with no incremental memory between calls.

/// Ascending bucket cutoffs for a raw-heuristic maximum.
///
/// Every integer from 0 up to `ceil(max_raw)`, with `max_raw` itself
/// appended as the final cutoff so the top bucket contains every state
/// even when the maximum is fractional. `max_raw == 0` yields
/// `[0.0, 0.0]` rather than an empty cutoff list.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn cutoffs(max_raw: f64) -> Vec<f64> {
    debug_assert!(max_raw >= 0.0, "raw heuristics are validated non-negative");
    let top = max_raw.ceil() as u64;
    let mut cuts: Vec<f64> = (0..=top).map(|c| c as f64).collect();
    cuts.push(max_raw);
    cuts
}

/// Per-cutoff worst-case violation `max(h_raw - h_admissible)`, floored
/// at zero, with the back-off margin subtracted (clamped at zero).
///
/// Monotone non-decreasing in cutoff: a larger bucket is a superset, so
/// its maximum violation can only grow.
#[must_use]
pub fn bucket_violations(
    h_raw: &[f64],
    h_admissible: &[f64],
    cutoffs: &[f64],
    backoff: f64,
) -> Vec<f64> {
    debug_assert_eq!(h_raw.len(), h_admissible.len());
    let mut violations = vec![0.0f64; cutoffs.len()];
    for (violation, &cutoff) in violations.iter_mut().zip(cutoffs.iter()) {
        for (&raw, &admissible) in h_raw.iter().zip(h_admissible.iter()) {
            if raw <= cutoff {
                *violation = violation.max(raw - admissible);
            }
        }
    }
    for violation in &mut violations {
        *violation = (*violation - backoff).max(0.0);
    }
    violations
}

/// One full corrector pass: `(h_raw, h_admissible, backoff) -> h_corrected`.
///
/// For each handle the smallest cutoff containing it is found by an
/// ascending scan, and that bucket's violation is subtracted from the
/// raw value. Since violations are non-negative, `h_corrected <= h_raw`
/// holds for every handle after the pass.
///
/// An empty input returns an empty vector.
#[must_use]
pub fn correct(h_raw: &[f64], h_admissible: &[f64], backoff: f64) -> Vec<f64> {
    if h_raw.is_empty() {
        return Vec::new();
    }
    let max_raw = h_raw.iter().fold(0.0f64, |acc, &v| acc.max(v));
    let cuts = cutoffs(max_raw);
    let violations = bucket_violations(h_raw, h_admissible, &cuts, backoff);

    h_raw
        .iter()
        .map(|&raw| {
            // Ascending scan: the last cutoff equals max_raw, so every
            // entry lands in some bucket.
            let bucket = cuts
                .iter()
                .position(|&c| raw <= c)
                .expect("final cutoff covers max_raw");
            raw - violations[bucket]
        })
        .collect()
}
