//! Telemetry metric names and recording helpers.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `po_classifier_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider` — completion provider name (e.g. "groq")
//! - `status` — outcome: "ok" or "degraded"
//! - `level` — taxonomy level that was downgraded: "L1", "L2" or "L3"
//! - `direction` — token direction: "prompt" or "completion"

use std::time::Instant;

use crate::taxonomy::Level;

/// Total classifications returned to callers.
///
/// Labels: `status` ("ok" | "degraded").
pub const CLASSIFICATIONS_TOTAL: &str = "po_classifier_classifications_total";

/// Completion request duration in seconds.
///
/// Labels: `provider`.
pub const REQUEST_DURATION_SECONDS: &str = "po_classifier_request_duration_seconds";

/// Total model answers that named a category outside the taxonomy.
///
/// Labels: `level`.
pub const DOWNGRADES_TOTAL: &str = "po_classifier_downgrades_total";

/// Total tokens consumed.
///
/// Labels: `provider`, `direction` ("prompt" | "completion").
pub const TOKENS_TOTAL: &str = "po_classifier_tokens_total";

pub(crate) fn record_classification(degraded: bool) {
    let status = if degraded { "degraded" } else { "ok" };
    metrics::counter!(CLASSIFICATIONS_TOTAL, "status" => status).increment(1);
}

pub(crate) fn record_request(provider: &str, start: Instant) {
    metrics::histogram!(REQUEST_DURATION_SECONDS, "provider" => provider.to_owned())
        .record(start.elapsed().as_secs_f64());
}

pub(crate) fn record_downgrade(level: Level) {
    metrics::counter!(DOWNGRADES_TOTAL, "level" => level.as_str()).increment(1);
}

pub(crate) fn record_token_usage(provider: &str, prompt: u64, completion: u64) {
    metrics::counter!(TOKENS_TOTAL,
        "provider" => provider.to_owned(),
        "direction" => "prompt",
    )
    .increment(prompt);
    metrics::counter!(TOKENS_TOTAL,
        "provider" => provider.to_owned(),
        "direction" => "completion",
    )
    .increment(completion);
}
