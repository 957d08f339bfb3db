//! Timestamp-keyed alignment and merging of generation series.
//!
//! Two independently-sampled sources describe the same zone: merging keeps
//! only timestamps reported by both (an inner join). A timestamp reported by
//! one source alone cannot be presented as a complete generation snapshot,
//! so it is excluded silently.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use grid_core::{Error, GenerationMix, Result};

/// Inner-join merge of two timestamp-keyed mix series.
///
/// Keys must match exactly; within one fetch cycle both sources use a single
/// provider-defined timestamp representation, so no fuzzy matching is done.
/// Shared keys combine additively (hydro split across both pipelines is
/// reconstructed by summation; single-source categories pass through).
/// Output is ascending by timestamp key.
pub fn inner_join_merge(
    primary: &BTreeMap<String, GenerationMix>,
    secondary: &BTreeMap<String, GenerationMix>,
) -> Vec<(String, GenerationMix)> {
    let mut merged = Vec::new();
    for (key, mix) in primary {
        match secondary.get(key) {
            Some(other) => merged.push((key.clone(), mix.combine(other))),
            None => {
                tracing::debug!(timestamp = %key, "excluding timestamp present in one source only");
            }
        }
    }
    for key in secondary.keys() {
        if !primary.contains_key(key) {
            tracing::debug!(timestamp = %key, "excluding timestamp present in one source only");
        }
    }
    merged
}

/// Parse a provider-native timestamp into a UTC instant.
///
/// Accepts RFC 3339 (offset-carrying) strings, or naive local timestamps
/// interpreted in the provider's zone. Anything else is a data fault.
pub fn parse_local_timestamp(raw: &str, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|e| Error::data(format!("unparseable timestamp {raw:?}: {e}")))?;
    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| Error::data(format!("ambiguous local timestamp {raw:?} in {tz}")))
}
