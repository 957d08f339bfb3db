//! Cross-border exchange flow resolution.
//!
//! The exchange endpoint returns a geospatial feature collection in which
//! each feature is one transmission corridor. International corridors carry
//! a numeric feature id, a signed reading and an angle-coded arrow image
//! reference. Feature ids are resolved to canonical partner zones through a
//! side geospatial document, and each reading's sign is normalized to the
//! home zone's perspective via a fixed per-partner convention table.

use std::collections::BTreeMap;

use grid_core::{Error, Result, ZonePair};
use serde::Deserialize;
use serde_json::Value;

/// A geojson-like feature collection; only `properties` are consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection<P> {
    pub features: Vec<Feature<P>>,
}

/// One feature of a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature<P> {
    pub properties: P,
}

/// Properties of the side document mapping feature ids to partner names.
#[derive(Debug, Clone, Deserialize)]
pub struct ZonePointProperties {
    /// Upstream feature id (appears as a string or a number).
    pub id: Value,
    /// Three-letter provider code for the partner, e.g. `"PAR"`.
    pub name: String,
}

/// Properties of one exchange corridor feature.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkProperties {
    /// Upstream feature id (appears as a string or a number).
    pub id: Value,
    /// Whether the corridor crosses a border.
    #[serde(rename = "internacional")]
    pub international: bool,
    /// Signed flow reading in MW, serialized as text.
    #[serde(rename = "text")]
    pub reading: String,
    /// Arrow image reference encoding a direction angle, e.g. `"flecha45"`.
    /// Not consumed by the resolver; see the note on `SIGN_CONVENTIONS`.
    #[serde(rename = "url", default)]
    pub arrow: Option<String>,
}

/// Fixed provider-code to canonical-zone table for the known international
/// partners. A code outside this table is a fatal vocabulary fault: the
/// table is exhaustive by construction, so a gap means the upstream
/// vocabulary changed.
const PARTNER_ZONES: &[(&str, &str)] = &[
    ("BRA", "BR"),    // Brazil
    ("CHI", "CL-SEN"), // Chile
    ("URU", "UY"),    // Uruguay
    ("PAR", "PY"),    // Paraguay
];

/// Per-partner sign handling for the raw reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignConvention {
    /// The raw sign already encodes flow out of the home zone.
    AsReported,
    /// The raw sign encodes the partner's own perspective and must flip.
    Negated,
}

// Provisional: only the Chilean link's raw sign has been validated against
// observed flows.
// TODO: confirm the raw sign for BR, UY and PY and correct this table.
const SIGN_CONVENTIONS: &[(&str, SignConvention)] = &[
    ("BR", SignConvention::Negated),
    ("CL-SEN", SignConvention::AsReported),
    ("UY", SignConvention::Negated),
    ("PY", SignConvention::Negated),
];

/// Mapping from upstream feature id to canonical partner zone.
///
/// Rebuilt from the side document on every exchange fetch: upstream ids are
/// not guaranteed stable across provider redeployments, so it is never
/// cached across calls.
#[derive(Debug, Clone)]
pub struct ZoneIdMap {
    mapping: BTreeMap<String, String>,
}

impl ZoneIdMap {
    /// Build the map from the side geospatial document.
    pub fn from_feature_collection(doc: &FeatureCollection<ZonePointProperties>) -> Result<Self> {
        let mut mapping = BTreeMap::new();
        for feature in &doc.features {
            let id = feature_id(&feature.properties.id)?;
            let code = feature.properties.name.as_str();
            let zone = PARTNER_ZONES
                .iter()
                .find(|(provider, _)| *provider == code)
                .map(|(_, zone)| *zone)
                .ok_or_else(|| {
                    Error::vocabulary(format!("unknown partner zone code {code:?}"))
                })?;
            mapping.insert(id, zone.to_string());
        }
        Ok(ZoneIdMap { mapping })
    }

    /// Resolve a feature id to its canonical partner zone.
    pub fn resolve(&self, feature_id: &str) -> Option<&str> {
        self.mapping.get(feature_id).map(String::as_str)
    }

    /// Number of mapped features.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Whether the side document mapped no features.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// Signed flows from the home zone's perspective, keyed `"<home>-><partner>"`.
#[derive(Debug, Clone)]
pub struct FlowTable {
    flows: BTreeMap<String, f64>,
}

impl FlowTable {
    /// Look up the signed flow for an unordered zone pair.
    ///
    /// Returns `None` when no link matches the pair (neither zone is the
    /// home zone, or no corridor exists), never a fabricated zero.
    pub fn net_flow(&self, zone_a: &str, zone_b: &str) -> Option<f64> {
        self.flows.get(ZonePair::new(zone_a, zone_b).as_str()).copied()
    }
}

/// Resolve every international corridor of `doc` into a signed flow from the
/// home zone's perspective.
pub fn resolve_flows(
    home_zone: &str,
    doc: &FeatureCollection<LinkProperties>,
    ids: &ZoneIdMap,
) -> Result<FlowTable> {
    let mut flows = BTreeMap::new();
    for feature in &doc.features {
        let props = &feature.properties;
        if !props.international {
            continue;
        }
        let id = feature_id(&props.id)?;
        let partner = ids.resolve(&id).ok_or_else(|| {
            Error::vocabulary(format!("exchange feature id {id:?} missing from zone id map"))
        })?;
        let raw: f64 = props.reading.trim().parse().map_err(|e| {
            Error::data(format!("non-numeric exchange reading {:?}: {e}", props.reading))
        })?;
        let signed = match sign_convention(partner)? {
            SignConvention::AsReported => raw,
            SignConvention::Negated => -raw,
        };
        flows.insert(format!("{home_zone}->{partner}"), signed);
    }
    tracing::debug!(links = flows.len(), home = home_zone, "resolved exchange flows");
    Ok(FlowTable { flows })
}

fn sign_convention(partner: &str) -> Result<SignConvention> {
    SIGN_CONVENTIONS
        .iter()
        .find(|(zone, _)| *zone == partner)
        .map(|(_, convention)| *convention)
        .ok_or_else(|| Error::vocabulary(format!("no sign convention for partner {partner:?}")))
}

fn feature_id(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::data(format!("unusable feature id {other:?}"))),
    }
}
