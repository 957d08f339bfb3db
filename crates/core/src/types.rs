//! Canonical data types for the gridmix system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical fuel categories. Every provider-specific generation category is
/// mapped into one of these fixed buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fuel {
    Biomass,
    Coal,
    Gas,
    Hydro,
    Nuclear,
    Oil,
    Solar,
    Wind,
    Geothermal,
    /// Generation the provider reports without a usable split (e.g. an
    /// aggregate thermal figure).
    Unknown,
}

impl Fuel {
    /// All canonical fuel categories.
    pub const ALL: [Fuel; 10] = [
        Fuel::Biomass,
        Fuel::Coal,
        Fuel::Gas,
        Fuel::Hydro,
        Fuel::Nuclear,
        Fuel::Oil,
        Fuel::Solar,
        Fuel::Wind,
        Fuel::Geothermal,
        Fuel::Unknown,
    ];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Fuel::Biomass => "biomass",
            Fuel::Coal => "coal",
            Fuel::Gas => "gas",
            Fuel::Hydro => "hydro",
            Fuel::Nuclear => "nuclear",
            Fuel::Oil => "oil",
            Fuel::Solar => "solar",
            Fuel::Wind => "wind",
            Fuel::Geothermal => "geothermal",
            Fuel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Fuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical production mix in MW, one slot per fuel category.
///
/// `None` means the category is not measured by the zone's providers;
/// `Some(0.0)` means it was measured at zero. The two are never collapsed:
/// consumers doing aggregate totals rely on the distinction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationMix {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biomass: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydro: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nuclear: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oil: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geothermal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown: Option<f64>,
}

impl GenerationMix {
    /// Get the value for a fuel category.
    pub fn get(&self, fuel: Fuel) -> Option<f64> {
        *self.slot(fuel)
    }

    /// Set the value for a fuel category, replacing any existing value.
    pub fn set(&mut self, fuel: Fuel, value: f64) {
        *self.slot_mut(fuel) = Some(value);
    }

    /// Add a value into a fuel category: an unset slot becomes `Some(value)`,
    /// a set slot is summed. Used when two sources report overlapping
    /// categories that must be combined, not overwritten.
    pub fn add(&mut self, fuel: Fuel, value: f64) {
        let slot = self.slot_mut(fuel);
        *slot = Some(slot.unwrap_or(0.0) + value);
    }

    /// Combine two mixes additively per slot. Categories reported by both
    /// inputs are summed; categories reported by one pass through; categories
    /// reported by neither stay unset.
    pub fn combine(&self, other: &GenerationMix) -> GenerationMix {
        let mut out = self.clone();
        for fuel in Fuel::ALL {
            if let Some(v) = other.get(fuel) {
                out.add(fuel, v);
            }
        }
        out
    }

    /// Whether no category is measured at all.
    pub fn is_empty(&self) -> bool {
        Fuel::ALL.iter().all(|f| self.get(*f).is_none())
    }

    fn slot(&self, fuel: Fuel) -> &Option<f64> {
        match fuel {
            Fuel::Biomass => &self.biomass,
            Fuel::Coal => &self.coal,
            Fuel::Gas => &self.gas,
            Fuel::Hydro => &self.hydro,
            Fuel::Nuclear => &self.nuclear,
            Fuel::Oil => &self.oil,
            Fuel::Solar => &self.solar,
            Fuel::Wind => &self.wind,
            Fuel::Geothermal => &self.geothermal,
            Fuel::Unknown => &self.unknown,
        }
    }

    fn slot_mut(&mut self, fuel: Fuel) -> &mut Option<f64> {
        match fuel {
            Fuel::Biomass => &mut self.biomass,
            Fuel::Coal => &mut self.coal,
            Fuel::Gas => &mut self.gas,
            Fuel::Hydro => &mut self.hydro,
            Fuel::Nuclear => &mut self.nuclear,
            Fuel::Oil => &mut self.oil,
            Fuel::Solar => &mut self.solar,
            Fuel::Wind => &mut self.wind,
            Fuel::Geothermal => &mut self.geothermal,
            Fuel::Unknown => &mut self.unknown,
        }
    }
}

/// Sorted zone-pair key: the two zone codes in lexicographic order joined by
/// `"->"`. `ZonePair::new("PY", "AR")` and `ZonePair::new("AR", "PY")` both
/// yield `"AR->PY"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZonePair(String);

impl ZonePair {
    /// Build the sorted key for an unordered zone pair.
    pub fn new(zone_a: &str, zone_b: &str) -> Self {
        let (first, second) = if zone_a <= zone_b {
            (zone_a, zone_b)
        } else {
            (zone_b, zone_a)
        };
        ZonePair(format!("{first}->{second}"))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZonePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A complete production snapshot for one zone at one instant.
///
/// Constructed fresh per fetch cycle, never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    /// UTC instant of the snapshot.
    pub datetime: DateTime<Utc>,
    /// Zone the snapshot describes.
    pub zone_key: String,
    /// Canonical production mix in MW.
    pub production: GenerationMix,
    /// Installed capacity in MW (not reported by the current providers).
    pub capacity: BTreeMap<String, f64>,
    /// Storage in MW (not reported by the current providers).
    pub storage: BTreeMap<String, f64>,
    /// Upstream data source.
    pub source: String,
}

/// Last known net power transfer between two zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRecord {
    /// Sorted zone-pair key.
    pub sorted_zone_keys: ZonePair,
    /// Instant the reading was taken.
    pub datetime: DateTime<Utc>,
    /// Signed flow in MW; positive means flow from the lexicographically
    /// first zone of the pair to the second.
    pub net_flow: f64,
    /// Upstream data source.
    pub source: String,
}

/// One point of a demand forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    /// Zone the forecast applies to.
    pub zone_key: String,
    /// Forecast instant.
    pub datetime: DateTime<Utc>,
    /// Forecast demand in MW.
    pub value: i64,
    /// Upstream data source.
    pub source: String,
}
