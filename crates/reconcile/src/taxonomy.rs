//! Fuel taxonomy normalization.
//!
//! Each provider reports generation under its own category vocabulary. The
//! tables here translate every native category into the canonical fuel set,
//! as a pure per-record mapping applied before alignment. A native category
//! missing from its table is a vocabulary fault: silently absorbing it into
//! a default bucket would corrupt aggregate totals.

use grid_core::{Error, Fuel, GenerationMix, Result};

/// How one native category translates into the canonical taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRule {
    /// Map the value into a canonical fuel slot.
    Map(Fuel),
    /// Map the value with one-decimal rounding.
    MapRounded(Fuel),
    /// Known category the canonical record deliberately excludes
    /// (e.g. pumped-storage, autoproducers).
    Ignore,
}

/// A provider's fixed category vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    provider: &'static str,
    rules: &'static [(&'static str, CategoryRule)],
}

impl Vocabulary {
    /// Normalize one record of native `(category, MW)` pairs into a canonical
    /// mix. Overlapping canonical targets are summed, never overwritten.
    /// Categories the provider does not measure stay unset (`None`).
    pub fn normalize<'a, I>(&self, categories: I) -> Result<GenerationMix>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut mix = GenerationMix::default();
        for (native, value) in categories {
            match self.rule(native) {
                Some(CategoryRule::Map(fuel)) => mix.add(fuel, value),
                Some(CategoryRule::MapRounded(fuel)) => mix.add(fuel, round_one_decimal(value)),
                Some(CategoryRule::Ignore) => {}
                None => {
                    return Err(Error::vocabulary(format!(
                        "{}: unknown generation category {native:?}",
                        self.provider
                    )));
                }
            }
        }
        Ok(mix)
    }

    fn rule(&self, native: &str) -> Option<CategoryRule> {
        self.rules
            .iter()
            .find(|(name, _)| *name == native)
            .map(|(_, rule)| *rule)
    }
}

/// CAMMESA regional generation (non-renewables pipeline). Thermal generation
/// is not split by fuel upstream, so it lands in `unknown`.
pub const CAMMESA_REGIONAL: Vocabulary = Vocabulary {
    provider: "cammesa-regional",
    rules: &[
        ("hidraulico", CategoryRule::Map(Fuel::Hydro)),
        ("nuclear", CategoryRule::Map(Fuel::Nuclear)),
        ("termico", CategoryRule::Map(Fuel::Unknown)),
    ],
};

/// CAMMESA renewables pipeline.
pub const CAMMESA_RENEWABLES: Vocabulary = Vocabulary {
    provider: "cammesa-renewables",
    rules: &[
        ("biocombustible", CategoryRule::Map(Fuel::Biomass)),
        ("hidraulica", CategoryRule::Map(Fuel::Hydro)),
        ("fotovoltaica", CategoryRule::Map(Fuel::Solar)),
        ("eolica", CategoryRule::Map(Fuel::Wind)),
    ],
};

/// CEPS generation categories, keyed by the decoded series names.
/// Pumped-storage and autoproducer figures are excluded from the canonical
/// production mix.
pub const CEPS_GENERATION: Vocabulary = Vocabulary {
    provider: "ceps-generation",
    rules: &[
        ("TPP [MW]", CategoryRule::Map(Fuel::Coal)),
        ("CCGT [MW]", CategoryRule::Map(Fuel::Gas)),
        ("NPP [MW]", CategoryRule::Map(Fuel::Nuclear)),
        ("HPP [MW]", CategoryRule::Map(Fuel::Hydro)),
        ("PvPP [MW]", CategoryRule::Map(Fuel::Solar)),
        ("WPP [MW]", CategoryRule::Map(Fuel::Wind)),
        ("AltPP [MW]", CategoryRule::MapRounded(Fuel::Unknown)),
        ("PsPP [MW]", CategoryRule::Ignore),
        ("ApPP [MW]", CategoryRule::Ignore),
    ],
};

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
