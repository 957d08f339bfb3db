//! Reconciliation logic for the gridmix system.
//!
//! This crate turns heterogeneously-shaped upstream documents into the
//! canonical telemetry types of `grid-core`:
//! - Fuel vocabulary translation into the canonical taxonomy
//! - Timestamp-keyed alignment and merging of generation series
//! - Exchange flow resolution and sign normalization
//! - Generic attribute-id decoding for the SOAP provider
//! - Forecast column projection

pub mod align;
pub mod attributes;
pub mod exchange;
pub mod forecast;
pub mod taxonomy;

pub use align::{inner_join_merge, parse_local_timestamp};
pub use attributes::{decode_series_items, DecodedItem};
pub use exchange::{resolve_flows, FlowTable, ZoneIdMap};
pub use forecast::project_forecast;
pub use taxonomy::{Vocabulary, CAMMESA_REGIONAL, CAMMESA_RENEWABLES, CEPS_GENERATION};
