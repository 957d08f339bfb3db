//! Argentine CAMMESA provider (zone `AR`).
//!
//! Generation arrives over two independent pipelines: the regional endpoint
//! reports the non-renewables mix (hydro, nuclear, unsplit thermal) while a
//! separate renewables service reports biomass, solar, wind and small hydro.
//! The two series are normalized per-source and inner-join merged on their
//! shared timestamp keys; hydro is reconstructed by summing both pipelines.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::America::Argentina::Buenos_Aires;
use grid_core::{
    CammesaConfig, Clock, Error, ExchangeRecord, ForecastRecord, GenerationMix, ProductionRecord,
    Result, Transport, ZonePair,
};
use grid_reconcile::exchange::{FeatureCollection, LinkProperties, ZoneIdMap, ZonePointProperties};
use grid_reconcile::{align, exchange, forecast, taxonomy};
use serde::Deserialize;

/// Zone covered by this provider.
pub const ZONE_KEY: &str = "AR";

const PRODUCTION_SOURCE: &str = "cammesaweb.cammesa.com";
const FORECAST_SOURCE: &str = "https://cammesaweb.cammesa.com/";

/// One row of the regional (non-renewables) generation document.
#[derive(Debug, Clone, Deserialize)]
struct RegionalRow {
    fecha: String,
    hidraulico: f64,
    nuclear: f64,
    termico: f64,
}

/// One row of the renewables generation document.
#[derive(Debug, Clone, Deserialize)]
struct RenewablesRow {
    momento: String,
    biocombustible: f64,
    hidraulica: f64,
    fotovoltaica: f64,
    eolica: f64,
}

/// One row of the demand/temperature document.
#[derive(Debug, Clone, Deserialize)]
struct DemandRow {
    fecha: String,
    #[serde(rename = "demPrevista")]
    dem_prevista: Option<f64>,
}

/// CAMMESA fetch operations over injected transport and clock collaborators.
pub struct Cammesa<T, C> {
    transport: T,
    clock: C,
    config: CammesaConfig,
}

impl<T: Transport, C: Clock> Cammesa<T, C> {
    /// Create a provider against the default CAMMESA endpoints.
    pub fn new(transport: T, clock: C) -> Self {
        Self::with_config(transport, clock, CammesaConfig::default())
    }

    /// Create a provider with explicit endpoint configuration.
    pub fn with_config(transport: T, clock: C, config: CammesaConfig) -> Self {
        Self {
            transport,
            clock,
            config,
        }
    }

    /// Fetch the current production mix series for the zone.
    ///
    /// Timestamps reported by only one of the two pipelines are excluded;
    /// a partial record is never emitted.
    pub fn fetch_production(
        &self,
        target_datetime: Option<DateTime<Utc>>,
    ) -> Result<Vec<ProductionRecord>> {
        if target_datetime.is_some() {
            return Err(Error::Unsupported("historical production queries"));
        }

        let non_renewables = self.regional_mixes()?;
        let renewables = self.renewables_mixes()?;
        let merged = align::inner_join_merge(&non_renewables, &renewables);
        tracing::debug!(records = merged.len(), "merged CAMMESA production series");

        merged
            .into_iter()
            .map(|(timestamp, production)| {
                Ok(ProductionRecord {
                    datetime: align::parse_local_timestamp(&timestamp, Buenos_Aires)?,
                    zone_key: ZONE_KEY.to_string(),
                    production,
                    capacity: BTreeMap::new(),
                    storage: BTreeMap::new(),
                    source: PRODUCTION_SOURCE.to_string(),
                })
            })
            .collect()
    }

    /// Fetch the last known exchange between two zones.
    ///
    /// Returns `Ok(None)` when no corridor matches the requested pair.
    pub fn fetch_exchange(
        &self,
        zone_a: &str,
        zone_b: &str,
        target_datetime: Option<DateTime<Utc>>,
    ) -> Result<Option<ExchangeRecord>> {
        if target_datetime.is_some() {
            return Err(Error::Unsupported("historical exchange queries"));
        }

        let ids = self.zone_id_map()?;
        let url = &self.config.exchange_endpoint;
        let body = self.transport.get(url, &[])?.text(url)?;
        let doc: FeatureCollection<LinkProperties> = serde_json::from_str(&body)?;
        let flows = exchange::resolve_flows(ZONE_KEY, &doc, &ids)?;

        Ok(flows.net_flow(zone_a, zone_b).map(|net_flow| ExchangeRecord {
            sorted_zone_keys: ZonePair::new(zone_a, zone_b),
            datetime: self.clock.now(),
            net_flow,
            source: PRODUCTION_SOURCE.to_string(),
        }))
    }

    /// Fetch the demand forecast series for the zone.
    pub fn fetch_consumption_forecast(
        &self,
        target_datetime: Option<DateTime<Utc>>,
    ) -> Result<Vec<ForecastRecord>> {
        if target_datetime.is_some() {
            return Err(Error::Unsupported("historical forecast queries"));
        }

        let url = &self.config.demand_endpoint;
        let body = self
            .transport
            .get(url, &[("id_region", self.config.region_id.to_string())])?
            .text(url)?;
        let rows: Vec<DemandRow> = serde_json::from_str(&body)?;

        forecast::project_forecast(rows.iter().map(|r| (r.fecha.as_str(), r.dem_prevista)))
            .into_iter()
            .map(|(timestamp, value)| {
                Ok(ForecastRecord {
                    zone_key: ZONE_KEY.to_string(),
                    datetime: align::parse_local_timestamp(timestamp, Buenos_Aires)?,
                    value,
                    source: FORECAST_SOURCE.to_string(),
                })
            })
            .collect()
    }

    /// Power prices are not derivable from the available endpoints.
    pub fn fetch_price(&self, _target_datetime: Option<DateTime<Utc>>) -> Result<()> {
        Err(Error::Unsupported("price retrieval"))
    }

    fn regional_mixes(&self) -> Result<BTreeMap<String, GenerationMix>> {
        let url = &self.config.regional_generation_endpoint;
        let body = self
            .transport
            .get(url, &[("id_region", self.config.region_id.to_string())])?
            .text(url)?;
        let rows: Vec<RegionalRow> = serde_json::from_str(&body)?;

        rows.into_iter()
            .map(|row| {
                let mix = taxonomy::CAMMESA_REGIONAL.normalize([
                    ("hidraulico", row.hidraulico),
                    ("nuclear", row.nuclear),
                    ("termico", row.termico),
                ])?;
                Ok((row.fecha, mix))
            })
            .collect()
    }

    fn renewables_mixes(&self) -> Result<BTreeMap<String, GenerationMix>> {
        let today = self
            .clock
            .now()
            .with_timezone(&Buenos_Aires)
            .format("%d-%m-%Y")
            .to_string();
        let url = &self.config.renewables_endpoint;
        let body = self
            .transport
            .get(url, &[("desde", today.clone()), ("hasta", today)])?
            .text(url)?;
        let rows: Vec<RenewablesRow> = serde_json::from_str(&body)?;

        rows.into_iter()
            .map(|row| {
                let mix = taxonomy::CAMMESA_RENEWABLES.normalize([
                    ("biocombustible", row.biocombustible),
                    ("hidraulica", row.hidraulica),
                    ("fotovoltaica", row.fotovoltaica),
                    ("eolica", row.eolica),
                ])?;
                Ok((row.momento, mix))
            })
            .collect()
    }

    // Rebuilt per fetch: feature ids are not stable across provider
    // redeployments.
    fn zone_id_map(&self) -> Result<ZoneIdMap> {
        let url = &self.config.zone_points_endpoint;
        let body = self.transport.get(url, &[])?.text(url)?;
        let doc: FeatureCollection<ZonePointProperties> = serde_json::from_str(&body)?;
        let ids = ZoneIdMap::from_feature_collection(&doc)?;
        tracing::debug!(mapped = ids.len(), "built exchange zone id map");
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeTransport;
    use chrono::TimeZone;
    use grid_core::{FixedClock, Response};

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 15, 0, 0).unwrap())
    }

    fn config() -> CammesaConfig {
        CammesaConfig::default()
    }

    const REGIONAL_BODY: &str = r#"[
        {"fecha": "2024-06-01T10:05:00.000-03:00", "hidraulico": 100.0, "nuclear": 50.0, "termico": 30.0},
        {"fecha": "2024-06-01T10:10:00.000-03:00", "hidraulico": 99.0, "nuclear": 50.0, "termico": 31.0}
    ]"#;

    const RENEWABLES_BODY: &str = r#"[
        {"momento": "2024-06-01T10:05:00.000-03:00", "biocombustible": 5.0, "hidraulica": 20.0, "fotovoltaica": 0.0, "eolica": 10.0}
    ]"#;

    #[test]
    fn test_fetch_production_merges_both_pipelines() {
        let cfg = config();
        let transport = FakeTransport::new()
            .route(&cfg.regional_generation_endpoint, Response::ok(REGIONAL_BODY))
            .route(&cfg.renewables_endpoint, Response::ok(RENEWABLES_BODY));
        let provider = Cammesa::with_config(transport, fixed_clock(), cfg);

        let records = provider.fetch_production(None).unwrap();
        // Only 10:05 appears in both pipelines.
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.zone_key, "AR");
        assert_eq!(record.source, "cammesaweb.cammesa.com");
        assert_eq!(record.datetime.to_rfc3339(), "2024-06-01T13:05:00+00:00");
        assert_eq!(record.production.hydro, Some(120.0));
        assert_eq!(record.production.biomass, Some(5.0));
        assert_eq!(record.production.solar, Some(0.0));
        assert_eq!(record.production.wind, Some(10.0));
        assert_eq!(record.production.nuclear, Some(50.0));
        assert_eq!(record.production.unknown, Some(30.0));
        assert_eq!(record.production.coal, None);
        assert!(record.capacity.is_empty());
        assert!(record.storage.is_empty());
    }

    #[test]
    fn test_fetch_production_rejects_past_dates() {
        let provider = Cammesa::with_config(FakeTransport::new(), fixed_clock(), config());
        let err = provider
            .fetch_production(Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()))
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn test_fetch_production_surfaces_transport_fault() {
        let cfg = config();
        let transport = FakeTransport::new().route(
            &cfg.regional_generation_endpoint,
            Response {
                status: 500,
                body: String::new(),
            },
        );
        let provider = Cammesa::with_config(transport, fixed_clock(), cfg);
        let err = provider.fetch_production(None).unwrap_err();
        assert!(matches!(err, Error::Transport { status: 500, .. }));
    }

    const ZONE_POINTS_BODY: &str = r#"{"features": [
        {"properties": {"id": "1002055", "name": "BRA"}},
        {"properties": {"id": "1002056", "name": "CHI"}},
        {"properties": {"id": "1002598", "name": "URU"}},
        {"properties": {"id": "1002595", "name": "PAR"}}
    ]}"#;

    const EXCHANGE_BODY: &str = r#"{"features": [
        {"properties": {"id": "1002595", "internacional": true, "text": "150", "url": "flecha45"}},
        {"properties": {"id": "1002056", "internacional": true, "text": "-80", "url": "flecha225"}},
        {"properties": {"id": "9000001", "internacional": false, "text": "999", "url": "flecha0"}}
    ]}"#;

    #[test]
    fn test_fetch_exchange_applies_sign_convention() {
        let cfg = config();
        let transport = FakeTransport::new()
            .route(&cfg.zone_points_endpoint, Response::ok(ZONE_POINTS_BODY))
            .route(&cfg.exchange_endpoint, Response::ok(EXCHANGE_BODY));
        let provider = Cammesa::with_config(transport, fixed_clock(), cfg);

        // Paraguay is a non-reference partner: raw 150 flips to -150.
        let record = provider.fetch_exchange("AR", "PY", None).unwrap().unwrap();
        assert_eq!(record.sorted_zone_keys.as_str(), "AR->PY");
        assert_eq!(record.net_flow, -150.0);
        assert_eq!(record.datetime, fixed_clock().0);

        // Chile is the reference partner: raw sign kept.
        let record = provider
            .fetch_exchange("CL-SEN", "AR", None)
            .unwrap()
            .unwrap();
        assert_eq!(record.sorted_zone_keys.as_str(), "AR->CL-SEN");
        assert_eq!(record.net_flow, -80.0);
    }

    #[test]
    fn test_fetch_exchange_without_matching_link_is_no_data() {
        let cfg = config();
        let transport = FakeTransport::new()
            .route(&cfg.zone_points_endpoint, Response::ok(ZONE_POINTS_BODY))
            .route(&cfg.exchange_endpoint, Response::ok(EXCHANGE_BODY));
        let provider = Cammesa::with_config(transport, fixed_clock(), cfg);

        assert!(provider.fetch_exchange("AR", "UY", None).unwrap().is_none());
        assert!(provider.fetch_exchange("BR", "PY", None).unwrap().is_none());
    }

    const DEMAND_BODY: &str = r#"[
        {"fecha": "2024-06-01T10:00:00.000-03:00", "demPrevista": 18231.4},
        {"fecha": "2024-06-01T11:00:00.000-03:00", "demPrevista": null},
        {"fecha": "2024-06-01T12:00:00.000-03:00", "demPrevista": 17950.0}
    ]"#;

    #[test]
    fn test_fetch_consumption_forecast_drops_incomplete_rows() {
        let cfg = config();
        let transport =
            FakeTransport::new().route(&cfg.demand_endpoint, Response::ok(DEMAND_BODY));
        let provider = Cammesa::with_config(transport, fixed_clock(), cfg);

        let records = provider.fetch_consumption_forecast(None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value, 18231);
        assert_eq!(records[0].datetime.to_rfc3339(), "2024-06-01T13:00:00+00:00");
        assert_eq!(records[1].value, 17950);
        assert_eq!(records[0].zone_key, "AR");
        assert_eq!(records[0].source, "https://cammesaweb.cammesa.com/");
    }

    #[test]
    fn test_fetch_price_is_unsupported() {
        let provider = Cammesa::with_config(FakeTransport::new(), fixed_clock(), config());
        let err = provider.fetch_price(None).unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }
}
