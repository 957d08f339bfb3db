//! Czech CEPS provider (zone `CZ`).
//!
//! Generation is retrieved through the CepsData SOAP service. The response
//! encodes categories behind a serie-id indirection, decoded by
//! `grid_reconcile::attributes` and then normalized through the CEPS fuel
//! vocabulary.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Europe::Prague;
use grid_core::{CepsConfig, Clock, Error, ProductionRecord, Result, Transport};
use grid_reconcile::{attributes, taxonomy};

/// Zone covered by this provider.
pub const ZONE_KEY: &str = "CZ";

const SOURCE: &str = "ceps.cz";

/// CEPS fetch operations over injected transport and clock collaborators.
pub struct Ceps<T, C> {
    transport: T,
    clock: C,
    config: CepsConfig,
}

impl<T: Transport, C: Clock> Ceps<T, C> {
    /// Create a provider against the default CEPS endpoint.
    pub fn new(transport: T, clock: C) -> Self {
        Self::with_config(transport, clock, CepsConfig::default())
    }

    /// Create a provider with explicit configuration.
    pub fn with_config(transport: T, clock: C, config: CepsConfig) -> Self {
        Self {
            transport,
            clock,
            config,
        }
    }

    /// Fetch the production mix series for the trailing 24 hours.
    pub fn fetch_production(
        &self,
        target_datetime: Option<DateTime<Utc>>,
    ) -> Result<Vec<ProductionRecord>> {
        if target_datetime.is_some() {
            return Err(Error::Unsupported("historical production queries"));
        }

        let to = self.clock.now().with_timezone(&Prague);
        let from = to - Duration::days(1);
        let envelope = self.generation_envelope(&from.to_rfc3339(), &to.to_rfc3339());

        let url = &self.config.endpoint;
        let body = self.transport.post(url, &envelope)?.text(url)?;
        let items = attributes::decode_series_items(&body)?;
        tracing::debug!(items = items.len(), "decoded CEPS generation response");

        items
            .into_iter()
            .map(|item| {
                let production = taxonomy::CEPS_GENERATION
                    .normalize(item.values.iter().map(|(name, v)| (name.as_str(), *v)))?;
                Ok(ProductionRecord {
                    datetime: item.date,
                    zone_key: ZONE_KEY.to_string(),
                    production,
                    capacity: BTreeMap::new(),
                    storage: BTreeMap::new(),
                    source: SOURCE.to_string(),
                })
            })
            .collect()
    }

    fn generation_envelope(&self, from: &str, to: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <Generation xmlns="https://www.ceps.cz/CepsData/">
      <dateFrom>{from}</dateFrom>
      <dateTo>{to}</dateTo>
      <agregation>{agregation}</agregation>
      <function>{function}</function>
      <version>{version}</version>
      <para1>{para1}</para1>
    </Generation>
  </soap:Body>
</soap:Envelope>"#,
            agregation = self.config.granularity,
            function = self.config.aggregation,
            version = self.config.version,
            para1 = self.config.energy_type,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeTransport;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use grid_core::{FixedClock, Response};

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2022, 7, 26, 12, 0, 0).unwrap())
    }

    const GENERATION_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <GenerationResponse xmlns="https://www.ceps.cz/CepsData/">
      <GenerationResult>
        <root xmlns="https://www.ceps.cz/CepsData/StructuredData/1.0">
          <series>
            <serie id="value1" name="TPP [MW]"/>
            <serie id="value2" name="CCGT [MW]"/>
            <serie id="value3" name="NPP [MW]"/>
            <serie id="value4" name="HPP [MW]"/>
            <serie id="value5" name="PsPP [MW]"/>
            <serie id="value6" name="AltPP [MW]"/>
            <serie id="value7" name="PvPP [MW]"/>
            <serie id="value8" name="WPP [MW]"/>
          </series>
          <data>
            <item date="2022-07-26T01:00:00+02:00" value1="4213" value2="610.5" value3="1893" value4="241" value5="388" value6="612.27" value7="0" value8="13.4"/>
          </data>
        </root>
      </GenerationResult>
    </GenerationResponse>
  </soap:Body>
</soap:Envelope>"#;

    #[test]
    fn test_fetch_production_normalizes_decoded_items() {
        let cfg = CepsConfig::default();
        let transport =
            FakeTransport::new().route(&cfg.endpoint, Response::ok(GENERATION_BODY));
        let provider = Ceps::with_config(transport, fixed_clock(), cfg);

        let records = provider.fetch_production(None).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.zone_key, "CZ");
        assert_eq!(record.source, "ceps.cz");
        assert_eq!(record.datetime.to_rfc3339(), "2022-07-25T23:00:00+00:00");
        assert_eq!(record.production.coal, Some(4213.0));
        assert_eq!(record.production.gas, Some(610.5));
        assert_eq!(record.production.nuclear, Some(1893.0));
        assert_eq!(record.production.hydro, Some(241.0));
        assert_eq!(record.production.solar, Some(0.0));
        assert_eq!(record.production.wind, Some(13.4));
        // Alternative plants land in unknown, rounded to one decimal.
        assert_relative_eq!(record.production.unknown.unwrap(), 612.3);
        // Pumped-storage is excluded; unmeasured categories stay None.
        assert_eq!(record.production.biomass, None);
        assert_eq!(record.production.oil, None);
        assert_eq!(record.production.geothermal, None);
    }

    #[test]
    fn test_fetch_production_rejects_past_dates() {
        let provider = Ceps::new(FakeTransport::new(), fixed_clock());
        let err = provider
            .fetch_production(Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()))
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn test_fetch_production_surfaces_transport_fault() {
        let cfg = CepsConfig::default();
        let transport = FakeTransport::new().route(
            &cfg.endpoint,
            Response {
                status: 404,
                body: String::new(),
            },
        );
        let provider = Ceps::with_config(transport, fixed_clock(), cfg);
        let err = provider.fetch_production(None).unwrap_err();
        assert!(matches!(err, Error::Transport { status: 404, .. }));
    }

    #[test]
    fn test_envelope_carries_configured_parameters() {
        let provider = Ceps::new(FakeTransport::new(), fixed_clock());
        let envelope = provider.generation_envelope("2022-07-25T12:00:00+02:00", "2022-07-26T12:00:00+02:00");
        assert!(envelope.contains("<agregation>HR</agregation>"));
        assert!(envelope.contains("<function>AVG</function>"));
        assert!(envelope.contains("<version>RT</version>"));
        assert!(envelope.contains("<para1>all</para1>"));
        assert!(envelope.contains("<dateFrom>2022-07-25T12:00:00+02:00</dateFrom>"));
    }
}
