//! Configuration structures for the upstream providers.

use serde::{Deserialize, Serialize};

/// Configuration for the Argentine CAMMESA REST provider.
///
/// API documentation: <https://api.cammesa.com/demanda-svc/swagger-ui.html>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CammesaConfig {
    /// Regional generation endpoint (non-renewables mix).
    pub regional_generation_endpoint: String,
    /// Renewables generation endpoint.
    pub renewables_endpoint: String,
    /// Cross-border exchange feature collection endpoint.
    pub exchange_endpoint: String,
    /// Side geojson document mapping exchange feature ids to partner names.
    pub zone_points_endpoint: String,
    /// Demand and temperature endpoint (carries the demand forecast column).
    pub demand_endpoint: String,
    /// Region id covering the whole country.
    pub region_id: u32,
}

impl Default for CammesaConfig {
    fn default() -> Self {
        Self {
            regional_generation_endpoint:
                "https://api.cammesa.com/demanda-svc/generacion/ObtieneGeneracioEnergiaPorRegion/"
                    .to_string(),
            renewables_endpoint:
                "https://cdsrenovables.cammesa.com/exhisto/RenovablesService/GetChartTotalTRDataSource/"
                    .to_string(),
            exchange_endpoint:
                "https://api.cammesa.com/demanda-svc/demanda/IntercambioCorredoresGeo".to_string(),
            zone_points_endpoint:
                "https://microfe.cammesa.com/demandaregionchart/assets/data/regionesExternasPuntos.geojson.json"
                    .to_string(),
            demand_endpoint:
                "https://api.cammesa.com/demanda-svc/demanda/ObtieneDemandaYTemperaturaRegion"
                    .to_string(),
            region_id: 1002,
        }
    }
}

/// Configuration for the Czech CEPS SOAP provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CepsConfig {
    /// SOAP service endpoint.
    pub endpoint: String,
    /// Reading granularity ("QH" = quarter hour, "HR" = hourly).
    pub granularity: String,
    /// Aggregation function ("AVG" = average).
    pub aggregation: String,
    /// Data version ("RT" = real time).
    pub version: String,
    /// Energy type filter ("all" = every generation category).
    pub energy_type: String,
}

impl Default for CepsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.ceps.cz/_layouts/CepsData.asmx".to_string(),
            granularity: "HR".to_string(),
            aggregation: "AVG".to_string(),
            version: "RT".to_string(),
            energy_type: "all".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let cammesa = CammesaConfig::default();
        assert_eq!(cammesa.region_id, 1002);
        assert!(cammesa.exchange_endpoint.starts_with("https://api.cammesa.com"));

        let ceps = CepsConfig::default();
        assert_eq!(ceps.granularity, "HR");
        assert_eq!(ceps.aggregation, "AVG");
    }
}
