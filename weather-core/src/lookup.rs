//! Address in, current conditions out.
//!
//! Geocoding and the conditions lookup run strictly one after the other: the
//! second call needs the coordinates produced by the first, and any failure
//! ends the lookup with no partial result.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    Config,
    error::LookupError,
    model::{WeatherReport, WeatherResponse},
    provider::{ForecastProvider, Geocoder, forecast_provider_from_config, geocoder_from_config},
};

#[derive(Debug, Clone)]
pub struct WeatherLookup {
    geocoder: Arc<dyn Geocoder>,
    forecaster: Arc<dyn ForecastProvider>,
}

impl WeatherLookup {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecaster: Arc<dyn ForecastProvider>) -> Self {
        Self { geocoder, forecaster }
    }

    /// Build both provider clients from configured credentials.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let geocoder = geocoder_from_config(config)?;
        let forecaster = forecast_provider_from_config(config)?;

        Ok(Self::new(Arc::from(geocoder), Arc::from(forecaster)))
    }

    pub async fn lookup(&self, address: Option<&str>) -> Result<WeatherReport, LookupError> {
        let address = address
            .filter(|a| !a.trim().is_empty())
            .ok_or(LookupError::MissingAddress)?;

        let place = self.geocoder.geocode(address).await.inspect_err(|e| {
            warn!(address, error = ?e, "Geocoding failed");
        })?;
        debug!(
            address,
            location = %place.location_name,
            latitude = place.latitude,
            longitude = place.longitude,
            "Geocoded address"
        );

        let summary = self
            .forecaster
            .forecast(place.latitude, place.longitude)
            .await
            .inspect_err(|e| {
                warn!(location = %place.location_name, error = ?e, "Forecast lookup failed");
            })?;

        Ok(WeatherReport {
            forecast: summary.description,
            location: place.location_name,
            address: address.to_string(),
        })
    }

    /// Like [`WeatherLookup::lookup`], folded into the response body shape.
    pub async fn lookup_weather(&self, address: Option<&str>) -> WeatherResponse {
        self.lookup(address).await.into()
    }
}
