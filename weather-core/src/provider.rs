use crate::{
    Config,
    error::{ForecastError, GeocodeError},
    model::{ForecastSummary, GeocodeResult},
    provider::{mapbox::MapboxGeocoder, weatherstack::WeatherstackProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod mapbox;
pub mod weatherstack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// Geocoding: address to coordinates.
    Mapbox,
    /// Current conditions at a coordinate pair.
    Weatherstack,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Mapbox => "mapbox",
            ProviderId::Weatherstack => "weatherstack",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Mapbox, ProviderId::Weatherstack]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "mapbox" => Ok(ProviderId::Mapbox),
            "weatherstack" => Ok(ProviderId::Weatherstack),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: mapbox, weatherstack."
            )),
        }
    }
}

/// Resolves a free-text address to the coordinates of its best match.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError>;
}

/// Describes current conditions at a coordinate pair.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn forecast(&self, latitude: f64, longitude: f64)
    -> Result<ForecastSummary, ForecastError>;
}

fn api_key_for(id: ProviderId, config: &Config) -> anyhow::Result<String> {
    config.provider_api_key(id).map(str::to_owned).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `weather configure {id}` and enter your API key."
        )
    })
}

/// Construct the geocoder from config.
pub fn geocoder_from_config(config: &Config) -> anyhow::Result<Box<dyn Geocoder>> {
    let id = ProviderId::Mapbox;
    let api_key = api_key_for(id, config)?;

    let geocoder = match config.provider_base_url(id) {
        Some(base) => MapboxGeocoder::with_base_url(api_key, base),
        None => MapboxGeocoder::new(api_key),
    };

    Ok(Box::new(geocoder))
}

/// Construct the current-conditions provider from config.
pub fn forecast_provider_from_config(
    config: &Config,
) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let id = ProviderId::Weatherstack;
    let api_key = api_key_for(id, config)?;

    let provider = match config.provider_base_url(id) {
        Some(base) => WeatherstackProvider::with_base_url(api_key, base),
        None => WeatherstackProvider::new(api_key),
    };

    Ok(Box::new(provider))
}
