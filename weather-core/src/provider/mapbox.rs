use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{error::GeocodeError, model::GeocodeResult};

use super::Geocoder;

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

#[derive(Debug, Clone)]
pub struct MapboxGeocoder {
    access_token: String,
    base_url: String,
    http: Client,
}

impl MapboxGeocoder {
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(access_token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(access_token: String, base_url: &str) -> Self {
        Self {
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn places_url(&self, address: &str) -> String {
        format!(
            "{}/geocoding/v5/mapbox.places/{}.json",
            self.base_url,
            urlencoding::encode(address)
        )
    }
}

#[derive(Debug, Deserialize)]
struct MbFeature {
    /// `[longitude, latitude]`
    center: Vec<f64>,
    place_name: String,
}

#[derive(Debug, Deserialize)]
struct MbResponse {
    features: Vec<MbFeature>,
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        debug!(address, "Geocoding address with Mapbox");

        let res = self
            .http
            .get(self.places_url(address))
            .query(&[("access_token", self.access_token.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodeError::Connection(format!("Mapbox request failed: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            GeocodeError::Connection(format!("Failed to read Mapbox response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(GeocodeError::Connection(format!(
                "Mapbox request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: MbResponse = serde_json::from_str(&body)
            .map_err(|e| GeocodeError::Connection(format!("Failed to parse Mapbox JSON: {e}")))?;

        let feature = parsed.features.into_iter().next().ok_or(GeocodeError::NotFound)?;

        let &[longitude, latitude] = feature.center.as_slice() else {
            return Err(GeocodeError::Connection(format!(
                "Mapbox feature '{}' has malformed center {:?}",
                feature.place_name, feature.center
            )));
        };

        Ok(GeocodeResult { latitude, longitude, location_name: feature.place_name })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_is_percent_encoded_into_the_path() {
        let geocoder = MapboxGeocoder::with_base_url("T".into(), "http://localhost:1/");

        assert_eq!(
            geocoder.places_url("Philadelphia, PA"),
            "http://localhost:1/geocoding/v5/mapbox.places/Philadelphia%2C%20PA.json"
        );
    }

    #[test]
    fn slash_in_address_does_not_split_the_path() {
        let geocoder = MapboxGeocoder::new("T".into());

        assert!(geocoder.places_url("12/34 Main St").contains("12%2F34%20Main%20St.json"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(300);
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }
}
