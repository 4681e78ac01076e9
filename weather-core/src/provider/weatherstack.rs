use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{error::ForecastError, model::ForecastSummary};

use super::ForecastProvider;

const DEFAULT_BASE_URL: &str = "http://api.weatherstack.com";

/// Weatherstack `units=f`: Fahrenheit, miles, inches.
const UNITS: &str = "f";

#[derive(Debug, Clone)]
pub struct WeatherstackProvider {
    access_key: String,
    base_url: String,
    http: Client,
}

impl WeatherstackProvider {
    pub fn new(access_key: String) -> Self {
        Self::with_base_url(access_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(access_key: String, base_url: &str) -> Self {
        Self {
            access_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WsCurrent {
    weather_descriptions: Option<Vec<String>>,
    temperature: Option<f64>,
    feelslike: Option<f64>,
    humidity: Option<f64>,
    precip: Option<f64>,
}

/// `error` is left loosely typed: any value there means the provider refused.
#[derive(Debug, Deserialize)]
struct WsResponse {
    current: Option<WsCurrent>,
    error: Option<serde_json::Value>,
}

impl WsCurrent {
    fn into_summary(self) -> Result<ForecastSummary, ForecastError> {
        let missing = |field: &str| {
            ForecastError::Provider(format!("Weatherstack response is missing current.{field}"))
        };

        let description = self
            .weather_descriptions
            .and_then(|d| d.into_iter().next())
            .ok_or_else(|| missing("weather_descriptions"))?;
        let temperature = self.temperature.ok_or_else(|| missing("temperature"))?;
        let feelslike = self.feelslike.ok_or_else(|| missing("feelslike"))?;
        let humidity = self.humidity.ok_or_else(|| missing("humidity"))?;
        let precip = self.precip.ok_or_else(|| missing("precip"))?;

        Ok(ForecastSummary {
            description: format!(
                "{description}. It is currently {temperature} degrees and it feels like \
                 {feelslike} degrees out. The humidity is {humidity}% with a {precip}% chance of rain."
            ),
        })
    }
}

#[async_trait]
impl ForecastProvider for WeatherstackProvider {
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastSummary, ForecastError> {
        debug!(latitude, longitude, "Fetching current conditions from Weatherstack");

        let url = format!("{}/current", self.base_url);
        let query = format!("{latitude},{longitude}");

        let res = self
            .http
            .get(url)
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("query", query.as_str()),
                ("units", UNITS),
            ])
            .send()
            .await
            .map_err(|e| ForecastError::Connection(format!("Weatherstack request failed: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            ForecastError::Connection(format!("Failed to read Weatherstack response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(ForecastError::Connection(format!(
                "Weatherstack request failed with status {status}"
            )));
        }

        let parsed: WsResponse = serde_json::from_str(&body).map_err(|e| {
            ForecastError::Connection(format!("Failed to parse Weatherstack JSON: {e}"))
        })?;

        // Weatherstack reports its own errors with a 200 status.
        if let Some(err) = parsed.error {
            return Err(ForecastError::Provider(describe_error(&err)));
        }

        parsed
            .current
            .ok_or_else(|| ForecastError::Provider("Weatherstack response has no current block".into()))?
            .into_summary()
    }
}

/// Log detail for an embedded error; uses `code`/`type`/`info` when it is an object.
fn describe_error(err: &serde_json::Value) -> String {
    let field = |name: &str| {
        err.get(name)
            .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_owned))
            .unwrap_or_else(|| "?".to_string())
    };

    if err.is_object() {
        format!("Weatherstack error {}: {} ({})", field("code"), field("type"), field("info"))
    } else {
        format!("Weatherstack error: {err}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(json: serde_json::Value) -> WsCurrent {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn summary_interpolates_all_fields() {
        let summary = current(serde_json::json!({
            "weather_descriptions": ["Partly cloudy"],
            "temperature": 55,
            "feelslike": 52,
            "humidity": 81,
            "precip": 0.1
        }))
        .into_summary()
        .unwrap();

        assert_eq!(
            summary.description,
            "Partly cloudy. It is currently 55 degrees and it feels like 52 degrees out. \
             The humidity is 81% with a 0.1% chance of rain."
        );
    }

    #[test]
    fn first_description_wins() {
        let summary = current(serde_json::json!({
            "weather_descriptions": ["Haze", "Smoke"],
            "temperature": 90,
            "feelslike": 95,
            "humidity": 30,
            "precip": 0
        }))
        .into_summary()
        .unwrap();

        assert!(summary.description.starts_with("Haze. "));
    }

    #[test]
    fn missing_field_is_a_provider_error() {
        let err = current(serde_json::json!({
            "weather_descriptions": ["Clear"],
            "temperature": 60,
            "feelslike": 60,
            "precip": 0
        }))
        .into_summary()
        .unwrap_err();

        match err {
            ForecastError::Provider(detail) => assert!(detail.contains("humidity")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_detail_uses_known_fields() {
        let detail = describe_error(&serde_json::json!({
            "code": 101,
            "type": "invalid_access_key",
            "info": "You have not supplied a valid API Access Key."
        }));

        assert_eq!(
            detail,
            "Weatherstack error 101: invalid_access_key (You have not supplied a valid API Access Key.)"
        );
        assert_eq!(describe_error(&serde_json::json!("invalid")), "Weatherstack error: \"invalid\"");
    }

    #[test]
    fn empty_descriptions_is_a_provider_error() {
        let err = current(serde_json::json!({
            "weather_descriptions": [],
            "temperature": 60,
            "feelslike": 60,
            "humidity": 10,
            "precip": 0
        }))
        .into_summary()
        .unwrap_err();

        assert!(matches!(err, ForecastError::Provider(_)));
    }
}
