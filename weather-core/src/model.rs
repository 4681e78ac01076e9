use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Coordinates and display name of the best match for an address.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
}

/// Human-readable sentence describing current conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastSummary {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub forecast: String,
    pub location: String,
    /// The address exactly as the user typed it.
    pub address: String,
}

/// Body of `GET /weather`: either a report or an error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherResponse {
    Report(WeatherReport),
    Error { error: String },
}

impl WeatherResponse {
    pub fn error(message: impl Into<String>) -> Self {
        WeatherResponse::Error { error: message.into() }
    }
}

impl From<Result<WeatherReport, LookupError>> for WeatherResponse {
    fn from(result: Result<WeatherReport, LookupError>) -> Self {
        match result {
            Ok(report) => WeatherResponse::Report(report),
            Err(err) => WeatherResponse::error(err.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn report_serializes_without_error_field() {
        let resp = WeatherResponse::Report(WeatherReport {
            forecast: "Clear".into(),
            location: "Boston, Massachusetts, United States".into(),
            address: "boston".into(),
        });

        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({
                "forecast": "Clear",
                "location": "Boston, Massachusetts, United States",
                "address": "boston",
            })
        );
    }

    #[test]
    fn error_serializes_with_only_error_field() {
        let resp = WeatherResponse::from(Err(LookupError::MissingAddress));

        assert!(matches!(resp, WeatherResponse::Error { .. }));
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({ "error": "You must provide an address" })
        );
    }

    #[test]
    fn error_body_deserializes_as_error_variant() {
        let resp: WeatherResponse =
            serde_json::from_str(r#"{"error":"Unable to find location"}"#).unwrap();
        assert_eq!(resp, WeatherResponse::error("Unable to find location"));
    }
}
