//! Error taxonomy for a weather lookup.
//!
//! The `Display` text of every variant is the message shown to the user. The
//! `String` payloads carry diagnostic detail for logs and are never rendered.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Transport failure, unexpected status or unreadable body.
    #[error("Unable to connect to location services!")]
    Connection(String),

    /// The provider answered but had no candidate for the address.
    #[error("Unable to find location. Try another search")]
    NotFound,
}

#[derive(Debug, Error)]
pub enum ForecastError {
    /// Transport failure, unexpected status or unreadable body.
    #[error("Unable to connect to weather service!")]
    Connection(String),

    /// The provider reported an error of its own, or left out fields we need.
    #[error("Unable to find location")]
    Provider(String),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("You must provide an address")]
    MissingAddress,

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

impl LookupError {
    /// Message suitable for the `error` field of a response.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_hide_diagnostic_detail() {
        let err = LookupError::from(GeocodeError::Connection("dns error: no such host".into()));
        assert_eq!(err.user_message(), "Unable to connect to location services!");

        let err = LookupError::from(ForecastError::Provider("code 615: request_failed".into()));
        assert_eq!(err.user_message(), "Unable to find location");
    }

    #[test]
    fn each_variant_has_its_fixed_message() {
        assert_eq!(LookupError::MissingAddress.to_string(), "You must provide an address");
        assert_eq!(
            GeocodeError::NotFound.to_string(),
            "Unable to find location. Try another search"
        );
        assert_eq!(
            ForecastError::Connection(String::new()).to_string(),
            "Unable to connect to weather service!"
        );
    }
}
