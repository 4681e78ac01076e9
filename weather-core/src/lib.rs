//! Core library for the `weather` service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstractions over the geocoding and current-conditions providers
//! - The lookup that chains them, and the response it produces
//!
//! It is used by `weather-cli` for both the one-shot command and the HTTP front end.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use error::{ForecastError, GeocodeError, LookupError};
pub use lookup::WeatherLookup;
pub use model::{ForecastSummary, GeocodeResult, WeatherReport, WeatherResponse};
pub use provider::{ForecastProvider, Geocoder, ProviderId};
