use crate::{
    Config,
    model::{AirPollution, Coordinates, CurrentWeather, Forecast, GeoMatch, OneCall},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};
use thiserror::Error;

pub mod openweather;

/// Failure talking to the upstream weather service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status. Carries its message.
    #[error("{0}")]
    Rejected(String),

    #[error("Failed to send request to OpenWeather ({endpoint}): {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    #[error("Failed to parse OpenWeather {endpoint} JSON: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
}

/// One method per upstream endpoint family the tools use.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions by free-text city name, metric units.
    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, ProviderError>;

    /// Five-day forecast in 3-hour steps by city name, metric units.
    async fn forecast(&self, city: &str) -> Result<Forecast, ProviderError>;

    /// Resolve a city name to coordinates. Zero or more matches, best first.
    async fn geocode(&self, city: &str) -> Result<Vec<GeoMatch>, ProviderError>;

    async fn air_pollution(&self, at: Coordinates) -> Result<AirPollution, ProviderError>;

    /// Government alerts for a location.
    async fn alerts(&self, at: Coordinates) -> Result<OneCall, ProviderError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    let provider =
        OpenWeatherProvider::new(api_key.to_owned(), config.base_url.clone(), config.timeout())?;

    Ok(Arc::new(provider))
}
