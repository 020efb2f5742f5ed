use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::model::{AirPollution, Coordinates, CurrentWeather, Forecast, GeoMatch, OneCall};

use super::{ProviderError, WeatherProvider};

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const GEOCODE_PATH: &str = "/geo/1.0/direct";
const AIR_POLLUTION_PATH: &str = "/data/2.5/air_pollution";
const ONE_CALL_PATH: &str = "/data/3.0/onecall";

/// Sections of the one-call response the alerts tool never reads.
const ONE_CALL_EXCLUDE: &str = "minutely,hourly,daily";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport {
                endpoint: "client",
                message: e.without_url().to_string(),
            })?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Issue one GET, check the status and decode the body.
    ///
    /// The API key is appended here so it never shows up in logged URLs.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(endpoint, url = %url, ?query, "Querying OpenWeather");

        // reqwest errors embed the request URL, which carries the API key.
        let transport = |e: reqwest::Error| ProviderError::Transport {
            endpoint,
            message: e.without_url().to_string(),
        };

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        let body = res.text().await.map_err(transport)?;

        if !status.is_success() {
            let message = upstream_message(status, &body);
            warn!(endpoint, %status, message = %message, "OpenWeather rejected request");
            return Err(ProviderError::Rejected(message));
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, ProviderError> {
        self.get_json(
            "current weather",
            CURRENT_PATH,
            &[("q", city), ("units", "metric")],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<Forecast, ProviderError> {
        self.get_json("forecast", FORECAST_PATH, &[("q", city), ("units", "metric")])
            .await
    }

    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<Vec<GeoMatch>, ProviderError> {
        self.get_json("geocoding", GEOCODE_PATH, &[("q", city), ("limit", "1")])
            .await
    }

    #[instrument(skip(self), fields(lat = at.lat, lon = at.lon))]
    async fn air_pollution(&self, at: Coordinates) -> Result<AirPollution, ProviderError> {
        let (lat, lon) = (at.lat.to_string(), at.lon.to_string());
        self.get_json(
            "air pollution",
            AIR_POLLUTION_PATH,
            &[("lat", lat.as_str()), ("lon", lon.as_str())],
        )
        .await
    }

    #[instrument(skip(self), fields(lat = at.lat, lon = at.lon))]
    async fn alerts(&self, at: Coordinates) -> Result<OneCall, ProviderError> {
        let (lat, lon) = (at.lat.to_string(), at.lon.to_string());
        self.get_json(
            "one call",
            ONE_CALL_PATH,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("exclude", ONE_CALL_EXCLUDE),
            ],
        )
        .await
    }
}

/// Pick the message to surface for a non-success response: the provider's own
/// `message` field, else the raw body, else the status reason.
fn upstream_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|m| !m.is_empty())
    {
        return message;
    }

    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
    }

    truncate_body(body)
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
    fn upstream_message_prefers_provider_message() {
        let body = r#"{"cod":"404","message":"city not found"}"#;
        assert_eq!(upstream_message(StatusCode::NOT_FOUND, body), "city not found");
    }

    #[test]
    fn upstream_message_falls_back_to_body_then_reason() {
        assert_eq!(
            upstream_message(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            "<html>bad gateway</html>"
        );
        assert_eq!(
            upstream_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }
}
