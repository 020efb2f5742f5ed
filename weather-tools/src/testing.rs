//! Scripted in-memory provider for handler and dispatcher tests.

use async_trait::async_trait;
use serde_json::json;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::Barrier;

use crate::{
    model::{AirPollution, Alert, Coordinates, CurrentWeather, Forecast, GeoMatch, OneCall},
    provider::{ProviderError, WeatherProvider},
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Current(String),
    Forecast(String),
    Geocode(String),
    AirPollution(Coordinates),
    Alerts(Coordinates),
}

#[derive(Debug, Default)]
pub(crate) struct FakeProvider {
    calls: Mutex<Vec<Call>>,
    completed: Mutex<Vec<String>>,
    current_errors: HashMap<String, ProviderError>,
    delays: HashMap<String, Duration>,
    barrier: Option<Arc<Barrier>>,
    forecast: Option<Forecast>,
    geocode: Option<Vec<GeoMatch>>,
    aqi: Option<u8>,
    alerts: Vec<Alert>,
    alerts_error: Option<ProviderError>,
    outage: Option<ProviderError>,
}

impl FakeProvider {
    pub(crate) fn reject_current(mut self, city: &str, err: ProviderError) -> Self {
        self.current_errors.insert(city.to_string(), err);
        self
    }

    pub(crate) fn delay_current(mut self, city: &str, delay: Duration) -> Self {
        self.delays.insert(city.to_string(), delay);
        self
    }

    pub(crate) fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub(crate) fn with_forecast(mut self, forecast: Forecast) -> Self {
        self.forecast = Some(forecast);
        self
    }

    pub(crate) fn with_geocode(mut self, matches: Vec<GeoMatch>) -> Self {
        self.geocode = Some(matches);
        self
    }

    pub(crate) fn with_aqi(mut self, aqi: u8) -> Self {
        self.aqi = Some(aqi);
        self
    }

    pub(crate) fn with_alerts(mut self, alerts: Vec<Alert>) -> Self {
        self.alerts = alerts;
        self
    }

    pub(crate) fn reject_alerts(mut self, err: ProviderError) -> Self {
        self.alerts_error = Some(err);
        self
    }

    /// Every call fails with `err`.
    pub(crate) fn unreachable(mut self, err: ProviderError) -> Self {
        self.outage = Some(err);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Cities whose current-weather lookup has finished, in completion order.
    pub(crate) fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(call);
        match &self.outage {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, ProviderError> {
        self.record(Call::Current(city.to_string()))?;

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if let Some(delay) = self.delays.get(city) {
            tokio::time::sleep(*delay).await;
        }
        self.completed.lock().unwrap().push(city.to_string());

        match self.current_errors.get(city) {
            Some(err) => Err(err.clone()),
            None => Ok(current_sample(city)),
        }
    }

    async fn forecast(&self, city: &str) -> Result<Forecast, ProviderError> {
        self.record(Call::Forecast(city.to_string()))?;
        Ok(self.forecast.clone().unwrap_or_else(|| forecast_sample(city, 40)))
    }

    async fn geocode(&self, city: &str) -> Result<Vec<GeoMatch>, ProviderError> {
        self.record(Call::Geocode(city.to_string()))?;
        Ok(self
            .geocode
            .clone()
            .unwrap_or_else(|| vec![geo_sample(59.91, 10.75)]))
    }

    async fn air_pollution(&self, at: Coordinates) -> Result<AirPollution, ProviderError> {
        self.record(Call::AirPollution(at))?;
        Ok(air_sample(self.aqi.unwrap_or(2)))
    }

    async fn alerts(&self, at: Coordinates) -> Result<OneCall, ProviderError> {
        self.record(Call::Alerts(at))?;
        match &self.alerts_error {
            Some(err) => Err(err.clone()),
            None => Ok(OneCall {
                alerts: self.alerts.clone(),
            }),
        }
    }
}

/// Metric current conditions named after the requested city.
pub(crate) fn current_sample(city: &str) -> CurrentWeather {
    serde_json::from_value(json!({
        "name": city,
        "main": {
            "temp": 12.5,
            "feels_like": 11.0,
            "temp_min": 10.0,
            "temp_max": 14.0,
            "pressure": 1012,
            "humidity": 81
        },
        "weather": [{ "main": "Rain", "description": "light rain" }],
        "wind": { "speed": 4.1, "deg": 200 },
        "visibility": 10000,
        "clouds": { "all": 75 },
        "sys": { "country": "NO", "sunrise": 1_704_088_800, "sunset": 1_704_132_000 }
    }))
    .unwrap()
}

/// `records` forecast entries with temperatures 0, 1, 2, ... and `dt_txt` "record-N".
pub(crate) fn forecast_sample(city: &str, records: usize) -> Forecast {
    let list: Vec<_> = (0..records)
        .map(|i| {
            json!({
                "dt": 1_704_067_200 + (i as i64) * 10_800,
                "dt_txt": format!("record-{i}"),
                "main": { "temp": i as f64 },
                "weather": [{ "main": "Clouds", "description": "overcast clouds" }]
            })
        })
        .collect();

    serde_json::from_value(json!({ "city": { "name": city }, "list": list })).unwrap()
}

pub(crate) fn geo_sample(lat: f64, lon: f64) -> GeoMatch {
    GeoMatch {
        name: "Oslo".to_string(),
        lat,
        lon,
        country: Some("NO".to_string()),
    }
}

fn air_sample(aqi: u8) -> AirPollution {
    serde_json::from_value(json!({
        "list": [{
            "main": { "aqi": aqi },
            "components": {
                "co": 201.94,
                "no": 0.01,
                "no2": 0.77,
                "o3": 68.66,
                "so2": 0.64,
                "pm2_5": 4.5,
                "pm10": 6.2,
                "nh3": 0.12
            }
        }]
    }))
    .unwrap()
}
