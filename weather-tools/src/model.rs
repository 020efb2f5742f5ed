//! Typed views of the OpenWeather responses the tools consume.
//!
//! Only the fields the tools read are modelled. Sub-objects the provider
//! sometimes omits are optional or defaulted.

use serde::{Deserialize, Serialize};

/// `GET /data/2.5/weather`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Wind,
    /// Metres; absent in some regions.
    pub visibility: Option<u32>,
    #[serde(default)]
    pub clouds: Clouds,
    #[serde(default)]
    pub sys: Sys,
}

impl CurrentWeather {
    /// First reported condition, if any.
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn description(&self) -> String {
        self.condition()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    /// hPa
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
    /// Degrees, meteorological.
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Clouds {
    #[serde(default)]
    pub all: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sys {
    pub country: Option<String>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// `GET /data/2.5/forecast`, 3-hour steps over five days.
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub city: ForecastCity,
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastCity {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub dt_txt: Option<String>,
    pub main: ForecastReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastReadings {
    pub temp: f64,
}

/// One candidate from `GET /geo/1.0/direct`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoMatch {
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
}

impl GeoMatch {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates { lat: self.lat, lon: self.lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// `GET /data/2.5/air_pollution`
#[derive(Debug, Clone, Deserialize)]
pub struct AirPollution {
    #[serde(default)]
    pub list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirPollutionEntry {
    pub main: AqiReading,
    pub components: Pollutants,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AqiReading {
    /// 1 (good) ..= 5 (very poor)
    pub aqi: u8,
}

/// Concentrations in μg/m³.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pollutants {
    #[serde(default)]
    pub co: f64,
    #[serde(default)]
    pub no2: f64,
    #[serde(default)]
    pub o3: f64,
    #[serde(default)]
    pub pm2_5: f64,
    #[serde(default)]
    pub pm10: f64,
}

/// `GET /data/3.0/onecall` with everything but alerts excluded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OneCall {
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

/// A government weather alert, passed through to callers unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub end: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
