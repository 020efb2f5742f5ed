use serde::Serialize;

use crate::model::Alert;

/// `fetch-current-weather`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentSummary {
    pub city: String,
    pub temp: f64,
    pub description: String,
}

/// `fetch-forecast`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub city: String,
    pub forecast: Vec<DailyPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub temp: f64,
    pub description: String,
}

/// `fetch-air-quality`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityReport {
    pub city: String,
    pub aqi: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<&'static str>,
    pub components: PollutantLevels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantLevels {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub pm2_5: f64,
    pub pm10: f64,
}

/// `fetch-detailed-weather`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedWeather {
    pub city: String,
    pub country: Option<String>,
    pub temperature: TemperatureBreakdown,
    pub weather: ConditionSummary,
    pub wind: WindSummary,
    pub humidity: u8,
    pub pressure: f64,
    pub visibility: Option<u32>,
    pub clouds: u8,
    pub sun: SunTimes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureBreakdown {
    pub current: f64,
    pub feels_like: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionSummary {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindSummary {
    /// m/s
    pub speed: f64,
    /// degrees
    pub direction: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunTimes {
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// `compare-weather`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub comparison: Vec<CityComparison>,
    pub count: usize,
}

/// One slot of a comparison, positioned like the requested city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CityComparison {
    Observed(CityObservation),
    Failed { city: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityObservation {
    pub city: String,
    pub temp: f64,
    pub feels_like: f64,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

/// `fetch-alerts`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsReport {
    pub city: String,
    pub alerts: Vec<Alert>,
    pub has_alerts: bool,
}
