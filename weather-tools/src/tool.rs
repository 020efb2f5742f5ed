//! The fixed catalogue of weather tools.

use std::{convert::TryFrom, fmt};
use thiserror::Error;

use crate::provider::ProviderError;

pub mod handlers;
pub mod input;
pub mod output;

pub use input::{CitiesInput, CityInput, ValidationError};

/// Every operation the router knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CurrentWeather,
    Forecast,
    AirQuality,
    DetailedWeather,
    CompareWeather,
    Alerts,
}

impl Operation {
    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CurrentWeather => "fetch-current-weather",
            Operation::Forecast => "fetch-forecast",
            Operation::AirQuality => "fetch-air-quality",
            Operation::DetailedWeather => "fetch-detailed-weather",
            Operation::CompareWeather => "compare-weather",
            Operation::Alerts => "fetch-alerts",
        }
    }

    /// Older camelCase name still accepted from existing callers.
    pub fn alias(&self) -> &'static str {
        match self {
            Operation::CurrentWeather => "getWeather",
            Operation::Forecast => "getForecast",
            Operation::AirQuality => "getAirQuality",
            Operation::DetailedWeather => "getDetailedWeather",
            Operation::CompareWeather => "compareWeather",
            Operation::Alerts => "getWeatherAlerts",
        }
    }

    pub const fn all() -> &'static [Operation] {
        &[
            Operation::CurrentWeather,
            Operation::Forecast,
            Operation::AirQuality,
            Operation::DetailedWeather,
            Operation::CompareWeather,
            Operation::Alerts,
        ]
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool '{0}'")]
pub struct UnknownOperation(pub String);

impl TryFrom<&str> for Operation {
    type Error = UnknownOperation;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Operation::all()
            .iter()
            .copied()
            .find(|op| op.as_str() == value || op.alias() == value)
            .ok_or_else(|| UnknownOperation(value.to_string()))
    }
}

/// Why a tool could not produce its normal payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("City not found")]
    CityNotFound,

    /// Upstream answered successfully but without the record the tool needs.
    #[error("{0}")]
    MissingData(&'static str),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ToolError {
    /// Logical failures are reported to the caller as data inside a normal
    /// response; everything else fails the call.
    pub fn is_logical(&self) -> bool {
        match self {
            ToolError::CityNotFound | ToolError::MissingData(_) => true,
            ToolError::Provider(ProviderError::Rejected(_)) => true,
            ToolError::Provider(_) => false,
        }
    }
}

/// AQI labels, indexed by `aqi - 1`.
pub const AQI_LABELS: [&str; 5] = ["Good", "Fair", "Moderate", "Poor", "Very Poor"];

/// Label for a 1-based AQI index; `None` outside 1..=5.
pub fn aqi_label(index: u8) -> Option<&'static str> {
    let slot = usize::from(index).checked_sub(1)?;
    AQI_LABELS.get(slot).copied()
}
