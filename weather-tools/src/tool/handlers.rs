//! One async function per tool. Each takes validated input, talks to the
//! provider and reshapes what comes back.

use chrono::{DateTime, SecondsFormat};
use futures::future::join_all;
use tracing::{instrument, warn};

use crate::{
    model::{Coordinates, GeoMatch},
    provider::WeatherProvider,
};

use super::{
    CitiesInput, CityInput, ToolError, aqi_label,
    output::{
        AirQualityReport, AlertsReport, CityComparison, CityObservation, Comparison,
        ConditionSummary, CurrentSummary, DailyPoint, DetailedWeather, ForecastSummary,
        PollutantLevels, SunTimes, TemperatureBreakdown, WindSummary,
    },
};

/// Forecast records come every 3 hours; every 8th is roughly one per day.
pub const FORECAST_STRIDE: usize = 8;

#[instrument(skip(provider))]
pub async fn current_weather(
    provider: &dyn WeatherProvider,
    input: &CityInput,
) -> Result<CurrentSummary, ToolError> {
    let data = provider.current_weather(&input.city).await?;

    Ok(CurrentSummary {
        description: data.description(),
        temp: data.main.temp,
        city: data.name,
    })
}

#[instrument(skip(provider))]
pub async fn forecast(
    provider: &dyn WeatherProvider,
    input: &CityInput,
) -> Result<ForecastSummary, ToolError> {
    let data = provider.forecast(&input.city).await?;

    let forecast = data
        .list
        .iter()
        .step_by(FORECAST_STRIDE)
        .map(|entry| DailyPoint {
            date: entry
                .dt_txt
                .clone()
                .or_else(|| format_timestamp(entry.dt, "%Y-%m-%d %H:%M:%S"))
                .unwrap_or_default(),
            temp: entry.main.temp,
            description: entry
                .weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect();

    Ok(ForecastSummary {
        city: data.city.name,
        forecast,
    })
}

#[instrument(skip(provider))]
pub async fn air_quality(
    provider: &dyn WeatherProvider,
    input: &CityInput,
) -> Result<AirQualityReport, ToolError> {
    let at = locate(provider, &input.city).await?;
    let data = provider.air_pollution(at).await?;

    let reading = data
        .list
        .first()
        .ok_or(ToolError::MissingData("No air quality data available"))?;
    let aqi = reading.main.aqi;
    let c = &reading.components;

    Ok(AirQualityReport {
        city: input.city.clone(),
        aqi,
        quality: aqi_label(aqi),
        components: PollutantLevels {
            co: c.co,
            no2: c.no2,
            o3: c.o3,
            pm2_5: c.pm2_5,
            pm10: c.pm10,
        },
    })
}

#[instrument(skip(provider))]
pub async fn detailed_weather(
    provider: &dyn WeatherProvider,
    input: &CityInput,
) -> Result<DetailedWeather, ToolError> {
    let data = provider.current_weather(&input.city).await?;

    let weather = ConditionSummary {
        main: data
            .condition()
            .map(|w| w.main.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        description: data.description(),
    };

    Ok(DetailedWeather {
        country: data.sys.country.clone(),
        temperature: TemperatureBreakdown {
            current: data.main.temp,
            feels_like: data.main.feels_like,
            min: data.main.temp_min,
            max: data.main.temp_max,
        },
        weather,
        wind: WindSummary {
            speed: data.wind.speed,
            direction: data.wind.deg,
        },
        humidity: data.main.humidity,
        pressure: data.main.pressure,
        visibility: data.visibility,
        clouds: data.clouds.all,
        sun: SunTimes {
            sunrise: data.sys.sunrise.and_then(iso_timestamp),
            sunset: data.sys.sunset.and_then(iso_timestamp),
        },
        city: data.name,
    })
}

/// All lookups are in flight at once; `join_all` keeps results in input order.
#[instrument(skip(provider))]
pub async fn compare_weather(
    provider: &dyn WeatherProvider,
    input: &CitiesInput,
) -> Result<Comparison, ToolError> {
    let lookups = input.cities.iter().map(|city| observe(provider, city));
    let comparison = join_all(lookups).await;

    Ok(Comparison {
        count: comparison.len(),
        comparison,
    })
}

async fn observe(provider: &dyn WeatherProvider, city: &str) -> CityComparison {
    match provider.current_weather(city).await {
        Ok(data) => CityComparison::Observed(CityObservation {
            temp: data.main.temp,
            feels_like: data.main.feels_like,
            description: data.description(),
            humidity: data.main.humidity,
            wind_speed: data.wind.speed,
            city: data.name,
        }),
        Err(err) => {
            warn!(city, error = %err, "Comparison lookup failed");
            CityComparison::Failed {
                city: city.to_string(),
                error: err.to_string(),
            }
        }
    }
}

#[instrument(skip(provider))]
pub async fn alerts(
    provider: &dyn WeatherProvider,
    input: &CityInput,
) -> Result<AlertsReport, ToolError> {
    let at = locate(provider, &input.city).await?;
    let data = provider.alerts(at).await?;

    Ok(AlertsReport {
        city: input.city.clone(),
        has_alerts: !data.alerts.is_empty(),
        alerts: data.alerts,
    })
}

/// Geocode a city, taking the first candidate.
async fn locate(provider: &dyn WeatherProvider, city: &str) -> Result<Coordinates, ToolError> {
    provider
        .geocode(city)
        .await?
        .first()
        .map(GeoMatch::coordinates)
        .ok_or(ToolError::CityNotFound)
}

/// Epoch seconds as an RFC 3339 UTC timestamp with milliseconds.
fn iso_timestamp(secs: i64) -> Option<String> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn format_timestamp(secs: i64, fmt: &str) -> Option<String> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.format(fmt).to_string())
}
