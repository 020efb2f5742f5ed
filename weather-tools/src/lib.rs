//! Core library for the weather tool router.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider abstraction and its typed response models
//! - The tool catalogue: input shapes, handlers and output payloads
//! - The dispatcher that turns a `{tool, input}` envelope into a status and JSON body
//!
//! It is used by `weather-server`, but carries no HTTP server of its own.

pub mod config;
pub mod dispatch;
pub mod model;
pub mod provider;
pub mod tool;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use dispatch::{DispatchError, Dispatcher, Reply};
pub use provider::{ProviderError, WeatherProvider, openweather::OpenWeatherProvider};
pub use tool::{Operation, ToolError};
