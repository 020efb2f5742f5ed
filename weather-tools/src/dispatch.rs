//! Envelope decoding, tool selection and the error-to-status mapping.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};
use std::{convert::TryFrom, sync::Arc};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    provider::WeatherProvider,
    tool::{CitiesInput, CityInput, Operation, ToolError, ValidationError, handlers},
};

/// `{ "tool": "<name>", "input": { ... } }`
#[derive(Debug)]
struct Envelope {
    tool: Option<String>,
    input: Value,
}

impl Envelope {
    /// Only a JSON object carries a tool name. Any other non-null value is
    /// an envelope without one; `null` cannot be read at all.
    fn from_body(body: &[u8]) -> Result<Self, DispatchError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| DispatchError::MalformedEnvelope(e.to_string()))?;

        match value {
            Value::Object(mut fields) => Ok(Self {
                tool: match fields.remove("tool") {
                    Some(Value::String(name)) => Some(name),
                    _ => None,
                },
                input: fields.remove("input").unwrap_or(Value::Null),
            }),
            Value::Null => Err(DispatchError::MalformedEnvelope(
                "request body must be a JSON object, got null".to_string(),
            )),
            _ => Ok(Self {
                tool: None,
                input: Value::Null,
            }),
        }
    }
}

/// Status and JSON body to send back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: error_body(message),
        }
    }
}

fn error_body(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    MalformedEnvelope(String),

    #[error("Tool not found")]
    UnknownTool,

    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    /// The provider could not be reached or answered with something unreadable.
    #[error(transparent)]
    Upstream(ToolError),

    #[error("Failed to encode tool result: {0}")]
    Encode(String),
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::MalformedEnvelope(_)
            | DispatchError::InvalidInput(_)
            | DispatchError::Upstream(_) => StatusCode::BAD_REQUEST,
            DispatchError::UnknownTool => StatusCode::NOT_FOUND,
            DispatchError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Routes envelopes to tool handlers. Cheap to clone; holds no per-request state.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    provider: Arc<dyn WeatherProvider>,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Handle one raw request body.
    pub async fn dispatch(&self, body: &[u8]) -> Reply {
        match self.try_dispatch(body).await {
            Ok(payload) => Reply::ok(payload),
            Err(err) => {
                let status = err.status();
                warn!(%status, error = %err, "Tool call failed");
                Reply::error(status, err.to_string())
            }
        }
    }

    async fn try_dispatch(&self, body: &[u8]) -> Result<Value, DispatchError> {
        let envelope = Envelope::from_body(body)?;

        let operation = envelope
            .tool
            .as_deref()
            .and_then(|name| Operation::try_from(name).ok())
            .ok_or(DispatchError::UnknownTool)?;

        self.run(operation, &envelope.input).await
    }

    /// Validate `input` for `operation` and run its handler.
    ///
    /// Logical tool failures come back as `Ok({"error": ...})`.
    pub async fn run(&self, operation: Operation, input: &Value) -> Result<Value, DispatchError> {
        info!(tool = %operation, "Dispatching tool call");
        let provider = self.provider.as_ref();

        match operation {
            Operation::CurrentWeather => {
                let input = CityInput::parse(input)?;
                render(handlers::current_weather(provider, &input).await)
            }
            Operation::Forecast => {
                let input = CityInput::parse(input)?;
                render(handlers::forecast(provider, &input).await)
            }
            Operation::AirQuality => {
                let input = CityInput::parse(input)?;
                render(handlers::air_quality(provider, &input).await)
            }
            Operation::DetailedWeather => {
                let input = CityInput::parse(input)?;
                render(handlers::detailed_weather(provider, &input).await)
            }
            Operation::CompareWeather => {
                let input = CitiesInput::parse(input)?;
                render(handlers::compare_weather(provider, &input).await)
            }
            Operation::Alerts => {
                let input = CityInput::parse(input)?;
                render(handlers::alerts(provider, &input).await)
            }
        }
    }
}

fn render<T: Serialize>(outcome: Result<T, ToolError>) -> Result<Value, DispatchError> {
    match outcome {
        Ok(payload) => {
            serde_json::to_value(payload).map_err(|e| DispatchError::Encode(e.to_string()))
        }
        Err(err) if err.is_logical() => Ok(error_body(err.to_string())),
        Err(err) => Err(DispatchError::Upstream(err)),
    }
}
