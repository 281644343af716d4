use anyhow::Result;
use chrono::Local;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::Settings;
use crate::constants::{self, GEO_JSON};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::formatters::{
    format_alerts, format_forecast, ALERTS_UNAVAILABLE, FORECAST_UNAVAILABLE, MISSING_API_KEY,
};
use crate::models::{
    AlertResponse, ForecastResponse, ForecastStatus, GetAlertsRequest, GetForecastRequest,
};

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    fetcher: Arc<dyn Fetcher>,
    settings: Arc<Settings>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service backed by a real HTTP client
    pub fn new(settings: Settings) -> Result<Self> {
        let fetcher = HttpFetcher::new(settings.timeout)?;
        Ok(Self::with_fetcher(settings, Arc::new(fetcher)))
    }

    /// Creates a Weather service that issues requests through `fetcher`
    pub fn with_fetcher(settings: Settings, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            settings: Arc::new(settings),
            tool_router: Self::tool_router(),
        }
    }

    /// Active NWS alerts for a state, rendered as text
    pub async fn alerts_report(&self, state: &str) -> String {
        let url = format!("{}/alerts/active/area/{}", self.settings.nws_api_base, state);

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let body = match self.fetcher.get_json(&url, headers).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(state, error = %e, "alerts request failed");
                return ALERTS_UNAVAILABLE.to_string();
            }
        };

        if !body.is_object() {
            tracing::warn!(state, "alerts response was not a JSON object");
            return ALERTS_UNAVAILABLE.to_string();
        }

        match AlertResponse::deserialize(&body) {
            Ok(AlertResponse {
                features: Some(features),
            }) => format_alerts(&features),
            Ok(_) => ALERTS_UNAVAILABLE.to_string(),
            Err(e) => {
                tracing::warn!(state, error = %e, "alerts response did not parse");
                ALERTS_UNAVAILABLE.to_string()
            }
        }
    }

    /// Next few forecast periods for a location, in the server's local time
    pub async fn forecast_report(&self, latitude: f64, longitude: f64) -> String {
        match self.fetch_forecast(latitude, longitude).await {
            Ok(forecast) => format_forecast(&forecast, &Local),
            Err(message) => message,
        }
    }

    /// Fetches and parses an OpenWeatherMap forecast.
    ///
    /// The error value is the text shown to the caller in place of a report.
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> std::result::Result<ForecastResponse, String> {
        let Some(api_key) = self.settings.api_key.resolve() else {
            tracing::warn!("no OpenWeatherMap API key configured");
            return Err(MISSING_API_KEY.to_string());
        };

        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.settings.openweather_api_base, latitude, longitude, api_key
        );

        let body = self
            .fetcher
            .get_json(&url, HeaderMap::new())
            .await
            .map_err(|e| {
                tracing::warn!(latitude, longitude, error = %e, "forecast request failed");
                FORECAST_UNAVAILABLE.to_string()
            })?;

        if !body.as_object().is_some_and(|fields| !fields.is_empty()) {
            tracing::warn!(latitude, longitude, "forecast response was empty or not a JSON object");
            return Err(FORECAST_UNAVAILABLE.to_string());
        }

        if let Ok(status) = ForecastStatus::deserialize(&body) {
            if let Some(message) = status.error_message() {
                tracing::debug!(cod = ?status.cod, "forecast API reported an error");
                return Err(format!("Unable to fetch forecast: {}", message));
            }
        }

        ForecastResponse::deserialize(&body).map_err(|e| {
            tracing::warn!(latitude, longitude, error = %e, "forecast response did not parse");
            FORECAST_UNAVAILABLE.to_string()
        })
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather alerts for US states from the National Weather Service and \
                short-range forecasts for any location from OpenWeatherMap."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets active weather alerts for a US state
    #[tool(description = "Get weather alerts for a US state. Provide a two-letter US state code (e.g. CA, NY).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);

        let report = self.alerts_report(&request.state).await;

        Ok(CallToolResult::success(vec![Content::text(report)]))
    }

    /// Gets the next 15 hours of forecast for a location
    #[tool(description = "Get weather forecast for a location. Provide latitude and longitude (e.g. latitude: 52.52, longitude: 13.41 for Berlin). Returns the next five 3-hour periods.")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let report = self
            .forecast_report(request.latitude, request.longitude)
            .await;

        Ok(CallToolResult::success(vec![Content::text(report)]))
    }
}
