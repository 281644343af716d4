use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

// ============================================================================
// National Weather Service API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AlertResponse {
    pub features: Option<Vec<AlertFeature>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    pub properties: Option<AlertProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertProperties {
    pub event: Option<String>,
    #[serde(rename = "areaDesc")]
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
}

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

/// Status envelope present on every forecast response, including errors.
///
/// OpenWeatherMap reports `cod` as the string `"200"` on success and carries
/// the failure reason in `message` otherwise. Any other `cod`, including the
/// number `200`, is a failure.
#[derive(Debug, Deserialize)]
pub struct ForecastStatus {
    pub cod: Option<Value>,
    pub message: Option<Value>,
}

impl ForecastStatus {
    /// Returns the upstream failure reason when `cod` signals an error
    pub fn error_message(&self) -> Option<String> {
        let cod = self.cod.as_ref()?;
        if cod.as_str() == Some("200") {
            return None;
        }

        let message = match &self.message {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => "Unknown error".to_string(),
            Some(other) => other.to_string(),
        };
        Some(message)
    }
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub city: Option<City>,
    pub list: Option<Vec<ForecastPeriod>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct City {
    pub name: Option<String>,
    pub country: Option<String>,
}

/// One 3-hour forecast sample.
///
/// Measurements stay as JSON numbers so they render exactly as upstream wrote
/// them.
#[derive(Debug, Deserialize)]
pub struct ForecastPeriod {
    pub dt: i64,
    pub main: PeriodMain,
    #[serde(default)]
    pub weather: Vec<PeriodWeather>,
    pub wind: Option<Wind>,
}

#[derive(Debug, Deserialize)]
pub struct PeriodMain {
    pub temp: Number,
    pub feels_like: Number,
    pub humidity: Number,
}

#[derive(Debug, Deserialize)]
pub struct PeriodWeather {
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Wind {
    pub speed: Option<Number>,
    pub deg: Option<f64>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter US state code (e.g. CA, NY)
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of the location
    pub latitude: f64,
    /// Longitude of the location
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(body: Value) -> ForecastStatus {
        serde_json::from_value(body).expect("status envelope should parse")
    }

    #[test]
    fn success_code_has_no_error() {
        assert_eq!(status(json!({ "cod": "200", "message": 0 })).error_message(), None);
        assert_eq!(status(json!({})).error_message(), None);
    }

    #[test]
    fn error_code_carries_upstream_message() {
        let body = json!({ "cod": "404", "message": "city not found" });
        assert_eq!(status(body).error_message().as_deref(), Some("city not found"));
    }

    #[test]
    fn numeric_success_code_is_an_error() {
        assert_eq!(
            status(json!({ "cod": 200, "message": "x" })).error_message().as_deref(),
            Some("x")
        );
    }

    #[test]
    fn error_code_without_message_is_unknown() {
        assert_eq!(
            status(json!({ "cod": 401 })).error_message().as_deref(),
            Some("Unknown error")
        );
    }

    #[test]
    fn alert_properties_are_all_optional() {
        let feature: AlertFeature = serde_json::from_value(json!({
            "properties": { "event": "Flood Watch" }
        }))
        .expect("feature should parse");
        let props = feature.properties.expect("properties present");
        assert_eq!(props.event.as_deref(), Some("Flood Watch"));
        assert!(props.area_desc.is_none());
        assert!(props.instruction.is_none());
    }

    #[test]
    fn period_without_wind_parses() {
        let period: ForecastPeriod = serde_json::from_value(json!({
            "dt": 1_700_000_000,
            "main": { "temp": 12.0, "feels_like": 10.5, "humidity": 80 },
            "weather": [{ "description": "light rain" }]
        }))
        .expect("period should parse");
        assert!(period.wind.is_none());
        assert_eq!(period.main.temp.to_string(), "12.0");
        assert_eq!(period.main.humidity.to_string(), "80");
    }
}
