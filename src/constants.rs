use std::time::Duration;

/// User agent string sent to the National Weather Service
pub const USER_AGENT: &str = "weather-app/1.0";

/// Accept header value for NWS alert feeds
pub const GEO_JSON: &str = "application/geo+json";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// OpenWeatherMap API base URL
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Environment variable holding the OpenWeatherMap API key
pub const OPENWEATHER_API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Upper bound on a single upstream request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of 3-hour periods rendered by the forecast tool
pub const FORECAST_PERIODS: usize = 5;
