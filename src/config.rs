use std::{env, time::Duration};

use crate::constants::{
    NWS_API_BASE, OPENWEATHER_API_BASE, OPENWEATHER_API_KEY_VAR, REQUEST_TIMEOUT,
};

/// Where the OpenWeatherMap API key comes from.
///
/// The key is resolved on every forecast call, so exporting it into a running
/// server's environment takes effect without a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    /// Read the named environment variable at call time
    Env(String),
    /// A fixed value, mostly useful for tests and embedding
    Fixed(Option<String>),
}

impl ApiKeySource {
    /// Returns the key, treating an empty value the same as a missing one.
    pub fn resolve(&self) -> Option<String> {
        let key = match self {
            ApiKeySource::Env(var) => env::var(var).ok(),
            ApiKeySource::Fixed(key) => key.clone(),
        };
        key.filter(|k| !k.is_empty())
    }
}

impl Default for ApiKeySource {
    fn default() -> Self {
        ApiKeySource::Env(OPENWEATHER_API_KEY_VAR.to_string())
    }
}

/// Server settings, built once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub nws_api_base: String,
    pub openweather_api_base: String,
    pub api_key: ApiKeySource,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nws_api_base: NWS_API_BASE.to_string(),
            openweather_api_base: OPENWEATHER_API_BASE.to_string(),
            api_key: ApiKeySource::default(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Settings {
    /// Builds settings from the process environment.
    ///
    /// `NWS_API_BASE` and `OPENWEATHER_API_BASE` override the upstream base
    /// URLs. The API key itself is not read here.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            nws_api_base: base_url_var("NWS_API_BASE").unwrap_or(defaults.nws_api_base),
            openweather_api_base: base_url_var("OPENWEATHER_API_BASE")
                .unwrap_or(defaults.openweather_api_base),
            ..defaults
        }
    }
}

fn base_url_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_key_resolves() {
        let source = ApiKeySource::Fixed(Some("KEY".into()));
        assert_eq!(source.resolve(), Some("KEY".to_string()));
    }

    #[test]
    fn empty_key_counts_as_missing() {
        assert_eq!(ApiKeySource::Fixed(Some(String::new())).resolve(), None);
        assert_eq!(ApiKeySource::Fixed(None).resolve(), None);
    }

    #[test]
    fn whitespace_key_is_passed_through() {
        let source = ApiKeySource::Fixed(Some("  ".into()));
        assert_eq!(source.resolve(), Some("  ".to_string()));
    }

    #[test]
    fn unset_env_var_resolves_to_none() {
        let source = ApiKeySource::Env("WEATHER_MCP_TEST_KEY_THAT_IS_NEVER_SET".into());
        assert_eq!(source.resolve(), None);
    }

    #[test]
    fn default_settings_point_at_public_apis() {
        let settings = Settings::default();
        assert_eq!(settings.nws_api_base, "https://api.weather.gov");
        assert_eq!(
            settings.openweather_api_base,
            "https://api.openweathermap.org/data/2.5"
        );
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(
            settings.api_key,
            ApiKeySource::Env("OPENWEATHER_API_KEY".into())
        );
    }
}
