use chrono::{DateTime, TimeZone};

use crate::constants::FORECAST_PERIODS;
use crate::models::{AlertFeature, AlertProperties, ForecastPeriod, ForecastResponse};

pub const ALERTS_UNAVAILABLE: &str = "Unable to fetch alerts or no alerts found.";
pub const NO_ACTIVE_ALERTS: &str = "No active alerts for this state.";
pub const FORECAST_UNAVAILABLE: &str = "Unable to fetch forecast data for this location.";
pub const NO_FORECAST_DATA: &str = "No forecast data available.";
pub const MISSING_API_KEY: &str =
    "Error: OPENWEATHER_API_KEY not found in .env file. Please add it to your .env file.";

const DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Formats a single alert feature into a text block
pub fn format_alert(feature: &AlertFeature) -> String {
    let fallback = AlertProperties::default();
    let props = feature.properties.as_ref().unwrap_or(&fallback);

    format!(
        "\nEvent: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}\n",
        props.event.as_deref().unwrap_or("Unknown"),
        props.area_desc.as_deref().unwrap_or("Unknown"),
        props.severity.as_deref().unwrap_or("Unknown"),
        props.description.as_deref().unwrap_or("No description available"),
        props
            .instruction
            .as_deref()
            .unwrap_or("No specific instructions provided"),
    )
}

/// Formats every alert, separated by `---` lines
pub fn format_alerts(features: &[AlertFeature]) -> String {
    if features.is_empty() {
        return NO_ACTIVE_ALERTS.to_string();
    }

    features
        .iter()
        .map(format_alert)
        .collect::<Vec<_>>()
        .join("\n---\n")
}

/// Formats the next few forecast periods, rendering timestamps in `tz`
pub fn format_forecast<Tz>(forecast: &ForecastResponse, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let periods = match forecast.list.as_deref() {
        Some(periods) if !periods.is_empty() => periods,
        _ => return NO_FORECAST_DATA.to_string(),
    };

    let city = forecast.city.as_ref();
    let name = city.and_then(|c| c.name.as_deref()).unwrap_or("Unknown");
    let mut location = format!("Forecast for {}", name);
    if let Some(country) = city.and_then(|c| c.country.as_deref()) {
        if !country.is_empty() {
            location.push_str(&format!(", {}", country));
        }
    }

    let mut lines = vec![location, "=".repeat(50)];
    lines.extend(
        periods
            .iter()
            .take(FORECAST_PERIODS)
            .map(|period| format_period(period, tz)),
    );
    lines.join("\n")
}

fn format_period<Tz>(period: &ForecastPeriod, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let when = DateTime::from_timestamp(period.dt, 0)
        .map(|utc| {
            utc.with_timezone(tz)
                .format("%A, %B %d at %I:%M %p")
                .to_string()
        })
        .unwrap_or_else(|| period.dt.to_string());

    let description = period
        .weather
        .first()
        .map(|w| title_case(&w.description))
        .unwrap_or_else(|| "Unknown".to_string());

    let wind = period.wind.as_ref();
    let speed = wind
        .and_then(|w| w.speed.as_ref())
        .map(ToString::to_string)
        .unwrap_or_else(|| "0".to_string());
    let direction = wind_direction(wind.and_then(|w| w.deg));

    format!(
        "\n{}:\nTemperature: {}\u{00b0}C (feels like {}\u{00b0}C)\nWeather: {}\nHumidity: {}%\nWind: {} m/s {}\n",
        when,
        period.main.temp,
        period.main.feels_like,
        description,
        period.main.humidity,
        speed,
        direction
    )
}

/// Converts a wind bearing into one of 16 compass labels.
///
/// A missing or zero bearing reports `N/A`, so due north never renders as `N`
/// from an exact `0`.
pub fn wind_direction(degrees: Option<f64>) -> &'static str {
    match degrees {
        Some(deg) if deg != 0.0 => {
            let bucket = ((deg + 11.25) / 22.5).trunc() as i64;
            DIRECTIONS[bucket.rem_euclid(16) as usize]
        }
        _ => "N/A",
    }
}

/// Capitalizes the first letter of every alphabetic run, lower-casing the rest
pub fn title_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            output.push(ch);
            in_word = false;
        }
    }
    output
}
