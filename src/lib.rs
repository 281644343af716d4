//! MCP server exposing National Weather Service alerts and OpenWeatherMap
//! forecasts as tools.
//!
//! Both tools always answer with text: upstream failures, a missing API key,
//! and empty results each map to a fixed message rather than a protocol error.

pub mod config;
pub mod constants;
pub mod fetch;
pub mod formatters;
pub mod models;
pub mod service;

pub use config::{ApiKeySource, Settings};
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use service::Weather;
