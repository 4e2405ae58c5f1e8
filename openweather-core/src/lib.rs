//! Client library for the OpenWeather One Call API.
//!
//! This crate defines:
//! - Validated client options, with defaults and per-call overrides
//! - Location resolution through the geocoding API
//! - Request construction, fetching and error classification
//! - Formatting of raw responses into [`Weather`] records
//!
//! ```no_run
//! use openweather_core::{Options, WeatherClient};
//!
//! # async fn run() -> Result<(), openweather_core::WeatherError> {
//! let options = Options::new()
//!     .with_key("your-api-key")?
//!     .with_units("metric")?
//!     .with_location_name("Paris")?;
//! let client = WeatherClient::new(options);
//!
//! let now = client.get_current(&Options::new()).await?;
//! let week = client.get_daily_forecast(Some(7), false, &Options::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod format;
mod geocoding;
pub mod language;
pub mod model;
pub mod options;
pub mod payload;
pub mod request;
pub mod transport;
pub mod units;

pub use client::WeatherClient;
pub use config::Config;
pub use error::WeatherError;
pub use language::Language;
pub use model::{Alert, Everything, GeoLocation, Weather, merge_weathers};
pub use options::{Coordinates, GlobalOptions, Location, Options};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use units::Units;
