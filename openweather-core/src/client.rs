use chrono::{DateTime, Utc};
use reqwest::Url;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument};

use crate::{
    error::{Result, WeatherError},
    format::{
        format_current, format_daily, format_everything, format_history, format_hourly,
        format_minutely,
    },
    geocoding::{lookup_coordinates, reverse_lookup},
    language::Language,
    model::{Alert, Everything, GeoLocation, Weather},
    options::{Coordinates, EffectiveOptions, GlobalOptions, Location, Options},
    payload::{OneCallPayload, TimeMachinePayload},
    request::{API_BASE_URL, Section, onecall_url, timemachine_url},
    transport::{HttpTransport, ReqwestTransport, decode, fetch},
    units::Units,
};

/// Client for the One Call API.
///
/// Holds default options used by every call. Each `get_*` method takes
/// per-call overrides which win field by field and never change the
/// defaults. When the default location is a name, its coordinates are
/// geocoded on first use and cached until the location is reassigned.
#[derive(Debug)]
pub struct WeatherClient {
    global: Options,
    resolved: Mutex<Option<Coordinates>>,
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
}

impl WeatherClient {
    pub fn new(options: Options) -> Self {
        Self::with_transport(options, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(options: Options, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            global: options,
            resolved: Mutex::new(None),
            transport,
            base_url: Url::parse(API_BASE_URL).expect("API_BASE_URL is a valid URL"),
        }
    }

    /// Construct from untyped options, rejecting unknown keys.
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(Self::new(Options::from_json(value)?))
    }

    /// Send requests to another host, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn set_key(&mut self, key: impl Into<String>) -> Result<()> {
        self.global.set_key(key)
    }

    pub fn set_language(&mut self, language: &str) -> Result<()> {
        self.global.set_language(language)
    }

    pub fn set_units(&mut self, units: &str) -> Result<()> {
        self.global.set_units(units)
    }

    /// Replaces any coordinates and drops the cached geocoding result.
    pub fn set_location_by_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.global.set_location_name(name)?;
        self.clear_resolved();
        Ok(())
    }

    /// Replaces any location name.
    pub fn set_location_by_coordinates(&mut self, lat: f64, lon: f64) -> Result<()> {
        self.global.set_coordinates(lat, lon)?;
        self.clear_resolved();
        Ok(())
    }

    pub fn key(&self) -> Option<&str> {
        self.global.key()
    }

    pub fn language(&self) -> Option<Language> {
        self.global.language()
    }

    pub fn units(&self) -> Option<Units> {
        self.global.units()
    }

    pub fn location_name(&self) -> Option<&str> {
        self.global.location_name()
    }

    /// Explicit coordinates, or the cached result of geocoding the
    /// location name.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.global.coordinates().or_else(|| *self.lock_resolved())
    }

    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            key: self.global.key().map(str::to_string),
            language: self.global.language(),
            units: self.global.units(),
            location_name: self.global.location_name().map(str::to_string),
            coordinates: self.coordinates(),
        }
    }

    #[instrument(skip(self, options))]
    pub async fn get_current(&self, options: &Options) -> Result<Weather> {
        let payload = self.fetch_onecall(options, &Section::all_except(Section::Current)).await?;
        format_current(&payload).ok_or_else(|| {
            WeatherError::MalformedResponse("response has no current section".into())
        })
    }

    /// Up to `limit` minutes of precipitation forecast, all when `None`.
    #[instrument(skip(self, options))]
    pub async fn get_minutely_forecast(
        &self,
        limit: Option<usize>,
        options: &Options,
    ) -> Result<Vec<Weather>> {
        let payload = self.fetch_onecall(options, &Section::all_except(Section::Minutely)).await?;
        Ok(format_minutely(&payload, limit.unwrap_or(usize::MAX)))
    }

    #[instrument(skip(self, options))]
    pub async fn get_hourly_forecast(
        &self,
        limit: Option<usize>,
        options: &Options,
    ) -> Result<Vec<Weather>> {
        let payload = self.fetch_onecall(options, &Section::all_except(Section::Hourly)).await?;
        Ok(format_hourly(&payload, limit.unwrap_or(usize::MAX)))
    }

    /// Daily forecast starting tomorrow, or today when `include_today`.
    #[instrument(skip(self, options))]
    pub async fn get_daily_forecast(
        &self,
        limit: Option<usize>,
        include_today: bool,
        options: &Options,
    ) -> Result<Vec<Weather>> {
        let payload = self.fetch_onecall(options, &Section::all_except(Section::Daily)).await?;
        Ok(format_daily(&payload, limit.unwrap_or(usize::MAX), include_today))
    }

    /// Today's daily entry.
    pub async fn get_today(&self, options: &Options) -> Result<Weather> {
        self.get_daily_forecast(Some(1), true, options)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::MalformedResponse("response has no daily entries".into()))
    }

    #[instrument(skip(self, options))]
    pub async fn get_alerts(&self, options: &Options) -> Result<Vec<Alert>> {
        let payload = self.fetch_onecall(options, &Section::all_except(Section::Alerts)).await?;
        Ok(payload.alerts.unwrap_or_default())
    }

    #[instrument(skip(self, options))]
    pub async fn get_everything(&self, options: &Options) -> Result<Everything> {
        let payload = self.fetch_onecall(options, &[]).await?;
        Ok(format_everything(&payload))
    }

    /// Reverse-geocode the effective location.
    #[instrument(skip(self, options))]
    pub async fn get_location(&self, options: &Options) -> Result<Option<GeoLocation>> {
        let (effective, coords) = self.resolve(options).await?;
        reverse_lookup(self.transport.as_ref(), &self.base_url, &effective.key, coords).await
    }

    /// Historical conditions at `dt`.
    #[instrument(skip(self, options))]
    pub async fn get_history(&self, dt: DateTime<Utc>, options: &Options) -> Result<Vec<Weather>> {
        let (effective, coords) = self.resolve(options).await?;
        let url = timemachine_url(&self.base_url, &effective, coords, dt.timestamp());

        let payload: TimeMachinePayload = decode(fetch(self.transport.as_ref(), &url).await?)?;
        Ok(format_history(&payload))
    }

    async fn fetch_onecall(
        &self,
        options: &Options,
        exclude: &[Section],
    ) -> Result<OneCallPayload> {
        let (effective, coords) = self.resolve(options).await?;
        let url = onecall_url(&self.base_url, &effective, coords, exclude);

        decode(fetch(self.transport.as_ref(), &url).await?)
    }

    /// Merge and validate options, then pin down coordinates.
    async fn resolve(&self, overrides: &Options) -> Result<(EffectiveOptions, Coordinates)> {
        let effective = EffectiveOptions::resolve(&self.global, overrides)?;
        let coords = self.resolve_location(&effective.key, overrides).await?;
        Ok((effective, coords))
    }

    async fn resolve_location(&self, key: &str, overrides: &Options) -> Result<Coordinates> {
        match overrides.location() {
            Some(Location::Coordinates(coords)) => return Ok(*coords),
            Some(Location::Name(name)) => {
                return lookup_coordinates(self.transport.as_ref(), &self.base_url, key, name).await;
            }
            None => {}
        }

        match self.global.location() {
            Some(Location::Coordinates(coords)) => Ok(*coords),
            Some(Location::Name(name)) => {
                let cached = *self.lock_resolved();
                if let Some(coords) = cached {
                    debug!(name = %name, "using cached coordinates");
                    return Ok(coords);
                }

                let coords =
                    lookup_coordinates(self.transport.as_ref(), &self.base_url, key, name).await?;
                *self.lock_resolved() = Some(coords);
                Ok(coords)
            }
            None => Err(WeatherError::MissingLocation),
        }
    }

    fn lock_resolved(&self) -> MutexGuard<'_, Option<Coordinates>> {
        self.resolved.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn clear_resolved(&mut self) {
        *self.resolved.get_mut().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
