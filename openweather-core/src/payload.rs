//! Upstream JSON shapes, as returned by the One Call 3.0 endpoints.
//!
//! Almost every measurement is optional: sections are trimmed by the
//! exclusion list and the API leaves out fields it has no data for.

use serde::Deserialize;

use crate::model::Alert;

#[derive(Debug, Clone, Deserialize)]
pub struct OneCallPayload {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    pub timezone_offset: i32,
    pub current: Option<RawPoint>,
    pub minutely: Option<Vec<RawMinutely>>,
    pub hourly: Option<Vec<RawPoint>>,
    pub daily: Option<Vec<RawDaily>>,
    pub alerts: Option<Vec<Alert>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeMachinePayload {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    pub timezone_offset: i32,
    #[serde(default)]
    pub data: Vec<RawPoint>,
}

/// A single instant: the `current` block, an `hourly` entry or a
/// `timemachine` data entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPoint {
    pub dt: i64,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub uvi: Option<f64>,
    pub clouds: Option<f64>,
    pub visibility: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_deg: Option<f64>,
    pub wind_gust: Option<f64>,
    pub pop: Option<f64>,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    pub rain: Option<RawPrecipitation>,
    pub snow: Option<RawPrecipitation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMinutely {
    pub dt: i64,
    pub precipitation: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDaily {
    pub dt: i64,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub moonrise: Option<i64>,
    pub moonset: Option<i64>,
    pub moon_phase: Option<f64>,
    pub summary: Option<String>,
    #[serde(default)]
    pub temp: RawDailyTemp,
    #[serde(default)]
    pub feels_like: RawDailyTemp,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_deg: Option<f64>,
    pub wind_gust: Option<f64>,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    pub clouds: Option<f64>,
    pub pop: Option<f64>,
    pub rain: Option<f64>,
    pub snow: Option<f64>,
    pub uvi: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDailyTemp {
    pub morn: Option<f64>,
    pub day: Option<f64>,
    pub eve: Option<f64>,
    pub night: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// `{"1h": 0.25}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawPrecipitation {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}
