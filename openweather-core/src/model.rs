use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One formatted weather record: the current conditions, a minutely,
/// hourly or daily forecast entry, or a historical data point.
///
/// Which fields are `Some` depends on the source section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weather {
    pub lat: f64,
    pub lon: f64,
    pub dt: DateTime<Utc>,
    pub dt_raw: i64,
    pub timezone: String,
    pub timezone_offset: i32,
    pub astronomical: Astronomical,
    pub weather: Conditions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Astronomical {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunrise_raw: Option<i64>,
    pub sunset: Option<DateTime<Utc>>,
    pub sunset_raw: Option<i64>,
    pub moonrise: Option<DateTime<Utc>>,
    pub moonrise_raw: Option<i64>,
    pub moonset: Option<DateTime<Utc>>,
    pub moonset_raw: Option<i64>,
    pub moon_phase: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conditions {
    pub temp: Temperatures,
    pub feels_like: Temperatures,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub clouds: Option<f64>,
    pub uvi: Option<f64>,
    pub visibility: Option<f64>,
    pub wind: Wind,
    /// Probability of precipitation, 0 to 1.
    pub pop: Option<f64>,
    /// Millimetres; per hour for current/hourly/minutely, per day for daily.
    pub rain: Option<f64>,
    pub snow: Option<f64>,
    pub condition_id: Option<u32>,
    pub main: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub summary: Option<String>,
}

/// `cur` is set for instants, the rest for daily entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Temperatures {
    pub cur: Option<f64>,
    pub morn: Option<f64>,
    pub day: Option<f64>,
    pub eve: Option<f64>,
    pub night: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Wind {
    pub speed: Option<f64>,
    pub gust: Option<f64>,
    pub deg: Option<f64>,
}

/// A national weather alert, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub sender_name: String,
    pub event: String,
    pub start: i64,
    pub end: i64,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Alert {
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.start)
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.end)
    }
}

/// Every section of a One Call response, formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Everything {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    pub timezone_offset: i32,
    pub current: Option<Weather>,
    pub minutely: Vec<Weather>,
    pub hourly: Vec<Weather>,
    pub daily: Vec<Weather>,
    pub alerts: Vec<Alert>,
}

/// A geocoding result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: String,
    pub state: Option<String>,
    #[serde(default)]
    pub local_names: HashMap<String, String>,
}

pub(crate) fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// Deep merge where the receiver wins: only its `None` fields are filled
/// from `other`.
pub trait Merge {
    fn merge_from(&mut self, other: &Self);
}

fn fill<T: Clone>(slot: &mut Option<T>, other: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(other);
    }
}

impl Merge for Temperatures {
    fn merge_from(&mut self, other: &Self) {
        fill(&mut self.cur, &other.cur);
        fill(&mut self.morn, &other.morn);
        fill(&mut self.day, &other.day);
        fill(&mut self.eve, &other.eve);
        fill(&mut self.night, &other.night);
        fill(&mut self.min, &other.min);
        fill(&mut self.max, &other.max);
    }
}

impl Merge for Wind {
    fn merge_from(&mut self, other: &Self) {
        fill(&mut self.speed, &other.speed);
        fill(&mut self.gust, &other.gust);
        fill(&mut self.deg, &other.deg);
    }
}

impl Merge for Astronomical {
    fn merge_from(&mut self, other: &Self) {
        fill(&mut self.sunrise, &other.sunrise);
        fill(&mut self.sunrise_raw, &other.sunrise_raw);
        fill(&mut self.sunset, &other.sunset);
        fill(&mut self.sunset_raw, &other.sunset_raw);
        fill(&mut self.moonrise, &other.moonrise);
        fill(&mut self.moonrise_raw, &other.moonrise_raw);
        fill(&mut self.moonset, &other.moonset);
        fill(&mut self.moonset_raw, &other.moonset_raw);
        fill(&mut self.moon_phase, &other.moon_phase);
    }
}

impl Merge for Conditions {
    fn merge_from(&mut self, other: &Self) {
        self.temp.merge_from(&other.temp);
        self.feels_like.merge_from(&other.feels_like);
        fill(&mut self.pressure, &other.pressure);
        fill(&mut self.humidity, &other.humidity);
        fill(&mut self.dew_point, &other.dew_point);
        fill(&mut self.clouds, &other.clouds);
        fill(&mut self.uvi, &other.uvi);
        fill(&mut self.visibility, &other.visibility);
        self.wind.merge_from(&other.wind);
        fill(&mut self.pop, &other.pop);
        fill(&mut self.rain, &other.rain);
        fill(&mut self.snow, &other.snow);
        fill(&mut self.condition_id, &other.condition_id);
        fill(&mut self.main, &other.main);
        fill(&mut self.description, &other.description);
        fill(&mut self.icon, &other.icon);
        fill(&mut self.summary, &other.summary);
    }
}

impl Merge for Weather {
    /// Location and timestamp always come from the receiver.
    fn merge_from(&mut self, other: &Self) {
        self.astronomical.merge_from(&other.astronomical);
        self.weather.merge_from(&other.weather);
    }
}

/// Combine several records into one. When a field is set in more than one
/// record, the earliest record in `weathers` wins.
///
/// Typical use is layering `current` over today's daily entry to get one
/// record with both the current temperature and the day's min/max.
pub fn merge_weathers(weathers: &[Weather]) -> Option<Weather> {
    let (first, rest) = weathers.split_first()?;

    let mut merged = first.clone();
    for weather in rest {
        merged.merge_from(weather);
    }
    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(dt: i64) -> Weather {
        Weather {
            lat: 1.0,
            lon: 2.0,
            dt: unix_to_utc(dt).unwrap(),
            dt_raw: dt,
            timezone: "Etc/UTC".to_string(),
            timezone_offset: 0,
            astronomical: Astronomical::default(),
            weather: Conditions::default(),
        }
    }

    #[test]
    fn merge_of_nothing_is_none() {
        assert_eq!(merge_weathers(&[]), None);
    }

    #[test]
    fn earliest_record_wins_on_conflicts() {
        let mut a = weather(100);
        a.weather.temp.cur = Some(21.0);

        let mut b = weather(200);
        b.weather.temp.cur = Some(15.0);
        b.weather.temp.min = Some(10.0);
        b.weather.description = Some("light rain".to_string());

        let mut c = weather(300);
        c.weather.temp.min = Some(5.0);
        c.weather.temp.max = Some(25.0);
        c.weather.description = Some("clear sky".to_string());
        c.astronomical.moon_phase = Some(0.5);

        let merged = merge_weathers(&[a, b, c]).unwrap();

        assert_eq!(merged.dt_raw, 100);
        assert_eq!(merged.weather.temp.cur, Some(21.0));
        assert_eq!(merged.weather.temp.min, Some(10.0));
        assert_eq!(merged.weather.temp.max, Some(25.0));
        assert_eq!(merged.weather.description.as_deref(), Some("light rain"));
        assert_eq!(merged.astronomical.moon_phase, Some(0.5));
    }

    #[test]
    fn merge_is_deep() {
        let mut a = weather(1);
        a.weather.wind.speed = Some(3.0);

        let mut b = weather(2);
        b.weather.wind.speed = Some(9.0);
        b.weather.wind.gust = Some(12.0);

        let merged = merge_weathers(&[a, b]).unwrap();
        assert_eq!(merged.weather.wind.speed, Some(3.0));
        assert_eq!(merged.weather.wind.gust, Some(12.0));
    }

    #[test]
    fn alert_deserializes_without_tags() {
        let alert: Alert = serde_json::from_str(
            r#"{"sender_name":"NWS","event":"Heat","start":1684952747,"end":1684988747,"description":"hot"}"#,
        )
        .unwrap();

        assert!(alert.tags.is_empty());
        assert_eq!(alert.starts_at().unwrap().timestamp(), 1_684_952_747);
    }
}
