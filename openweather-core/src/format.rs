use crate::{
    model::{Astronomical, Conditions, Everything, Temperatures, Weather, Wind, unix_to_utc},
    payload::{OneCallPayload, RawCondition, RawDaily, RawMinutely, RawPoint, TimeMachinePayload},
};

/// Location fields every formatted record repeats.
struct Place<'a> {
    lat: f64,
    lon: f64,
    timezone: &'a str,
    timezone_offset: i32,
}

impl Place<'_> {
    fn weather(&self, dt: i64, astronomical: Astronomical, weather: Conditions) -> Weather {
        Weather {
            lat: self.lat,
            lon: self.lon,
            dt: unix_to_utc(dt).unwrap_or_default(),
            dt_raw: dt,
            timezone: self.timezone.to_string(),
            timezone_offset: self.timezone_offset,
            astronomical,
            weather,
        }
    }
}

impl<'a> From<&'a OneCallPayload> for Place<'a> {
    fn from(payload: &'a OneCallPayload) -> Self {
        Self {
            lat: payload.lat,
            lon: payload.lon,
            timezone: &payload.timezone,
            timezone_offset: payload.timezone_offset,
        }
    }
}

impl<'a> From<&'a TimeMachinePayload> for Place<'a> {
    fn from(payload: &'a TimeMachinePayload) -> Self {
        Self {
            lat: payload.lat,
            lon: payload.lon,
            timezone: &payload.timezone,
            timezone_offset: payload.timezone_offset,
        }
    }
}

fn apply_condition(conditions: &mut Conditions, raw: &[RawCondition]) {
    if let Some(first) = raw.first() {
        conditions.condition_id = Some(first.id);
        conditions.main = Some(first.main.clone());
        conditions.description = Some(first.description.clone());
        conditions.icon = Some(first.icon.clone());
    }
}

fn format_point(place: &Place<'_>, raw: &RawPoint) -> Weather {
    let astronomical = Astronomical {
        sunrise: raw.sunrise.and_then(unix_to_utc),
        sunrise_raw: raw.sunrise,
        sunset: raw.sunset.and_then(unix_to_utc),
        sunset_raw: raw.sunset,
        ..Astronomical::default()
    };

    let mut conditions = Conditions {
        temp: Temperatures { cur: raw.temp, ..Temperatures::default() },
        feels_like: Temperatures { cur: raw.feels_like, ..Temperatures::default() },
        pressure: raw.pressure,
        humidity: raw.humidity,
        dew_point: raw.dew_point,
        clouds: raw.clouds,
        uvi: raw.uvi,
        visibility: raw.visibility,
        wind: Wind { speed: raw.wind_speed, gust: raw.wind_gust, deg: raw.wind_deg },
        pop: raw.pop,
        rain: Some(raw.rain.as_ref().and_then(|r| r.one_hour).unwrap_or(0.0)),
        snow: Some(raw.snow.as_ref().and_then(|s| s.one_hour).unwrap_or(0.0)),
        ..Conditions::default()
    };
    apply_condition(&mut conditions, &raw.weather);

    place.weather(raw.dt, astronomical, conditions)
}

fn format_minute(place: &Place<'_>, raw: &RawMinutely) -> Weather {
    let conditions = Conditions { rain: raw.precipitation, ..Conditions::default() };
    place.weather(raw.dt, Astronomical::default(), conditions)
}

fn format_day(place: &Place<'_>, raw: &RawDaily) -> Weather {
    let astronomical = Astronomical {
        sunrise: raw.sunrise.and_then(unix_to_utc),
        sunrise_raw: raw.sunrise,
        sunset: raw.sunset.and_then(unix_to_utc),
        sunset_raw: raw.sunset,
        moonrise: raw.moonrise.and_then(unix_to_utc),
        moonrise_raw: raw.moonrise,
        moonset: raw.moonset.and_then(unix_to_utc),
        moonset_raw: raw.moonset,
        moon_phase: raw.moon_phase,
    };

    let mut conditions = Conditions {
        temp: Temperatures {
            cur: None,
            morn: raw.temp.morn,
            day: raw.temp.day,
            eve: raw.temp.eve,
            night: raw.temp.night,
            min: raw.temp.min,
            max: raw.temp.max,
        },
        feels_like: Temperatures {
            morn: raw.feels_like.morn,
            day: raw.feels_like.day,
            eve: raw.feels_like.eve,
            night: raw.feels_like.night,
            ..Temperatures::default()
        },
        pressure: raw.pressure,
        humidity: raw.humidity,
        dew_point: raw.dew_point,
        clouds: raw.clouds,
        uvi: raw.uvi,
        wind: Wind { speed: raw.wind_speed, gust: raw.wind_gust, deg: raw.wind_deg },
        pop: raw.pop,
        rain: Some(raw.rain.unwrap_or(0.0)),
        snow: Some(raw.snow.unwrap_or(0.0)),
        summary: raw.summary.clone(),
        ..Conditions::default()
    };
    apply_condition(&mut conditions, &raw.weather);

    place.weather(raw.dt, astronomical, conditions)
}

/// `None` when the payload has no `current` section.
pub fn format_current(payload: &OneCallPayload) -> Option<Weather> {
    let place = Place::from(payload);
    payload.current.as_ref().map(|raw| format_point(&place, raw))
}

pub fn format_minutely(payload: &OneCallPayload, limit: usize) -> Vec<Weather> {
    let place = Place::from(payload);
    payload
        .minutely
        .iter()
        .flatten()
        .take(limit)
        .map(|raw| format_minute(&place, raw))
        .collect()
}

pub fn format_hourly(payload: &OneCallPayload, limit: usize) -> Vec<Weather> {
    let place = Place::from(payload);
    payload
        .hourly
        .iter()
        .flatten()
        .take(limit)
        .map(|raw| format_point(&place, raw))
        .collect()
}

/// The first daily entry is today; it is skipped unless `include_today`.
pub fn format_daily(payload: &OneCallPayload, limit: usize, include_today: bool) -> Vec<Weather> {
    let place = Place::from(payload);
    let skip = if include_today { 0 } else { 1 };
    payload
        .daily
        .iter()
        .flatten()
        .skip(skip)
        .take(limit)
        .map(|raw| format_day(&place, raw))
        .collect()
}

pub fn format_history(payload: &TimeMachinePayload) -> Vec<Weather> {
    let place = Place::from(payload);
    payload.data.iter().map(|raw| format_point(&place, raw)).collect()
}

/// All sections, unlimited, today included.
pub fn format_everything(payload: &OneCallPayload) -> Everything {
    Everything {
        lat: payload.lat,
        lon: payload.lon,
        timezone: payload.timezone.clone(),
        timezone_offset: payload.timezone_offset,
        current: format_current(payload),
        minutely: format_minutely(payload, usize::MAX),
        hourly: format_hourly(payload, usize::MAX),
        daily: format_daily(payload, usize::MAX, true),
        alerts: payload.alerts.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{Value, json};

    pub(crate) fn sample_payload() -> Value {
        json!({
            "lat": 48.8534,
            "lon": 2.3488,
            "timezone": "Europe/Paris",
            "timezone_offset": 7200,
            "current": {
                "dt": 1_684_929_490,
                "sunrise": 1_684_926_645,
                "sunset": 1_684_977_332,
                "temp": 18.2,
                "feels_like": 17.9,
                "pressure": 1014,
                "humidity": 72,
                "dew_point": 13.1,
                "uvi": 0.16,
                "clouds": 53,
                "visibility": 10000,
                "wind_speed": 3.13,
                "wind_deg": 93,
                "wind_gust": 6.71,
                "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
                "rain": { "1h": 0.21 }
            },
            "minutely": [
                { "dt": 1_684_929_540, "precipitation": 0 },
                { "dt": 1_684_929_600, "precipitation": 0.4 },
                { "dt": 1_684_929_660, "precipitation": 1.1 }
            ],
            "hourly": [
                {
                    "dt": 1_684_926_000, "temp": 17.5, "feels_like": 17.1, "pressure": 1014,
                    "humidity": 75, "dew_point": 12.9, "uvi": 0, "clouds": 53, "visibility": 10000,
                    "wind_speed": 2.9, "wind_deg": 90, "wind_gust": 5.5, "pop": 0.2,
                    "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }]
                },
                {
                    "dt": 1_684_929_600, "temp": 18.3, "feels_like": 18.0, "pressure": 1014,
                    "humidity": 70, "dew_point": 12.7, "uvi": 0.2, "clouds": 40,
                    "wind_speed": 3.2, "wind_deg": 95, "pop": 0,
                    "weather": [{ "id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d" }]
                }
            ],
            "daily": [
                {
                    "dt": 1_684_951_200, "sunrise": 1_684_926_645, "sunset": 1_684_977_332,
                    "moonrise": 1_684_941_060, "moonset": 1_684_905_480, "moon_phase": 0.16,
                    "summary": "Expect a day of partly cloudy with rain",
                    "temp": { "day": 21.3, "min": 12.1, "max": 22.4, "night": 14.7, "eve": 20.1, "morn": 13.0 },
                    "feels_like": { "day": 21.0, "night": 14.3, "eve": 19.9, "morn": 12.6 },
                    "pressure": 1016, "humidity": 59, "dew_point": 12.6, "wind_speed": 3.98,
                    "wind_deg": 76, "wind_gust": 8.92,
                    "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }],
                    "clouds": 92, "pop": 0.47, "rain": 0.15, "uvi": 9.23
                },
                {
                    "dt": 1_685_037_600, "sunrise": 1_685_012_991, "sunset": 1_685_063_808,
                    "moon_phase": 0.2,
                    "temp": { "day": 23.0, "min": 13.5, "max": 24.1, "night": 15.2, "eve": 21.8, "morn": 14.0 },
                    "feels_like": { "day": 22.6, "night": 14.9, "eve": 21.5, "morn": 13.6 },
                    "pressure": 1018, "humidity": 50, "wind_speed": 4.1, "wind_deg": 60,
                    "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
                    "clouds": 3, "pop": 0, "uvi": 9.8
                },
                {
                    "dt": 1_685_124_000,
                    "temp": { "day": 24.0, "min": 14.0, "max": 25.0, "night": 16.0, "eve": 22.0, "morn": 15.0 },
                    "feels_like": { "day": 23.8, "night": 15.8, "eve": 21.7, "morn": 14.7 },
                    "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
                    "snow": 0.5
                }
            ],
            "alerts": [{
                "sender_name": "METEO-FRANCE",
                "event": "Moderate thunderstorm warning",
                "start": 1_684_951_200,
                "end": 1_685_037_599,
                "description": "Moderate damages may occur.",
                "tags": ["Thunderstorm"]
            }]
        })
    }

    fn payload() -> OneCallPayload {
        serde_json::from_value(sample_payload()).expect("sample payload must deserialize")
    }

    #[test]
    fn current_is_reshaped() {
        let weather = format_current(&payload()).unwrap();

        assert_eq!(weather.dt_raw, 1_684_929_490);
        assert_eq!(weather.dt.timestamp(), 1_684_929_490);
        assert_eq!(weather.timezone, "Europe/Paris");
        assert_eq!(weather.timezone_offset, 7200);
        assert_eq!(weather.astronomical.sunrise_raw, Some(1_684_926_645));
        assert_eq!(weather.weather.temp.cur, Some(18.2));
        assert_eq!(weather.weather.feels_like.cur, Some(17.9));
        assert_eq!(weather.weather.wind.gust, Some(6.71));
        assert_eq!(weather.weather.rain, Some(0.21));
        assert_eq!(weather.weather.snow, Some(0.0));
        assert_eq!(weather.weather.condition_id, Some(803));
        assert_eq!(weather.weather.description.as_deref(), Some("broken clouds"));
    }

    #[test]
    fn current_is_none_when_excluded() {
        let mut raw = sample_payload();
        raw.as_object_mut().unwrap().remove("current");
        let payload: OneCallPayload = serde_json::from_value(raw).unwrap();

        assert_eq!(format_current(&payload), None);
    }

    #[test]
    fn minutely_maps_precipitation_to_rain_and_truncates() {
        let minutes = format_minutely(&payload(), 2);

        assert_eq!(minutes.len(), 2);
        assert_eq!(minutes[1].weather.rain, Some(0.4));
        assert_eq!(minutes[1].weather.temp.cur, None);
    }

    #[test]
    fn hourly_limit_larger_than_data_is_fine() {
        let hours = format_hourly(&payload(), 48);

        assert_eq!(hours.len(), 2);
        assert_eq!(hours[0].weather.pop, Some(0.2));
        assert_eq!(hours[1].weather.visibility, None);
        assert_eq!(hours[1].weather.rain, Some(0.0));
    }

    #[test]
    fn daily_skips_today_unless_requested() {
        let payload = payload();

        let upcoming = format_daily(&payload, 5, false);
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].dt_raw, 1_685_037_600);

        let today = format_daily(&payload, 1, true);
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].dt_raw, 1_684_951_200);
        assert!(upcoming.iter().all(|w| w.dt_raw != today[0].dt_raw));
    }

    #[test]
    fn daily_carries_the_full_breakdown() {
        let day = &format_daily(&payload(), 1, true)[0];

        assert_eq!(day.weather.temp.min, Some(12.1));
        assert_eq!(day.weather.temp.max, Some(22.4));
        assert_eq!(day.weather.temp.cur, None);
        assert_eq!(day.weather.feels_like.morn, Some(12.6));
        assert_eq!(day.astronomical.moon_phase, Some(0.16));
        assert_eq!(day.astronomical.moonset_raw, Some(1_684_905_480));
        assert_eq!(day.weather.rain, Some(0.15));
        assert_eq!(day.weather.summary.as_deref(), Some("Expect a day of partly cloudy with rain"));
    }

    #[test]
    fn everything_keeps_all_sections() {
        let everything = format_everything(&payload());

        assert!(everything.current.is_some());
        assert_eq!(everything.minutely.len(), 3);
        assert_eq!(everything.hourly.len(), 2);
        assert_eq!(everything.daily.len(), 3);
        assert_eq!(everything.alerts.len(), 1);
        assert_eq!(everything.alerts[0].tags, vec!["Thunderstorm".to_string()]);
    }

    #[test]
    fn history_formats_each_data_point() {
        let payload: TimeMachinePayload = serde_json::from_value(json!({
            "lat": 52.2297,
            "lon": 21.0122,
            "timezone": "Europe/Warsaw",
            "timezone_offset": 3600,
            "data": [{
                "dt": 1_645_888_976,
                "sunrise": 1_645_853_361,
                "sunset": 1_645_891_727,
                "temp": 279.13,
                "feels_like": 276.44,
                "pressure": 1029,
                "humidity": 64,
                "wind_speed": 3.6,
                "wind_deg": 340,
                "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }]
            }]
        }))
        .unwrap();

        let history = format_history(&payload);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].timezone, "Europe/Warsaw");
        assert_eq!(history[0].weather.temp.cur, Some(279.13));
        assert_eq!(history[0].astronomical.sunset_raw, Some(1_645_891_727));
    }
}
