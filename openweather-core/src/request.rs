use reqwest::Url;
use std::fmt;

use crate::options::{Coordinates, EffectiveOptions};

pub const API_BASE_URL: &str = "https://api.openweathermap.org";

const ONECALL_PATH: &str = "data/3.0/onecall";
const TIMEMACHINE_PATH: &str = "data/3.0/onecall/timemachine";
const GEO_DIRECT_PATH: &str = "geo/1.0/direct";
const GEO_REVERSE_PATH: &str = "geo/1.0/reverse";

/// Top-level sections of a One Call response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Alerts,
    Current,
    Minutely,
    Hourly,
    Daily,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Alerts => "alerts",
            Section::Current => "current",
            Section::Minutely => "minutely",
            Section::Hourly => "hourly",
            Section::Daily => "daily",
        }
    }

    pub const fn all() -> &'static [Section] {
        &[
            Section::Alerts,
            Section::Current,
            Section::Minutely,
            Section::Hourly,
            Section::Daily,
        ]
    }

    /// The exclusion list for a request that only reads `keep`.
    pub fn all_except(keep: Section) -> Vec<Section> {
        Section::all().iter().copied().filter(|s| *s != keep).collect()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(path.split('/'));
    }
    url
}

/// One Call URL for already resolved coordinates.
///
/// `lang`, `units` and `exclude` are only attached when set. The exclusion
/// list is appended unescaped since section names are plain ascii.
pub(crate) fn onecall_url(
    base: &Url,
    options: &EffectiveOptions,
    coords: Coordinates,
    exclude: &[Section],
) -> Url {
    let mut url = endpoint(base, ONECALL_PATH);

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("appid", &options.key)
            .append_pair("lat", &coords.lat().to_string())
            .append_pair("lon", &coords.lon().to_string());
        if let Some(lang) = options.language {
            query.append_pair("lang", lang.as_str());
        }
        if let Some(units) = options.units {
            query.append_pair("units", units.as_str());
        }
    }

    if !exclude.is_empty() {
        let list = exclude.iter().map(Section::as_str).collect::<Vec<_>>().join(",");
        let query = format!("{}&exclude={list}", url.query().unwrap_or_default());
        url.set_query(Some(&query));
    }

    url
}

pub(crate) fn timemachine_url(
    base: &Url,
    options: &EffectiveOptions,
    coords: Coordinates,
    dt: i64,
) -> Url {
    let mut url = endpoint(base, TIMEMACHINE_PATH);

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("appid", &options.key)
            .append_pair("lat", &coords.lat().to_string())
            .append_pair("lon", &coords.lon().to_string())
            .append_pair("dt", &dt.to_string());
        if let Some(lang) = options.language {
            query.append_pair("lang", lang.as_str());
        }
        if let Some(units) = options.units {
            query.append_pair("units", units.as_str());
        }
    }

    url
}

pub(crate) fn geocode_direct_url(base: &Url, key: &str, name: &str) -> Url {
    let mut url = endpoint(base, GEO_DIRECT_PATH);
    url.query_pairs_mut()
        .append_pair("q", name)
        .append_pair("limit", "1")
        .append_pair("appid", key);
    url
}

pub(crate) fn geocode_reverse_url(base: &Url, key: &str, coords: Coordinates) -> Url {
    let mut url = endpoint(base, GEO_REVERSE_PATH);
    url.query_pairs_mut()
        .append_pair("lat", &coords.lat().to_string())
        .append_pair("lon", &coords.lon().to_string())
        .append_pair("limit", "1")
        .append_pair("appid", key);
    url
}
