use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{Result, WeatherError},
    language::Language,
    units::Units,
};

/// Keys accepted by [`Options::from_json`] and the config file.
pub const OPTION_KEYS: &[&str] = &["key", "language", "units", "location_name", "coordinates"];

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Bounds are inclusive. NaN is rejected.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    fn from_json(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or(WeatherError::InvalidCoordinates)?;

        if let Some(unknown) = map.keys().find(|k| *k != "lat" && *k != "lon") {
            return Err(WeatherError::UnknownParameter(format!("coordinates.{unknown}")));
        }

        let lat = map.get("lat").and_then(Value::as_f64);
        let lon = map.get("lon").and_then(Value::as_f64);

        match (lat, lon) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon),
            _ => Err(WeatherError::InvalidCoordinates),
        }
    }
}

/// Where weather should be fetched for. A name still has to be geocoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Name(String),
    Coordinates(Coordinates),
}

/// Optional settings shared by the client defaults and per-call overrides.
///
/// Every setter validates its input, so a constructed `Options` only holds
/// values the API accepts. The location name and coordinates are mutually
/// exclusive: setting one replaces the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(into = "OptionsRecord")]
pub struct Options {
    key: Option<String>,
    language: Option<Language>,
    units: Option<Units>,
    location: Option<Location>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn units(&self) -> Option<Units> {
        self.units
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn location_name(&self) -> Option<&str> {
        match &self.location {
            Some(Location::Name(name)) => Some(name),
            _ => None,
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match &self.location {
            Some(Location::Coordinates(coords)) => Some(*coords),
            _ => None,
        }
    }

    pub fn set_key(&mut self, key: impl Into<String>) -> Result<()> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(WeatherError::InvalidKey);
        }
        self.key = Some(key);
        Ok(())
    }

    pub fn set_language(&mut self, language: &str) -> Result<()> {
        self.language = Some(Language::try_from(language)?);
        Ok(())
    }

    pub fn set_units(&mut self, units: &str) -> Result<()> {
        self.units = Some(Units::try_from(units)?);
        Ok(())
    }

    pub fn set_location_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(WeatherError::InvalidLocationName);
        }
        self.location = Some(Location::Name(name));
        Ok(())
    }

    pub fn set_coordinates(&mut self, lat: f64, lon: f64) -> Result<()> {
        self.location = Some(Location::Coordinates(Coordinates::new(lat, lon)?));
        Ok(())
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Result<Self> {
        self.set_key(key)?;
        Ok(self)
    }

    pub fn with_language(mut self, language: &str) -> Result<Self> {
        self.set_language(language)?;
        Ok(self)
    }

    pub fn with_units(mut self, units: &str) -> Result<Self> {
        self.set_units(units)?;
        Ok(self)
    }

    pub fn with_location_name(mut self, name: impl Into<String>) -> Result<Self> {
        self.set_location_name(name)?;
        Ok(self)
    }

    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Result<Self> {
        self.set_coordinates(lat, lon)?;
        Ok(self)
    }

    /// Build options from untyped JSON, e.g. a request body or a parsed
    /// config file.
    ///
    /// Rejects non-objects and unknown keys before validating any value.
    /// When both `location_name` and `coordinates` are present the name wins.
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(WeatherError::MalformedOptionsArgument(json_kind(other).into())),
        };

        if let Some(unknown) = map.keys().find(|k| !OPTION_KEYS.contains(&k.as_str())) {
            return Err(WeatherError::UnknownParameter(unknown.clone()));
        }

        let mut options = Options::default();

        if let Some(key) = map.get("key") {
            options.set_key(key.as_str().ok_or(WeatherError::InvalidKey)?)?;
        }
        if let Some(language) = map.get("language") {
            let language = language
                .as_str()
                .ok_or_else(|| WeatherError::UnsupportedLanguage(language.to_string()))?;
            options.set_language(language)?;
        }
        if let Some(units) = map.get("units") {
            let units = units
                .as_str()
                .ok_or_else(|| WeatherError::UnsupportedUnits(units.to_string()))?;
            options.set_units(units)?;
        }
        if let Some(coords) = map.get("coordinates") {
            options.location = Some(Location::Coordinates(Coordinates::from_json(coords)?));
        }
        if let Some(name) = map.get("location_name") {
            options.set_location_name(name.as_str().ok_or(WeatherError::InvalidLocationName)?)?;
        }

        Ok(options)
    }

    /// Field-by-field merge: values set on `overrides` win, the rest are
    /// taken from `self`. Neither side is modified.
    pub fn merge(&self, overrides: &Options) -> Options {
        Options {
            key: overrides.key.clone().or_else(|| self.key.clone()),
            language: overrides.language.or(self.language),
            units: overrides.units.or(self.units),
            location: overrides.location.clone().or_else(|| self.location.clone()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serialized shape of [`Options`], identical to what `from_json` accepts.
#[derive(Debug, Serialize)]
struct OptionsRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<Coordinates>,
}

impl From<Options> for OptionsRecord {
    fn from(options: Options) -> Self {
        let (location_name, coordinates) = match options.location {
            Some(Location::Name(name)) => (Some(name), None),
            Some(Location::Coordinates(coords)) => (None, Some(coords)),
            None => (None, None),
        };

        Self {
            key: options.key,
            language: options.language.map(|l| l.as_str().to_string()),
            units: options.units.map(|u| u.as_str().to_string()),
            location_name,
            coordinates,
        }
    }
}

/// The options a single request runs with, after merging and validation.
#[derive(Debug, Clone)]
pub(crate) struct EffectiveOptions {
    pub key: String,
    pub language: Option<Language>,
    pub units: Option<Units>,
}

impl EffectiveOptions {
    pub fn resolve(global: &Options, overrides: &Options) -> Result<Self> {
        let merged = global.merge(overrides);

        Ok(Self {
            key: merged.key.ok_or(WeatherError::InvalidKey)?,
            language: merged.language,
            units: merged.units,
        })
    }
}

/// Snapshot of the client defaults.
///
/// `coordinates` holds either explicitly set coordinates or the cached
/// result of geocoding `location_name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalOptions {
    pub key: Option<String>,
    pub language: Option<Language>,
    pub units: Option<Units>,
    pub location_name: Option<String>,
    pub coordinates: Option<Coordinates>,
}
