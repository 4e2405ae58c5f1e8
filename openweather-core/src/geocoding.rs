use reqwest::Url;
use tracing::{debug, instrument};

use crate::{
    error::{Result, WeatherError},
    model::GeoLocation,
    options::Coordinates,
    request::{geocode_direct_url, geocode_reverse_url},
    transport::{HttpTransport, decode, fetch},
};

/// Resolve a place name to the coordinates of the best match.
#[instrument(skip(transport, base, key))]
pub(crate) async fn lookup_coordinates(
    transport: &dyn HttpTransport,
    base: &Url,
    key: &str,
    name: &str,
) -> Result<Coordinates> {
    let url = geocode_direct_url(base, key, name);
    let locations: Vec<GeoLocation> = decode(fetch(transport, &url).await?)?;

    let first = locations
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::UnknownLocation(name.to_string()))?;

    debug!(lat = first.lat, lon = first.lon, "geocoded location");
    Coordinates::new(first.lat, first.lon)
}

/// The place closest to `coords`, if the API knows one.
#[instrument(skip(transport, base, key))]
pub(crate) async fn reverse_lookup(
    transport: &dyn HttpTransport,
    base: &Url,
    key: &str,
    coords: Coordinates,
) -> Result<Option<GeoLocation>> {
    let url = geocode_reverse_url(base, key, coords);
    let locations: Vec<GeoLocation> = decode(fetch(transport, &url).await?)?;

    Ok(locations.into_iter().next())
}
