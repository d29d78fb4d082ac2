//! Client and extraction for the Geoapify commercial places API.
//!
//! Requests target `/v2/places` with a category code, a circular geofence
//! and a result limit. The response is a GeoJSON-like feature collection:
//! `geometry.coordinates` is `[lon, lat]` and MUST be swapped on
//! extraction — copying the pair verbatim silently lands every place in
//! the wrong hemisphere.

use reqwest::{Client, Url};
use serde::Deserialize;

use sortie_core::{Coordinate, SourceKind};

use crate::error::SourceError;
use crate::extract::{ExtractedTuple, RawItem};
use crate::http::build_http_client;

const DEFAULT_BASE_URL: &str = "https://api.geoapify.com";

/// A GeoJSON-like feature collection of places.
#[derive(Debug, Deserialize)]
pub struct GeoapifyPlacesResponse {
    #[serde(default)]
    pub features: Vec<GeoapifyFeature>,
}

/// One place feature.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoapifyFeature {
    #[serde(default)]
    pub geometry: Option<GeoapifyGeometry>,
    #[serde(default)]
    pub properties: GeoapifyProperties,
}

/// Point geometry; `coordinates` is `[lon, lat]` per GeoJSON.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoapifyGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// The feature properties the aggregation reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoapifyProperties {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Client for the Geoapify places API. Holds the API key; requests carry it
/// as the `apiKey` query parameter.
pub struct GeoapifyClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl GeoapifyClient {
    /// Creates a client pointed at the production Geoapify API.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SourceError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SourceError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SourceError> {
        let client = build_http_client(timeout_secs, user_agent)?;
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| SourceError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
        })
    }

    /// Fetches places of the given category inside a circular geofence.
    ///
    /// `categories` is a Geoapify category code such as
    /// `catering.restaurant`; the circle is `center` plus `radius_m`.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SourceError::Deserialize`] if the body is not a feature
    ///   collection.
    pub async fn fetch_places(
        &self,
        categories: &str,
        center: Coordinate,
        radius_m: u32,
        limit: u32,
    ) -> Result<Vec<GeoapifyFeature>, SourceError> {
        let mut url = self
            .base_url
            .join("v2/places")
            .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("categories", categories);
            // Geoapify circle filters are lon-first, like GeoJSON.
            pairs.append_pair(
                "filter",
                &format!("circle:{},{},{}", center.lng, center.lat, radius_m),
            );
            pairs.append_pair("limit", &limit.to_string());
            pairs.append_pair("apiKey", &self.api_key);
        }

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let parsed: GeoapifyPlacesResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                context: format!("geoapify places for '{categories}'"),
                source: e,
            })?;
        tracing::debug!(
            categories,
            features = parsed.features.len(),
            "geoapify places fetched"
        );
        Ok(parsed.features)
    }
}

/// Extracts the common tuple from one feature, swapping `[lon, lat]` into
/// `{lat, lng}`. Total: missing or short geometry yields an absent location.
#[must_use]
pub fn extract(feature: GeoapifyFeature) -> ExtractedTuple {
    let location = feature
        .geometry
        .as_ref()
        .and_then(|g| match g.coordinates.as_slice() {
            [lng, lat, ..] => Some(Coordinate {
                lat: *lat,
                lng: *lng,
            }),
            _ => None,
        });
    let properties = &feature.properties;
    let address = [&properties.address_line1, &properties.address_line2]
        .into_iter()
        .filter_map(Option::as_deref)
        .collect::<Vec<_>>()
        .join(", ");
    let title = properties.name.clone();
    let id = properties.place_id.clone().unwrap_or_default();
    ExtractedTuple {
        id,
        title,
        address,
        location,
        source: SourceKind::Geoapify,
        raw: RawItem::Geoapify(feature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(coordinates: Option<Vec<f64>>, properties: GeoapifyProperties) -> GeoapifyFeature {
        GeoapifyFeature {
            geometry: coordinates.map(|coordinates| GeoapifyGeometry { coordinates }),
            properties,
        }
    }

    #[test]
    fn extract_swaps_lon_lat_order() {
        let tuple = extract(feature(
            Some(vec![2.35, 48.85]),
            GeoapifyProperties::default(),
        ));
        let loc = tuple.location.expect("location");
        assert!((loc.lat - 48.85).abs() < f64::EPSILON, "lat={}", loc.lat);
        assert!((loc.lng - 2.35).abs() < f64::EPSILON, "lng={}", loc.lng);
    }

    #[test]
    fn extract_without_geometry_keeps_location_absent() {
        let tuple = extract(feature(None, GeoapifyProperties::default()));
        assert!(tuple.location.is_none());
    }

    #[test]
    fn extract_with_short_coordinate_array_keeps_location_absent() {
        let tuple = extract(feature(Some(vec![2.35]), GeoapifyProperties::default()));
        assert!(tuple.location.is_none());
    }

    #[test]
    fn address_joins_both_lines_when_present() {
        let tuple = extract(feature(
            None,
            GeoapifyProperties {
                address_line1: Some("Le Procope".to_string()),
                address_line2: Some("13 Rue de l'Ancienne Comédie".to_string()),
                ..GeoapifyProperties::default()
            },
        ));
        assert_eq!(tuple.address, "Le Procope, 13 Rue de l'Ancienne Comédie");
    }

    #[test]
    fn address_uses_single_line_when_other_absent() {
        let tuple = extract(feature(
            None,
            GeoapifyProperties {
                address_line2: Some("13 Rue de l'Ancienne Comédie".to_string()),
                ..GeoapifyProperties::default()
            },
        ));
        assert_eq!(tuple.address, "13 Rue de l'Ancienne Comédie");
    }

    #[test]
    fn missing_place_id_yields_empty_id() {
        let tuple = extract(feature(None, GeoapifyProperties::default()));
        assert_eq!(tuple.id, "");
        assert_eq!(tuple.source, SourceKind::Geoapify);
    }
}
