//! Client and extraction for the Overpass OSM tag API.
//!
//! Overpass takes a templated spatial query over a named area, posted as
//! plain text, and answers with a JSON envelope of tagged nodes. Node
//! coordinates sit directly on the element; the address is synthesized from
//! `addr:*` tags.

use std::collections::HashMap;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::Deserialize;

use sortie_core::{Coordinate, SourceKind};

use crate::error::SourceError;
use crate::extract::{ExtractedTuple, RawItem};
use crate::http::build_http_client;

const DEFAULT_BASE_URL: &str = "https://overpass-api.de/api/interpreter";

/// Envelope of an Overpass `[out:json]` response.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassNode>,
}

/// A tagged point entity from an Overpass response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassNode {
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Client for the Overpass interpreter endpoint.
///
/// Use [`OverpassClient::new`] for production or
/// [`OverpassClient::with_base_url`] to point at a mock server in tests.
pub struct OverpassClient {
    client: Client,
    base_url: Url,
}

impl OverpassClient {
    /// Creates a client pointed at the public Overpass interpreter.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, SourceError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom interpreter URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SourceError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SourceError> {
        let client = build_http_client(timeout_secs, user_agent)?;
        let base_url = Url::parse(base_url)
            .map_err(|e| SourceError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Posts an Overpass QL query and returns the tagged nodes.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SourceError::Deserialize`] if the body is not the expected
    ///   `{"elements": [...]}` envelope.
    pub async fn run_query(&self, query: &str) -> Result<Vec<OverpassNode>, SourceError> {
        let response = self
            .client
            .post(self.base_url.clone())
            .header(CONTENT_TYPE, "text/plain")
            .body(query.to_owned())
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                context: "overpass interpreter response".to_string(),
                source: e,
            })?;
        tracing::debug!(nodes = parsed.elements.len(), "overpass query returned");
        Ok(parsed.elements)
    }
}

/// Builds the spatial query for one node selector scoped to a named area.
///
/// `selector` is the tag filter, e.g. `"amenity"="restaurant"`.
#[must_use]
pub fn build_area_query(area: &str, selector: &str) -> String {
    format!(
        "[out:json];\narea[name=\"{area}\"]->.searchArea;\nnode[{selector}](area.searchArea);\nout body;"
    )
}

/// Joins the present `addr:housenumber`, `addr:street` and `addr:city` tags
/// with commas, skipping absent parts. No tags at all yields an empty string.
#[must_use]
pub fn address_from_tags(tags: &HashMap<String, String>) -> String {
    ["addr:housenumber", "addr:street", "addr:city"]
        .iter()
        .filter_map(|key| tags.get(*key))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Extracts the common tuple from one Overpass node. Total: a node without
/// coordinates still yields a tuple, with `location` absent.
#[must_use]
pub fn extract(node: OverpassNode) -> ExtractedTuple {
    let location = match (node.lat, node.lon) {
        (Some(lat), Some(lon)) => Some(Coordinate { lat, lng: lon }),
        _ => None,
    };
    let address = address_from_tags(&node.tags);
    let title = node.tags.get("name").cloned();
    ExtractedTuple {
        id: node.id.to_string(),
        title,
        address,
        location,
        source: SourceKind::Overpass,
        raw: RawItem::Overpass(node),
    }
}
