//! Client and extraction for the Paris OpenData catalog API.
//!
//! Datasets are fetched one page at a time from
//! `/api/v2/catalog/datasets/{dataset}/records`. Every record wraps a
//! `fields` object whose content varies per dataset; the fields the
//! aggregation reads are modeled explicitly and everything else is ignored.
//! Coordinates live at the nested `record.fields.tt` path and are frequently
//! missing — extraction then reports an absent location, never an error.

use reqwest::{Client, Url};
use serde::Deserialize;

use sortie_core::{Coordinate, SourceKind};

use crate::error::SourceError;
use crate::extract::{ExtractedTuple, RawItem};
use crate::http::build_http_client;

const DEFAULT_BASE_URL: &str = "https://opendata.paris.fr";

/// One page of catalog records.
#[derive(Debug, Deserialize)]
pub struct OpendataRecordsResponse {
    #[serde(default)]
    pub records: Vec<OpendataRecord>,
}

/// A catalog record: the payload sits one level down, under `record`.
#[derive(Debug, Clone, Deserialize)]
pub struct OpendataRecord {
    pub record: OpendataRecordInner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpendataRecordInner {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fields: OpendataFields,
}

/// The subset of dataset fields the aggregation reads.
///
/// Which of these are present depends on the dataset: events carry `titre`
/// and `descriptif`, restaurant datasets `nom_restaurant`, bar datasets
/// `nom_du_bar`. All are optional everywhere.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpendataFields {
    #[serde(default)]
    pub titre: Option<String>,
    #[serde(default)]
    pub nom_restaurant: Option<String>,
    #[serde(default)]
    pub nom_du_bar: Option<String>,
    #[serde(default)]
    pub descriptif: Option<String>,
    #[serde(default)]
    pub adresse: Option<String>,
    #[serde(default)]
    pub tt: Option<OpendataGeoPoint>,
}

/// The nested geo point of a catalog record.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OpendataGeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Client for the OpenData catalog API.
pub struct OpendataClient {
    client: Client,
    base_url: Url,
}

impl OpendataClient {
    /// Creates a client pointed at the production catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, SourceError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
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
        // Normalise: exactly one trailing slash so Url::join keeps the full path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| SourceError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Fetches one page of records for a dataset.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SourceError::Deserialize`] if the body does not match the
    ///   records envelope.
    pub async fn fetch_records(
        &self,
        dataset: &str,
        limit: u32,
    ) -> Result<Vec<OpendataRecord>, SourceError> {
        let mut url = self
            .base_url
            .join(&format!("api/v2/catalog/datasets/{dataset}/records"))
            .map_err(|e| SourceError::InvalidUrl(format!("dataset '{dataset}': {e}")))?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let parsed: OpendataRecordsResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                context: format!("opendata records for dataset '{dataset}'"),
                source: e,
            })?;
        tracing::debug!(dataset, records = parsed.records.len(), "opendata page fetched");
        Ok(parsed.records)
    }
}

/// Extracts the common tuple from one catalog record. Total: a record with
/// no `tt` geo point yields a tuple with `location` absent.
#[must_use]
pub fn extract(record: OpendataRecord) -> ExtractedTuple {
    let fields = &record.record.fields;
    let location = fields.tt.map(|tt| Coordinate {
        lat: tt.lat,
        lng: tt.lon,
    });
    let address = fields.adresse.clone().unwrap_or_default();
    let title = fields
        .titre
        .clone()
        .or_else(|| fields.nom_restaurant.clone())
        .or_else(|| fields.nom_du_bar.clone());
    let id = record.record.id.clone();
    ExtractedTuple {
        id,
        title,
        address,
        location,
        source: SourceKind::Opendata,
        raw: RawItem::Opendata(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: OpendataFields) -> OpendataRecord {
        OpendataRecord {
            record: OpendataRecordInner {
                id: "rec-1".to_string(),
                fields,
            },
        }
    }

    #[test]
    fn extract_reads_nested_geo_point() {
        let tuple = extract(record(OpendataFields {
            tt: Some(OpendataGeoPoint {
                lat: 48.8738,
                lon: 2.2950,
            }),
            adresse: Some("1 Avenue des Champs-Élysées".to_string()),
            ..OpendataFields::default()
        }));
        let loc = tuple.location.expect("location");
        assert!((loc.lat - 48.8738).abs() < f64::EPSILON);
        assert!((loc.lng - 2.2950).abs() < f64::EPSILON);
        assert_eq!(tuple.address, "1 Avenue des Champs-Élysées");
        assert_eq!(tuple.id, "rec-1");
        assert_eq!(tuple.source, SourceKind::Opendata);
    }

    #[test]
    fn extract_without_geo_point_keeps_location_absent() {
        let tuple = extract(record(OpendataFields::default()));
        assert!(tuple.location.is_none());
        assert_eq!(tuple.address, "");
    }

    #[test]
    fn title_prefers_titre_then_restaurant_then_bar_name() {
        let tuple = extract(record(OpendataFields {
            titre: Some("Concert au parc".to_string()),
            nom_restaurant: Some("Le Relais".to_string()),
            ..OpendataFields::default()
        }));
        assert_eq!(tuple.title.as_deref(), Some("Concert au parc"));

        let tuple = extract(record(OpendataFields {
            nom_restaurant: Some("Le Relais".to_string()),
            nom_du_bar: Some("Le Perchoir".to_string()),
            ..OpendataFields::default()
        }));
        assert_eq!(tuple.title.as_deref(), Some("Le Relais"));

        let tuple = extract(record(OpendataFields {
            nom_du_bar: Some("Le Perchoir".to_string()),
            ..OpendataFields::default()
        }));
        assert_eq!(tuple.title.as_deref(), Some("Le Perchoir"));
    }

    #[test]
    fn fields_deserialize_ignores_unknown_dataset_columns() {
        let raw = serde_json::json!({
            "record": {
                "id": "abc",
                "fields": {
                    "titre": "Atelier",
                    "horaires": "18h",
                    "tarif": "gratuit",
                    "tt": { "lat": 48.85, "lon": 2.35 }
                }
            }
        });
        let record: OpendataRecord = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(record.record.fields.titre.as_deref(), Some("Atelier"));
        assert!(record.record.fields.tt.is_some());
    }
}
