//! The aggregation pipeline: resolve the category, fan out to the
//! applicable providers, normalize, filter by distance, deduplicate.

use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;

use sortie_core::{
    distance_meters, is_near_duplicate, AppConfig, Category, Coordinate, Place,
    DUPLICATE_TOLERANCE_DEG,
};
use sortie_sources::{
    geoapify, opendata, overpass, ExtractedTuple, GeoapifyClient, OpendataClient, OverpassClient,
    SourceError,
};

use crate::error::AggregateError;
use crate::registry;

/// The raw query the request boundary hands over. Coordinates are optional
/// here because validating their presence is the pipeline's first step.
#[derive(Debug, Clone, Default)]
pub struct PlacesQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Maximum distance from the user in meters; absent means unbounded.
    pub max_distance: Option<f64>,
    /// Category name, matched case-insensitively; absent means restaurant.
    pub category: Option<String>,
}

/// Owns the three provider clients and the fixed search window, and runs
/// the aggregation for one query at a time. Stateless across requests.
pub struct Aggregator {
    overpass: OverpassClient,
    opendata: OpendataClient,
    geoapify: GeoapifyClient,
    search_area: String,
    search_center: Coordinate,
    search_radius_m: u32,
    source_limit: u32,
}

impl Aggregator {
    /// Builds the provider clients from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if a client cannot be constructed or a
    /// configured base URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        let timeout = config.http_timeout_secs;
        Ok(Self {
            overpass: OverpassClient::with_base_url(
                timeout,
                &config.user_agent,
                &config.overpass_base_url,
            )?,
            opendata: OpendataClient::with_base_url(
                timeout,
                &config.user_agent,
                &config.opendata_base_url,
            )?,
            geoapify: GeoapifyClient::with_base_url(
                &config.geoapify_api_key,
                timeout,
                &config.user_agent,
                &config.geoapify_base_url,
            )?,
            search_area: config.search_area.clone(),
            search_center: config.search_center,
            search_radius_m: config.search_radius_m,
            source_limit: config.source_limit,
        })
    }

    /// Runs the full aggregation for one query.
    ///
    /// Applicable sources are fetched concurrently; their results are
    /// merged in fixed source-declaration order (overpass, opendata,
    /// geoapify), so concurrency affects latency only, never output
    /// ordering. The merged list is distance-filtered (inclusive bound)
    /// and deduplicated first-seen-wins; the survivors keep their order.
    ///
    /// # Errors
    ///
    /// - [`AggregateError::MissingCoordinates`] if `lat` or `lng` is
    ///   absent; no provider is contacted.
    /// - [`AggregateError::UnsupportedCategory`] for a category outside
    ///   the supported set; no provider is contacted.
    /// - [`AggregateError::Source`] if any provider call fails. The first
    ///   failure aborts the whole aggregation; there is no partial-result
    ///   path.
    pub async fn fetch_places(&self, query: &PlacesQuery) -> Result<Vec<Place>, AggregateError> {
        let (Some(lat), Some(lng)) = (query.lat, query.lng) else {
            return Err(AggregateError::MissingCoordinates);
        };
        let user = Coordinate { lat, lng };

        let category = match query.category.as_deref() {
            None => Category::default(),
            Some(name) => Category::from_name(name)
                .ok_or_else(|| AggregateError::UnsupportedCategory(name.to_lowercase()))?,
        };
        let spec = registry::spec(category);

        let mut fetches: Vec<BoxFuture<'_, Result<Vec<ExtractedTuple>, SourceError>>> = Vec::new();
        if let Some(selector) = spec.overpass_selector {
            let query_text = overpass::build_area_query(&self.search_area, selector);
            fetches.push(
                async move {
                    let nodes = self.overpass.run_query(&query_text).await?;
                    Ok(nodes.into_iter().map(overpass::extract).collect())
                }
                .boxed(),
            );
        }
        if let Some(dataset) = spec.opendata_dataset {
            fetches.push(
                async move {
                    let records = self.opendata.fetch_records(dataset, self.source_limit).await?;
                    Ok(records.into_iter().map(opendata::extract).collect())
                }
                .boxed(),
            );
        }
        if let Some(categories) = spec.geoapify_categories {
            fetches.push(
                async move {
                    let features = self
                        .geoapify
                        .fetch_places(
                            categories,
                            self.search_center,
                            self.search_radius_m,
                            self.source_limit,
                        )
                        .await?;
                    Ok(features.into_iter().map(geoapify::extract).collect())
                }
                .boxed(),
            );
        }

        // Fail fast: the first source error aborts the aggregation and the
        // remaining in-flight fetches are dropped.
        let batches = try_join_all(fetches).await?;

        let mut rng = rand::rng();
        let merged: Vec<Place> = batches
            .into_iter()
            .flatten()
            .map(|tuple| spec.transform.apply(tuple, &mut rng))
            .collect();
        let total = merged.len();

        let filtered =
            filter_by_distance(merged, user, query.max_distance.unwrap_or(f64::INFINITY));
        let unique = dedupe_by_proximity(filtered);

        tracing::debug!(
            category = %category,
            total,
            kept = unique.len(),
            "aggregated places"
        );
        Ok(unique)
    }
}

/// Keeps places whose location is within `max_distance_m` of `user`,
/// inclusive. Places without a location are non-filterable and dropped.
fn filter_by_distance(places: Vec<Place>, user: Coordinate, max_distance_m: f64) -> Vec<Place> {
    places
        .into_iter()
        .filter(|place| {
            place
                .location
                .is_some_and(|location| distance_meters(user, location) <= max_distance_m)
        })
        .collect()
}

/// First-seen-wins proximity dedup: a candidate is dropped when an already
/// kept place lies within the degree tolerance on both axes, so the earlier
/// source's fields survive. Quadratic scan, fine at single-page scale.
fn dedupe_by_proximity(places: Vec<Place>) -> Vec<Place> {
    let mut unique: Vec<Place> = Vec::with_capacity(places.len());
    for place in places {
        let Some(location) = place.location else {
            continue;
        };
        let already_kept = unique.iter().any(|kept| {
            kept.location
                .is_some_and(|k| is_near_duplicate(k, location, DUPLICATE_TOLERANCE_DEG))
        });
        if !already_kept {
            unique.push(place);
        }
    }
    unique
}
