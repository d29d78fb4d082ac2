use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use sortie_aggregator::PlacesQuery;
use sortie_core::Place;

use crate::middleware::RequestId;

use super::{map_aggregate_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Query parameters of `GET /api/v1/places`. Everything is optional at the
/// HTTP layer; the pipeline decides what is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PlacesParams {
    lat: Option<f64>,
    lng: Option<f64>,
    max_distance: Option<f64>,
    category: Option<String>,
}

pub(super) async fn list_places(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<PlacesParams>,
) -> Result<Json<ApiResponse<Vec<Place>>>, ApiError> {
    let query = PlacesQuery {
        lat: params.lat,
        lng: params.lng,
        max_distance: params.max_distance,
        category: params.category,
    };

    let data = state
        .aggregator
        .fetch_places(&query)
        .await
        .map_err(|e| map_aggregate_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
