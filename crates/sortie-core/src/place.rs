//! The unified place record returned to API consumers.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::source::SourceKind;

/// A category-enriched point of interest, merged from one of the upstream
/// providers into the single schema the app consumes.
///
/// Every field is populated by the transform step. `rating`, `review_count`
/// and `budget` are synthesized placeholders (no review subsystem exists);
/// their ranges are contractual, their values are not. `location` is the one
/// optional field: a record whose provider response carried no usable
/// geometry keeps `None` and is dropped by the distance filter, never
/// rejected with an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Provider-scoped identifier; unique within `source`, not globally.
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub address: String,
    pub location: Option<Coordinate>,
    pub time_range: String,
    /// RFC 3339 opening bound of the synthesized availability window.
    pub start_time: String,
    /// RFC 3339 closing bound of the synthesized availability window.
    pub end_time: String,
    pub budget: u32,
    pub min_participants: u32,
    pub max_participants: u32,
    /// Synthesized, in `[3.0, 5.0]`, one decimal.
    pub rating: f64,
    /// Synthesized, in `[0, 300)`.
    pub review_count: u32,
    pub highlights: Vec<String>,
    pub source: SourceKind,
}
