//! Category-driven aggregation of points of interest across providers.
//!
//! One request fans out to the sources applicable to the category,
//! normalizes every raw item into a unified [`sortie_core::Place`], then
//! filters by great-circle distance from the user and drops cross-source
//! near-duplicates. All-or-nothing: a single failing provider fails the
//! whole aggregation.

pub mod error;
pub mod pipeline;
pub mod registry;
pub mod transform;

pub use error::AggregateError;
pub use pipeline::{Aggregator, PlacesQuery};
pub use registry::CategorySpec;
pub use transform::TransformKind;
