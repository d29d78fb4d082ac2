//! The provider-agnostic intermediate record produced by every adapter.

use sortie_core::{Coordinate, SourceKind};

use crate::geoapify::GeoapifyFeature;
use crate::opendata::OpendataRecord;
use crate::overpass::OverpassNode;

/// One raw upstream item, kept in its provider-specific shape.
///
/// Carried alongside the extracted fields so category transforms can read
/// provider-specific enrichment (cuisine tags, descriptive fields) without
/// the raw shapes leaking into the rest of the pipeline.
#[derive(Debug, Clone)]
pub enum RawItem {
    Overpass(OverpassNode),
    Opendata(OpendataRecord),
    Geoapify(GeoapifyFeature),
}

/// What every adapter extracts from one raw item.
///
/// Extraction is total: a missing title or unlocatable geometry yields an
/// absent value here rather than an error. A tuple without `location` is
/// non-filterable and gets dropped by the distance filter downstream.
#[derive(Debug, Clone)]
pub struct ExtractedTuple {
    /// Provider-scoped identifier; may be empty when the provider item
    /// carried none.
    pub id: String,
    pub title: Option<String>,
    /// Synthesized postal address; empty string when the provider gave no
    /// address parts.
    pub address: String,
    pub location: Option<Coordinate>,
    pub source: SourceKind,
    pub raw: RawItem,
}
