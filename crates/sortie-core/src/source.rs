use serde::{Deserialize, Serialize};

/// Upstream provider a record came from.
///
/// Serialized with the lowercase wire tags API consumers already rely on.
/// Declaration order here is also the fixed merge order of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Overpass,
    Opendata,
    Geoapify,
}

impl SourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SourceKind::Overpass => "overpass",
            SourceKind::Opendata => "opendata",
            SourceKind::Geoapify => "geoapify",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
