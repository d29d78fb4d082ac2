//! Adapters for the three upstream geodata providers.
//!
//! Each provider gets a typed HTTP client and a total extraction function
//! that turns its raw response items into the provider-agnostic
//! [`ExtractedTuple`]. Raw payload shapes ([`RawItem`]) never travel past
//! this crate except as the opaque `raw` field the transforms may inspect.
//! Extraction never fails: missing optional fields produce absent values,
//! and only transport or decoding problems surface as [`SourceError`].

pub mod error;
pub mod extract;
pub mod geoapify;
mod http;
pub mod opendata;
pub mod overpass;

pub use error::SourceError;
pub use extract::{ExtractedTuple, RawItem};
pub use geoapify::GeoapifyClient;
pub use opendata::OpendataClient;
pub use overpass::OverpassClient;
