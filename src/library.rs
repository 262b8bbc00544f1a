//! Track catalog types and the local-directory catalog.
//!
//! `Track` is the immutable value shared by the queue, the playback
//! controller and the persisted snapshot. The catalog is only a source of
//! `Track` values; nothing in the core shapes its queries.

mod catalog;
mod display;
mod model;
mod quality;
mod scan;
mod search;

pub use catalog::{Catalog, CatalogError, LocalCatalog, SearchPage};
pub use display::{UNKNOWN_ARTIST, display_line};
pub use model::{MediaVariant, Track};
pub use quality::quality_rank;
pub use scan::scan;
pub use search::fuzzy_match_positions;
