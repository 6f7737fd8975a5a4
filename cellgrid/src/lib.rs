//! # Cellgrid - Hierarchical Spherical Grid Cells
//!
//! This crate maps points on the sphere to cells of a hierarchical
//! space-filling grid (a quadtree over the six faces of a cube
//! projected onto the sphere, ordered by a Hilbert curve), and builds
//! cell coverings of spherical regions for containment queries.
//!
//! ## Features
//!
//! - **Cell Identifiers**: 64-bit ids with 31 levels of subdivision, compact hex tokens
//! - **Hierarchy Queries**: parent, children, neighbors, ancestor containment
//! - **Region Covering**: approximate polygons and caps with bounded cell sets
//! - **WKT Polygons**: parse and validate `POLYGON((lon lat, ...))` rings
//! - **Cell Unions**: normalized sorted cell sets with O(log n) containment
//! - **Stateless Surface**: token-in, token-out functions safe for parallel batch use
//!
//! ## Quick Start
//!
//! ```rust
//! use cellgrid::functions;
//!
//! // Cell tokens at leaf and coarser levels.
//! let leaf = functions::leaf_cell_token(32.15091, 34.848075);
//! assert_eq!(leaf, "151d4816371ba05b");
//! assert_eq!(
//!     functions::cell_token(32.15091, 34.848075, 15).as_deref(),
//!     Some("151d48164")
//! );
//!
//! // Cover a polygon with cells and query membership.
//! let wkt = "POLYGON((30 20, 31 20, 31 21, 30 21, 30 20))";
//! let cover = functions::polygon_cover_tokens(wkt, 8, 12).unwrap().unwrap();
//! assert!(!cover.is_empty());
//! assert_eq!(
//!     functions::within_polygon(&leaf, wkt, 10).unwrap(),
//!     Some(false)
//! );
//! ```

// Core cell geometry modules
pub mod cellid;
pub mod latlng;
pub mod point;
pub mod projection;

// Exact geometric predicates and edge crossings
pub(crate) mod edge;
pub mod predicates;

// Regions and coverings
pub mod cap;
pub mod cell;
pub mod cellunion;
pub mod coverer;
pub mod polygon;

// Text surface
pub mod functions;
pub mod wkt;

pub mod errors;

// Re-export cell types
pub use cellid::CellId;
pub use latlng::LatLng;
pub use point::Point;
pub use projection::{MAX_LEVEL, NUM_FACES};

// Re-export region types
pub use cap::Cap;
pub use cell::Cell;
pub use cellunion::CellUnion;
pub use coverer::{Region, RegionCoverer};
pub use polygon::{Loop, Polygon};

// Re-export error types
pub use errors::{SpatialError, SpatialResult};

// Re-export the WKT entry point
pub use wkt::parse_polygon;
