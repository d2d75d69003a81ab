//! The geometry boundary of landplot.
//!
//! Everything that touches planar geometry goes through the narrow
//! [`RingEngine`] interface: validity testing, area and boundary length of a
//! coordinate ring. The single production adapter is backed by the `geo`
//! crate. On top of it sit the structural payload validator, the
//! metrics-derivation pipeline and the GeoJSON projection of stored records.

mod engine;
pub use engine::*;

pub mod geojson;

mod metrics;
pub use metrics::*;

mod validate;
pub use validate::*;
