//! Contains the coordinate pair, metric and record types.

mod lng_lat;
pub use lng_lat::*;

mod metrics;
pub use metrics::*;

mod record;
pub use record::*;
