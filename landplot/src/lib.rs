//! Polygon storage and metrics service.
//!
//! The crate wires the workspace together: a SQLite-backed [`store`] that
//! validates and derives metrics before every write, and an axum [`server`]
//! exposing the CRUD and GeoJSON resource surface.

pub mod server;
pub mod store;

pub use server::ApiServer;
pub use store::PolygonStore;
