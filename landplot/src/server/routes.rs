//! Router composition for the polygon API.
//!
//! This module only wires handlers into an Axum `Router`; server lifecycle
//! lives in the parent module. It's intentionally tiny and declarative.

use super::handlers::{
	AppState, create_polygon, delete_polygon, geojson_collection, list_polygons, patch_polygon, polygon_geojson,
	retrieve_polygon, update_polygon,
};
use crate::store::PolygonStore;
use axum::{Router, routing::get};

/// Builds the full resource surface around one store.
pub fn build_router(store: PolygonStore) -> Router {
	let state = AppState { store };

	Router::new()
		.route("/status", get(|| async { "ready!" }))
		.route("/polygons/", get(list_polygons).post(create_polygon))
		.route("/polygons/geojson_collection/", get(geojson_collection))
		.route(
			"/polygons/{id}/",
			get(retrieve_polygon)
				.put(update_polygon)
				.patch(patch_polygon)
				.delete(delete_polygon),
		)
		.route("/polygons/{id}/geojson/", get(polygon_geojson))
		.with_state(state)
}
