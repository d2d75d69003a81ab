//! HTTP handlers for the polygon resource.
//!
//! Handlers stay thin: extract, delegate to the store, project the result.
//! All validation and metrics derivation happens inside the store, so this
//! layer only decides projections and status codes.

use crate::store::PolygonStore;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use landplot_core::Error;
use landplot_geometry::geojson::{FeatureCollection, PolygonFeature};
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Shared state of all polygon routes.
#[derive(Clone)]
pub struct AppState {
	pub store: PolygonStore,
}

/// Body of create and update requests.
#[derive(Debug, Deserialize)]
pub struct PolygonPayload {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub coordinates: Option<Value>,
}

/// Domain error carried out of a handler. `IntoResponse` maps the taxonomy
/// onto status codes and the field-scoped JSON error bodies the API speaks.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		Self(err)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		match self.0 {
			err @ (Error::Validation { .. } | Error::Geometry(_)) => {
				log::debug!("rejected request: {err}");
				let field = err.field().unwrap_or("non_field_errors").to_string();
				let mut body = Map::new();
				body.insert(field, Value::from(vec![err.message()]));
				(StatusCode::BAD_REQUEST, Json(Value::Object(body))).into_response()
			}
			Error::NotFound(msg) => {
				log::debug!("not found: {msg}");
				(StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response()
			}
			err => {
				log::error!("internal error: {err}");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					Json(json!({ "detail": "A server error occurred." })),
				)
					.into_response()
			}
		}
	}
}

pub async fn list_polygons(State(state): State<AppState>) -> Result<Response, ApiError> {
	log::debug!("handle list request");
	let records = state.store.list()?;
	let summaries: Vec<_> = records.iter().map(|record| record.summary()).collect();
	Ok(Json(summaries).into_response())
}

pub async fn create_polygon(
	State(state): State<AppState>,
	Json(payload): Json<PolygonPayload>,
) -> Result<Response, ApiError> {
	log::debug!("handle create request");
	let record = state
		.store
		.create(payload.name.as_deref(), payload.coordinates.as_ref())?;
	Ok((StatusCode::CREATED, Json(record.detail())).into_response())
}

pub async fn retrieve_polygon(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, ApiError> {
	log::debug!("handle retrieve request: {id}");
	let record = state.store.get(id)?;
	Ok(Json(record.detail()).into_response())
}

pub async fn update_polygon(
	State(state): State<AppState>,
	Path(id): Path<i64>,
	Json(payload): Json<PolygonPayload>,
) -> Result<Response, ApiError> {
	log::debug!("handle update request: {id}");
	let record = state
		.store
		.update(id, payload.name.as_deref(), payload.coordinates.as_ref(), false)?;
	Ok(Json(record.detail()).into_response())
}

pub async fn patch_polygon(
	State(state): State<AppState>,
	Path(id): Path<i64>,
	Json(payload): Json<PolygonPayload>,
) -> Result<Response, ApiError> {
	log::debug!("handle partial update request: {id}");
	let record = state
		.store
		.update(id, payload.name.as_deref(), payload.coordinates.as_ref(), true)?;
	Ok(Json(record.detail()).into_response())
}

pub async fn delete_polygon(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, ApiError> {
	log::debug!("handle delete request: {id}");
	state.store.delete(id)?;
	Ok((
		StatusCode::NO_CONTENT,
		Json(json!({ "message": "Polygon deleted successfully" })),
	)
		.into_response())
}

pub async fn polygon_geojson(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response, ApiError> {
	log::debug!("handle geojson request: {id}");
	let record = state.store.get(id)?;
	Ok(Json(PolygonFeature::from_record(&record)).into_response())
}

pub async fn geojson_collection(State(state): State<AppState>) -> Result<Response, ApiError> {
	log::debug!("handle geojson collection request");
	let records = state.store.list()?;
	Ok(Json(FeatureCollection::from_records(&records)).into_response())
}
