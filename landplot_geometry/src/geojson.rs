//! GeoJSON projection of stored polygon records.
//!
//! One record maps to a single `Feature` with a `Polygon` geometry (the
//! stored ring as its only element) and the record's metrics as properties;
//! a set of records maps to a `FeatureCollection` in listing order.

use landplot_core::{LngLat, PolygonRecord};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Clone, Debug, Serialize)]
pub struct PolygonFeature {
	#[serde(rename = "type")]
	kind: &'static str,
	pub geometry: PolygonGeometry,
	pub properties: FeatureProperties,
}

#[derive(Clone, Debug, Serialize)]
pub struct PolygonGeometry {
	#[serde(rename = "type")]
	kind: &'static str,
	pub coordinates: Vec<Vec<LngLat>>,
}

/// Record fields carried on a feature. Metrics are plain JSON numbers here,
/// unlike the fixed-precision strings of the API projections.
#[derive(Clone, Debug, Serialize)]
pub struct FeatureProperties {
	pub id: i64,
	pub name: String,
	pub area_sq_meters: Option<f64>,
	pub perimeter_meters: Option<f64>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

impl PolygonFeature {
	pub fn from_record(record: &PolygonRecord) -> Self {
		Self {
			kind: "Feature",
			geometry: PolygonGeometry {
				kind: "Polygon",
				coordinates: vec![record.coordinates.clone()],
			},
			properties: FeatureProperties {
				id: record.id,
				name: record.name.clone(),
				area_sq_meters: record.metrics.area_sq_meters.to_f64(),
				perimeter_meters: record.metrics.perimeter_meters.to_f64(),
				created_at: record.created_at,
				updated_at: record.updated_at,
			},
		}
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct FeatureCollection {
	#[serde(rename = "type")]
	kind: &'static str,
	pub features: Vec<PolygonFeature>,
}

impl FeatureCollection {
	pub fn from_records(records: &[PolygonRecord]) -> Self {
		Self {
			kind: "FeatureCollection",
			features: records.iter().map(PolygonFeature::from_record).collect(),
		}
	}
}
