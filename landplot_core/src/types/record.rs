use super::{LngLat, PolygonMetrics};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use time::OffsetDateTime;

/// A stored polygon: the submitted coordinate ring plus the metrics derived
/// from it and the record timestamps.
///
/// Invariant: a record only ever exists with metrics computed from exactly
/// the coordinates it carries. The store recomputes both metric fields
/// inside the same transaction as any coordinate write.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonRecord {
	pub id: i64,
	pub name: String,
	pub coordinates: Vec<LngLat>,
	pub metrics: PolygonMetrics,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

impl PolygonRecord {
	/// Full-field representation returned by create/retrieve/update.
	pub fn detail(&self) -> PolygonDetail {
		PolygonDetail {
			id: self.id,
			name: self.name.clone(),
			coordinates: self.coordinates.clone(),
			area_sq_meters: self.metrics.area_sq_meters,
			perimeter_meters: self.metrics.perimeter_meters,
			area_hectares: self.metrics.area_hectares(),
			area_acres: self.metrics.area_acres(),
			created_at: self.created_at,
			updated_at: self.updated_at,
		}
	}

	/// Reduced representation used by listings: no coordinate ring, no
	/// acreage, to keep list payloads light.
	pub fn summary(&self) -> PolygonSummary {
		PolygonSummary {
			id: self.id,
			name: self.name.clone(),
			area_sq_meters: self.metrics.area_sq_meters,
			perimeter_meters: self.metrics.perimeter_meters,
			area_hectares: self.metrics.area_hectares(),
			created_at: self.created_at,
		}
	}
}

impl Display for PolygonRecord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = if self.name.is_empty() { "Unnamed" } else { &self.name };
		write!(f, "{} - {} m²", name, self.metrics.area_sq_meters)
	}
}

/// Detail projection of one record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolygonDetail {
	pub id: i64,
	pub name: String,
	pub coordinates: Vec<LngLat>,
	pub area_sq_meters: Decimal,
	pub perimeter_meters: Decimal,
	pub area_hectares: Option<f64>,
	pub area_acres: Option<f64>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// Summary projection used by listings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolygonSummary {
	pub id: i64,
	pub name: String,
	pub area_sq_meters: Decimal,
	pub perimeter_meters: Decimal,
	pub area_hectares: Option<f64>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;
	use time::macros::datetime;

	fn record() -> PolygonRecord {
		PolygonRecord {
			id: 7,
			name: String::from("field west"),
			coordinates: vec![LngLat::new(0.0, 0.0), LngLat::new(0.0, 1.0), LngLat::new(1.0, 1.0)],
			metrics: PolygonMetrics::new(
				Decimal::from_str("20000.00").unwrap(),
				Decimal::from_str("600.00").unwrap(),
			),
			created_at: datetime!(2026-03-01 10:00:00 UTC),
			updated_at: datetime!(2026-03-02 11:30:00 UTC),
		}
	}

	#[test]
	fn display_uses_name_and_area() {
		assert_eq!(record().to_string(), "field west - 20000.00 m²");

		let mut unnamed = record();
		unnamed.name.clear();
		assert_eq!(unnamed.to_string(), "Unnamed - 20000.00 m²");
	}

	#[test]
	fn detail_projection_fields() {
		let json = serde_json::to_value(record().detail()).unwrap();
		assert_eq!(json["id"], 7);
		assert_eq!(json["name"], "field west");
		assert_eq!(json["coordinates"][1][1], 1.0);
		assert_eq!(json["area_sq_meters"], "20000.00");
		assert_eq!(json["perimeter_meters"], "600.00");
		assert_eq!(json["area_hectares"], 2.0);
		assert_eq!(json["area_acres"], 20000.0 / 4046.86);
		assert_eq!(json["created_at"], "2026-03-01T10:00:00Z");
	}

	#[test]
	fn summary_projection_omits_ring_and_acres() {
		let json = serde_json::to_value(record().summary()).unwrap();
		assert!(json.get("coordinates").is_none());
		assert!(json.get("area_acres").is_none());
		assert!(json.get("updated_at").is_none());
		assert_eq!(json["area_hectares"], 2.0);
		assert_eq!(json["perimeter_meters"], "600.00");
	}
}
