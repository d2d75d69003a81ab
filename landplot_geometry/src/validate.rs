use crate::RingEngine;
use landplot_core::{Error, LAT_MAX, LNG_MAX, LngLat, Result};
use serde_json::Value;

/// The payload field every coordinate error is scoped to.
pub static COORDINATES_FIELD: &str = "coordinates";

/// Validates a submitted `coordinates` payload and returns the parsed ring.
///
/// This is the single validation path for every write: the HTTP handlers and
/// the administrative CLI both go through it (via the store), so the rules
/// cannot drift between entry points. Structural and range rules run first,
/// in order, and reject on the first failing entry; only a structurally
/// sound ring ever reaches the geometry engine.
pub fn validate_coordinates(value: &Value, engine: &dyn RingEngine) -> Result<Vec<LngLat>> {
	let entries = match value.as_array() {
		Some(entries) if !entries.is_empty() => entries,
		_ => return Err(invalid("Coordinates must be a list of coordinate pairs")),
	};

	if entries.len() < 3 {
		return Err(invalid("At least 3 coordinate pairs are required for a polygon"));
	}

	let mut ring = Vec::with_capacity(entries.len());
	for entry in entries {
		let pair = entry
			.as_array()
			.filter(|pair| pair.len() == 2)
			.ok_or_else(|| invalid("Each coordinate must be a list with exactly 2 values [lng, lat]"))?;

		let (lng, lat) = match (pair[0].as_f64(), pair[1].as_f64()) {
			(Some(lng), Some(lat)) => (lng, lat),
			_ => return Err(invalid("Longitude and latitude must be numbers")),
		};

		if lng.abs() > LNG_MAX {
			return Err(invalid("Longitude must be between -180 and 180"));
		}
		if lat.abs() > LAT_MAX {
			return Err(invalid("Latitude must be between -90 and 90"));
		}

		ring.push(LngLat::new(lng, lat));
	}

	engine
		.check_ring(&ring)
		.map_err(|diagnostic| Error::geometry(format!("Invalid polygon geometry: {diagnostic}")))?;

	Ok(ring)
}

fn invalid(message: &str) -> Error {
	Error::validation(COORDINATES_FIELD, message)
}
