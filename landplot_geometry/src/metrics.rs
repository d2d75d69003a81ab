use crate::RingEngine;
use landplot_core::{Error, LngLat, PolygonMetrics, Result, min_metric};
use rust_decimal::{Decimal, RoundingStrategy};

/// Flat conversion factor between decimal degrees and meters.
///
/// Persisted metrics everywhere are derived with this factor, so changing it
/// (e.g. to a geodesic formula) would silently change every stored value.
pub static METERS_PER_DEGREE: f64 = 111_000.0;

/// Derives area and perimeter for a coordinate ring.
///
/// The ring must have at least 3 pairs and pass the engine's validity check.
/// Raw engine outputs are in degree units and are rescaled with the flat
/// [`METERS_PER_DEGREE`] factor, then rounded to two decimal places with
/// decimal (half-up) rounding. Engine-level numeric failures surface as one
/// uniform computation error; callers never see the underlying error type.
pub fn calculate_metrics(ring: &[LngLat], engine: &dyn RingEngine) -> Result<PolygonMetrics> {
	if ring.len() < 3 {
		return Err(Error::validation(
			"coordinates",
			"At least 3 coordinate pairs are required for a polygon",
		));
	}

	engine
		.check_ring(ring)
		.map_err(|diagnostic| Error::geometry(format!("Invalid polygon geometry: {diagnostic}")))?;

	let area_degrees = engine.ring_area(ring);
	let length_degrees = engine.ring_length(ring);
	log::debug!("raw ring metrics: area={area_degrees}°², length={length_degrees}°");

	let area_sq_meters = to_metric_decimal(area_degrees * METERS_PER_DEGREE * METERS_PER_DEGREE)?;
	let perimeter_meters = to_metric_decimal(length_degrees * METERS_PER_DEGREE)?;

	// Anything below the smallest representable metric is indistinguishable
	// from a degenerate shape at this precision.
	if area_sq_meters < min_metric() || perimeter_meters < min_metric() {
		return Err(Error::geometry(
			"Invalid polygon geometry: shape is too small to measure",
		));
	}

	Ok(PolygonMetrics::new(area_sq_meters, perimeter_meters))
}

/// Rounds a raw metric to exactly two decimal places.
fn to_metric_decimal(value: f64) -> Result<Decimal> {
	let mut metric = Decimal::from_f64_retain(value)
		.ok_or_else(|| Error::computation(format!("Error calculating metrics: {value} is not representable")))?
		.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
	metric.rescale(2);
	Ok(metric)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::GeoRingEngine;
	use std::cell::Cell;

	fn ring(pairs: &[[f64; 2]]) -> Vec<LngLat> {
		pairs.iter().map(|&p| LngLat::from(p)).collect()
	}

	/// Deterministic engine returning canned values.
	struct FakeEngine {
		area: f64,
		length: f64,
		checks: Cell<usize>,
	}

	impl FakeEngine {
		fn new(area: f64, length: f64) -> Self {
			Self {
				area,
				length,
				checks: Cell::new(0),
			}
		}
	}

	impl RingEngine for FakeEngine {
		fn check_ring(&self, _ring: &[LngLat]) -> std::result::Result<(), String> {
			self.checks.set(self.checks.get() + 1);
			Ok(())
		}

		fn ring_area(&self, _ring: &[LngLat]) -> f64 {
			self.area
		}

		fn ring_length(&self, _ring: &[LngLat]) -> f64 {
			self.length
		}
	}

	#[test]
	fn unit_square_in_degrees() {
		let square = ring(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]);
		let metrics = calculate_metrics(&square, &GeoRingEngine).unwrap();

		assert_eq!(metrics.area_sq_meters.to_string(), "12321000000.00");
		assert_eq!(metrics.perimeter_meters.to_string(), "444000.00");
	}

	#[test]
	fn too_few_pairs_fail_before_the_engine() {
		let engine = FakeEngine::new(1.0, 4.0);
		let err = calculate_metrics(&ring(&[[0.0, 0.0], [1.0, 1.0]]), &engine).unwrap_err();

		assert_eq!(engine.checks.get(), 0);
		assert_eq!(err.field(), Some("coordinates"));
		assert_eq!(err.message(), "At least 3 coordinate pairs are required for a polygon");
	}

	#[test]
	fn self_intersection_is_a_geometry_error() {
		let bowtie = ring(&[[0.0, 0.0], [1.0, 1.0], [1.0, 0.0], [0.0, 1.0]]);
		let err = calculate_metrics(&bowtie, &GeoRingEngine).unwrap_err();

		assert!(matches!(err, Error::Geometry(_)));
		assert!(err.message().starts_with("Invalid polygon geometry"));
	}

	#[test]
	fn conversion_uses_the_flat_factor() {
		let engine = FakeEngine::new(0.5, 3.25);
		let triangle = ring(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
		let metrics = calculate_metrics(&triangle, &engine).unwrap();

		assert_eq!(engine.checks.get(), 1);
		assert_eq!(metrics.area_sq_meters.to_string(), "6160500000.00");
		assert_eq!(metrics.perimeter_meters.to_string(), "360750.00");
	}

	#[test]
	fn half_up_rounding_at_two_places() {
		let engine = FakeEngine::new(1.0165e-10, 2.8545e-5);
		let triangle = ring(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
		let metrics = calculate_metrics(&triangle, &engine).unwrap();

		assert_eq!(metrics.area_sq_meters.to_string(), "1.25");
		assert_eq!(metrics.perimeter_meters.to_string(), "3.17");
	}

	#[test]
	fn microscopic_shape_is_rejected() {
		let engine = FakeEngine::new(1.0e-16, 1.0e-8);
		let triangle = ring(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
		let err = calculate_metrics(&triangle, &engine).unwrap_err();

		assert!(matches!(err, Error::Geometry(_)));
	}

	#[test]
	fn non_finite_engine_output_is_a_computation_error() {
		let engine = FakeEngine::new(f64::NAN, 4.0);
		let triangle = ring(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
		let err = calculate_metrics(&triangle, &engine).unwrap_err();

		assert!(matches!(err, Error::Computation(_)));
		assert!(err.message().starts_with("Error calculating metrics"));
	}
}
