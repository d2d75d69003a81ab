use geo::algorithm::Validation;
use geo::{Area, Coord, Euclidean, Length, LineString, Polygon};
use landplot_core::LngLat;

/// Narrow interface over the planar geometry library.
///
/// The rest of the workspace never calls `geo` directly; it sees exactly
/// these three operations. That keeps the library swappable and lets tests
/// substitute a deterministic engine.
pub trait RingEngine {
	/// Checks that the ring forms a usable simple polygon. `Err` carries a
	/// diagnostic when the ring self-intersects, has fewer than 3 distinct
	/// vertices or collapses to zero area.
	fn check_ring(&self, ring: &[LngLat]) -> Result<(), String>;

	/// Unsigned planar area of the ring in native (squared-degree) units.
	fn ring_area(&self, ring: &[LngLat]) -> f64;

	/// Total boundary length of the ring in native units, including the
	/// implicit closing segment.
	fn ring_length(&self, ring: &[LngLat]) -> f64;
}

/// Production [`RingEngine`] backed by the `geo` crate.
///
/// The ring is closed implicitly: callers may but need not repeat the first
/// pair at the end, exactly like the exterior ring of a `geo::Polygon`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeoRingEngine;

impl GeoRingEngine {
	fn to_polygon(ring: &[LngLat]) -> Polygon<f64> {
		let coords: Vec<Coord<f64>> = ring
			.iter()
			.map(|pair| Coord {
				x: pair.lng(),
				y: pair.lat(),
			})
			.collect();

		// Polygon::new closes the exterior LineString for us.
		Polygon::new(LineString::from(coords), vec![])
	}
}

impl RingEngine for GeoRingEngine {
	fn check_ring(&self, ring: &[LngLat]) -> Result<(), String> {
		let polygon = Self::to_polygon(ring);

		polygon.check_validation().map_err(|problem| problem.to_string())?;

		// OGC validity allows zero-area rings in edge cases; a polygon
		// without area is useless to us either way.
		if polygon.unsigned_area() == 0.0 {
			return Err(String::from("polygon has zero area"));
		}

		Ok(())
	}

	fn ring_area(&self, ring: &[LngLat]) -> f64 {
		Self::to_polygon(ring).unsigned_area()
	}

	fn ring_length(&self, ring: &[LngLat]) -> f64 {
		Euclidean.length(Self::to_polygon(ring).exterior())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;

	fn ring(pairs: &[[f64; 2]]) -> Vec<LngLat> {
		pairs.iter().map(|&p| LngLat::from(p)).collect()
	}

	#[test]
	fn unit_square_area_and_length() {
		let engine = GeoRingEngine;
		let square = ring(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]);

		assert!(engine.check_ring(&square).is_ok());
		assert_abs_diff_eq!(engine.ring_area(&square), 1.0);
		assert_abs_diff_eq!(engine.ring_length(&square), 4.0);
	}

	#[test]
	fn explicitly_closed_ring_is_equivalent() {
		let engine = GeoRingEngine;
		let open = ring(&[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]);
		let closed = ring(&[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0], [0.0, 0.0]]);

		assert_abs_diff_eq!(engine.ring_area(&open), engine.ring_area(&closed));
		assert_abs_diff_eq!(engine.ring_length(&open), engine.ring_length(&closed));
	}

	#[test]
	fn triangle_area() {
		let engine = GeoRingEngine;
		let triangle = ring(&[[0.0, 0.0], [4.0, 0.0], [0.0, 3.0]]);

		assert_abs_diff_eq!(engine.ring_area(&triangle), 6.0);
		assert_abs_diff_eq!(engine.ring_length(&triangle), 12.0);
	}

	#[test]
	fn bowtie_is_rejected() {
		let engine = GeoRingEngine;
		let bowtie = ring(&[[0.0, 0.0], [1.0, 1.0], [1.0, 0.0], [0.0, 1.0]]);

		assert!(engine.check_ring(&bowtie).is_err());
	}

	#[test]
	fn collinear_ring_is_rejected() {
		let engine = GeoRingEngine;
		let line = ring(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);

		assert!(engine.check_ring(&line).is_err());
	}

	#[test]
	fn two_points_are_rejected() {
		let engine = GeoRingEngine;
		let pair = ring(&[[0.0, 0.0], [1.0, 1.0]]);

		assert!(engine.check_ring(&pair).is_err());
	}
}
