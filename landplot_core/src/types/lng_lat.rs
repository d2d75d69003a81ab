use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub static LNG_MAX: f64 = 180.0;
pub static LAT_MAX: f64 = 90.0;

/// A single longitude/latitude pair in decimal degrees.
///
/// Serialized as a two-element JSON array `[lng, lat]`, the shape used by
/// GeoJSON ring coordinates and by the polygon API payloads. Ordering of
/// pairs inside a ring is significant and preserved exactly as submitted.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LngLat(pub [f64; 2]);

impl LngLat {
	pub fn new(lng: f64, lat: f64) -> Self {
		Self([lng, lat])
	}

	pub fn lng(&self) -> f64 {
		self.0[0]
	}

	pub fn lat(&self) -> f64 {
		self.0[1]
	}

	/// Both components within the WGS84 value ranges (inclusive).
	pub fn is_in_range(&self) -> bool {
		self.lng().abs() <= LNG_MAX && self.lat().abs() <= LAT_MAX
	}
}

impl From<[f64; 2]> for LngLat {
	fn from(pair: [f64; 2]) -> Self {
		Self(pair)
	}
}

impl From<LngLat> for [f64; 2] {
	fn from(pair: LngLat) -> Self {
		pair.0
	}
}

impl Debug for LngLat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{}, {}]", self.lng(), self.lat())
	}
}
