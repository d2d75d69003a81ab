use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub static SQ_METERS_PER_HECTARE: f64 = 10_000.0;
pub static SQ_METERS_PER_ACRE: f64 = 4046.86;

/// Smallest metric value a record may carry: 0.01 (two decimal places).
pub fn min_metric() -> Decimal {
	Decimal::new(1, 2)
}

/// Derived measurements of a polygon, in physical units.
///
/// Both values are fixed-precision decimals with exactly two fractional
/// digits, so persisted metrics round-trip without binary-float drift. They
/// are recomputed from the coordinate ring before every durable write and
/// are never stored out of sync with it.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonMetrics {
	pub area_sq_meters: Decimal,
	pub perimeter_meters: Decimal,
}

impl PolygonMetrics {
	pub fn new(area_sq_meters: Decimal, perimeter_meters: Decimal) -> Self {
		Self {
			area_sq_meters,
			perimeter_meters,
		}
	}

	/// Area in hectares, computed on read. `None` when the stored decimal
	/// cannot be represented as a float.
	pub fn area_hectares(&self) -> Option<f64> {
		self.area_sq_meters.to_f64().map(|area| area / SQ_METERS_PER_HECTARE)
	}

	/// Area in acres, computed on read.
	pub fn area_acres(&self) -> Option<f64> {
		self.area_sq_meters.to_f64().map(|area| area / SQ_METERS_PER_ACRE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;

	#[test]
	fn unit_conversions() {
		let metrics = PolygonMetrics::new(
			Decimal::from_str("20000.00").unwrap(),
			Decimal::from_str("600.00").unwrap(),
		);
		assert_eq!(metrics.area_hectares(), Some(2.0));
		assert_eq!(metrics.area_acres(), Some(20000.0 / 4046.86));
	}

	#[test]
	fn decimals_keep_two_places() {
		let metrics = PolygonMetrics::new(
			Decimal::from_str("12321000000.00").unwrap(),
			Decimal::from_str("444000.00").unwrap(),
		);
		assert_eq!(metrics.area_sq_meters.to_string(), "12321000000.00");
		assert_eq!(metrics.perimeter_meters.to_string(), "444000.00");
	}

	#[test]
	fn min_metric_is_one_cent() {
		assert_eq!(min_metric().to_string(), "0.01");
	}
}
