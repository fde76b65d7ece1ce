//! Drawing surface geometry.
//!
//! The field simulates and draws in CSS pixels. The canvas backing store is
//! `pixel_ratio` times larger, and the context transform maps one onto the
//! other so strokes stay crisp on high-density displays.

/// Size of the drawing surface as the host reports it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
	/// Device pixels per CSS pixel.
	pub pixel_ratio: f64,
}

impl SurfaceMetrics {
	/// Fallback when the canvas has no sized parent yet.
	pub const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

	/// Metrics with a sanitized pixel ratio (non-finite or non-positive becomes 1).
	pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
		let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
			pixel_ratio
		} else {
			1.0
		};
		Self {
			width,
			height,
			pixel_ratio,
		}
	}

	/// Whether there is anything to draw on.
	pub fn is_drawable(&self) -> bool {
		self.width.is_finite() && self.height.is_finite() && self.width >= 1.0 && self.height >= 1.0
	}

	/// Backing store size in device pixels, rounded to whole pixels.
	pub fn backing_size(&self) -> (u32, u32) {
		if !self.is_drawable() {
			return (0, 0);
		}
		(
			(self.width * self.pixel_ratio).round() as u32,
			(self.height * self.pixel_ratio).round() as u32,
		)
	}

	/// CSS `width`/`height` values to pin the element to its layout size.
	pub fn css_size(&self) -> (String, String) {
		(format!("{}px", self.width), format!("{}px", self.height))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn backing_store_scales_by_ratio() {
		let m = SurfaceMetrics::new(800.0, 600.0, 2.0);
		assert_eq!(m.backing_size(), (1600, 1200));
		assert_eq!(m.css_size(), ("800px".to_string(), "600px".to_string()));
	}

	#[test]
	fn fractional_ratio_rounds() {
		let m = SurfaceMetrics::new(333.0, 100.0, 1.5);
		assert_eq!(m.backing_size(), (500, 150));
	}

	#[test]
	fn bad_ratio_falls_back_to_one() {
		assert_eq!(SurfaceMetrics::new(10.0, 10.0, 0.0).pixel_ratio, 1.0);
		assert_eq!(SurfaceMetrics::new(10.0, 10.0, f64::NAN).pixel_ratio, 1.0);
	}

	#[test]
	fn zero_sized_surface_is_not_drawable() {
		let m = SurfaceMetrics::new(0.0, 600.0, 2.0);
		assert!(!m.is_drawable());
		assert_eq!(m.backing_size(), (0, 0));
	}
}
