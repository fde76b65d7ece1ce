//! Colors for the circuit field.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color at the given opacity, clamped to [0, 1].
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// Always emits `rgba()`, since gradient stops need explicit alpha.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Complete palette for one field.
#[derive(Clone, Debug)]
pub struct FieldTheme {
	pub name: &'static str,
	/// Connection ends and node glow centre.
	pub edge: Color,
	/// Connection midpoint, outer glow ring, spark halo.
	pub highlight: Color,
	/// Node cores and spark centres.
	pub core: Color,
	/// Grid stroke, already at its final opacity.
	pub grid: Color,
	/// Scan band color at peak opacity.
	pub scan: Color,
	pub line_width: f64,
	/// Trail blob radius.
	pub trail_radius: f64,
	/// Spark head glow radius.
	pub head_radius: f64,
}

impl FieldTheme {
	/// Neon blue on dark, the default hero look.
	pub fn neon() -> Self {
		Self {
			name: "neon",
			edge: Color::rgb(0, 163, 255),
			highlight: Color::rgb(0, 240, 255),
			core: Color::rgb(255, 255, 255),
			grid: Color::rgba(0, 163, 255, 0.03),
			scan: Color::rgba(0, 163, 255, 0.05),
			line_width: 1.0,
			trail_radius: 8.0,
			head_radius: 15.0,
		}
	}

	/// Warm amber variant for light-on-dark accents.
	pub fn amber() -> Self {
		Self {
			name: "amber",
			edge: Color::rgb(245, 158, 11),
			highlight: Color::rgb(252, 211, 77),
			grid: Color::rgba(245, 158, 11, 0.03),
			scan: Color::rgba(245, 158, 11, 0.05),
			..Self::neon()
		}
	}
}

impl FieldTheme {
	/// Look up a preset by its `name`, ignoring case and surrounding space.
	pub fn named(name: &str) -> Option<Self> {
		let name = name.trim();
		[Self::neon(), Self::amber()]
			.into_iter()
			.find(|theme| theme.name.eq_ignore_ascii_case(name))
	}
}

impl Default for FieldTheme {
	fn default() -> Self {
		Self::neon()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_always_carries_alpha() {
		assert_eq!(Color::rgb(0, 163, 255).to_css(), "rgba(0, 163, 255, 1)");
		assert_eq!(
			Color::rgb(0, 240, 255).with_alpha(0.4).to_css(),
			"rgba(0, 240, 255, 0.4)"
		);
	}

	#[test]
	fn with_alpha_clamps() {
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(-0.5).a, 0.0);
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(3.0).a, 1.0);
	}

	#[test]
	fn presets_are_found_by_name() {
		assert_eq!(FieldTheme::named("amber").map(|t| t.edge), Some(FieldTheme::amber().edge));
		assert_eq!(FieldTheme::named(" Neon ").map(|t| t.name), Some("neon"));
		assert!(FieldTheme::named("plasma").is_none());
	}

	#[test]
	fn amber_keeps_neon_geometry() {
		let amber = FieldTheme::amber();
		let neon = FieldTheme::neon();
		assert_eq!(amber.head_radius, neon.head_radius);
		assert_ne!(amber.edge, neon.edge);
	}
}
