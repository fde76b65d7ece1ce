//! Tuning constants for the circuit field.
//!
//! A [`FieldConfig`] is built once at mount and never mutated afterwards. Hosts
//! can override any subset of fields through JSON; missing fields keep their
//! defaults.

use std::f64::consts::TAU;

use log::warn;
use serde::Deserialize;

/// Upper bound on `node_count`; connections are found pairwise every frame.
pub const MAX_NODE_COUNT: usize = 200;
/// Upper bound on radii, spacings and distances, in CSS pixels.
const MAX_DISTANCE: f64 = 4096.0;
const MAX_NODE_SIZE: f64 = 64.0;
/// Keeps the clock finite for years of continuous animation.
const MAX_CLOCK_STEP: f64 = 1000.0;
/// Upper bound on per-frame speeds and impulses.
const MAX_SPEED: f64 = 50.0;

/// Immutable configuration record for the node field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of nodes created on every (re)initialization.
	pub node_count: usize,
	/// Pairs closer than this are connected.
	pub connection_distance: f64,
	/// Pointer repulsion reaches this far.
	pub influence_radius: f64,
	/// Velocity added per frame at zero distance from the pointer.
	pub repulsion_strength: f64,
	/// Per-frame velocity multiplier.
	pub damping: f64,
	/// Radians added to every node's phase per frame.
	pub phase_step: f64,
	/// Width of the initial velocity range, centred on zero.
	pub initial_speed: f64,
	pub size_min: f64,
	pub size_max: f64,
	/// Chance per in-range pair per frame that a spark is emitted.
	pub spark_probability: f64,
	pub spark_speed_min: f64,
	pub spark_speed_max: f64,
	/// Opacity multiplier applied to trail samples every frame.
	pub trail_decay: f64,
	/// Trail samples fainter than this are dropped.
	pub trail_floor: f64,
	/// Clock units per frame (nominally milliseconds at 60Hz).
	pub clock_step: f64,
	pub grid_spacing: f64,
	/// Scan band travel per clock unit.
	pub scan_speed: f64,
	pub scan_half_height: f64,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			node_count: 50,
			connection_distance: 180.0,
			influence_radius: 200.0,
			repulsion_strength: 0.5,
			damping: 0.98,
			phase_step: 0.02,
			initial_speed: 0.5,
			size_min: 2.0,
			size_max: 5.0,
			spark_probability: 0.002,
			spark_speed_min: 0.02,
			spark_speed_max: 0.05,
			trail_decay: 0.9,
			trail_floor: 0.01,
			clock_step: 16.0,
			grid_spacing: 50.0,
			scan_speed: 0.1,
			scan_half_height: 50.0,
		}
	}
}

impl FieldConfig {
	/// Parse a (possibly partial) JSON override.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Self>(json).map(Self::normalized)
	}

	/// Replace values that would break the simulation with their defaults,
	/// and cap values large enough to stall a frame or overflow the clock.
	///
	/// Every repair is logged; the result is always safe to animate.
	pub fn normalized(self) -> Self {
		let d = Self::default();
		let mut c = self;

		if c.node_count > MAX_NODE_COUNT {
			warn!(
				"circuit-field: node_count = {} exceeds {MAX_NODE_COUNT}, capping",
				c.node_count
			);
			c.node_count = MAX_NODE_COUNT;
		}

		repair_positive(
			&mut c.connection_distance,
			d.connection_distance,
			MAX_DISTANCE,
			"connection_distance",
		);
		repair_positive(
			&mut c.influence_radius,
			d.influence_radius,
			MAX_DISTANCE,
			"influence_radius",
		);
		repair_positive(&mut c.grid_spacing, d.grid_spacing, MAX_DISTANCE, "grid_spacing");
		repair_positive(&mut c.size_min, d.size_min, MAX_NODE_SIZE, "size_min");
		repair_positive(&mut c.size_max, d.size_max, MAX_NODE_SIZE, "size_max");
		// Spark speed is progress per frame; above 1 a spark would skip its own flight.
		repair_positive(&mut c.spark_speed_min, d.spark_speed_min, 1.0, "spark_speed_min");
		repair_positive(&mut c.spark_speed_max, d.spark_speed_max, 1.0, "spark_speed_max");
		repair_positive(&mut c.clock_step, d.clock_step, MAX_CLOCK_STEP, "clock_step");
		repair_non_negative(
			&mut c.repulsion_strength,
			d.repulsion_strength,
			MAX_SPEED,
			"repulsion_strength",
		);
		repair_non_negative(&mut c.initial_speed, d.initial_speed, MAX_SPEED, "initial_speed");
		repair_non_negative(&mut c.phase_step, d.phase_step, TAU, "phase_step");
		repair_non_negative(&mut c.scan_speed, d.scan_speed, MAX_SPEED, "scan_speed");
		repair_non_negative(
			&mut c.scan_half_height,
			d.scan_half_height,
			MAX_DISTANCE,
			"scan_half_height",
		);

		repair_unit(&mut c.spark_probability, d.spark_probability, "spark_probability", true);
		repair_unit(&mut c.trail_floor, d.trail_floor, "trail_floor", false);
		// Both factors must shrink or hold; anything above 1 would grow without bound.
		repair_unit(&mut c.damping, d.damping, "damping", false);
		repair_unit(&mut c.trail_decay, d.trail_decay, "trail_decay", false);
		if c.trail_decay >= 1.0 {
			warn!("circuit-field: trail_decay must be < 1, using {}", d.trail_decay);
			c.trail_decay = d.trail_decay;
		}

		if c.size_min > c.size_max {
			warn!(
				"circuit-field: size range {}..{} is inverted, swapping",
				c.size_min, c.size_max
			);
			std::mem::swap(&mut c.size_min, &mut c.size_max);
		}
		if c.spark_speed_min > c.spark_speed_max {
			warn!(
				"circuit-field: spark speed range {}..{} is inverted, swapping",
				c.spark_speed_min, c.spark_speed_max
			);
			std::mem::swap(&mut c.spark_speed_min, &mut c.spark_speed_max);
		}

		c
	}
}

fn repair_positive(value: &mut f64, default: f64, max: f64, name: &str) {
	if !value.is_finite() || *value <= 0.0 {
		warn!("circuit-field: {name} = {value} is not positive, using {default}");
		*value = default;
	} else if *value > max {
		warn!("circuit-field: {name} = {value} exceeds {max}, capping");
		*value = max;
	}
}

fn repair_non_negative(value: &mut f64, default: f64, max: f64, name: &str) {
	if !value.is_finite() || *value < 0.0 {
		warn!("circuit-field: {name} = {value} is negative, using {default}");
		*value = default;
	} else if *value > max {
		warn!("circuit-field: {name} = {value} exceeds {max}, capping");
		*value = max;
	}
}

/// Keep `value` inside [0, 1], or (0, 1] when zero is not allowed.
fn repair_unit(value: &mut f64, default: f64, name: &str, allow_zero: bool) {
	let low_ok = if allow_zero { *value >= 0.0 } else { *value > 0.0 };
	if !value.is_finite() || !low_ok || *value > 1.0 {
		warn!("circuit-field: {name} = {value} is outside the unit range, using {default}");
		*value = default;
	}
}
