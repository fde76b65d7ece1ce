//! Canvas rendering for the circuit field.
//!
//! Layers are drawn back to front:
//! 1. Clear, then the faint background grid
//! 2. Connections with a blue-cyan-blue gradient
//! 3. Node glows and cores
//! 4. Spark trails and heads
//! 5. The scan band sweeping down the surface
//!
//! Rendering never mutates the field. All coordinates are CSS pixels; the
//! context transform takes care of the device pixel ratio.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::state::{Connection, FieldState, Node};
use super::surface::SurfaceMetrics;
use super::theme::{Color, FieldTheme};

/// Clock multiplier for the connection flicker.
const CONNECTION_PULSE_RATE: f64 = 0.002;
/// Clock multiplier for node breathing.
const NODE_PULSE_RATE: f64 = 0.003;
/// Extra glow radius at full pulse.
const GLOW_SWELL: f64 = 4.0;
/// Opacity kept at the inner ring of a trail blob, relative to its centre.
const TRAIL_RING: f64 = 0.8;
/// Same for the spark head, which stays a touch brighter.
const HEAD_RING: f64 = 0.9;

/// Renders the complete field to the canvas.
///
/// Silently skips the frame when the surface has no area.
pub fn render<R>(
	state: &FieldState<R>,
	ctx: &CanvasRenderingContext2d,
	theme: &FieldTheme,
	metrics: &SurfaceMetrics,
) {
	if !metrics.is_drawable() || !state.is_drawable() {
		return;
	}

	let ratio = metrics.pixel_ratio;
	let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
	ctx.clear_rect(0.0, 0.0, metrics.width, metrics.height);

	draw_grid(ctx, theme, metrics, state.config().grid_spacing);
	draw_connections(state, ctx, theme);
	draw_nodes(state, ctx, theme);
	draw_sparks(state, ctx, theme);
	draw_scan(state, ctx, theme, metrics);
}

/// Opacity falloff of a connection with length.
pub fn connection_alpha(distance: f64, threshold: f64) -> f64 {
	(1.0 - distance / threshold).clamp(0.0, 1.0)
}

/// Gradient stops (offset, opacity) for a spark blob: full `alpha` at the
/// centre, `alpha * ring` at 0.3, transparent at the rim.
pub fn blob_stops(alpha: f64, ring: f64) -> [(f32, f64); 3] {
	[(0.0, alpha), (0.3, alpha * ring), (1.0, 0.0)]
}

/// Connection flicker, in [0, 1]. Dips below zero are held at zero.
pub fn connection_pulse(clock: f64, phase: f64) -> f64 {
	(0.3 + 0.7 * (clock * CONNECTION_PULSE_RATE + phase).sin()).max(0.0)
}

/// Node breathing factor in [0, 1].
pub fn node_pulse(clock: f64, phase: f64) -> f64 {
	0.5 + 0.5 * (clock * NODE_PULSE_RATE + phase).sin()
}

/// Outer radius of a node's soft glow.
pub fn glow_radius(size: f64, pulse: f64) -> f64 {
	(size + pulse * GLOW_SWELL) * 3.0
}

/// Vertical centre of the scan band, cycling top to bottom.
pub fn scan_position(clock: f64, speed: f64, height: f64) -> f64 {
	if height <= 0.0 {
		return 0.0;
	}
	(clock * speed).rem_euclid(height)
}

/// Grid line offsets from 0 up to (not including) `extent`.
pub fn grid_offsets(extent: f64, spacing: f64) -> impl Iterator<Item = f64> {
	let count = if spacing > 0.0 && extent > 0.0 {
		(extent / spacing).ceil() as usize
	} else {
		0
	};
	(0..count).map(move |i| i as f64 * spacing)
}

fn draw_grid(
	ctx: &CanvasRenderingContext2d,
	theme: &FieldTheme,
	metrics: &SurfaceMetrics,
	spacing: f64,
) {
	ctx.set_stroke_style_str(&theme.grid.to_css());
	ctx.set_line_width(theme.line_width);

	ctx.begin_path();
	for x in grid_offsets(metrics.width, spacing) {
		ctx.move_to(x, 0.0);
		ctx.line_to(x, metrics.height);
	}
	for y in grid_offsets(metrics.height, spacing) {
		ctx.move_to(0.0, y);
		ctx.line_to(metrics.width, y);
	}
	ctx.stroke();
}

fn draw_connections<R>(state: &FieldState<R>, ctx: &CanvasRenderingContext2d, theme: &FieldTheme) {
	let nodes = state.nodes();
	let threshold = state.config().connection_distance;
	ctx.set_line_width(theme.line_width);

	for link in state.connections() {
		let Connection { a, b, distance } = *link;
		let (from, to) = (&nodes[a], &nodes[b]);
		let pulse = connection_pulse(state.clock(), from.phase);
		let alpha = connection_alpha(distance, threshold) * pulse;
		if alpha < 0.005 {
			continue;
		}

		let gradient = ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
		let end = theme.edge.with_alpha(alpha * 0.5).to_css();
		let _ = gradient.add_color_stop(0.0, &end);
		let _ = gradient.add_color_stop(0.5, &theme.highlight.with_alpha(alpha * 0.8).to_css());
		let _ = gradient.add_color_stop(1.0, &end);

		ctx.begin_path();
		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();
	}
}

fn draw_nodes<R>(state: &FieldState<R>, ctx: &CanvasRenderingContext2d, theme: &FieldTheme) {
	for node in state.nodes() {
		let pulse = node_pulse(state.clock(), node.phase);
		draw_node_glow(ctx, theme, node, pulse);

		ctx.begin_path();
		ctx.set_fill_style_str(&theme.core.with_alpha(0.8 + 0.2 * pulse).to_css());
		let _ = ctx.arc(node.x, node.y, node.size * 0.5, 0.0, TAU);
		ctx.fill();
	}
}

fn draw_node_glow(ctx: &CanvasRenderingContext2d, theme: &FieldTheme, node: &Node, pulse: f64) {
	let radius = glow_radius(node.size, pulse);
	let Ok(gradient) = ctx.create_radial_gradient(node.x, node.y, 0.0, node.x, node.y, radius)
	else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &theme.edge.with_alpha(0.8 * pulse).to_css());
	let _ = gradient.add_color_stop(0.5, &theme.highlight.with_alpha(0.3 * pulse).to_css());
	let _ = gradient.add_color_stop(1.0, &theme.edge.with_alpha(0.0).to_css());

	ctx.begin_path();
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	let _ = ctx.arc(node.x, node.y, radius, 0.0, TAU);
	ctx.fill();
}

fn draw_sparks<R>(state: &FieldState<R>, ctx: &CanvasRenderingContext2d, theme: &FieldTheme) {
	for spark in state.sparks() {
		for sample in &spark.trail {
			let stops = blob_stops(sample.alpha, TRAIL_RING);
			draw_blob(ctx, theme, sample.x, sample.y, theme.trail_radius, stops);
		}
		if !spark.arrived() {
			let (x, y) = spark.head();
			draw_blob(ctx, theme, x, y, theme.head_radius, blob_stops(1.0, HEAD_RING));
		}
	}
}

/// White-hot centre fading out through the highlight color.
fn draw_blob(
	ctx: &CanvasRenderingContext2d,
	theme: &FieldTheme,
	x: f64,
	y: f64,
	radius: f64,
	stops: [(f32, f64); 3],
) {
	let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, radius) else {
		return;
	};
	let [(o0, a0), (o1, a1), (o2, a2)] = stops;
	let _ = gradient.add_color_stop(o0, &theme.core.with_alpha(a0).to_css());
	let _ = gradient.add_color_stop(o1, &theme.highlight.with_alpha(a1).to_css());
	let _ = gradient.add_color_stop(o2, &theme.highlight.with_alpha(a2).to_css());

	ctx.begin_path();
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	let _ = ctx.arc(x, y, radius, 0.0, TAU);
	ctx.fill();
}

fn draw_scan<R>(
	state: &FieldState<R>,
	ctx: &CanvasRenderingContext2d,
	theme: &FieldTheme,
	metrics: &SurfaceMetrics,
) {
	let config = state.config();
	let half = config.scan_half_height;
	let y = scan_position(state.clock(), config.scan_speed, metrics.height);

	let gradient = ctx.create_linear_gradient(0.0, y - half, 0.0, y + half);
	let clear = Color { a: 0.0, ..theme.scan };
	let _ = gradient.add_color_stop(0.0, &clear.to_css());
	let _ = gradient.add_color_stop(0.5, &theme.scan.to_css());
	let _ = gradient.add_color_stop(1.0, &clear.to_css());

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, y - half, metrics.width, half * 2.0);
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::f64::consts::FRAC_PI_2;

	#[test]
	fn connection_alpha_fades_with_length() {
		assert_eq!(connection_alpha(0.0, 180.0), 1.0);
		assert!((connection_alpha(90.0, 180.0) - 0.5).abs() < 1e-12);
		assert_eq!(connection_alpha(200.0, 180.0), 0.0);
	}

	#[test]
	fn trail_ring_is_dimmer_than_head_ring() {
		let trail = blob_stops(0.5, TRAIL_RING);
		let head = blob_stops(0.5, HEAD_RING);
		assert_eq!(trail[0], (0.0, 0.5));
		assert!((trail[1].1 - 0.4).abs() < 1e-12);
		assert!((head[1].1 - 0.45).abs() < 1e-12);
		assert_eq!(trail[2], (1.0, 0.0));
	}

	#[test]
	fn connection_pulse_never_negative() {
		assert_eq!(connection_pulse(0.0, -FRAC_PI_2), 0.0);
		assert!((connection_pulse(0.0, FRAC_PI_2) - 1.0).abs() < 1e-12);
	}

	#[test]
	fn node_pulse_spans_unit_range() {
		assert!((node_pulse(0.0, FRAC_PI_2) - 1.0).abs() < 1e-12);
		assert!(node_pulse(0.0, -FRAC_PI_2).abs() < 1e-12);
	}

	#[test]
	fn glow_swells_with_pulse() {
		assert_eq!(glow_radius(2.0, 0.0), 6.0);
		assert_eq!(glow_radius(2.0, 1.0), 18.0);
	}

	#[test]
	fn scan_band_wraps_to_top() {
		assert_eq!(scan_position(0.0, 0.1, 600.0), 0.0);
		assert!((scan_position(3000.0, 0.1, 600.0) - 300.0).abs() < 1e-9);
		assert!((scan_position(6160.0, 0.1, 600.0) - 16.0).abs() < 1e-9);
		assert_eq!(scan_position(100.0, 0.1, 0.0), 0.0);
	}

	#[test]
	fn grid_covers_surface_at_fixed_spacing() {
		let xs: Vec<f64> = grid_offsets(120.0, 50.0).collect();
		assert_eq!(xs, vec![0.0, 50.0, 100.0]);
		assert_eq!(grid_offsets(100.0, 50.0).count(), 2);
		assert_eq!(grid_offsets(100.0, 0.0).count(), 0);
	}
}
