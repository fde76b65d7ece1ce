//! Simulation state for the circuit field.
//!
//! Owns the drifting nodes, the connections derived from them, and the sparks
//! travelling along those connections. One call to
//! [`FieldState::advance_frame`] moves everything forward by exactly one
//! display frame; drawing is left to the renderer, which only reads.

use std::f64::consts::TAU;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::FieldConfig;
use super::sparks::Spark;

/// A point mass drifting across the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Offset into the brightness pulse, kept in [0, 2π).
	pub phase: f64,
	/// Base radius used for the glow and core.
	pub size: f64,
}

impl Node {
	/// A node at rest.
	pub fn at(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			phase: 0.0,
			size: 3.0,
		}
	}
}

/// Two nodes close enough to be linked this frame. Always stored with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	pub a: usize,
	pub b: usize,
	pub distance: f64,
}

/// Where the pointer is, if it is over the surface at all.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
	#[default]
	Absent,
	At { x: f64, y: f64 },
}

/// The node field: configuration, nodes, sparks, pointer and clock.
///
/// Generic over the random source so tests can run from a fixed seed.
pub struct FieldState<R = SmallRng> {
	config: FieldConfig,
	nodes: Vec<Node>,
	connections: Vec<Connection>,
	sparks: Vec<Spark>,
	pointer: PointerState,
	clock: f64,
	width: f64,
	height: f64,
	rng: R,
}

impl FieldState<SmallRng> {
	/// Field driven by a deterministic generator.
	pub fn seeded(config: FieldConfig, seed: u64) -> Self {
		Self::with_rng(config, SmallRng::seed_from_u64(seed))
	}
}

impl<R: Rng> FieldState<R> {
	/// Empty, zero-sized field. Call [`initialize`](Self::initialize) once the
	/// surface size is known.
	pub fn with_rng(config: FieldConfig, rng: R) -> Self {
		Self {
			config: config.normalized(),
			nodes: Vec::new(),
			connections: Vec::new(),
			sparks: Vec::new(),
			pointer: PointerState::Absent,
			clock: 0.0,
			width: 0.0,
			height: 0.0,
			rng,
		}
	}

	/// Repopulate the field for a surface of the given size.
	///
	/// Replaces every node and drops in-flight sparks, so the next frame only
	/// ever sees the new generation. A zero or non-finite size leaves the
	/// field empty until the next call.
	pub fn initialize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.sparks.clear();
		self.nodes.clear();
		self.connections.clear();

		if !self.is_drawable() {
			debug!("circuit-field: skipping init for {width}x{height} surface");
			return;
		}

		let c = &self.config;
		let rng = &mut self.rng;
		self.nodes = (0..c.node_count)
			.map(|_| Node {
				x: rng.random_range(0.0..width),
				y: rng.random_range(0.0..height),
				vx: (rng.random::<f64>() - 0.5) * c.initial_speed,
				vy: (rng.random::<f64>() - 0.5) * c.initial_speed,
				phase: rng.random_range(0.0..TAU),
				size: c.size_min + rng.random::<f64>() * (c.size_max - c.size_min),
			})
			.collect();
		self.connections = find_connections(&self.nodes, self.config.connection_distance);

		debug!(
			"circuit-field: initialized {} nodes on {width}x{height}",
			self.nodes.len()
		);
	}

	/// Replace the node set with hand-placed nodes (positions wrapped into
	/// bounds). Sparks from the previous set are dropped.
	pub fn replace_nodes(&mut self, nodes: Vec<Node>) {
		self.sparks.clear();
		self.nodes = nodes;
		if self.is_drawable() {
			for node in &mut self.nodes {
				node.x = wrap(node.x, self.width);
				node.y = wrap(node.y, self.height);
			}
		}
		self.connections = find_connections(&self.nodes, self.config.connection_distance);
	}

	/// Pointer moved to surface-relative coordinates. Anything is accepted;
	/// far-off positions simply exert no force.
	pub fn on_pointer_move(&mut self, x: f64, y: f64) {
		self.pointer = PointerState::At { x, y };
	}

	/// Pointer left the surface; repulsion stops.
	pub fn on_pointer_leave(&mut self) {
		self.pointer = PointerState::Absent;
	}

	/// Run one simulation step: nodes, connections, sparks, clock, in that order.
	pub fn advance_frame(&mut self) {
		if !self.is_drawable() {
			return;
		}

		let c = &self.config;
		let (width, height) = (self.width, self.height);

		for node in &mut self.nodes {
			if let PointerState::At { x, y } = self.pointer {
				let (fx, fy) = repulsion(node, x, y, c.influence_radius, c.repulsion_strength);
				node.vx += fx;
				node.vy += fy;
			}

			node.x += node.vx;
			node.y += node.vy;

			node.vx *= c.damping;
			node.vy *= c.damping;

			node.x = wrap(node.x, width);
			node.y = wrap(node.y, height);

			node.phase = (node.phase + c.phase_step).rem_euclid(TAU);
		}

		self.connections = find_connections(&self.nodes, c.connection_distance);

		for link in &self.connections {
			if self.rng.random_bool(c.spark_probability) {
				let (from, to) = (&self.nodes[link.a], &self.nodes[link.b]);
				let speed = self
					.rng
					.random_range(c.spark_speed_min..=c.spark_speed_max);
				self.sparks
					.push(Spark::new((from.x, from.y), (to.x, to.y), speed));
			}
		}

		for spark in &mut self.sparks {
			spark.advance(c.trail_decay, c.trail_floor);
		}
		self.sparks.retain(|s| !s.is_spent());

		self.clock += c.clock_step;
	}

	/// Add a spark between two nodes by index, outside the random emission.
	/// Returns `false` if either index is out of range.
	pub fn emit_spark(&mut self, from: usize, to: usize) -> bool {
		let (Some(a), Some(b)) = (self.nodes.get(from), self.nodes.get(to)) else {
			return false;
		};
		let speed = self
			.rng
			.random_range(self.config.spark_speed_min..=self.config.spark_speed_max);
		self.sparks.push(Spark::new((a.x, a.y), (b.x, b.y), speed));
		true
	}
}

impl<R> FieldState<R> {
	/// Whether `a` and `b` were linked in the last frame, in either order.
	pub fn is_connected(&self, a: usize, b: usize) -> bool {
		let (lo, hi) = if a < b { (a, b) } else { (b, a) };
		self.connections.iter().any(|c| c.a == lo && c.b == hi)
	}

	pub fn is_drawable(&self) -> bool {
		self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn connections(&self) -> &[Connection] {
		&self.connections
	}

	pub fn sparks(&self) -> &[Spark] {
		&self.sparks
	}

	pub fn pointer(&self) -> PointerState {
		self.pointer
	}

	/// Elapsed clock units; advances by `clock_step` per frame.
	pub fn clock(&self) -> f64 {
		self.clock
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}
}

/// Velocity impulse pushing `node` away from the pointer.
///
/// Falls off linearly to zero at `radius`. Coincident points get no push.
fn repulsion(node: &Node, px: f64, py: f64, radius: f64, strength: f64) -> (f64, f64) {
	let (dx, dy) = (node.x - px, node.y - py);
	let dist = (dx * dx + dy * dy).sqrt();
	if !dist.is_finite() || dist <= 0.0 || dist >= radius {
		return (0.0, 0.0);
	}
	let force = (radius - dist) / radius * strength;
	(dx / dist * force, dy / dist * force)
}

/// Toroidal wrap into [0, extent).
fn wrap(v: f64, extent: f64) -> f64 {
	if (0.0..extent).contains(&v) {
		return v;
	}
	let w = v.rem_euclid(extent);
	// rem_euclid can round up to `extent` for tiny negatives.
	if w >= extent { 0.0 } else { w }
}

/// All pairs closer than `threshold`. O(n²), fine for the few dozen nodes drawn.
fn find_connections(nodes: &[Node], threshold: f64) -> Vec<Connection> {
	let mut out = Vec::new();
	for (i, a) in nodes.iter().enumerate() {
		for (j, b) in nodes.iter().enumerate().skip(i + 1) {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let distance = (dx * dx + dy * dy).sqrt();
			if distance < threshold {
				out.push(Connection { a: i, b: j, distance });
			}
		}
	}
	out
}
