// Host-side scenarios for the field simulation. Nothing here touches the DOM.

#![allow(unused_crate_dependencies)]

use std::f64::consts::TAU;

use circuit_field::components::circuit_field::FrameLoop;
use circuit_field::{FieldConfig, FieldState, Node, PointerState};

fn in_bounds(field: &FieldState) -> bool {
	field
		.nodes()
		.iter()
		.all(|n| (0.0..field.width()).contains(&n.x) && (0.0..field.height()).contains(&n.y))
}

fn quiet() -> FieldConfig {
	FieldConfig {
		spark_probability: 0.0,
		..FieldConfig::default()
	}
}

#[test]
fn thousand_frames_stay_in_bounds_with_fixed_count() {
	let mut field = FieldState::seeded(FieldConfig::default(), 42);
	field.initialize(800.0, 600.0);
	assert_eq!(field.nodes().len(), 50);
	assert!(in_bounds(&field));

	for _ in 0..1000 {
		field.advance_frame();
		assert!(in_bounds(&field));
		assert_eq!(field.nodes().len(), 50);
	}
}

#[test]
fn wrap_holds_under_heavy_pointer_pressure() {
	let mut field = FieldState::seeded(FieldConfig::default(), 9);
	field.initialize(320.0, 240.0);

	for frame in 0..600 {
		let t = frame as f64 * 0.05;
		field.on_pointer_move(160.0 + 150.0 * t.cos(), 120.0 + 110.0 * t.sin());
		field.advance_frame();
		assert!(in_bounds(&field), "node escaped on frame {frame}");
	}
}

#[test]
fn resting_nodes_never_move_without_pointer() {
	let mut field = FieldState::seeded(quiet(), 5);
	field.initialize(800.0, 600.0);
	let resting: Vec<Node> = field
		.nodes()
		.iter()
		.map(|n| Node {
			vx: 0.0,
			vy: 0.0,
			..n.clone()
		})
		.collect();
	field.replace_nodes(resting.clone());

	for _ in 0..500 {
		field.advance_frame();
	}
	for (now, before) in field.nodes().iter().zip(&resting) {
		assert_eq!((now.x, now.y), (before.x, before.y));
		assert_eq!((now.vx, now.vy), (0.0, 0.0));
	}
}

#[test]
fn pointer_inside_radius_always_pushes_node_away() {
	let offsets = [
		(1.0, 0.0),
		(-50.0, 0.0),
		(0.0, 120.0),
		(-90.0, -90.0),
		(140.0, 130.0),
		(0.0, -199.0),
	];
	for (dx, dy) in offsets {
		let mut field = FieldState::seeded(quiet(), 1);
		field.initialize(800.0, 600.0);
		field.replace_nodes(vec![Node::at(400.0, 300.0)]);

		let (px, py) = (400.0 + dx, 300.0 + dy);
		field.on_pointer_move(px, py);
		field.advance_frame();

		let node = &field.nodes()[0];
		let before = (dx * dx + dy * dy).sqrt();
		let after = ((node.x - px).powi(2) + (node.y - py).powi(2)).sqrt();
		assert!(after > before, "pointer at ({px}, {py}) did not repel");
	}
}

#[test]
fn pointer_on_top_of_node_exerts_no_force() {
	let mut field = FieldState::seeded(quiet(), 1);
	field.initialize(800.0, 600.0);
	field.replace_nodes(vec![Node::at(400.0, 300.0)]);
	field.on_pointer_move(400.0, 300.0);
	field.advance_frame();

	let node = &field.nodes()[0];
	assert_eq!((node.x, node.y), (400.0, 300.0));
	assert!(node.vx.is_finite() && node.vy.is_finite());
	assert_eq!(field.pointer(), PointerState::At { x: 400.0, y: 300.0 });
}

#[test]
fn spark_is_removed_exactly_when_trail_is_gone() {
	let mut field = FieldState::seeded(quiet(), 11);
	field.initialize(800.0, 600.0);
	field.replace_nodes(vec![Node::at(100.0, 100.0), Node::at(200.0, 150.0)]);
	assert!(field.emit_spark(0, 1));

	let config = field.config().clone();
	let mut shadow = field.sparks()[0].clone();
	let mut last_progress = 0.0;

	for _ in 0..500 {
		shadow.advance(config.trail_decay, config.trail_floor);
		field.advance_frame();

		if shadow.is_spent() {
			assert!(field.sparks().is_empty());
			return;
		}
		assert_eq!(field.sparks().len(), 1);
		let spark = &field.sparks()[0];
		assert!(spark.progress >= last_progress);
		assert!(spark.progress <= 1.0);
		assert_eq!(spark.progress, shadow.progress);
		last_progress = spark.progress;
	}
	panic!("spark outlived 500 frames");
}

#[test]
fn live_sparks_stay_well_formed() {
	let config = FieldConfig {
		spark_probability: 0.05,
		..FieldConfig::default()
	};
	let mut field = FieldState::seeded(config, 21);
	field.initialize(800.0, 600.0);

	let mut seen = 0;
	for _ in 0..400 {
		field.advance_frame();
		seen = seen.max(field.sparks().len());
		for spark in field.sparks() {
			assert!((0.0..=1.0).contains(&spark.progress));
			assert!(!spark.is_spent());
			assert!(spark.trail.iter().all(|s| s.alpha >= 0.01 && s.alpha < 1.0));
		}
	}
	assert!(seen > 0, "no sparks fired at a high emission rate");
}

#[test]
fn connections_are_symmetric_and_match_distances() {
	let mut field = FieldState::seeded(FieldConfig::default(), 77);
	field.initialize(600.0, 400.0);

	for _ in 0..50 {
		field.advance_frame();
	}

	let nodes = field.nodes();
	let threshold = field.config().connection_distance;
	for i in 0..nodes.len() {
		for j in 0..nodes.len() {
			if i == j {
				continue;
			}
			assert_eq!(field.is_connected(i, j), field.is_connected(j, i));
			let d = ((nodes[i].x - nodes[j].x).powi(2) + (nodes[i].y - nodes[j].y).powi(2)).sqrt();
			assert_eq!(field.is_connected(i, j), d < threshold, "pair ({i}, {j})");
		}
	}
}

#[test]
fn initialize_is_reproducible_and_bounded() {
	let mut a = FieldState::seeded(FieldConfig::default(), 1234);
	let mut b = FieldState::seeded(FieldConfig::default(), 1234);
	a.initialize(1024.0, 768.0);
	b.initialize(1024.0, 768.0);
	assert_eq!(a.nodes(), b.nodes());

	for seed in [0, 1, 99, 4096] {
		let mut field = FieldState::seeded(FieldConfig::default(), seed);
		for _ in 0..2 {
			field.initialize(1024.0, 768.0);
			assert_eq!(field.nodes().len(), 50);
			assert!(in_bounds(&field));
			for n in field.nodes() {
				assert!((-0.25..0.25).contains(&n.vx));
				assert!((-0.25..0.25).contains(&n.vy));
				assert!((0.0..TAU).contains(&n.phase));
				assert!((2.0..5.0).contains(&n.size));
			}
		}
	}
}

#[test]
fn node_count_follows_config() {
	let config = FieldConfig {
		node_count: 7,
		..FieldConfig::default()
	};
	let mut field = FieldState::seeded(config, 3);
	field.initialize(300.0, 300.0);
	assert_eq!(field.nodes().len(), 7);
}

#[test]
fn dispose_twice_is_harmless() {
	let frame_loop = FrameLoop::new();
	assert!(frame_loop.begin_frame());
	frame_loop.scheduled(3);

	assert_eq!(frame_loop.dispose(), Some(Some(3)));
	assert_eq!(frame_loop.dispose(), None);
	assert!(!frame_loop.begin_frame());
}
