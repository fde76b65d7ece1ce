//! Sparks: short-lived pulses of energy travelling along a connection.

/// One fading sample left behind by a spark head.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSample {
	pub x: f64,
	pub y: f64,
	pub alpha: f64,
}

/// A spark moving from `origin` to `target` with a fading trail.
///
/// Endpoints are frozen when the spark is emitted, so it keeps its course
/// even if the nodes it came from drift apart.
#[derive(Clone, Debug)]
pub struct Spark {
	pub origin: (f64, f64),
	pub target: (f64, f64),
	/// Fraction of the path travelled, in [0, 1].
	pub progress: f64,
	/// Progress added per frame.
	pub speed: f64,
	pub trail: Vec<TrailSample>,
}

impl Spark {
	pub fn new(origin: (f64, f64), target: (f64, f64), speed: f64) -> Self {
		Self {
			origin,
			target,
			progress: 0.0,
			speed,
			trail: Vec::new(),
		}
	}

	/// Interpolated position at the current progress.
	pub fn head(&self) -> (f64, f64) {
		let t = self.progress;
		(
			self.origin.0 + (self.target.0 - self.origin.0) * t,
			self.origin.1 + (self.target.1 - self.origin.1) * t,
		)
	}

	/// Whether the head has reached the target.
	pub fn arrived(&self) -> bool {
		self.progress >= 1.0
	}

	/// Advance one frame.
	///
	/// While in flight the head moves forward and drops a fresh sample; every
	/// sample then fades by `decay` and those below `floor` are discarded.
	/// Once arrived, the trail only fades.
	pub fn advance(&mut self, decay: f64, floor: f64) {
		if !self.arrived() {
			self.progress = (self.progress + self.speed).min(1.0);
			let (x, y) = self.head();
			self.trail.push(TrailSample { x, y, alpha: 1.0 });
		}

		for sample in &mut self.trail {
			sample.alpha *= decay;
		}
		self.trail.retain(|s| s.alpha >= floor);
	}

	/// Arrived with nothing left to draw.
	pub fn is_spent(&self) -> bool {
		self.arrived() && self.trail.is_empty()
	}
}
