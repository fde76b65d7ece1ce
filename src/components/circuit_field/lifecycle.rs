//! Frame loop bookkeeping.
//!
//! The animation reschedules itself every display frame until disposed.
//! [`FrameLoop`] is the flag and pending-request slot that make stopping it
//! immediate and idempotent; the component does the actual browser calls.

use std::cell::Cell;

/// Running flag plus the id of the frame request currently queued.
#[derive(Debug)]
pub struct FrameLoop {
	running: Cell<bool>,
	pending: Cell<Option<i32>>,
	frames: Cell<u64>,
}

impl Default for FrameLoop {
	fn default() -> Self {
		Self::new()
	}
}

impl FrameLoop {
	pub fn new() -> Self {
		Self {
			running: Cell::new(true),
			pending: Cell::new(None),
			frames: Cell::new(0),
		}
	}

	/// Called at the top of each frame callback. Returns `false` once disposed,
	/// in which case the callback must neither draw nor reschedule.
	pub fn begin_frame(&self) -> bool {
		self.pending.set(None);
		if !self.running.get() {
			return false;
		}
		self.frames.set(self.frames.get() + 1);
		true
	}

	/// Remember the id of the next queued frame. Ignored after dispose.
	pub fn scheduled(&self, id: i32) {
		if self.running.get() {
			self.pending.set(Some(id));
		}
	}

	/// Stop the loop.
	///
	/// The first call returns `Some` with the pending request id (if any) to
	/// cancel; later calls return `None` and do nothing.
	pub fn dispose(&self) -> Option<Option<i32>> {
		if !self.running.replace(false) {
			return None;
		}
		Some(self.pending.take())
	}

	/// Frames that have run so far.
	pub fn frames(&self) -> u64 {
		self.frames.get()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dispose_hands_back_pending_request_once() {
		let lp = FrameLoop::new();
		assert!(lp.begin_frame());
		lp.scheduled(7);

		assert_eq!(lp.dispose(), Some(Some(7)));
		assert_eq!(lp.dispose(), None);
		assert!(!lp.begin_frame());
	}

	#[test]
	fn dispose_before_first_request() {
		let lp = FrameLoop::new();
		assert_eq!(lp.dispose(), Some(None));
	}

	#[test]
	fn frame_in_flight_after_dispose_does_not_continue() {
		let lp = FrameLoop::new();
		lp.scheduled(1);
		lp.dispose();

		assert!(!lp.begin_frame());
		lp.scheduled(2);
		assert_eq!(lp.frames(), 0);
		assert_eq!(lp.dispose(), None);
	}

	#[test]
	fn counts_frames_while_running() {
		let lp = FrameLoop::new();
		for id in 0..3 {
			assert!(lp.begin_frame());
			lp.scheduled(id);
		}
		assert_eq!(lp.frames(), 3);
	}
}
