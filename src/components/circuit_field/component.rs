//! Leptos component wrapping the circuit field canvas.
//!
//! The component sizes a canvas to its parent (or the window), scales the
//! backing store by the device pixel ratio, and drives the field from a
//! `requestAnimationFrame` loop. Pointer handlers feed repulsion; window
//! resizes regenerate the nodes. Everything is torn down through
//! [`FieldHandle::dispose`] when the component unmounts.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, trace, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::lifecycle::FrameLoop;
use super::render;
use super::state::FieldState;
use super::surface::SurfaceMetrics;
use super::theme::FieldTheme;

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Field state plus what is needed to draw it.
struct FieldContext {
	state: FieldState,
	theme: FieldTheme,
	metrics: SurfaceMetrics,
}

/// Owns the frame loop and the window listener of one mounted field.
#[derive(Clone)]
pub struct FieldHandle {
	frame_loop: Rc<FrameLoop>,
	animate: Callback,
	resize_cb: Callback,
}

impl FieldHandle {
	fn new() -> Self {
		Self {
			frame_loop: Rc::new(FrameLoop::new()),
			animate: Rc::new(RefCell::new(None)),
			resize_cb: Rc::new(RefCell::new(None)),
		}
	}

	/// Stop the animation and detach the resize listener.
	///
	/// Safe to call any number of times; only the first call does anything.
	/// A frame already running finishes but schedules no successor.
	pub fn dispose(&self) {
		let Some(pending) = self.frame_loop.dispose() else {
			return;
		};

		if let Some(window) = web_sys::window() {
			if let Some(id) = pending {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(cb) = self.resize_cb.borrow_mut().take() {
				let listener: &js_sys::Function = cb.as_ref().unchecked_ref();
				let _ = window.remove_event_listener_with_callback("resize", listener);
			}
		}
		// Drops the self-referencing frame closure.
		self.animate.borrow_mut().take();

		debug!(
			"circuit-field: disposed after {} frames",
			self.frame_loop.frames()
		);
	}
}

/// Renders the animated circuit field on a canvas element.
///
/// By default the canvas fills its parent element; set `fullscreen = true` to
/// track the window instead. Tuning and colors come from `config` and
/// `theme`.
#[component]
pub fn CircuitFieldCanvas(
	#[prop(default = FieldConfig::default())] config: FieldConfig,
	#[prop(default = FieldTheme::default())] theme: FieldTheme,
	#[prop(default = false)] fullscreen: bool,
	#[prop(optional, into)] class: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<FieldContext>>> = Rc::new(RefCell::new(None));
	let handle = FieldHandle::new();
	let (context_init, handle_init) = (context.clone(), handle.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("circuit-field: no window, not mounting");
			return;
		};

		let metrics = measure(&canvas, &window, fullscreen);
		apply_metrics(&canvas, &metrics);

		let Some(ctx) = context_2d(&canvas) else {
			warn!("circuit-field: 2d context unavailable, not mounting");
			return;
		};

		let rng = SmallRng::seed_from_u64(entropy_seed());
		let mut state = FieldState::with_rng(config.clone(), rng);
		state.initialize(metrics.width, metrics.height);
		info!(
			"circuit-field: mounted {}x{} @{}x with {} nodes",
			metrics.width,
			metrics.height,
			metrics.pixel_ratio,
			state.nodes().len()
		);

		*context_init.borrow_mut() = Some(FieldContext {
			state,
			theme: theme.clone(),
			metrics,
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*handle_init.resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let metrics = measure(&canvas_resize, &win, fullscreen);
			apply_metrics(&canvas_resize, &metrics);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.metrics = metrics;
				c.state.initialize(metrics.width, metrics.height);
			}
		}));
		if let Some(ref cb) = *handle_init.resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner, loop_anim) = (
			context_init.clone(),
			handle_init.animate.clone(),
			handle_init.frame_loop.clone(),
		);
		*handle_init.animate.borrow_mut() = Some(Closure::new(move || {
			if !loop_anim.begin_frame() {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.metrics.is_drawable() {
					c.state.advance_frame();
					render::render(&c.state, &ctx, &c.theme, &c.metrics);
				} else {
					trace!("circuit-field: surface not ready, skipping frame");
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				request_frame(cb, &loop_anim);
			}
		}));
		if let Some(ref cb) = *handle_init.animate.borrow() {
			request_frame(cb, &handle_init.frame_loop);
		}
	});

	on_cleanup({
		let handle = SendWrapper::new(handle);
		move || handle.dispose()
	});

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.on_pointer_move(x, y);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.on_pointer_leave();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class=format!("circuit-field-canvas {class}")
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="position: absolute; inset: 0; display: block; pointer-events: auto;"
		/>
	}
}

fn request_frame(cb: &Closure<dyn FnMut()>, frame_loop: &FrameLoop) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
		frame_loop.scheduled(id);
	}
}

/// CSS size of the host box plus the display's pixel ratio.
fn measure(canvas: &HtmlCanvasElement, window: &Window, fullscreen: bool) -> SurfaceMetrics {
	let (fallback_w, fallback_h) = SurfaceMetrics::FALLBACK_SIZE;
	let (w, h) = if fullscreen {
		(
			window
				.inner_width()
				.ok()
				.and_then(|v| v.as_f64())
				.unwrap_or(fallback_w),
			window
				.inner_height()
				.ok()
				.and_then(|v| v.as_f64())
				.unwrap_or(fallback_h),
		)
	} else {
		canvas
			.parent_element()
			.map(|p| {
				let rect = p.get_bounding_client_rect();
				(rect.width(), rect.height())
			})
			.unwrap_or((fallback_w, fallback_h))
	};
	SurfaceMetrics::new(w, h, window.device_pixel_ratio())
}

/// Size the backing store in device pixels and pin the element to CSS pixels.
fn apply_metrics(canvas: &HtmlCanvasElement, metrics: &SurfaceMetrics) {
	let (bw, bh) = metrics.backing_size();
	canvas.set_width(bw);
	canvas.set_height(bh);

	let (css_w, css_h) = metrics.css_size();
	// Fully qualified: the leptos prelude's element `style` extension would shadow it.
	let style = web_sys::HtmlElement::style(canvas);
	let _ = style.set_property("width", &css_w);
	let _ = style.set_property("height", &css_h);
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

fn entropy_seed() -> u64 {
	let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
	(hi << 32) | lo
}
