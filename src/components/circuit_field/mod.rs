//! Animated circuit-board backdrop for the hero section.
//!
//! A few dozen nodes drift across a canvas, link up with neighbours that come
//! within range, and occasionally fire sparks along those links. The pointer
//! pushes nearby nodes away. Drawing adds a faint grid and a scan band that
//! sweeps down the surface.
//!
//! - [`FieldState`] holds the simulation and advances it one frame at a time
//! - [`render::render`] draws a field onto a 2D canvas context
//! - [`CircuitFieldCanvas`] is the Leptos component that mounts and drives it
//!
//! # Example
//!
//! ```ignore
//! use circuit_field::{CircuitFieldCanvas, FieldConfig};
//!
//! view! {
//!     <section class="hero">
//!         <CircuitFieldCanvas config=FieldConfig { node_count: 30, ..Default::default() } />
//!     </section>
//! }
//! ```

mod component;
mod config;
mod lifecycle;
pub mod render;
mod sparks;
mod state;
pub mod surface;
pub mod theme;

pub use component::{CircuitFieldCanvas, FieldHandle};
pub use config::FieldConfig;
pub use lifecycle::FrameLoop;
pub use sparks::{Spark, TrailSample};
pub use state::{Connection, FieldState, Node, PointerState};
pub use surface::SurfaceMetrics;
pub use theme::{Color, FieldTheme};
