//! circuit-field: animated circuit-board backdrop for an electrical services site.
//!
//! This crate provides a WASM canvas component that renders a drifting node
//! graph with pointer repulsion, travelling sparks, a background grid and a
//! scan band, meant to sit behind the hero copy of the landing page.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::circuit_field::{
	CircuitFieldCanvas, FieldConfig, FieldState, FieldTheme, Node, PointerState, Spark,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("circuit-field: logging initialized");
}

/// Load field tuning from a script element with id="field-config".
/// Expected format: a JSON object with any subset of [`FieldConfig`] fields.
pub fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("circuit-field: loaded config with {} nodes", config.node_count);
			Some(config)
		}
		Err(e) => {
			warn!("circuit-field: failed to parse field config: {}", e);
			None
		}
	}
}

/// Pick the field palette from the `data-field-theme` attribute of the
/// `field-config` script element. Unknown names fall back to the default.
pub fn load_field_theme() -> Option<FieldTheme> {
	let document = web_sys::window()?.document()?;
	let name = document
		.get_element_by_id("field-config")?
		.get_attribute("data-field-theme")?;

	let theme = FieldTheme::named(&name);
	if theme.is_none() {
		warn!("circuit-field: unknown theme {name:?}, using default");
	}
	theme
}

/// Main application component.
/// Mounts the hero section with the animated field behind the headline.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();
	let theme = load_field_theme().unwrap_or_default();

	view! {
		<Html attr:lang="tr" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="İsmail Doğan Elektrik" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<section class="hero">
			<div class="hero-field">
				<CircuitFieldCanvas config=config theme=theme />
			</div>
			<div class="hero-overlay">
				<h1>"Profesyonel Elektrik Çözümleri"</h1>
				<p class="subtitle">"Güvenli, hızlı ve garantili elektrik hizmetleri."</p>
			</div>
		</section>
	}
}
