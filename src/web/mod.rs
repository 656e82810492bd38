//! Browser bindings: mount the effects onto the page and tear them down
//!
//! Page contract:
//! - `<canvas id="particle-field">` full-viewport background
//! - `<div id="cursor-follower">` follower ring (optional)
//! - `<nav>` condensed on scroll (optional)
//! - `[data-animate-id]` elements revealed on scroll

mod animator;
mod canvas;
mod listener;
mod observer;
mod pointer;

use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, Window};

use crate::core::{EffectsConfig, Lifecycle, Transition};
use animator::FieldAnimator;
use observer::RevealObserver;
use pointer::PointerFollower;

const CANVAS_ID: &str = "particle-field";
const FOLLOWER_ID: &str = "cursor-follower";
const NAV_SELECTOR: &str = "nav";

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();
}

/// Handle to everything mounted on the page
#[wasm_bindgen]
pub struct Effects {
    field: Option<FieldAnimator>,
    reveal: Option<RevealObserver>,
    pointer: Option<PointerFollower>,
    state: Lifecycle,
}

#[wasm_bindgen]
impl Effects {
    /// Mount all effects. `config_json` is an optional `EffectsConfig` as
    /// JSON; a malformed config falls back to defaults. Missing page
    /// elements disable the matching effect without failing.
    #[wasm_bindgen(constructor)]
    pub fn mount(config_json: Option<String>) -> Effects {
        let config = match config_json.as_deref().map(EffectsConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                warn!(error = %e, "Invalid effects config, using defaults");
                EffectsConfig::default()
            }
            None => EffectsConfig::default(),
        };

        let mut effects = Effects {
            field: None,
            reveal: None,
            pointer: None,
            state: Lifecycle::default(),
        };
        let Some((window, document)) = page() else {
            warn!("No window/document, effects disabled");
            return effects;
        };
        effects.state.start();

        effects.field = find_canvas(&document).and_then(|canvas| {
            FieldAnimator::start(&window, canvas, config.field.clone())
                .map_err(|e| warn!(?e, "Particle field unavailable"))
                .ok()
        });

        let transition_ms = config.reveal.transition_ms;
        observer::hide_all(&document, transition_ms);
        let on_change = move |element: &Element, transition: &Transition| {
            observer::apply_pose(element, transition.visible, transition_ms);
        };
        effects.reveal = Some(RevealObserver::start(&document, config.reveal.clone(), on_change));

        let follower = document
            .get_element_by_id(FOLLOWER_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let nav = document.query_selector(NAV_SELECTOR).ok().flatten();
        effects.pointer = PointerFollower::start(&window, follower, nav, config.pointer.clone())
            .map_err(|e| warn!(?e, "Pointer follower unavailable"))
            .ok();

        info!(
            field = effects.field.is_some(),
            pointer = effects.pointer.is_some(),
            "Effects mounted"
        );
        effects
    }

    /// Whether the element tagged `id` is currently revealed
    pub fn is_visible(&self, id: &str) -> bool {
        self.reveal.as_ref().is_some_and(|r| r.is_visible(id))
    }

    /// Ids currently revealed, sorted
    pub fn visible_ids(&self) -> Vec<String> {
        self.reveal
            .as_ref()
            .map(|r| r.snapshot().iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Particle loop frame rate, 0 when not running
    pub fn fps(&self) -> f64 {
        self.field.as_ref().map_or(0.0, |f| f.fps())
    }

    /// Stop every loop, observer and listener. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if !self.state.dispose() {
            return;
        }
        if let Some(field) = self.field.as_mut() {
            field.dispose();
        }
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.dispose();
        }
        if let Some(pointer) = self.pointer.as_mut() {
            pointer.dispose();
        }
        info!("Effects disposed");
    }
}

impl Drop for Effects {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn page() -> Option<(Window, Document)> {
    let window = web_sys::window()?;
    let document = window.document()?;
    Some((window, document))
}

fn find_canvas(document: &Document) -> Option<HtmlCanvasElement> {
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
    if canvas.is_none() {
        warn!(id = CANVAS_ID, "Canvas not mounted, particle field skipped");
    }
    canvas
}
