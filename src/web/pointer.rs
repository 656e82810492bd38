//! Cursor follower ring and sticky-nav scroll state

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent, Window};

use super::listener::EventListener;
use crate::core::{CursorVariant, PointerConfig, PointerState};

/// Elements that grow the follower ring
const HOVER_SELECTOR: &str = "a, button, [data-cursor-hover]";
/// Class toggled on the nav once the page has scrolled
const NAV_CONDENSED_CLASS: &str = "nav-condensed";

pub struct PointerFollower {
    listeners: Vec<EventListener>,
}

impl PointerFollower {
    /// Track the mouse with `follower` and condense `nav` on scroll. Either
    /// element may be missing.
    pub fn start(
        window: &Window,
        follower: Option<HtmlElement>,
        nav: Option<Element>,
        config: PointerConfig,
    ) -> Result<Self, JsValue> {
        let state = Rc::new(RefCell::new(PointerState::new(config)));
        let mut listeners = Vec::new();

        if let Some(follower) = follower {
            // centre the ring before the first hover changes its variant
            let _ = follower
                .style()
                .set_property("transform", &state.borrow().follower_transform());

            let state_ref = state.clone();
            let ring = follower.clone();
            listeners.push(EventListener::attach(window, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let mut state = state_ref.borrow_mut();
                state.move_to(event.client_x() as f64, event.client_y() as f64);
                let style = ring.style();
                let _ = style.set_property("left", &format!("{}px", state.x));
                let _ = style.set_property("top", &format!("{}px", state.y));
            })?);

            let state_ref = state.clone();
            let ring = follower;
            listeners.push(EventListener::attach(window, "mouseover", move |event| {
                let over_target = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(HOVER_SELECTOR).ok().flatten())
                    .is_some();
                let variant = if over_target {
                    CursorVariant::Hover
                } else {
                    CursorVariant::Default
                };
                let mut state = state_ref.borrow_mut();
                if state.set_variant(variant) {
                    trace!(?variant, "Cursor variant");
                    let _ = ring.style().set_property("transform", &state.follower_transform());
                }
            })?);
        }

        if let Some(nav) = nav {
            let state_ref = state.clone();
            let win = window.clone();
            listeners.push(EventListener::attach(window, "scroll", move |_| {
                let mut state = state_ref.borrow_mut();
                let was = state.nav_condensed();
                state.scroll_to(win.scroll_y().unwrap_or(0.0));
                let now = state.nav_condensed();
                if now != was {
                    debug!(condensed = now, scroll_y = state.scroll_y, "Nav style changed");
                    let _ = nav.class_list().toggle_with_force(NAV_CONDENSED_CLASS, now);
                }
            })?);
        }

        Ok(Self { listeners })
    }

    /// Remove all listeners. Safe to call twice.
    pub fn dispose(&mut self) {
        self.listeners.clear();
    }
}
