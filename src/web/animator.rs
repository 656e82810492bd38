//! requestAnimationFrame loop driving the particle field on a canvas
//!
//! The frame closure re-schedules itself until `dispose()`; the closure is
//! kept in a shared slot so it can look itself up, and dispose empties the
//! slot to break that cycle.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

use super::canvas::CanvasSurface;
use super::listener::EventListener;
use crate::core::{FieldConfig, Lifecycle, ParticleField};
use crate::time::{now_millis, FrameMeter};

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Warn on the first overrun, then every this many
const BUDGET_WARN_EVERY: u64 = 300;

struct Loop {
    field: ParticleField,
    surface: CanvasSurface,
    lifecycle: Lifecycle,
    pending: Option<i32>,
    meter: FrameMeter,
}

impl Loop {
    fn tick(&mut self, timestamp: f64) {
        let start = now_millis();
        let stats = self.field.step(&mut self.surface);
        let work = now_millis() - start;

        if self.meter.record(timestamp, work) && self.meter.over_budget() % BUDGET_WARN_EVERY == 1 {
            warn!(
                work_ms = work,
                lines = stats.lines,
                overruns = self.meter.over_budget(),
                "Particle frame over budget"
            );
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.surface.set_size(width, height);
        self.field.resize(width as f64, height as f64);
    }
}

/// Running particle background
pub struct FieldAnimator {
    window: Window,
    state: Rc<RefCell<Loop>>,
    frame: FrameSlot,
    resize: Option<EventListener>,
}

impl FieldAnimator {
    pub fn start(
        window: &Window,
        canvas: HtmlCanvasElement,
        config: FieldConfig,
    ) -> Result<Self, JsValue> {
        let surface = CanvasSurface::new(canvas)?;
        let (width, height) = viewport_size(window);
        surface.set_size(width, height);

        let mut lifecycle = Lifecycle::default();
        lifecycle.start();
        let state = Rc::new(RefCell::new(Loop {
            field: ParticleField::new(config, width as f64, height as f64),
            surface,
            lifecycle,
            pending: None,
            meter: FrameMeter::default(),
        }));

        let frame: FrameSlot = Rc::new(RefCell::new(None));
        let frame_ref = frame.clone();
        let state_ref = state.clone();
        let win = window.clone();
        *frame.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            let mut state = state_ref.borrow_mut();
            state.pending = None;
            if !state.lifecycle.is_running() {
                return;
            }
            state.tick(timestamp);

            if let Some(callback) = frame_ref.borrow().as_ref() {
                match win.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(handle) => state.pending = Some(handle),
                    Err(e) => warn!(?e, "Failed to schedule particle frame"),
                }
            }
        }));

        let state_ref = state.clone();
        let win = window.clone();
        let resize = EventListener::attach(window, "resize", move |_| {
            let (width, height) = viewport_size(&win);
            debug!(width, height, "Viewport resized");
            state_ref.borrow_mut().resize(width, height);
        })?;

        let first = frame
            .borrow()
            .as_ref()
            .map(|callback| window.request_animation_frame(callback.as_ref().unchecked_ref()));
        match first {
            Some(Ok(handle)) => state.borrow_mut().pending = Some(handle),
            Some(Err(e)) => {
                frame.borrow_mut().take();
                return Err(e);
            }
            None => {}
        }

        info!(
            particles = state.borrow().field.particles().len(),
            width, height, "Particle field started"
        );

        Ok(Self {
            window: window.clone(),
            state,
            frame,
            resize: Some(resize),
        })
    }

    pub fn fps(&self) -> f64 {
        self.state.borrow().meter.fps()
    }

    /// Stop scheduling frames and drop the resize listener. Safe to call twice.
    pub fn dispose(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            if !state.lifecycle.dispose() {
                return;
            }
            if let Some(handle) = state.pending.take() {
                let _ = self.window.cancel_animation_frame(handle);
            }
            info!(
                frames = state.meter.frames(),
                overruns = state.meter.over_budget(),
                "Particle field disposed"
            );
        }
        self.resize = None;
        self.frame.borrow_mut().take();
    }
}

impl Drop for FieldAnimator {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn viewport_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}
