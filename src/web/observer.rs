//! IntersectionObserver feeding the visibility tracker
//!
//! Elements opt in with `data-animate-id="<id>"` and pick their animation
//! with `data-animate="fade-up|fade-left|fade-right|scale|rotate"`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::core::{
    transition_duration, IntersectionEntry, RevealConfig, RevealKind, Transition, VisibilityTracker,
    VisibleSnapshot,
};

pub const ID_ATTR: &str = "data-animate-id";
pub const KIND_ATTR: &str = "data-animate";

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Observes every tagged element and keeps the tracker current
pub struct RevealObserver {
    tracker: Rc<RefCell<VisibilityTracker>>,
    observer: Option<IntersectionObserver>,
    callback: Option<EntriesCallback>,
}

impl RevealObserver {
    /// Observe `[data-animate-id]` elements in `document`.
    ///
    /// `on_change` runs for every membership change with the reporting
    /// element. If IntersectionObserver is unavailable the observer is inert
    /// and elements keep their initial style.
    pub fn start<F>(document: &Document, config: RevealConfig, on_change: F) -> Self
    where
        F: FnMut(&Element, &Transition) + 'static,
    {
        let tracker = Rc::new(RefCell::new(VisibilityTracker::new(config)));
        match Self::connect(document, tracker.clone(), on_change) {
            Ok((observer, callback)) => Self {
                tracker,
                observer: Some(observer),
                callback: Some(callback),
            },
            Err(e) => {
                warn!(?e, "IntersectionObserver unavailable, reveals disabled");
                Self {
                    tracker,
                    observer: None,
                    callback: None,
                }
            }
        }
    }

    fn connect<F>(
        document: &Document,
        tracker: Rc<RefCell<VisibilityTracker>>,
        mut on_change: F,
    ) -> Result<(IntersectionObserver, EntriesCallback), JsValue>
    where
        F: FnMut(&Element, &Transition) + 'static,
    {
        let config = tracker.borrow().config().clone();
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.threshold));
        options.set_root_margin(&config.root_margin());

        let tracker_ref = tracker.clone();
        let on_entries = move |entries: Array, _: IntersectionObserver| {
            for value in entries.iter() {
                let Ok(entry) = value.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(id) = target.get_attribute(ID_ATTR) else {
                    continue;
                };
                let reported = IntersectionEntry::new(id, entry.intersection_ratio());
                let transitions = tracker_ref.borrow_mut().apply([&reported]);
                for transition in &transitions {
                    on_change(&target, transition);
                }
            }
        };
        let callback: EntriesCallback = Closure::new(on_entries);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        let elements = document.query_selector_all(&format!("[{}]", ID_ATTR))?;
        let mut observed = 0;
        for i in 0..elements.length() {
            let Some(element) = elements.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(id) = element.get_attribute(ID_ATTR) else {
                continue;
            };
            if tracker.borrow_mut().observe(id) {
                observer.observe(&element);
                observed += 1;
            }
        }

        info!(observed, "Reveal observer connected");
        Ok((observer, callback))
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.tracker.borrow().is_visible(id)
    }

    pub fn snapshot(&self) -> VisibleSnapshot {
        self.tracker.borrow().snapshot()
    }

    /// Disconnect and release the observer. Safe to call twice.
    pub fn dispose(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
            debug!("Reveal observer disconnected");
        }
        self.callback = None;
        self.tracker.borrow_mut().dispose();
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Animation kind declared on an element, fade-up if missing or unknown
pub fn reveal_kind(element: &Element) -> RevealKind {
    element
        .get_attribute(KIND_ATTR)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

/// Swap the element's pose classes for the given visibility
pub fn apply_pose(element: &Element, visible: bool, transition_ms: u32) {
    let kind = reveal_kind(element);
    let classes = element.class_list();
    for stale in [kind.pose_classes(!visible), kind.pose_classes(visible)] {
        for class in stale.split_whitespace() {
            let _ = classes.remove_1(class);
        }
    }
    for class in kind.class_list(visible).split_whitespace() {
        let _ = classes.add_1(class);
    }
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element
            .style()
            .set_property("transition-duration", &transition_duration(transition_ms));
    }
}

/// Put every tagged element in its hidden pose before observation starts
pub fn hide_all(document: &Document, transition_ms: u32) {
    let Ok(elements) = document.query_selector_all(&format!("[{}]", ID_ATTR)) else {
        return;
    };
    for i in 0..elements.length() {
        if let Some(element) = elements.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            apply_pose(&element, false, transition_ms);
        }
    }
}
