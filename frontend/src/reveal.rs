use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::config::{LandingConfig, ObserverConfig};
use crate::dom;
use crate::error::Result;

pub const REVEAL_SELECTOR: &str =
    ".model-card, .platform-card, .feature-card, .stat-card, .testimonial-card, .tech-card";

const HIDDEN: [(&str, &str); 2] = [("opacity", "0"), ("transform", "translateY(30px)")];
const SHOWN: [(&str, &str); 3] = [
    ("opacity", "1"),
    ("transform", "translateY(0)"),
    ("transition", "all 0.6s ease-out"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".to_string(),
        }
    }
}

impl From<&ObserverConfig> for ObserverOptions {
    fn from(config: &ObserverConfig) -> Self {
        Self {
            threshold: config.threshold,
            root_margin: config.root_margin.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveMode {
    /// Fire on the first intersection, then stop watching the element.
    Once,
    /// Fire on every intersecting event.
    Persistent,
}

/// Per-element firing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    mode: ObserveMode,
    fired: bool,
}

impl Trigger {
    pub fn new(mode: ObserveMode) -> Self {
        Self { mode, fired: false }
    }

    /// Whether this intersection event should run the element's effect.
    pub fn on_intersection(&mut self, is_intersecting: bool) -> bool {
        if !is_intersecting {
            return false;
        }
        match self.mode {
            ObserveMode::Once if self.fired => false,
            _ => {
                self.fired = true;
                true
            }
        }
    }

    /// A spent trigger will never fire again and its element can be unobserved.
    pub fn is_spent(&self) -> bool {
        self.mode == ObserveMode::Once && self.fired
    }
}

type Watched = Rc<RefCell<Vec<(Element, Trigger)>>>;

/// An `IntersectionObserver` that hands entering elements to a callback.
pub struct ViewportObserver {
    observer: IntersectionObserver,
    watched: Watched,
    mode: ObserveMode,
}

impl ViewportObserver {
    pub fn new<F>(options: &ObserverOptions, mode: ObserveMode, mut on_enter: F) -> Result<Self>
    where
        F: FnMut(HtmlElement) + 'static,
    {
        let watched: Watched = Rc::new(RefCell::new(Vec::new()));
        let watched_clone = watched.clone();

        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();

                let fire = {
                    let mut watched = watched_clone.borrow_mut();
                    let Some(index) = watched.iter().position(|(el, _)| *el == target) else {
                        continue;
                    };
                    let fire = watched[index].1.on_intersection(entry.is_intersecting());
                    if watched[index].1.is_spent() {
                        observer.unobserve(&target);
                        watched.swap_remove(index);
                    }
                    fire
                };

                if fire {
                    if let Ok(element) = target.dyn_into::<HtmlElement>() {
                        on_enter(element);
                    }
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        // Observers stay attached for the lifetime of the page.
        callback.forget();

        Ok(Self {
            observer,
            watched,
            mode,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.watched
            .borrow_mut()
            .push((element.clone(), Trigger::new(self.mode)));
        self.observer.observe(element);
    }
}

/// Hides every card and fades it in when a tenth of it scrolls into view.
pub fn init_reveal(document: &Document, config: &LandingConfig) -> Result<usize> {
    let elements = dom::select_all(document, REVEAL_SELECTOR)?;
    if elements.is_empty() {
        return Ok(0);
    }

    let observer = ViewportObserver::new(
        &ObserverOptions::from(&config.reveal),
        ObserveMode::Persistent,
        |element: HtmlElement| dom::apply_styles(&element, &SHOWN),
    )?;

    for element in &elements {
        dom::apply_styles(element, &HIDDEN);
        observer.observe(element);
    }
    Ok(elements.len())
}
