//! Small helpers shared by the page services: element lookup, inline style
//! writes and page-lifetime event bindings.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList};

use crate::error::Result;

/// Every element matching `selector` under `document`, as `HtmlElement`s.
pub fn select_all(document: &Document, selector: &str) -> Result<Vec<HtmlElement>> {
    Ok(html_elements(document.query_selector_all(selector)?))
}

/// Every descendant of `parent` matching `selector`.
pub fn select_within(parent: &Element, selector: &str) -> Result<Vec<HtmlElement>> {
    Ok(html_elements(parent.query_selector_all(selector)?))
}

/// First descendant of `parent` matching `selector`, if any.
pub fn first_within(parent: &Element, selector: &str) -> Option<HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn select_one(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Writes inline style properties. An empty value removes the property.
pub fn apply_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in styles {
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }
}

/// Delay for the `index`-th item of a staggered sequence.
pub fn stagger_delay(index: usize, step_ms: u32) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(step_ms)
}

/// Binds `handler` to `event` on `target` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    // Listeners live as long as the page does.
    callback.forget();
    Ok(())
}
