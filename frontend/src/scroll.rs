use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::config::LandingConfig;
use crate::dom;
use crate::error::Result;

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const PARALLAX_SELECTOR: &str = ".hero-bg-image, .network-image";

/// Page offset that puts an anchor target just below the fixed header.
pub fn anchor_scroll_top(offset_top: f64, header_offset: f64) -> f64 {
    offset_top - header_offset
}

/// Element id an in-page link points at. A bare `#` points nowhere.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Vertical shift for a parallax layer, or `None` while the layer is off screen.
pub fn parallax_offset(
    scroll_y: f64,
    rate: f64,
    rect_top: f64,
    rect_bottom: f64,
    viewport_height: f64,
) -> Option<f64> {
    (rect_top < viewport_height && rect_bottom > 0.0).then(|| scroll_y * rate)
}

pub fn scroll_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Smoothly scrolls the window to `top`.
pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Turns in-page anchor links into smooth scrolls that clear the fixed header.
pub fn init_smooth_scrolling(
    window: &Window,
    document: &Document,
    config: &LandingConfig,
) -> Result<usize> {
    let links = dom::select_all(document, ANCHOR_SELECTOR)?;
    for link in &links {
        let window = window.clone();
        let document = document.clone();
        let link_clone = link.clone();
        let header_offset = config.header_offset;
        dom::listen(link, "click", move |e: Event| {
            e.prevent_default();
            let href = link_clone.get_attribute("href").unwrap_or_default();
            let Some(id) = anchor_target_id(&href) else {
                return;
            };
            let Some(section) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                log::debug!("No section for anchor {}", href);
                return;
            };
            let top = anchor_scroll_top(f64::from(section.offset_top()), header_offset);
            smooth_scroll_to(&window, top);
        })?;
    }
    Ok(links.len())
}

/// Moves background layers at a fraction of the scroll speed.
pub fn init_parallax(window: &Window, document: &Document, config: &LandingConfig) -> Result<usize> {
    let layers = dom::select_all(document, PARALLAX_SELECTOR)?;
    if layers.is_empty() {
        return Ok(0);
    }

    let count = layers.len();
    let window_clone = window.clone();
    let rate = config.parallax_rate;
    dom::listen(window, "scroll", move |_| {
        let scroll_y = window_clone.scroll_y().unwrap_or(0.0);
        let viewport_height = window_clone
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        for layer in &layers {
            let rect = layer.get_bounding_client_rect();
            if let Some(shift) =
                parallax_offset(scroll_y, rate, rect.top(), rect.bottom(), viewport_height)
            {
                let transform = format!("translateY({}px)", shift);
                dom::apply_styles(layer, &[("transform", transform.as_str())]);
            }
        }
    })?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_lands_80px_below_the_top() {
        assert_eq!(anchor_scroll_top(1200.0, 80.0), 1120.0);
        assert_eq!(anchor_scroll_top(40.0, 80.0), -40.0);
    }

    #[test]
    fn anchor_ids() {
        assert_eq!(anchor_target_id("#contact"), Some("contact"));
        assert_eq!(anchor_target_id("#"), None);
        assert_eq!(anchor_target_id("/about"), None);
    }

    #[test]
    fn parallax_moves_at_half_speed_while_visible() {
        assert_eq!(parallax_offset(400.0, -0.5, -100.0, 600.0, 800.0), Some(-200.0));
        assert_eq!(parallax_offset(0.0, -0.5, 0.0, 600.0, 800.0), Some(0.0));
    }

    #[test]
    fn parallax_skips_off_screen_layers() {
        // Entirely above the viewport.
        assert_eq!(parallax_offset(2000.0, -0.5, -900.0, 0.0, 800.0), None);
        // Entirely below it.
        assert_eq!(parallax_offset(0.0, -0.5, 800.0, 1400.0, 800.0), None);
    }

    #[test]
    fn scroll_top_control_threshold() {
        assert!(!scroll_top_visible(0.0, 500.0));
        assert!(!scroll_top_visible(500.0, 500.0));
        assert!(scroll_top_visible(501.0, 500.0));
    }
}
