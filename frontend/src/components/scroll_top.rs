use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::scroll::{scroll_top_visible, smooth_scroll_to};

#[derive(Properties, PartialEq)]
pub struct ScrollToTopProps {
    pub threshold: f64,
}

pub fn button_style(visible: bool, hovered: bool) -> String {
    let (opacity, visibility) = if visible { ("1", "visible") } else { ("0", "hidden") };
    let (transform, shadow) = if hovered {
        ("translateY(-3px)", "0 8px 25px rgba(102, 126, 234, 0.4)")
    } else {
        ("translateY(0)", "0 5px 15px rgba(102, 126, 234, 0.3)")
    };
    format!(
        "position: fixed; bottom: 30px; right: 30px; width: 50px; height: 50px; \
         background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); border: none; \
         border-radius: 50%; color: white; font-size: 1.2rem; cursor: pointer; \
         opacity: {}; visibility: {}; transition: all 0.3s ease; z-index: 1000; \
         transform: {}; box-shadow: {};",
        opacity, visibility, transform, shadow
    )
}

/// Floating button that appears once the page is scrolled past `threshold`.
#[function_component(ScrollToTop)]
pub fn scroll_to_top(props: &ScrollToTopProps) -> Html {
    let (_, scroll_y) = use_window_scroll();
    let hovered = use_state(|| false);

    let onclick = Callback::from(|_: MouseEvent| {
        if let Some(window) = web_sys::window() {
            smooth_scroll_to(&window, 0.0);
        }
    });
    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };

    let style = button_style(scroll_top_visible(scroll_y, props.threshold), *hovered);

    html! {
        <button class="scroll-to-top" style={style} {onclick} {onmouseenter} {onmouseleave}>
            <i class="fas fa-arrow-up"></i>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_until_visible() {
        assert!(button_style(false, false).contains("opacity: 0; visibility: hidden;"));
        assert!(button_style(true, false).contains("opacity: 1; visibility: visible;"));
    }

    #[test]
    fn hover_lifts_the_button() {
        assert!(button_style(true, true).contains("transform: translateY(-3px);"));
        assert!(button_style(true, false).contains("transform: translateY(0);"));
    }
}
