use web_sys::{Document, Window};

use crate::config::LandingConfig;
use crate::dom;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavbarStyle {
    pub background: &'static str,
    pub backdrop_filter: &'static str,
}

const SCROLLED: NavbarStyle = NavbarStyle {
    background: "rgba(10, 10, 10, 0.98)",
    backdrop_filter: "blur(20px)",
};

const AT_TOP: NavbarStyle = NavbarStyle {
    background: "rgba(10, 10, 10, 0.95)",
    backdrop_filter: "blur(20px)",
};

pub fn navbar_style(scroll_y: f64, threshold: f64) -> NavbarStyle {
    if scroll_y > threshold {
        SCROLLED
    } else {
        AT_TOP
    }
}

/// Navbar scroll styling plus the mobile menu toggle.
pub fn init_navigation(window: &Window, document: &Document, config: &LandingConfig) -> Result<()> {
    if let Some(navbar) = dom::select_one(document, ".navbar") {
        let window_clone = window.clone();
        let threshold = config.nav_scroll_threshold;
        dom::listen(window, "scroll", move |_| {
            let style = navbar_style(window_clone.scroll_y().unwrap_or(0.0), threshold);
            dom::apply_styles(
                &navbar,
                &[
                    ("background", style.background),
                    ("backdrop-filter", style.backdrop_filter),
                ],
            );
        })?;
    } else {
        log::debug!("No .navbar on this page");
    }

    let (Some(toggle), Some(menu)) = (
        dom::select_one(document, ".nav-toggle"),
        dom::select_one(document, ".nav-menu"),
    ) else {
        return Ok(());
    };

    {
        let toggle_clone = toggle.clone();
        let menu = menu.clone();
        dom::listen(&toggle, "click", move |_| {
            let _ = menu.class_list().toggle("active");
            let _ = toggle_clone.class_list().toggle("active");
        })?;
    }

    for link in dom::select_all(document, ".nav-link")? {
        let toggle = toggle.clone();
        let menu = menu.clone();
        dom::listen(&link, "click", move |_| {
            if menu.class_list().contains("active") {
                let _ = menu.class_list().remove_1("active");
                let _ = toggle.class_list().remove_1("active");
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_darkens_past_threshold() {
        assert_eq!(navbar_style(0.0, 100.0).background, "rgba(10, 10, 10, 0.95)");
        assert_eq!(navbar_style(100.0, 100.0).background, "rgba(10, 10, 10, 0.95)");
        assert_eq!(navbar_style(100.5, 100.0).background, "rgba(10, 10, 10, 0.98)");
    }

    #[test]
    fn blur_is_constant() {
        assert_eq!(
            navbar_style(0.0, 100.0).backdrop_filter,
            navbar_style(900.0, 100.0).backdrop_filter
        );
    }
}
