use stylist::GlobalStyle;
use web_sys::Document;

use crate::error::{LandingError, Result};

/// Keyframes and notification layout used by the toasts and card pulse.
pub const ANIMATIONS: &str = r#"
@keyframes slideInRight {
    from {
        transform: translateX(100%);
        opacity: 0;
    }
    to {
        transform: translateX(0);
        opacity: 1;
    }
}

@keyframes slideOutRight {
    from {
        transform: translateX(0);
        opacity: 1;
    }
    to {
        transform: translateX(100%);
        opacity: 0;
    }
}

@keyframes pulse {
    0% {
        transform: scale(1);
    }
    50% {
        transform: scale(1.02);
    }
    100% {
        transform: scale(1);
    }
}

.notification-content {
    display: flex;
    align-items: center;
    gap: 0.5rem;
}

.notification-close {
    background: none;
    border: none;
    color: white;
    font-size: 1.2rem;
    cursor: pointer;
    margin-left: auto;
    padding: 0;
    width: 20px;
    height: 20px;
    display: flex;
    align-items: center;
    justify-content: center;
}

.notification-close:hover {
    opacity: 0.7;
}
"#;

/// Registers the page animations once. If stylist can't take the sheet the raw
/// CSS goes into a plain `<style>` tag instead.
pub fn install(document: &Document) -> Result<()> {
    match GlobalStyle::new(ANIMATIONS) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::warn!("stylist rejected page animations, inlining them: {}", e);
            let style = document.create_element("style")?;
            style.set_text_content(Some(ANIMATIONS));
            document
                .head()
                .ok_or(LandingError::MissingElement("head"))?
                .append_child(&style)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defines_every_animation_the_page_uses() {
        for name in ["slideInRight", "slideOutRight", "pulse"] {
            assert!(ANIMATIONS.contains(&format!("@keyframes {} {{", name)), "missing {}", name);
        }
        assert!(crate::cards::PULSE_ANIMATION.starts_with("pulse "));
    }
}
