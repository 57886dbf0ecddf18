use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Window};

use crate::config::LandingConfig;
use crate::dom;
use crate::error::Result;

pub const HERO_SELECTOR: &str = ".hero-title, .hero-subtitle, .hero-stats, .hero-cta";

/// `document.readyState` once the `load` event has already fired.
fn has_loaded(ready_state: &str) -> bool {
    ready_state == "complete"
}

fn play_intro(document: &Document, loader_fade_ms: u32, hero_stagger_ms: u32) {
    if let Some(loader) = dom::select_one(document, ".loader") {
        dom::apply_styles(&loader, &[("opacity", "0")]);
        spawn_local(async move {
            TimeoutFuture::new(loader_fade_ms).await;
            dom::apply_styles(&loader, &[("display", "none")]);
        });
    }

    let hero = match dom::select_all(document, HERO_SELECTOR) {
        Ok(hero) => hero,
        Err(e) => {
            log::warn!("Skipping hero intro: {}", e);
            return;
        }
    };
    for (index, element) in hero.into_iter().enumerate() {
        let delay = dom::stagger_delay(index, hero_stagger_ms);
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            dom::apply_styles(&element, &[("opacity", "1"), ("transform", "translateY(0)")]);
        });
    }
}

/// Fades out the loading screen and staggers the hero blocks in once the page
/// has loaded. Runs right away if loading already finished.
pub fn init_intro(window: &Window, document: &Document, config: &LandingConfig) -> Result<()> {
    let loader_fade_ms = config.loader_fade_ms;
    let hero_stagger_ms = config.hero_stagger_ms;

    if has_loaded(&document.ready_state()) {
        play_intro(document, loader_fade_ms, hero_stagger_ms);
        return Ok(());
    }

    let document = document.clone();
    dom::listen(window, "load", move |_| {
        play_intro(&document, loader_fade_ms, hero_stagger_ms)
    })
}
