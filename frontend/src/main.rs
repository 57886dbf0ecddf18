use log::{error, info};

mod cards;
mod config;
mod counter;
mod dom;
mod error;
mod form;
mod intro;
mod landing;
mod lazy;
mod nav;
mod notification;
mod reveal;
mod scroll;
mod theme;
mod components {
    pub mod scroll_top;
    pub mod toast;
}

use landing::Landing;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    let Some(window) = web_sys::window() else {
        error!("No window; not running in a browser");
        return;
    };
    let Some(document) = window.document() else {
        error!("Window has no document");
        return;
    };

    info!("Starting landing page");
    let landing = Landing::start(&window, &document);
    info!(
        "Landing page ready (header offset {}px)",
        landing.config.header_offset
    );
}
