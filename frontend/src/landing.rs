use web_sys::{Document, Element, Window};
use yew::html::BaseComponent;

use crate::cards;
use crate::components::scroll_top::{ScrollToTop, ScrollToTopProps};
use crate::components::toast::{ToastHost, ToastHostProps};
use crate::config::LandingConfig;
use crate::counter;
use crate::error::{LandingError, Result};
use crate::form::ContactForm;
use crate::intro;
use crate::lazy;
use crate::nav;
use crate::notification::{Notifier, ToastLifecycle};
use crate::reveal;
use crate::scroll;
use crate::theme;

const TOAST_HOST_ID: &str = "landing-toasts";
const SCROLL_TOP_HOST_ID: &str = "landing-scroll-top";

/// The page's services, wired once at startup against one document. A service
/// that fails is logged and skipped; the rest still start.
pub struct Landing {
    pub config: LandingConfig,
}

fn report(service: &str, bound: Result<usize>) {
    match bound {
        Ok(0) => log::debug!("{}: nothing to bind", service),
        Ok(count) => log::info!("{}: bound {} element(s)", service, count),
        Err(e) => log::warn!("{}: skipped ({})", service, e),
    }
}

fn mount_host(document: &Document, id: &str) -> Result<Element> {
    if let Some(existing) = document.get_element_by_id(id) {
        return Ok(existing);
    }
    let host = document.create_element("div")?;
    host.set_id(id);
    document
        .body()
        .ok_or(LandingError::MissingElement("body"))?
        .append_child(&host)?;
    Ok(host)
}

/// Renders component `C` into its host element. A page without a `<body>`
/// gets no island, and startup carries on without it.
fn render_island<C: BaseComponent + 'static>(
    document: &Document,
    id: &str,
    props: C::Properties,
) -> Result<usize> {
    let host = mount_host(document, id)?;
    yew::Renderer::<C>::with_root_and_props(host, props).render();
    Ok(1)
}

impl Landing {
    pub fn start(window: &Window, document: &Document) -> Self {
        let config = LandingConfig::from_document(document);

        if let Err(e) = theme::install(document) {
            log::warn!("Page animations unavailable: {}", e);
        }

        let notifier = Notifier::new();
        report(
            "toasts",
            render_island::<ToastHost>(
                document,
                TOAST_HOST_ID,
                ToastHostProps {
                    notifier: notifier.clone(),
                    lifecycle: ToastLifecycle::new(config.toast_lifetime_ms, config.toast_exit_ms),
                },
            ),
        );
        report(
            "scroll-to-top",
            render_island::<ScrollToTop>(
                document,
                SCROLL_TOP_HOST_ID,
                ScrollToTopProps {
                    threshold: config.scroll_top_threshold,
                },
            ),
        );

        report("navigation", nav::init_navigation(window, document, &config).map(|_| 1));
        report("counters", counter::init_counters(document, &config));
        report("reveal", reveal::init_reveal(document, &config));
        report(
            "contact form",
            match ContactForm::attach(document, notifier.clone()) {
                Err(LandingError::MissingElement(_)) => Ok(0),
                attached => attached.map(|_| 1),
            },
        );
        report("cards", cards::init_cards(document, &config));
        report("anchors", scroll::init_smooth_scrolling(window, document, &config));
        report("parallax", scroll::init_parallax(window, document, &config));
        report("lazy images", lazy::init_lazy_images(document));
        report("intro", intro::init_intro(window, document, &config).map(|_| 1));

        Self { config }
    }
}
