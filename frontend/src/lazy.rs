use web_sys::{Document, HtmlElement};

use crate::dom;
use crate::error::Result;
use crate::reveal::{ObserveMode, ObserverOptions, ViewportObserver};

pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
const DEFERRED_SOURCE: &str = "data-src";

/// Swaps in `data-src` the first time each deferred image reaches the viewport.
pub fn init_lazy_images(document: &Document) -> Result<usize> {
    let images = dom::select_all(document, LAZY_IMAGE_SELECTOR)?;
    if images.is_empty() {
        return Ok(0);
    }

    let observer = ViewportObserver::new(
        &ObserverOptions::default(),
        ObserveMode::Once,
        |image: HtmlElement| {
            if let Some(source) = image.get_attribute(DEFERRED_SOURCE) {
                let _ = image.set_attribute("src", &source);
            }
            let _ = image.class_list().remove_1("lazy");
        },
    )?;

    for image in &images {
        observer.observe(image);
    }
    Ok(images.len())
}
