use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::dom;
use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::reveal::{RevealAction, RevealTracker};

const KEY_ATTR: &str = "data-reveal-key";

/// Observe every `.reveal` element and activate each once it is visible enough.
pub fn setup(document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let targets = dom::query_document::<Element>(document, ".reveal")?;
    if targets.is_empty() {
        return Err(SiteError::missing(".reveal"));
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::<usize>::new(config.reveal_threshold)));
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let mut tracker = tracker.borrow_mut();
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(key) = target.get_attribute(KEY_ATTR).and_then(|k| k.parse().ok()) else {
                    continue;
                };
                if tracker.observe(key, entry.is_intersecting(), entry.intersection_ratio())
                    == RevealAction::Reveal
                {
                    dom::toggle_class(&target, "active", true);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&config.reveal_threshold.into());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).map_err(dom::js_err)?;
    callback.forget();

    for (i, el) in targets.iter().enumerate() {
        el.set_attribute(KEY_ATTR, &i.to_string()).map_err(dom::js_err)?;
        observer.observe(el);
    }
    tracing::debug!(count = targets.len(), "observing reveal targets");
    Ok(())
}
