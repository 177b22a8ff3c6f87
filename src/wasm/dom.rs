use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, NodeList, Window};

use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::error::{SiteError, SiteResult};
use crate::timing::Millis;

pub fn js_err(value: JsValue) -> SiteError {
    SiteError::dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Element by id, cast to `T`.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> SiteResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SiteError::missing(format!("#{id}")))?
        .dyn_into::<T>()
        .map_err(|_| SiteError::element_type(format!("#{id}")))
}

fn collect_nodes<T: JsCast>(list: NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Every element under `root` matching `selector`, in document order.
pub fn query_all<T: JsCast>(root: &impl AsRef<Element>, selector: &str) -> SiteResult<Vec<T>> {
    root.as_ref().query_selector_all(selector).map(collect_nodes::<T>).map_err(js_err)
}

/// Document-wide variant of [`query_all`].
pub fn query_document<T: JsCast>(document: &Document, selector: &str) -> SiteResult<Vec<T>> {
    document.query_selector_all(selector).map(collect_nodes::<T>).map_err(js_err)
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = el.style().set_property(property, value) {
        tracing::warn!(property, err = ?err, "style write failed");
    }
}

pub fn toggle_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        tracing::warn!(class, err = ?err, "class toggle failed");
    }
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn now(window: &Window) -> Millis {
    window.performance().map_or(0.0, |p| p.now())
}

pub fn viewport(window: &Window) -> (f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

/// Attach a page-lifetime listener.
pub fn listen<E: FromWasmAbi + 'static>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> SiteResult<()> {
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

/// Like [`listen`], registered as passive so scrolling never waits on it.
pub fn listen_passive<E: FromWasmAbi + 'static>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> SiteResult<()> {
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

/// Read overrides from the config script element, falling back to defaults.
pub fn load_config(document: &Document) -> SiteConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    SiteConfig::from_json(&text).unwrap_or_else(|err| {
        tracing::warn!(%err, "bad page config, using defaults");
        SiteConfig::default()
    })
}
