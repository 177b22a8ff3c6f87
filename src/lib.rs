#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Page interactions for the marketing site: scroll effects, the mobile menu,
//! reveal-on-view, the gallery carousel, magnetic buttons, the sign-up form,
//! smooth anchors and the cursor trail.
//!
//! The effect logic lives in plain modules that build and test on the host.
//! The browser glue in `wasm` only reads the DOM, feeds those modules, and
//! writes their results back.

pub mod carousel;
pub mod config;
pub mod error;
pub mod form;
pub mod magnetic;
pub mod menu;
pub mod reveal;
pub mod scroll;
pub mod timing;
pub mod trail;

pub use config::SiteConfig;
pub use error::{SiteError, SiteResult};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::SiteConfig;
    use crate::error::SiteError;

    mod anchors;
    mod carousel;
    mod dom;
    mod form;
    mod magnetic;
    mod menu;
    mod reveal;
    mod scroll;
    mod trail;

    impl From<SiteError> for JsValue {
        fn from(err: SiteError) -> Self {
            JsValue::from_str(&err.to_string())
        }
    }

    fn attach(name: &str, result: Result<(), SiteError>) {
        match result {
            Ok(()) => tracing::debug!(component = name, "attached"),
            Err(SiteError::MissingElement(what)) => {
                tracing::debug!(component = name, %what, "element absent, skipping")
            }
            Err(err) => tracing::warn!(component = name, %err, "setup failed"),
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();

        let window = web_sys::window().ok_or(SiteError::missing("window"))?;
        let document = window.document().ok_or(SiteError::missing("document"))?;
        let config: SiteConfig = dom::load_config(&document);
        tracing::info!(?config, "starting page effects");

        attach("scroll", scroll::setup(&window, &document, &config));
        attach("menu", menu::setup(&document, &config));
        attach("reveal", reveal::setup(&document, &config));
        attach("carousel", carousel::setup(&document, &config));
        attach("magnetic", magnetic::setup(&window, &document, &config));
        attach("form", form::setup(&window, &document, &config));
        attach("anchors", anchors::setup(&window, &document, &config));
        attach("trail", trail::start(&window, &document, &config));
        Ok(())
    }
}
