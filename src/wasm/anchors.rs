use web_sys::{Document, Element, Event, ScrollBehavior, ScrollToOptions, Window};

use super::dom;
use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::scroll::{anchor_action, anchor_scroll_top, AnchorAction};

/// Smooth-scroll in-page links, leaving room for the fixed header.
pub fn setup(window: &Window, document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let anchors = dom::query_document::<Element>(document, r##"a[href^="#"]"##)?;
    let offset = config.anchor_offset;

    for anchor in &anchors {
        let (win, doc, link) = (window.clone(), document.clone(), anchor.clone());
        dom::listen(anchor.as_ref(), "click", move |e: Event| {
            let href = link.get_attribute("href").unwrap_or_default();
            let AnchorAction::ScrollTo(selector) = anchor_action(&href) else {
                return;
            };
            e.prevent_default();
            // Fragments that are not valid selectors simply find nothing.
            let Ok(Some(target)) = doc.query_selector(selector) else {
                return;
            };
            let top = anchor_scroll_top(
                target.get_bounding_client_rect().top(),
                dom::scroll_y(&win),
                offset,
            );
            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&options);
        })?;
    }
    tracing::debug!(count = anchors.len(), "smooth anchors");
    Ok(())
}
