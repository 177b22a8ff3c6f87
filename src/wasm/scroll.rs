use web_sys::{Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use super::dom;
use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::scroll::{active_link, progress_percent, ScrollEffects};

/// Progress bar, back-to-top, active nav link, parallax shapes and header
/// state, each on its own passive scroll listener.
pub fn setup(window: &Window, document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let fx = ScrollEffects::from_config(config);
    let progress = dom::by_id::<HtmlElement>(document, "scroll-progress").ok();
    let back_to_top = dom::by_id::<HtmlElement>(document, "back-to-top").ok();

    if progress.is_some() || back_to_top.is_some() {
        let win = window.clone();
        let doc = document.clone();
        let back_to_top = back_to_top.clone();
        dom::listen_passive(window.as_ref(), "scroll", move |_: Event| {
            let y = dom::scroll_y(&win);
            if let (Some(bar), Some(body)) = (&progress, doc.body()) {
                let (_, viewport_h) = dom::viewport(&win);
                let pct = progress_percent(y, body.scroll_height() as f64, viewport_h);
                if pct.is_finite() {
                    dom::set_style(bar, "width", &format!("{pct}%"));
                }
            }
            if let Some(btn) = &back_to_top {
                dom::toggle_class(btn, "visible", fx.back_to_top_visible(y));
            }
        })?;
    }

    if let Some(btn) = back_to_top {
        let win = window.clone();
        dom::listen(btn.as_ref(), "click", move |_: Event| {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&options);
        })?;
    }

    let sections = dom::query_document::<HtmlElement>(document, "section[id]")?;
    let links = dom::query_document::<Element>(document, ".nav-links a")?;
    if !sections.is_empty() && !links.is_empty() {
        let win = window.clone();
        dom::listen_passive(window.as_ref(), "scroll", move |_: Event| {
            let y = dom::scroll_y(&win);
            let tops: Vec<f64> = sections.iter().map(|s| s.offset_top() as f64).collect();
            let current = fx.active_section(&tops, y).map(|i| sections[i].id());
            let hrefs: Vec<Option<String>> = links.iter().map(|a| a.get_attribute("href")).collect();
            let active = active_link(&hrefs, current.as_deref());
            for (i, link) in links.iter().enumerate() {
                dom::toggle_class(link, "active", active == Some(i));
            }
        })?;
    }

    let shapes = dom::query_document::<HtmlElement>(document, ".shape")?;
    if !shapes.is_empty() {
        let win = window.clone();
        dom::listen_passive(window.as_ref(), "scroll", move |_: Event| {
            let y = dom::scroll_y(&win);
            for (i, shape) in shapes.iter().enumerate() {
                let offset = fx.parallax_offset(i, y);
                dom::set_style(shape, "transform", &format!("translateY({offset}px)"));
            }
        })?;
    }

    if let Ok(header) = dom::by_id::<Element>(document, "main-header") {
        let win = window.clone();
        dom::listen_passive(window.as_ref(), "scroll", move |_: Event| {
            dom::toggle_class(&header, "scrolled", fx.header_scrolled(dom::scroll_y(&win)));
        })?;
    }

    Ok(())
}
