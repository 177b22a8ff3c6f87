use web_sys::{Document, Event, HtmlElement, MouseEvent, Window};

use super::dom;
use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::magnetic::{Magnet, PointerKind, Rect};

fn pointer_kind(window: &Window) -> PointerKind {
    match window.match_media("(pointer: fine)") {
        Ok(Some(query)) if query.matches() => PointerKind::Fine,
        _ => PointerKind::Coarse,
    }
}

fn translate((x, y): (f64, f64)) -> String {
    format!("translate({x}px, {y}px)")
}

pub fn setup(window: &Window, document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let Some(magnet) = Magnet::for_pointer(pointer_kind(window), config.magnet_strength) else {
        tracing::debug!("coarse pointer, magnetic buttons disabled");
        return Ok(());
    };
    let buttons = dom::query_document::<HtmlElement>(document, ".btn-magnetic")?;
    if buttons.is_empty() {
        return Err(SiteError::missing(".btn-magnetic"));
    }

    for btn in buttons {
        let moving = btn.clone();
        dom::listen(btn.as_ref(), "mousemove", move |e: MouseEvent| {
            let r = moving.get_bounding_client_rect();
            let rect = Rect {
                left: r.left(),
                top: r.top(),
                width: r.width(),
                height: r.height(),
            };
            let offset = magnet.offset(&rect, e.client_x() as f64, e.client_y() as f64);
            dom::set_style(&moving, "transform", &translate(offset));
        })?;
        let leaving = btn.clone();
        dom::listen(btn.as_ref(), "mouseleave", move |_: Event| {
            dom::set_style(&leaving, "transform", &translate(magnet.rest()));
        })?;
    }
    Ok(())
}
