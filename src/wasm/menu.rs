use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent};

use super::dom;
use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::menu::{CloseReason, Menu, MenuTransition};

struct MenuDom {
    document: Document,
    drawer: HtmlElement,
    toggle: HtmlElement,
}

impl MenuDom {
    fn apply(&self, transition: &MenuTransition) {
        let open = transition.state.is_open();
        dom::toggle_class(&self.drawer, "active", open);
        dom::toggle_class(&self.toggle, "is-active", open);
        if let Some(body) = self.document.body() {
            dom::set_style(&body, "overflow", if open { "hidden" } else { "" });
        }
        let expanded = if open { "true" } else { "false" };
        if let Err(err) = self.toggle.set_attribute("aria-expanded", expanded) {
            tracing::warn!(err = ?err, "aria-expanded write failed");
        }

        if !transition.stagger.is_empty() {
            let items = dom::query_all::<HtmlElement>(&self.drawer, "li").unwrap_or_default();
            for (item, delay) in items.iter().zip(&transition.stagger) {
                dom::set_style(item, "transition-delay", &format!("{delay}s"));
            }
        }
    }

    fn is_open(&self) -> bool {
        self.drawer.class_list().contains("active")
    }
}

pub fn setup(document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let drawer = dom::by_id::<HtmlElement>(document, "mobile-menu")?;
    let toggle = dom::by_id::<HtmlElement>(document, "mobile-toggle")?;
    let items = dom::query_all::<Element>(&drawer, "li")?.len();

    let menu = Rc::new(RefCell::new(Menu::new(
        items,
        config.menu_stagger_base,
        config.menu_stagger_step,
    )));
    let view = Rc::new(MenuDom {
        document: document.clone(),
        drawer: drawer.clone(),
        toggle: toggle.clone(),
    });

    {
        let (menu, view) = (menu.clone(), view.clone());
        dom::listen(toggle.as_ref(), "click", move |e: Event| {
            e.stop_propagation();
            let mut menu = menu.borrow_mut();
            menu.sync(view.is_open());
            let t = menu.toggle(None);
            view.apply(&t);
        })?;
    }

    {
        let (menu, view) = (menu.clone(), view.clone());
        dom::listen(drawer.as_ref(), "click", move |e: Event| {
            let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let reason = if target.tag_name().eq_ignore_ascii_case("a") {
                CloseReason::LinkClicked
            } else if target == *view.drawer {
                CloseReason::BackdropClicked
            } else {
                return;
            };
            let t = menu.borrow_mut().close(reason);
            view.apply(&t);
        })?;
    }

    dom::listen(document.as_ref(), "keydown", move |e: KeyboardEvent| {
        if e.key() == "Escape" {
            let t = menu.borrow_mut().close(CloseReason::Escape);
            view.apply(&t);
        }
    })?;

    Ok(())
}
