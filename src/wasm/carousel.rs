use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, Window};

use super::dom;
use crate::carousel::Carousel;
use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};

struct Autoplay {
    window: Window,
    track: HtmlElement,
    carousel: RefCell<Carousel>,
    timer: RefCell<Option<Interval>>,
    interval_ms: u32,
}

impl Autoplay {
    fn slide(&self) {
        let width = self
            .track
            .first_element_child()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map_or(0.0, |el| el.offset_width() as f64);
        let now = dom::now(&self.window);
        if let Some(offset) = self.carousel.borrow_mut().advance(now, width) {
            dom::set_style(&self.track, "transform", &format!("translateX({offset}px)"));
        }
    }

    fn start(self: &Rc<Self>) {
        let this = Rc::downgrade(self);
        let timer = Interval::new(self.interval_ms, move || {
            if let Some(this) = this.upgrade() {
                this.slide();
            }
        });
        *self.timer.borrow_mut() = Some(timer);
    }

    fn stop(&self) {
        // Dropping the interval cancels it.
        self.timer.borrow_mut().take();
    }
}

/// Autoplay the track with id `config.carousel_track`, pausing while hovered.
pub fn setup(document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let track = dom::by_id::<HtmlElement>(document, &config.carousel_track)?;
    let container = track
        .parent_element()
        .ok_or_else(|| SiteError::missing(format!("parent of #{}", config.carousel_track)))?;
    let items = track.children().length() as usize;
    let window = web_sys::window().ok_or(SiteError::missing("window"))?;

    let autoplay = Rc::new(Autoplay {
        window: window.clone(),
        track,
        carousel: RefCell::new(Carousel::new(
            items,
            config.carousel_gap,
            config.carousel_interval_ms as f64,
            dom::now(&window),
        )),
        timer: RefCell::new(None),
        interval_ms: config.carousel_interval_ms,
    });
    autoplay.start();

    {
        let autoplay = autoplay.clone();
        dom::listen(container.as_ref(), "mouseenter", move |_: Event| {
            autoplay.carousel.borrow_mut().pointer_enter();
            autoplay.stop();
        })?;
    }
    dom::listen(container.as_ref(), "mouseleave", move |_: Event| {
        autoplay.carousel.borrow_mut().pointer_leave(dom::now(&autoplay.window));
        autoplay.start();
    })?;

    tracing::debug!(items, interval_ms = config.carousel_interval_ms, "carousel autoplay");
    Ok(())
}
