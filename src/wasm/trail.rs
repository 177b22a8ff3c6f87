use std::cell::RefCell;
use std::rc::Rc;

use fastrand::Rng;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, MouseEvent, Window};

use super::dom;
use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::trail::{fill_style, Trail};

const OVERLAY_CSS: &str =
    "position:fixed;top:0;left:0;width:100%;height:100%;pointer-events:none;z-index:9999";

fn fit_to_viewport(window: &Window, canvas: &HtmlCanvasElement) {
    let (w, h) = dom::viewport(window);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
}

fn paint(ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement, trail: &mut Trail, rgb: [u8; 3]) {
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    for p in trail.frame() {
        #[allow(deprecated)]
        ctx.set_fill_style(&JsValue::from_str(&fill_style(rgb, p.life)));
        ctx.begin_path();
        // Sizes only shrink; a negative radius would throw.
        match ctx.arc(p.x, p.y, p.size.max(0.0), 0.0, std::f64::consts::TAU) {
            Ok(()) => ctx.fill(),
            Err(err) => tracing::warn!(err = ?err, "particle arc failed"),
        }
    }
}

/// Append the overlay canvas and run the trail for the page's lifetime.
pub fn start(window: &Window, document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let body = document.body().ok_or(SiteError::missing("body"))?;
    let canvas = document
        .create_element("canvas")
        .map_err(dom::js_err)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SiteError::element_type("canvas"))?;
    canvas.style().set_css_text(OVERLAY_CSS);
    body.append_child(&canvas).map_err(dom::js_err)?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(dom::js_err)?
        .ok_or(SiteError::dom("2d context not supported"))?
        .dyn_into()
        .map_err(|_| SiteError::element_type("2d context"))?;
    fit_to_viewport(window, &canvas);

    // Resize canvas to fit window
    {
        let (win, canvas) = (window.clone(), canvas.clone());
        dom::listen(window.as_ref(), "resize", move |_: Event| fit_to_viewport(&win, &canvas))?;
    }

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let trail = Rc::new(RefCell::new(Trail::new(config.particle_cap, Rng::with_seed(seed))));
    {
        let trail = trail.clone();
        dom::listen(document.as_ref(), "mousemove", move |e: MouseEvent| {
            trail
                .borrow_mut()
                .pointer_moved(e.client_x() as f64, e.client_y() as f64);
        })?;
    }

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let win = window.clone();
    let rgb = config.particle_rgb;
    *g.borrow_mut() = Some(Closure::new(move || {
        paint(&ctx, &canvas, &mut trail.borrow_mut(), rgb);

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(err) = win.request_animation_frame(next.as_ref().unchecked_ref()) {
                tracing::warn!(err = ?err, "trail loop stopped");
            }
        }
    }));

    if let Some(first) = g.borrow().as_ref() {
        window
            .request_animation_frame(first.as_ref().unchecked_ref())
            .map_err(dom::js_err)?;
    }
    Ok(())
}
