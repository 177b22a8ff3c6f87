use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, Window};

use super::dom;
use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::form::{FieldClass, FieldSpec, Form, SubmitOutcome};

const FORM_ID: &str = "startup-form";
const RETRY_MS: u32 = 10;

fn spec_for(input: &HtmlInputElement) -> FieldSpec {
    FieldSpec::from_attributes(
        input.get_attribute("type").as_deref(),
        input.has_attribute("required"),
        input.get_attribute("pattern").as_deref(),
        input.get_attribute("minlength").as_deref(),
        input.get_attribute("maxlength").as_deref(),
    )
}

fn paint(input: &HtmlInputElement, class: FieldClass) {
    dom::toggle_class(input, "valid", class.is_valid());
    dom::toggle_class(input, "invalid", class.is_invalid());
}

struct FormDom {
    window: Window,
    inputs: Vec<HtmlInputElement>,
    button: HtmlButtonElement,
    state: RefCell<Form>,
}

impl FormDom {
    fn paint_all(&self) {
        let state = self.state.borrow();
        for (input, field) in self.inputs.iter().zip(state.fields()) {
            paint(input, field.class());
        }
    }

    fn paint_button(&self) {
        let state = self.state.borrow();
        self.button.set_inner_text(state.label());
        self.button.set_disabled(state.is_disabled());
    }

    fn submit(self: &Rc<Self>, delay_ms: u32) {
        let outcome = {
            let mut state = self.state.borrow_mut();
            for (i, input) in self.inputs.iter().enumerate() {
                state.set_value(i, input.value());
            }
            state.submit(dom::now(&self.window))
        };
        self.paint_all();
        match outcome {
            SubmitOutcome::Started => {
                self.paint_button();
                self.arm(delay_ms);
            }
            SubmitOutcome::Blocked { invalid } => {
                tracing::debug!(?invalid, "submission blocked");
            }
            SubmitOutcome::Busy => {}
        }
    }

    fn arm(self: &Rc<Self>, delay_ms: u32) {
        let this = self.clone();
        Timeout::new(delay_ms, move || this.finish()).forget();
    }

    fn finish(self: &Rc<Self>) {
        let polled = self.state.borrow_mut().poll(dom::now(&self.window));
        let Some(done) = polled else {
            if self.state.borrow().is_busy() {
                // Woke early; check again shortly.
                self.arm(RETRY_MS);
            }
            return;
        };
        if let Err(err) = self.window.alert_with_message(&done.notice) {
            tracing::warn!(err = ?err, "completion notice failed");
        }
        self.paint_button();
        let state = self.state.borrow();
        for (input, field) in self.inputs.iter().zip(state.fields()) {
            input.set_value(field.value());
        }
        drop(state);
        self.paint_all();
    }
}

/// Live validation and the simulated submission for `#startup-form`.
pub fn setup(window: &Window, document: &Document, config: &SiteConfig) -> SiteResult<()> {
    let element = dom::by_id::<HtmlFormElement>(document, FORM_ID)?;
    let inputs = dom::query_all::<HtmlInputElement>(&element, "input")?;
    let button = element
        .query_selector("button")
        .map_err(dom::js_err)?
        .ok_or_else(|| SiteError::missing(format!("#{FORM_ID} button")))?
        .dyn_into::<HtmlButtonElement>()
        .map_err(|_| SiteError::element_type(format!("#{FORM_ID} button")))?;

    let state = Form::new(
        inputs.iter().map(spec_for).collect(),
        button.inner_text(),
        config.busy_label.clone(),
        config.completion_notice.clone(),
        config.submit_delay_ms as f64,
    );
    let form = Rc::new(FormDom {
        window: window.clone(),
        inputs,
        button,
        state: RefCell::new(state),
    });

    for (i, input) in form.inputs.iter().enumerate() {
        let form = form.clone();
        dom::listen(input.as_ref(), "input", move |_: Event| {
            let input = &form.inputs[i];
            let class = form.state.borrow_mut().set_value(i, input.value());
            if let Some(class) = class {
                paint(input, class);
            }
        })?;
    }

    let delay_ms = config.submit_delay_ms;
    dom::listen(element.as_ref(), "submit", move |e: Event| {
        e.prevent_default();
        form.submit(delay_ms);
    })?;
    Ok(())
}
