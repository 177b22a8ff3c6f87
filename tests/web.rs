#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use site_fx::form::{FieldClass, FieldSpec};
use site_fx::magnetic::{Magnet, PointerKind, Rect};

wasm_bindgen_test_configure!(run_in_browser);

fn input(attrs: &[(&str, &str)]) -> web_sys::HtmlInputElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document
        .create_element("input")
        .unwrap()
        .dyn_into::<web_sys::HtmlInputElement>()
        .unwrap();
    for (k, v) in attrs {
        el.set_attribute(k, v).unwrap();
    }
    el
}

fn spec_of(el: &web_sys::HtmlInputElement) -> FieldSpec {
    FieldSpec::from_attributes(
        el.get_attribute("type").as_deref(),
        el.has_attribute("required"),
        el.get_attribute("pattern").as_deref(),
        None,
        None,
    )
}

#[wasm_bindgen_test]
fn rules_agree_with_native_validation() {
    let cases: &[(&[(&str, &str)], &str)] = &[
        (&[("type", "email"), ("required", "")], "founder@startup.io"),
        (&[("type", "email"), ("required", "")], "founder-at-startup"),
        (&[("type", "email"), ("required", "")], ""),
        (&[("type", "text"), ("pattern", "[A-Z]{3}")], "ABC"),
        (&[("type", "text"), ("pattern", "[A-Z]{3}")], "ABCD"),
        (&[("type", "url")], "https://example.com/x"),
        (&[("type", "url")], "not a url"),
    ];
    for (attrs, value) in cases {
        let el = input(attrs);
        el.set_value(value);
        let spec = spec_of(&el);
        assert_eq!(
            spec.is_valid(value),
            el.check_validity(),
            "{attrs:?} {value:?}"
        );
        if value.is_empty() {
            assert_eq!(spec.classify(value), FieldClass::Empty);
        }
    }
}

#[wasm_bindgen_test]
fn magnet_centers_on_dom_rect() {
    let document = web_sys::window().unwrap().document().unwrap();
    let btn = document
        .create_element("button")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    btn.style()
        .set_css_text("position:fixed;left:100px;top:50px;width:200px;height:60px;margin:0;padding:0;border:0");
    document.body().unwrap().append_child(&btn).unwrap();

    let r = btn.get_bounding_client_rect();
    let rect = Rect {
        left: r.left(),
        top: r.top(),
        width: r.width(),
        height: r.height(),
    };
    let magnet = Magnet::for_pointer(PointerKind::Fine, 0.4).unwrap();
    let (x, y) = magnet.offset(&rect, 300.0, 80.0);
    assert!((x - 40.0).abs() < 1e-6 && y.abs() < 1e-6, "x={x} y={y}");

    btn.remove();
}

#[wasm_bindgen_test]
fn completion_clears_fields_with_default_values() {
    use site_fx::form::{Form, SubmitOutcome};

    let document = web_sys::window().unwrap().document().unwrap();
    let form_el = document
        .create_element("form")
        .unwrap()
        .dyn_into::<web_sys::HtmlFormElement>()
        .unwrap();
    let el = input(&[("type", "email"), ("required", ""), ("value", "prefill@site.io")]);
    form_el.append_child(&el).unwrap();
    document.body().unwrap().append_child(&form_el).unwrap();

    let mut form = Form::new(vec![spec_of(&el)], "SEND", "BUSY", "OK", 1500.0);
    el.set_value("typed@site.io");
    form.set_value(0, el.value());
    assert_eq!(form.submit(0.0), SubmitOutcome::Started);
    assert!(form.poll(1500.0).is_some());

    // Mirror the core back into the page the way the form handler does.
    for (input, field) in [&el].into_iter().zip(form.fields()) {
        input.set_value(field.value());
    }
    assert_eq!(el.value(), "");
    assert_eq!(form.fields()[0].class(), FieldClass::Empty);

    form_el.remove();
}
