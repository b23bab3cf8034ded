#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use folio_core::contact::SUCCESS_CLASS;
use folio_core::featured::ACTIVE_CLASS;
use folio_core::navigation::NAV_OPEN_CLASS;
use folio_core::{PageEvent, Portfolio, SiteConfig, UiDocument, UiNode};
use folio_web::{DomDocument, boot, snapshot};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn mount(markup: &str) -> Document {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("document");
    document.body().expect("body").set_inner_html(markup);
    document
}

const CONTACT: &str = r#"
<form id="contact-form">
  <input id="name" value="Ada">
  <input id="email" value="ada@example.com">
  <input id="subject" value="Hello">
  <textarea id="message">Engines</textarea>
</form>"#;

#[wasm_bindgen_test]
fn dom_node_reads_values_and_classes() {
    let doc = DomDocument::new(mount(CONTACT));
    let name = doc.element_by_id("name").expect("name field");
    assert_eq!(name.value().as_deref(), Some("Ada"));
    let message = doc.element_by_id("message").expect("message field");
    assert_eq!(message.value().as_deref(), Some("Engines"));

    name.add_class("touched");
    assert!(name.has_class("touched"));
    assert!(!name.toggle_class("touched"));
    assert!(!name.has_class("touched"));
}

#[wasm_bindgen_test]
fn contact_submission_replaces_form_contents() {
    let doc = DomDocument::new(mount(CONTACT));
    let (mut page, _) = Portfolio::install(doc, SiteConfig::default()).expect("install");
    let dispatch = page.dispatch(PageEvent::ContactSubmit).expect("submit");
    assert!(dispatch.prevent_default);

    let form = page.document().element_by_id("contact-form").expect("form");
    let children = form.children();
    assert_eq!(children.len(), 1);
    assert!(children[0].has_class(SUCCESS_CLASS));
}

#[wasm_bindgen_test]
fn boot_wires_live_listeners() {
    let document = mount(&format!(
        r##"
<header></header>
<button class="menu-toggle">menu</button>
<ul class="nav-links"><li><a href="#about">About</a></li></ul>
<div class="featured-grid">
  <div class="featured-item default-open">one</div>
  <div class="featured-item"><span id="second">two</span></div>
</div>
<section id="about">about</section>
{CONTACT}"##
    ));
    boot(None).expect("boot");
    assert_ne!(snapshot(), "null");

    let toggle: HtmlElement = document
        .query_selector(".menu-toggle")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into().ok())
        .expect("toggle");
    let panel = document
        .query_selector(".nav-links")
        .ok()
        .flatten()
        .expect("panel");
    toggle.click();
    assert!(panel.class_list().contains(NAV_OPEN_CLASS));

    let second: HtmlElement = document
        .get_element_by_id("second")
        .and_then(|el| el.dyn_into().ok())
        .expect("second item content");
    second.click();
    let items = document
        .query_selector_all(".featured-item")
        .expect("items");
    let second_item = items
        .get(1)
        .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
        .expect("second item");
    assert!(second_item.class_list().contains(ACTIVE_CLASS));

    let form = document.get_element_by_id("contact-form").expect("form");
    let submit = Event::new("submit").expect("event");
    form.dispatch_event(&submit).expect("dispatch");
    assert!(
        form.first_element_child()
            .is_some_and(|ack| ack.class_list().contains(SUCCESS_CLASS))
    );

    let state: serde_json::Value = serde_json::from_str(&snapshot()).expect("snapshot json");
    assert_eq!(state["featured_active"], 1);
    assert_eq!(state["contact_bound"], true);
}
