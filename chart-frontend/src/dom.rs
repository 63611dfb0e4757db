//! Thin wrappers over element lookup and creation.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// First match of `selector` in the document, if any.
pub fn find(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// First match of `selector` below `scope`, if any.
pub fn find_in(scope: &Element, selector: &str) -> Option<Element> {
    scope.query_selector(selector).ok().flatten()
}

/// Like [`find`], but a missing element is an error.
pub fn get(document: &Document, selector: &str) -> Result<Element, JsValue> {
    find(document, selector).ok_or_else(|| missing(selector))
}

pub fn get_in(scope: &Element, selector: &str) -> Result<Element, JsValue> {
    find_in(scope, selector).ok_or_else(|| missing(selector))
}

pub fn get_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Create `<tag class="...">` with the given classes.
pub fn make(document: &Document, tag: &str, classes: &[&str]) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    for class in classes {
        el.class_list().add_1(class)?;
    }
    Ok(el)
}

/// Create `<div>` with classes and text content.
pub fn text_div(document: &Document, classes: &[&str], text: &str) -> Result<Element, JsValue> {
    let el = make(document, "div", classes)?;
    el.set_text_content(Some(text));
    Ok(el)
}

pub fn as_html(el: &Element) -> Result<HtmlElement, JsValue> {
    el.clone()
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("element is not an HTML element"))
}

/// Element an event was dispatched to, or its closest ancestor matching `selector`.
pub fn closest_target(event: &web_sys::Event, selector: &str) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(selector).ok().flatten()
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn missing(selector: &str) -> JsValue {
    JsValue::from_str(&format!("element not found: {selector}"))
}
