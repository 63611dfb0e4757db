//! Mounting a configured chart and post-processing what the library draws.

use std::rc::Rc;

use js_sys::{Object, Reflect, JSON};
use serde::Serialize;
use ts_core::{month_labels, y_axis_labels, TooltipContent, WeekChange};
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent, MouseEventInit, TouchEvent};

use crate::config::ChartConfig;
use crate::dom;
use crate::dygraph::Dygraph;
use crate::legend::{legend_html, FormattedValue};

const TOOLTIP_HIDDEN: &str = "tooltip-hidden";

/// Build the library options for `config`, wire the callbacks and draw the chart.
pub fn mount_chart(document: &Document, config: ChartConfig) -> Result<Dygraph, JsValue> {
    let config = Rc::new(config);
    let graph_div = dom::get(document, &config.graph_selector())?;
    let legend_div = dom::get(document, &config.legend_selector())?;

    let options = to_js(&config.options)?;
    set(&options, "labelsDiv", &legend_div)?;
    set(&options, "interactionModel", &touch_interaction_model()?)?;
    attach(&options, "legendFormatter", legend_formatter(config.clone()))?;
    attach(&options, "drawCallback", draw_callback(document.clone(), config.clone()))?;
    attach(
        &options,
        "annotationMouseOverHandler",
        Closure::<dyn Fn(JsValue)>::wrap(Box::new(|annotation: JsValue| {
            if let Some(div) = annotation_div(&annotation) {
                let _ = div.class_list().remove_1(TOOLTIP_HIDDEN);
                let _ = div.style().set_property("z-index", "100");
            }
        })),
    )?;
    attach(
        &options,
        "annotationMouseOutHandler",
        Closure::<dyn Fn(JsValue)>::wrap(Box::new(|annotation: JsValue| {
            if let Some(div) = annotation_div(&annotation) {
                let _ = div.class_list().add_1(TOOLTIP_HIDDEN);
                let _ = div.style().remove_property("z-index");
            }
        })),
    )?;

    let y_axis = Reflect::get(&Reflect::get(&options, &"axes".into())?, &"y".into())?;
    attach(&y_axis, "valueFormatter", value_formatter(config.clone()))?;

    Dygraph::new(&graph_div, &config.spec.data_url, &options)
}

/// `div.tooltip` holding a title and a body line.
pub fn tooltip(document: &Document, content: &TooltipContent) -> Result<web_sys::Element, JsValue> {
    let tooltip = dom::make(document, "div", &["tooltip"])?;
    tooltip.append_child(&dom::text_div(document, &["tooltip-title"], &content.title)?)?;
    tooltip.append_child(&dom::text_div(document, &["tooltip-text"], &content.body)?)?;
    Ok(tooltip)
}

fn legend_formatter(config: Rc<ChartConfig>) -> Closure<dyn Fn(JsValue) -> String> {
    Closure::wrap(Box::new(move |data: JsValue| {
        let x = Reflect::get(&data, &"x".into()).unwrap_or(JsValue::UNDEFINED);
        if x.is_undefined() || x.is_null() {
            return String::new();
        }
        let x_html = Reflect::get(&data, &"xHTML".into())
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        let value = Reflect::get(&data, &"series".into())
            .and_then(|series| Reflect::get(&series, &JsValue::from_f64(0.0)))
            .and_then(|first| Reflect::get(&first, &"yHTML".into()))
            .ok()
            .and_then(|y| from_js::<FormattedValue>(&y));
        match value {
            Some(value) => legend_html(&config.locale, &x_html, &config.spec.units, &value),
            None => String::new(),
        }
    }) as Box<dyn Fn(JsValue) -> String>)
}

type ValueFormatterFn = dyn Fn(f64, JsValue, JsValue, JsValue, JsValue, JsValue) -> JsValue;

fn value_formatter(config: Rc<ChartConfig>) -> Closure<ValueFormatterFn> {
    Closure::wrap(Box::new(
        move |num: f64,
              _opts: JsValue,
              _series: JsValue,
              graph: JsValue,
              row: JsValue,
              col: JsValue| {
            let graph: Dygraph = graph.unchecked_into();
            let cell = row
                .as_f64()
                .zip(col.as_f64())
                .map(|(r, c)| (r as u32, c as u32));
            let actual = cell.and_then(|(r, c)| graph.get_value(r, c));
            let value = FormattedValue::new(
                &config.locale,
                config.spec.value_format,
                num,
                actual,
                || match (cell, actual) {
                    (Some((r, c)), Some(current)) => {
                        WeekChange::at_row(r as usize, current, |prev| {
                            graph.get_value(prev as u32, c).unwrap_or(f64::NAN)
                        })
                    }
                    _ => WeekChange::NotAvailable,
                },
            );
            to_js(&value).unwrap_or(JsValue::NULL)
        },
    ) as Box<ValueFormatterFn>)
}

fn draw_callback(document: Document, config: Rc<ChartConfig>) -> Closure<dyn Fn(JsValue, bool)> {
    let tooltips = Rc::new(config.spec.annotations.tooltips(&config.locale));
    // `Fn`, not `FnMut`: setting annotations redraws synchronously and re-enters this callback.
    Closure::wrap(Box::new(move |graph: JsValue, is_initial: bool| {
        if is_initial {
            let graph: Dygraph = graph.unchecked_into();
            if let Err(err) = on_first_draw(&document, &config, &graph) {
                web_sys::console::error_1(&err);
            }
        }
        if let Err(err) = append_tooltips(&document, &config, &tooltips) {
            web_sys::console::error_1(&err);
        }
    }) as Box<dyn Fn(JsValue, bool)>)
}

fn on_first_draw(
    document: &Document,
    config: &ChartConfig,
    graph: &Dygraph,
) -> Result<(), JsValue> {
    graph.set_annotations(&to_js(&config.spec.annotations.placed())?);
    append_x_axis_labels(document, config)?;
    append_y_axis_labels(document, config)
}

fn append_x_axis_labels(document: &Document, config: &ChartConfig) -> Result<(), JsValue> {
    let target = dom::get(document, &config.x_labels_selector())?;
    for label in month_labels(&config.locale) {
        let node = dom::make(document, "div", &["x-label"])?;
        let short = dom::make(document, "span", &["short-month"])?;
        short.set_text_content(Some(&label.short));
        let long = dom::make(document, "span", &["long-month"])?;
        long.set_text_content(Some(&label.long));
        node.append_child(&short)?;
        node.append_child(&long)?;
        target.append_child(&node)?;
    }
    Ok(())
}

fn append_y_axis_labels(document: &Document, config: &ChartConfig) -> Result<(), JsValue> {
    let labels = dom::make(document, "div", &["graph-y-labels"])?;
    let y = &config.spec.y_labels;
    for text in y_axis_labels(y.max, &y.unit) {
        labels.append_child(&dom::text_div(document, &["y-label"], &text)?)?;
    }
    dom::get(document, &config.graph_selector())?.append_child(&labels)?;
    Ok(())
}

/// Put a tooltip inside each annotation marker that lacks one, replacing its hover title.
fn append_tooltips(
    document: &Document,
    config: &ChartConfig,
    tooltips: &[TooltipContent],
) -> Result<(), JsValue> {
    for (i, content) in tooltips.iter().enumerate() {
        let Some(marker) = dom::find(document, &config.marker_selector(i)) else {
            continue;
        };
        if dom::find_in(&marker, ".tooltip").is_some() {
            continue;
        }
        marker.append_child(&tooltip(document, content)?)?;
        marker.remove_attribute("title")?;
    }
    Ok(())
}

/// Translate touch drags into the mouse moves the library's hover logic expects.
fn touch_interaction_model() -> Result<JsValue, JsValue> {
    let model: JsValue = Object::new().into();
    attach(
        &model,
        "touchmove",
        Closure::<dyn Fn(TouchEvent)>::wrap(Box::new(|event: TouchEvent| {
            let Some(touch) = event.touches().item(0) else {
                return;
            };
            let init = MouseEventInit::new();
            init.set_client_x(touch.client_x());
            init.set_client_y(touch.client_y());
            event.prevent_default();
            if let (Ok(simulated), Some(target)) = (
                MouseEvent::new_with_mouse_event_init_dict("mousemove", &init),
                event.target(),
            ) {
                let _ = target.dispatch_event(&simulated);
            }
        })),
    )?;
    Ok(model)
}

fn annotation_div(annotation: &JsValue) -> Option<HtmlElement> {
    Reflect::get(annotation, &"div".into())
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    JSON::parse(&json)
}

fn from_js<T: serde::de::DeserializeOwned>(value: &JsValue) -> Option<T> {
    let json = JSON::stringify(value).ok()?.as_string()?;
    serde_json::from_str(&json).ok()
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

/// Hand a callback to the library for the lifetime of the page.
fn attach<F: ?Sized + WasmClosure>(
    target: &JsValue,
    key: &str,
    closure: Closure<F>,
) -> Result<(), JsValue> {
    set(target, key, closure.as_ref())?;
    closure.forget();
    Ok(())
}
