//! Stacked bar chart rendered straight into the DOM.

use data_feed::{deliver, error_message, BarChartLayout, BarChartSink, BarRow, FeedError};
use gloo_net::http::Request;
use ts_core::{Locale, TooltipContent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event};

use crate::dom;
use crate::render::tooltip;

const TOOLTIP_HIDDEN: &str = "tooltip-hidden";

/// Renders a [`BarChartLayout`] (or its load failure) into a container element.
pub struct DomBarChart {
    document: Document,
    container: Element,
    locale: Locale,
}

impl DomBarChart {
    pub fn new(document: Document, container: Element, locale: Locale) -> Self {
        Self {
            document,
            container,
            locale,
        }
    }

    fn render(&self, layout: &BarChartLayout) -> Result<(), JsValue> {
        for row in &layout.rows {
            self.container.append_child(&self.row(row)?)?;
        }
        Ok(())
    }

    fn row(&self, row: &BarRow) -> Result<Element, JsValue> {
        let doc = &self.document;
        let el = dom::make(doc, "div", &["chart-row"])?;
        if row.is_new {
            el.class_list().add_1("new")?;
        }

        let bar = dom::make(doc, "div", &["bar-container"])?;
        for segment in &row.segments {
            let seg = dom::as_html(&dom::make(doc, "div", &["bar-segment", TOOLTIP_HIDDEN])?)?;
            seg.style()
                .set_property("width", &format!("{}%", segment.width_percent))?;
            let content = TooltipContent {
                title: segment.label.clone(),
                body: format!("{} views", self.locale.format_count(segment.pageviews)),
            };
            seg.append_child(&tooltip(doc, &content)?)?;
            bar.append_child(&seg)?;
        }
        attach_tooltip_events(&bar)?;

        el.append_child(&dom::text_div(doc, &["bar-label"], &row.name)?)?;
        el.append_child(&bar)?;
        el.append_child(&dom::text_div(
            doc,
            &["bar-total"],
            &self.locale.format_count(row.total),
        )?)?;
        Ok(el)
    }
}

impl BarChartSink for DomBarChart {
    fn on_layout(&mut self, layout: BarChartLayout) {
        if let Err(err) = self.render(&layout) {
            web_sys::console::error_1(&err);
        }
    }

    fn on_error(&mut self, err: FeedError) {
        let message = error_message(&err);
        web_sys::console::error_1(&JsValue::from_str(&message));
        self.container.set_inner_html("");
        match dom::make(&self.document, "p", &[]) {
            Ok(p) => {
                p.set_text_content(Some(&message));
                let _ = self.container.append_child(&p);
            }
            Err(_) => self.container.set_text_content(Some(&message)),
        }
    }
}

/// `.tooltip-hidden` toggles on the segment itself, not on its tooltip.
fn attach_tooltip_events(bar: &Element) -> Result<(), JsValue> {
    for (event, show) in [("mouseover", true), ("mouseout", false)] {
        dom::listen(bar, event, move |event: Event| {
            let Some(segment) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .filter(|el| el.class_list().contains("bar-segment"))
            else {
                return;
            };
            let classes = segment.class_list();
            let _ = if show {
                classes.remove_1(TOOLTIP_HIDDEN)
            } else {
                classes.add_1(TOOLTIP_HIDDEN)
            };
        })?;
    }
    Ok(())
}

pub async fn fetch_document(url: &str) -> Result<String, FeedError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| FeedError::Http(e.to_string()))?;
    if !resp.ok() {
        return Err(FeedError::Status {
            status: resp.status(),
            url: url.to_string(),
        });
    }
    resp.text().await.map_err(|e| FeedError::Http(e.to_string()))
}

/// Fetch the bar-chart document in the background and render it once; no retry.
pub fn load_bar_chart(url: String, mut chart: DomBarChart) {
    spawn_local(async move {
        let body = fetch_document(&url).await;
        deliver(body, &mut chart);
    });
}
