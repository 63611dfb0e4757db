//! DOM wiring: reads the markup, drives the state machines, applies classes.

use std::cell::RefCell;
use std::rc::Rc;

use chart_frontend::bars::{load_bar_chart, DomBarChart};
use chart_frontend::{dom, render, ChartRegistry, Dygraph};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlImageElement, HtmlTemplateElement, KeyboardEvent,
    Node,
};

use crate::config::SiteConfig;
use crate::modal::{is_close_key, ModalCommand, ModalConfig, ModalState, PreloadTracker};
use crate::panels::{PanelSwitcher, ENTER_MS, EXIT_MS, MANAGED_CLASSES};
use crate::tabs::{Direction, Tab, TabGroup};
use crate::theme::{ThemeChange, ThemeSet};

type Registry = Rc<ChartRegistry<Dygraph>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = SiteConfig::load();
    let document = dom::document()?;

    let registry = Rc::new(mount_charts(&document, &config));
    if let Err(err) = init_tabs(&document, &config, registry.clone()) {
        web_sys::console::error_1(&err);
    }
    init_bar_charts(&document, &config);
    if let Err(err) = init_modal(&document, &config.modal) {
        web_sys::console::error_1(&err);
    }

    web_sys::console::log_1(&format!("stats page ready: {} charts", registry.len()).into());
    Ok(())
}

fn mount_charts(document: &Document, config: &SiteConfig) -> ChartRegistry<Dygraph> {
    let mut registry = ChartRegistry::new();
    for chart in config.resolved_charts() {
        let panel = chart.spec.panel.clone();
        match render::mount_chart(document, chart) {
            Ok(graph) => registry.register(panel, graph),
            Err(err) => web_sys::console::error_1(&err),
        }
    }
    registry
}

fn init_bar_charts(document: &Document, config: &SiteConfig) {
    for spec in &config.bar_charts {
        match dom::find(document, &spec.container) {
            Some(container) => load_bar_chart(
                spec.data_url.clone(),
                DomBarChart::new(document.clone(), container, config.style.locale.clone()),
            ),
            None => web_sys::console::log_1(
                &format!("bar chart container {} not on this page", spec.container).into(),
            ),
        }
    }
}

// ---------- Tabs ------------------------------------------------------------

/// One `.tab-container` and the timers of its running swap.
struct PanelContainer {
    element: Element,
    switcher: PanelSwitcher,
    /// Dropping a `Timeout` cancels it.
    timers: Vec<Timeout>,
}

impl PanelContainer {
    fn sync(&self) -> Result<(), JsValue> {
        for panel in self.switcher.panels() {
            let Some(el) = dom::find_in(&self.element, &format!(".{}", panel.id)) else {
                continue;
            };
            let classes = el.class_list();
            for class in MANAGED_CLASSES {
                classes.remove_1(class)?;
            }
            for class in panel.classes() {
                classes.add_1(&class)?;
            }
        }
        Ok(())
    }
}

struct TabBar {
    document: Document,
    switcher: HtmlElement,
    buttons: Vec<Element>,
    group: TabGroup,
    themes: ThemeSet,
    containers: Vec<Rc<RefCell<PanelContainer>>>,
    registry: Registry,
}

fn read_tab(button: &Element) -> Result<Tab, JsValue> {
    let controls = button
        .get_attribute("data-controls")
        .ok_or_else(|| JsValue::from_str("tab without data-controls"))?;
    Ok(Tab {
        label: button.text_content().unwrap_or_default().trim().to_string(),
        controls,
        theme: button.get_attribute("data-theme"),
    })
}

/// Every tab switcher on the page drives its own group.
fn init_tabs(document: &Document, config: &SiteConfig, registry: Registry) -> Result<(), JsValue> {
    let switchers = dom::get_all(document, &config.tab_switcher);
    if switchers.is_empty() {
        return Err(JsValue::from_str(&format!(
            "element not found: {}",
            config.tab_switcher
        )));
    }

    let mut panel_ids = Vec::new();
    for switcher in switchers {
        match init_tab_group(document, config, &switcher, registry.clone()) {
            Ok(ids) => panel_ids.extend(ids),
            Err(err) => web_sys::console::error_1(&err),
        }
    }
    if let Err(err) = config.validate(&panel_ids) {
        web_sys::console::warn_1(&err.to_string().into());
    }
    Ok(())
}

/// Wire one switcher and the containers holding its panels; returns the
/// panel ids its tabs control.
fn init_tab_group(
    document: &Document,
    config: &SiteConfig,
    switcher: &Element,
    registry: Registry,
) -> Result<Vec<String>, JsValue> {
    let switcher = dom::as_html(switcher)?;
    let buttons = dom::elements(&switcher.child_nodes());
    let tabs = buttons.iter().map(read_tab).collect::<Result<Vec<_>, _>>()?;
    let selected = buttons
        .iter()
        .position(|b| b.get_attribute("aria-selected").as_deref() == Some("true"))
        .unwrap_or(0);
    let group = TabGroup::new(tabs, selected).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let panel_ids: Vec<String> = group.tabs().iter().map(|t| t.controls.clone()).collect();

    for (i, button) in buttons.iter().enumerate() {
        let value = if group.is_selected(i) { "true" } else { "false" };
        button.set_attribute("aria-selected", value)?;
    }
    switcher.style().set_property("--index", &selected.to_string())?;

    let visible = group.selected_tab().controls.clone();
    let mut containers = Vec::new();
    for element in dom::get_all(document, &config.tab_container) {
        let Some(panels) = PanelSwitcher::for_container(
            panel_ids.iter().map(String::as_str),
            &visible,
            |id| dom::find_in(&element, &format!(".{id}")).is_some(),
        ) else {
            continue;
        };
        let container = PanelContainer {
            element,
            switcher: panels,
            timers: Vec::new(),
        };
        container.sync()?;
        containers.push(Rc::new(RefCell::new(container)));
    }

    let bar = Rc::new(RefCell::new(TabBar {
        document: document.clone(),
        switcher: switcher.clone(),
        buttons,
        themes: ThemeSet::from_tabs(&group),
        group,
        containers,
        registry,
    }));

    dom::listen(&switcher, "click", move |event: Event| {
        let Some(button) = dom::closest_target(&event, ".tab") else {
            return;
        };
        let index = bar.borrow().buttons.iter().position(|b| *b == button);
        if let Some(index) = index {
            if let Err(err) = on_tab_click(&bar, index) {
                web_sys::console::error_1(&err);
            }
        }
    })?;
    Ok(panel_ids)
}

fn on_tab_click(bar: &Rc<RefCell<TabBar>>, index: usize) -> Result<(), JsValue> {
    let mut bar = bar.borrow_mut();

    if let Some(theme) = bar.group.tabs()[index].theme.clone() {
        apply_theme(&bar.document, &bar.themes.switch_to(&theme))?;
    }

    let Some(switch) = bar.group.select(index) else {
        return Ok(());
    };
    bar.buttons[switch.from].set_attribute("aria-selected", "false")?;
    bar.buttons[switch.to].set_attribute("aria-selected", "true")?;

    let from = bar.group.tabs()[switch.from].controls.clone();
    let to = bar.group.tabs()[switch.to].controls.clone();
    for container in &bar.containers {
        start_swap(container, &from, &to, switch.direction, bar.registry.clone())?;
    }

    // moves the selected-tab background drawn by `.tab-switcher::before`
    bar.switcher.style().set_property("--index", &switch.to.to_string())?;
    Ok(())
}

fn apply_theme(document: &Document, change: &ThemeChange) -> Result<(), JsValue> {
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let classes = body.class_list();
    for class in &change.remove {
        classes.remove_1(class)?;
    }
    classes.add_1(&change.add)
}

fn start_swap(
    container: &Rc<RefCell<PanelContainer>>,
    from: &str,
    to: &str,
    direction: Direction,
    registry: Registry,
) -> Result<(), JsValue> {
    let mut c = container.borrow_mut();
    c.timers.clear();
    let Some(generation) = c.switcher.begin(from, to, direction) else {
        return Ok(());
    };
    c.sync()?;

    let exit = {
        let container = container.clone();
        Timeout::new(EXIT_MS, move || {
            let revealed = {
                let mut c = container.borrow_mut();
                let revealed = c.switcher.finish_exit(generation).map(str::to_owned);
                if revealed.is_some() {
                    if let Err(err) = c.sync() {
                        web_sys::console::error_1(&err);
                    }
                }
                revealed
            };
            // charts drawn while hidden have no size until resized
            if let Some(panel) = revealed {
                registry.resize_panel(&panel);
            }
        })
    };
    let enter = {
        let container = container.clone();
        Timeout::new(EXIT_MS + ENTER_MS, move || {
            let mut c = container.borrow_mut();
            if c.switcher.finish_enter(generation) {
                if let Err(err) = c.sync() {
                    web_sys::console::error_1(&err);
                }
            }
        })
    };
    c.timers = vec![exit, enter];
    Ok(())
}

// ---------- Image modal -----------------------------------------------------

struct ImageModal {
    document: Document,
    config: ModalConfig,
    state: ModalState,
    element: Option<Element>,
    preloads: PreloadTracker,
}

impl ImageModal {
    fn on_click(&mut self, event: &Event) -> Result<(), JsValue> {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        let inside = self
            .element
            .as_ref()
            .is_some_and(|open| open.contains(target.as_ref()));
        let preview = dom::closest_target(event, &self.config.preview_selector);
        let url = preview.as_ref().and_then(|p| p.get_attribute("data-full"));

        match self.state.click(inside, url.as_deref()) {
            ModalCommand::Nothing => Ok(()),
            ModalCommand::Close => {
                self.close();
                Ok(())
            }
            ModalCommand::Open(url) => {
                event.prevent_default();
                let alt = preview.and_then(|p| p.get_attribute("data-alt"));
                self.open(&url, alt.as_deref())
            }
        }
    }

    /// Looked up on every open, so a template added late is still found.
    fn template(&self) -> Result<HtmlTemplateElement, JsValue> {
        self.document
            .get_element_by_id(&self.config.template_id)
            .and_then(|el| el.dyn_into::<HtmlTemplateElement>().ok())
            .ok_or_else(|| {
                JsValue::from_str(&format!("no <template id=\"{}\">", self.config.template_id))
            })
    }

    fn on_hover(&mut self, event: &Event) -> Result<(), JsValue> {
        let Some(url) = dom::closest_target(event, &self.config.preview_selector)
            .and_then(|p| p.get_attribute("data-full"))
        else {
            return Ok(());
        };
        if !self.preloads.first_hover(&url) {
            return Ok(());
        }
        let link = self.document.create_element("link")?;
        link.set_attribute("rel", "preload")?;
        link.set_attribute("as", "image")?;
        link.set_attribute("href", &url)?;
        self.document
            .head()
            .ok_or_else(|| JsValue::from_str("no head"))?
            .append_child(&link)?;
        Ok(())
    }

    fn open(&mut self, url: &str, alt: Option<&str>) -> Result<(), JsValue> {
        let modal = self
            .template()?
            .content()
            .first_element_child()
            .ok_or_else(|| JsValue::from_str("empty modal template"))?
            .clone_node_with_deep(true)?
            .dyn_into::<Element>()
            .map_err(|_| JsValue::from_str("modal template root is not an element"))?;

        let img = self
            .document
            .create_element("img")?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| JsValue::from_str("img is not an image element"))?;
        img.set_src(url);
        img.set_alt(alt.unwrap_or(""));

        let host = dom::find_in(&modal, &self.config.content_selector)
            .unwrap_or_else(|| modal.clone());
        host.append_child(&img)?;
        let body = self.document.body().ok_or_else(|| JsValue::from_str("no body"))?;

        if self.state.open(url).is_some() {
            self.remove_element();
        }
        body.append_child(&modal)?;
        self.element = Some(modal);
        Ok(())
    }

    fn close(&mut self) {
        if self.state.close().is_some() {
            self.remove_element();
        }
    }

    fn remove_element(&mut self) {
        if let Some(el) = self.element.take() {
            el.remove();
        }
    }
}

/// Listeners are delegated on the document, so previews added after start-up
/// open the modal too.
fn init_modal(document: &Document, config: &ModalConfig) -> Result<(), JsValue> {
    let modal = Rc::new(RefCell::new(ImageModal {
        document: document.clone(),
        config: config.clone(),
        state: ModalState::default(),
        element: None,
        preloads: PreloadTracker::default(),
    }));

    {
        let modal = modal.clone();
        dom::listen(document, "click", move |event: Event| {
            if let Err(err) = modal.borrow_mut().on_click(&event) {
                web_sys::console::error_1(&err);
            }
        })?;
    }
    {
        let modal = modal.clone();
        dom::listen(document, "mouseover", move |event: Event| {
            if let Err(err) = modal.borrow_mut().on_hover(&event) {
                web_sys::console::error_1(&err);
            }
        })?;
    }
    dom::listen(document, "keydown", move |event: Event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
            if is_close_key(&key) {
                modal.borrow_mut().close();
            }
        }
    })
}
