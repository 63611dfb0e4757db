//! Bindings to the Dygraphs charting library (`window.Dygraph`).

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::registry::Resize;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Dygraph;

    /// `file` is a URL of a CSV document; parsing happens inside the library.
    #[wasm_bindgen(constructor, catch)]
    pub fn new(div: &Element, file: &str, options: &JsValue) -> Result<Dygraph, JsValue>;

    #[wasm_bindgen(method)]
    pub fn resize(this: &Dygraph);

    #[wasm_bindgen(method, js_name = setAnnotations)]
    pub fn set_annotations(this: &Dygraph, annotations: &JsValue);

    /// Raw value at `row` of column `col`; `None` for gaps.
    #[wasm_bindgen(method, js_name = getValue)]
    pub fn get_value(this: &Dygraph, row: u32, col: u32) -> Option<f64>;
}

impl Resize for Dygraph {
    fn resize(&self) {
        Dygraph::resize(self);
    }
}
