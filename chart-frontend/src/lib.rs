//! Time-series charts (through Dygraphs) and the DOM-built bar chart.

pub mod config;
pub mod legend;
pub mod registry;

#[cfg(target_arch = "wasm32")]
pub mod bars;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod dygraph;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use config::{ChartConfig, ChartSpec, SharedChartStyle, ValueFormat, YLabels};
pub use legend::{legend_html, FormattedValue};
pub use registry::{ChartRegistry, Resize};

#[cfg(target_arch = "wasm32")]
pub use dygraph::Dygraph;
