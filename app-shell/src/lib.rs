//! Page shell for the stats site.
//!
//! The tab, panel, theme and modal logic is plain state that runs natively in
//! tests; `shell` binds it to the DOM when built for the browser.

pub mod config;
pub mod error;
pub mod modal;
pub mod panels;
pub mod tabs;
pub mod theme;

#[cfg(target_arch = "wasm32")]
mod shell;

pub use config::{BarChartSpec, SiteConfig, CONFIG_GLOBAL};
pub use error::{ConfigError, TabError};
pub use modal::{ModalCommand, ModalConfig, ModalState, PreloadTracker};
pub use panels::{PanelPhase, PanelState, PanelSwitcher};
pub use tabs::{Direction, Tab, TabGroup, TabSwitch};
pub use theme::{ThemeChange, ThemeSet};
