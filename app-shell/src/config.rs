use chart_frontend::{ChartConfig, ChartSpec, SharedChartStyle, ValueFormat, YLabels};
use serde::{Deserialize, Serialize};
use ts_core::{Annotation, AnnotationSet};

use crate::error::ConfigError;
use crate::modal::ModalConfig;

/// Page global holding a JSON override of [`SiteConfig`].
pub const CONFIG_GLOBAL: &str = "STATS_SITE_CONFIG";

const RS_COLOR: &str = "hsl(197, 66%, 62%)";
const OS_COLOR: &str = "hsl(34, 57%, 61%)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarChartSpec {
    pub container: String,
    pub data_url: String,
}

/// Everything the page wires up at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub tab_switcher: String,
    pub tab_container: String,
    pub style: SharedChartStyle,
    pub charts: Vec<ChartSpec>,
    pub bar_charts: Vec<BarChartSpec>,
    pub modal: ModalConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let traffic = traffic_annotations();
        let edits = edits_annotations();
        Self {
            tab_switcher: ".tab-switcher".to_string(),
            tab_container: ".tab-container".to_string(),
            style: SharedChartStyle::default(),
            charts: vec![
                traffic_chart(".traffic-rsw", "panel-rs", RS_COLOR, &traffic),
                traffic_chart(".traffic-osw", "panel-osrs", OS_COLOR, &traffic),
                edits_chart(".edits-rsw", "panel-rs", RS_COLOR, &edits),
                edits_chart(".edits-osw", "panel-osrs", OS_COLOR, &edits),
            ],
            bar_charts: vec![BarChartSpec {
                container: ".warframe-test .bar-chart-container".to_string(),
                data_url: "./data/warframes.json".to_string(),
            }],
            modal: ModalConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every chart must live in one of `panels`, or it would never be resized.
    pub fn validate<S: AsRef<str>>(&self, panels: &[S]) -> Result<(), ConfigError> {
        for chart in &self.charts {
            if !panels.iter().any(|p| p.as_ref() == chart.panel) {
                return Err(ConfigError::UnknownPanel {
                    container: chart.container.clone(),
                    panel: chart.panel.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn resolved_charts(&self) -> Vec<ChartConfig> {
        self.charts
            .iter()
            .map(|spec| ChartConfig::resolve(&self.style, spec))
            .collect()
    }

    /// Default config overridden by the page global, if set. A broken override
    /// is reported and ignored.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(json) = read_global(CONFIG_GLOBAL) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(config) => config,
            Err(err) => {
                web_sys::console::warn_1(&format!("{err}; using defaults").into());
                Self::default()
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_global(key: &str) -> Option<String> {
    use wasm_bindgen::JsValue;
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
}

fn traffic_chart(container: &str, panel: &str, color: &str, notes: &[Annotation]) -> ChartSpec {
    ChartSpec {
        container: container.to_string(),
        panel: panel.to_string(),
        data_url: "./data/traffic.csv".to_string(),
        units: "Views".to_string(),
        line_color: color.to_string(),
        value_range: [0.0, 6_500_000.0],
        // millions of pageviews
        y_labels: YLabels {
            max: 6,
            unit: "m".to_string(),
        },
        annotations: AnnotationSet::new("Pageviews", notes.to_vec()),
        value_format: ValueFormat::WeekOverWeek,
        roll_period: None,
    }
}

fn edits_chart(container: &str, panel: &str, color: &str, notes: &[Annotation]) -> ChartSpec {
    ChartSpec {
        container: container.to_string(),
        panel: panel.to_string(),
        data_url: "./data/edits.csv".to_string(),
        units: "Edits".to_string(),
        line_color: color.to_string(),
        value_range: [0.0, 4_600.0],
        // thousands of edits
        y_labels: YLabels {
            max: 4,
            unit: "k".to_string(),
        },
        annotations: AnnotationSet::new("Edits", notes.to_vec()),
        value_format: ValueFormat::RollingAverage,
        roll_period: None,
    }
}

fn traffic_annotations() -> Vec<Annotation> {
    vec![
        Annotation::new("2021/01/04", "RuneScape's 20th anniversary events begin"),
        Annotation::new("2021/02/22", "RuneScape: Azzanadra's Quest is released"),
        Annotation::new("2021/05/26", "Old School: Clans system is released"),
        Annotation::new("2021/06/16", "Old School: A Kingdom Divided is released"),
        Annotation::new("2021/07/26", "RuneScape: Nodon Front is released"),
        Annotation::new("2021/10/06", "Old School: Group Ironman Mode is released")
            .with_tick_height(33),
        Annotation::new("2021/10/25", "RuneScape: TzekHaar Front is released"),
        Annotation::new("2021/11/25", "Old School: Android client beta testing begins"),
    ]
}

fn edits_annotations() -> Vec<Annotation> {
    vec![
        Annotation::new("2021/01/04", "RuneScape's 20th anniversary events begin"),
        Annotation::new("2021/02/22", "RuneScape: Azzanadra's Quest is released"),
        Annotation::new("2021/07/26", "RuneScape: Nodon Front is released"),
        Annotation::new("2021/08/18", "Is this annotation too high?").with_tick_height(180),
        Annotation::new("2021/10/25", "RuneScape: TzekHaar Front is released"),
        Annotation::new("2021/11/25", "Old School: Android client beta testing begins"),
    ]
}
