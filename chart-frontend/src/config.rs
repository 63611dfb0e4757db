//! Typed chart configuration.
//!
//! A chart is described by the page-wide [`SharedChartStyle`] plus a
//! per-chart [`ChartSpec`]. [`ChartConfig::resolve`] combines them with a
//! fixed precedence:
//!
//! * every field present on the [`ChartSpec`] wins over the shared style
//!   (`roll_period` is the only optional override; colour, units and
//!   ranges are always per chart);
//! * the y axis starts from the shared y defaults and layers the chart's
//!   `value_range` on top;
//! * the x axis and grid styling come from the shared style only.

use serde::{Deserialize, Serialize};
use ts_core::{AnnotationSet, Locale};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisStyle {
    pub draw_axis: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_grid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_zero: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesStyle {
    pub x: AxisStyle,
    pub y: AxisStyle,
}

impl Default for AxesStyle {
    fn default() -> Self {
        Self {
            x: AxisStyle {
                draw_axis: false,
                draw_grid: Some(false),
                include_zero: None,
            },
            y: AxisStyle {
                draw_axis: false,
                draw_grid: None,
                include_zero: Some(true),
            },
        }
    }
}

/// Settings every chart on the page shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedChartStyle {
    pub locale: Locale,
    pub grid_color: String,
    pub grid_line_width: f64,
    pub stroke_width: f64,
    pub highlight_circle_size: f64,
    pub x_range_pad: f64,
    pub roll_period: u32,
    pub fill_graph: bool,
    pub axes: AxesStyle,
}

impl Default for SharedChartStyle {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            grid_color: "hsl(210, 15.94%, 38.5%)".to_string(),
            grid_line_width: 1.0,
            stroke_width: 3.0,
            highlight_circle_size: 5.0,
            x_range_pad: 4.0,
            roll_period: 7,
            fill_graph: true,
            axes: AxesStyle::default(),
        }
    }
}

/// How hovered values are rendered in the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// Rolled average only.
    #[default]
    RollingAverage,
    /// Rolled average plus change against the same day a week earlier.
    WeekOverWeek,
}

/// Hand-drawn y labels: `max` down to 0 with `unit` appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YLabels {
    pub max: u32,
    pub unit: String,
}

/// One chart on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Selector of the element wrapping `.graph`, `.graph-legend` and `.graph-x-labels`.
    pub container: String,
    /// Panel (tab `data-controls` value) the chart lives in.
    pub panel: String,
    pub data_url: String,
    /// Legend label, e.g. "Views".
    pub units: String,
    pub line_color: String,
    pub value_range: [f64; 2],
    pub y_labels: YLabels,
    pub annotations: AnnotationSet,
    #[serde(default)]
    pub value_format: ValueFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_period: Option<u32>,
}

/// Serializable part of the options handed to the charting library.
/// Callbacks are attached separately on the JS side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DygraphOptions {
    pub color: String,
    pub stroke_width: f64,
    pub axis_line_color: String,
    pub grid_line_color: String,
    pub grid_line_width: f64,
    pub highlight_circle_size: f64,
    pub x_range_pad: f64,
    pub roll_period: u32,
    pub fill_graph: bool,
    pub axes: DygraphAxes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DygraphAxes {
    pub x: AxisStyle,
    pub y: YAxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisOptions {
    #[serde(flatten)]
    pub style: AxisStyle,
    pub value_range: [f64; 2],
}

/// Shared style and chart spec resolved into one value.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub locale: Locale,
    pub spec: ChartSpec,
    pub options: DygraphOptions,
}

impl ChartConfig {
    pub fn resolve(shared: &SharedChartStyle, spec: &ChartSpec) -> Self {
        let options = DygraphOptions {
            color: spec.line_color.clone(),
            stroke_width: shared.stroke_width,
            axis_line_color: shared.grid_color.clone(),
            grid_line_color: shared.grid_color.clone(),
            grid_line_width: shared.grid_line_width,
            highlight_circle_size: shared.highlight_circle_size,
            x_range_pad: shared.x_range_pad,
            roll_period: spec.roll_period.unwrap_or(shared.roll_period),
            fill_graph: shared.fill_graph,
            axes: DygraphAxes {
                x: shared.axes.x.clone(),
                y: YAxisOptions {
                    style: shared.axes.y.clone(),
                    value_range: spec.value_range,
                },
            },
        };
        Self {
            locale: shared.locale.clone(),
            spec: spec.clone(),
            options,
        }
    }

    pub fn graph_selector(&self) -> String {
        format!("{} .graph", self.spec.container)
    }

    pub fn legend_selector(&self) -> String {
        format!("{} .graph-legend", self.spec.container)
    }

    pub fn x_labels_selector(&self) -> String {
        format!("{} .graph-x-labels", self.spec.container)
    }

    pub fn marker_selector(&self, index: usize) -> String {
        format!(
            "{} .{}",
            self.spec.container,
            AnnotationSet::marker_class(index)
        )
    }

    pub fn options_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ts_core::Annotation;

    fn spec() -> ChartSpec {
        ChartSpec {
            container: ".traffic-rsw".into(),
            panel: "panel-rs".into(),
            data_url: "./data/traffic.csv".into(),
            units: "Views".into(),
            line_color: "hsl(197, 66%, 62%)".into(),
            value_range: [0.0, 6_500_000.0],
            y_labels: YLabels {
                max: 6,
                unit: "m".into(),
            },
            annotations: AnnotationSet::new(
                "Pageviews",
                vec![Annotation::new("2021/01/04", "Events begin")],
            ),
            value_format: ValueFormat::WeekOverWeek,
            roll_period: None,
        }
    }

    #[test]
    fn spec_fields_override_shared_style() {
        let shared = SharedChartStyle::default();
        let mut s = spec();
        let cfg = ChartConfig::resolve(&shared, &s);
        assert_eq!(cfg.options.roll_period, 7);
        assert_eq!(cfg.options.color, "hsl(197, 66%, 62%)");

        s.roll_period = Some(14);
        let cfg = ChartConfig::resolve(&shared, &s);
        assert_eq!(cfg.options.roll_period, 14);
    }

    #[test]
    fn y_axis_layers_range_on_shared_defaults() {
        let cfg = ChartConfig::resolve(&SharedChartStyle::default(), &spec());
        assert_eq!(cfg.options.axes.y.style.include_zero, Some(true));
        assert!(!cfg.options.axes.y.style.draw_axis);
        assert_eq!(cfg.options.axes.y.value_range, [0.0, 6_500_000.0]);
        assert_eq!(cfg.options.axes.x.draw_grid, Some(false));
    }

    #[test]
    fn options_serialize_with_library_names() {
        let cfg = ChartConfig::resolve(&SharedChartStyle::default(), &spec());
        let json: serde_json::Value = serde_json::from_str(&cfg.options_json().unwrap()).unwrap();
        assert_eq!(json["strokeWidth"], 3.0);
        assert_eq!(json["rollPeriod"], 7);
        assert_eq!(json["fillGraph"], true);
        assert_eq!(json["gridLineColor"], "hsl(210, 15.94%, 38.5%)");
        assert_eq!(json["axisLineColor"], json["gridLineColor"]);
        assert_eq!(json["axes"]["y"]["includeZero"], true);
        assert_eq!(json["axes"]["y"]["valueRange"][1], 6_500_000.0);
        assert_eq!(json["axes"]["x"]["drawGrid"], false);
        assert!(json["axes"]["x"].get("includeZero").is_none());
    }

    #[test]
    fn selectors_are_scoped_to_container() {
        let cfg = ChartConfig::resolve(&SharedChartStyle::default(), &spec());
        assert_eq!(cfg.graph_selector(), ".traffic-rsw .graph");
        assert_eq!(cfg.legend_selector(), ".traffic-rsw .graph-legend");
        assert_eq!(cfg.marker_selector(0), ".traffic-rsw .annotation-1");
    }

    #[test]
    fn shared_style_fills_missing_fields_from_defaults() {
        let shared: SharedChartStyle = serde_json::from_str(r#"{"roll_period": 3}"#).unwrap();
        assert_eq!(shared.roll_period, 3);
        assert_eq!(shared.stroke_width, 3.0);
        assert_eq!(shared.locale, Locale::default());
    }
}
