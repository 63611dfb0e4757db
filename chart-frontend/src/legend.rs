use serde::{Deserialize, Serialize};
use ts_core::{js_round, parse_series_date, Locale, WeekChange};

use crate::config::ValueFormat;

/// What the value formatter hands back to the library for one hovered point.
/// The legend formatter reads it back from the point's `yHTML`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedValue {
    pub actual: String,
    pub average: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
}

impl FormattedValue {
    /// `rolled` is the library's rolled average, `actual` the raw row value.
    pub fn new(
        locale: &Locale,
        format: ValueFormat,
        rolled: f64,
        actual: Option<f64>,
        change: impl FnOnce() -> WeekChange,
    ) -> Self {
        let change = match format {
            ValueFormat::RollingAverage => None,
            ValueFormat::WeekOverWeek => Some(change().to_string()),
        };
        Self {
            actual: locale.format_number(actual.unwrap_or(rolled)),
            average: locale.format_number(js_round(rolled)),
            change,
        }
    }
}

/// Legend markup for a hovered point; `x_html` is the library's date text.
pub fn legend_html(locale: &Locale, x_html: &str, units: &str, value: &FormattedValue) -> String {
    let date = parse_series_date(x_html)
        .map(|d| locale.long_date(d))
        .unwrap_or_else(|| x_html.to_string());
    let mut html = format!(
        "<div class=\"graph-legend-date\">{date}</div>\
         <div class=\"graph-legend-count\">{units}: {}</div>",
        value.average
    );
    if let Some(change) = &value.change {
        html.push_str(&format!(
            "<div class=\"graph-legend-change\">Week-over-week: {change}</div>"
        ));
    }
    html
}
