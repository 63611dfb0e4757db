use serde::{Deserialize, Serialize};

use crate::locale::{parse_series_date, Locale};

pub const MARKER_SIZE: u32 = 24;
pub const TICK_WIDTH: u32 = 2;
pub const DEFAULT_TICK_HEIGHT: u32 = 20;

/// A dated note on a chart's time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Same textual form as the series' date column.
    pub date: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_height: Option<u32>,
}

impl Annotation {
    pub fn new(date: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            text: text.into(),
            tick_height: None,
        }
    }

    pub fn with_tick_height(mut self, height: u32) -> Self {
        self.tick_height = Some(height);
        self
    }
}

/// Annotation in the shape the charting library consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedAnnotation {
    pub x: String,
    pub text: String,
    /// Must match a column name of the series file.
    pub series: String,
    pub short_text: String,
    pub width: u32,
    pub height: u32,
    pub css_class: String,
    pub tick_width: u32,
    pub tick_height: u32,
}

/// Title and body of a hover tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub title: String,
    pub body: String,
}

/// All annotations of one chart, bound to a single series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    pub series: String,
    pub items: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn new(series: impl Into<String>, items: Vec<Annotation>) -> Self {
        Self {
            series: series.into(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Class carried by the rendered marker of the `index`-th annotation.
    pub fn marker_class(index: usize) -> String {
        format!("annotation-{}", index + 1)
    }

    pub fn placed(&self) -> Vec<PlacedAnnotation> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, a)| PlacedAnnotation {
                x: a.date.clone(),
                text: a.text.clone(),
                series: self.series.clone(),
                short_text: (i + 1).to_string(),
                width: MARKER_SIZE,
                height: MARKER_SIZE,
                css_class: format!("tooltip-hidden {}", Self::marker_class(i)),
                tick_width: TICK_WIDTH,
                tick_height: a.tick_height.unwrap_or(DEFAULT_TICK_HEIGHT),
            })
            .collect()
    }

    /// Tooltip per annotation, in marker order. Unparsable dates are shown verbatim.
    pub fn tooltips(&self, locale: &Locale) -> Vec<TooltipContent> {
        self.items
            .iter()
            .map(|a| TooltipContent {
                title: parse_series_date(&a.date)
                    .map(|d| locale.long_date(d))
                    .unwrap_or_else(|| a.date.clone()),
                body: a.text.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> AnnotationSet {
        AnnotationSet::new(
            "Pageviews",
            vec![
                Annotation::new("2021/01/04", "Anniversary events begin"),
                Annotation::new("2021/10/06", "Group mode released").with_tick_height(33),
            ],
        )
    }

    #[test]
    fn placed_annotations_are_numbered_from_one() {
        let placed = set().placed();
        assert_eq!(placed[0].short_text, "1");
        assert_eq!(placed[0].css_class, "tooltip-hidden annotation-1");
        assert_eq!(placed[1].short_text, "2");
        assert_eq!(placed[1].series, "Pageviews");
        assert_eq!(placed[0].width, 24);
        assert_eq!(placed[0].tick_width, 2);
    }

    #[test]
    fn tick_height_defaults_to_twenty() {
        let placed = set().placed();
        assert_eq!(placed[0].tick_height, DEFAULT_TICK_HEIGHT);
        assert_eq!(placed[1].tick_height, 33);
    }

    #[test]
    fn placed_serializes_with_library_keys() {
        let json = serde_json::to_value(&set().placed()[1]).unwrap();
        assert_eq!(json["shortText"], "2");
        assert_eq!(json["cssClass"], "tooltip-hidden annotation-2");
        assert_eq!(json["tickHeight"], 33);
        assert_eq!(json["x"], "2021/10/06");
    }

    #[test]
    fn tooltips_use_long_dates() {
        let tips = set().tooltips(&Locale::default());
        assert_eq!(tips[0].title, "4 January 2021");
        assert_eq!(tips[1].title, "6 October 2021");
        assert_eq!(tips[1].body, "Group mode released");
    }

    #[test]
    fn annotation_config_accepts_missing_tick_height() {
        let a: Annotation =
            serde_json::from_str(r#"{"date":"2021/05/26","text":"Clans"}"#).unwrap();
        assert_eq!(a.tick_height, None);
    }
}
