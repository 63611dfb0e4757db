use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("http error: {0}")]
    Http(String),
    #[error("unexpected status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One stacked segment of an entity's bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub pageviews: u64,
}

/// An entity of the bar-chart document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarEntity {
    pub name: String,
    #[serde(rename = "isNew", default)]
    pub is_new: bool,
    pub variants: Vec<Variant>,
}

impl BarEntity {
    pub fn total(&self) -> u64 {
        self.variants.iter().map(|v| v.pageviews).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    pub label: String,
    pub pageviews: u64,
    /// Share of the widest row, in percent.
    pub width_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub name: String,
    pub is_new: bool,
    pub total: u64,
    pub segments: Vec<BarSegment>,
}

/// Rows ready for rendering: descending by total, widths normalised to the largest total.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarChartLayout {
    pub rows: Vec<BarRow>,
    pub max_total: u64,
}

impl BarChartLayout {
    pub fn build(entities: Vec<BarEntity>) -> Self {
        let mut totals: Vec<(u64, BarEntity)> =
            entities.into_iter().map(|e| (e.total(), e)).collect();
        // Stable: ties keep document order.
        totals.sort_by(|a, b| b.0.cmp(&a.0));
        let max_total = totals.first().map(|(t, _)| *t).unwrap_or(0);

        let rows = totals
            .into_iter()
            .map(|(total, entity)| BarRow {
                segments: entity
                    .variants
                    .into_iter()
                    .map(|v| BarSegment {
                        width_percent: segment_width(v.pageviews, max_total),
                        label: v.name,
                        pageviews: v.pageviews,
                    })
                    .collect(),
                name: entity.name,
                is_new: entity.is_new,
                total,
            })
            .collect();

        Self { rows, max_total }
    }
}

/// `pageviews / max_total * 100`; an all-zero chart has zero-width segments.
pub fn segment_width(pageviews: u64, max_total: u64) -> f64 {
    if max_total == 0 {
        return 0.0;
    }
    pageviews as f64 / max_total as f64 * 100.0
}

pub fn parse_entities(json: &str) -> Result<Vec<BarEntity>, FeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Text shown in place of a chart whose data could not be loaded.
pub fn error_message(err: &FeedError) -> String {
    format!("Error loading chart data: {err}")
}

/// Consumer of a loaded (or failed) bar-chart document.
pub trait BarChartSink {
    fn on_layout(&mut self, layout: BarChartLayout);
    fn on_error(&mut self, err: FeedError);
}

/// Turn a fetched body into a layout and hand it, or the failure, to `sink`.
pub fn deliver<S: BarChartSink + ?Sized>(body: Result<String, FeedError>, sink: &mut S) {
    match body.and_then(|text| parse_entities(&text)) {
        Ok(entities) => sink.on_layout(BarChartLayout::build(entities)),
        Err(err) => sink.on_error(err),
    }
}
