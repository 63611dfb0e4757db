use std::fmt;

/// Rows per week in a daily series.
pub const WEEK_ROWS: usize = 7;

/// True minus sign; a hyphen reads as a dash next to percentages.
const MINUS: char = '\u{2212}';

/// Round half towards positive infinity, matching the browser's `Math.round`.
pub fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Week-over-week change of a daily series value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekChange {
    NotAvailable,
    Percent(i64),
}

impl WeekChange {
    /// Change at `row`, looking up the value one week earlier through `value_at`.
    ///
    /// The first week of rows has nothing to compare against.
    pub fn at_row(row: usize, current: f64, value_at: impl Fn(usize) -> f64) -> Self {
        if row < WEEK_ROWS {
            return WeekChange::NotAvailable;
        }
        Self::between(value_at(row - WEEK_ROWS), current)
    }

    pub fn between(previous: f64, current: f64) -> Self {
        if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
            return WeekChange::NotAvailable;
        }
        let pct = js_round((current - previous) / previous * 100.0);
        WeekChange::Percent(pct as i64)
    }
}

impl fmt::Display for WeekChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            WeekChange::NotAvailable => f.write_str("N/A"),
            WeekChange::Percent(p) if p < 0 => write!(f, "{MINUS}{}%", p.unsigned_abs()),
            WeekChange::Percent(p) if p > 0 => write!(f, "+{p}%"),
            WeekChange::Percent(_) => f.write_str("0%"),
        }
    }
}
