//! Formatting core shared by the page's charts.
//!
//! Everything here is plain data and string math so it can be exercised
//! natively; the DOM side lives in `chart-frontend`.

pub mod annotation;
pub mod axis;
pub mod change;
pub mod locale;

pub use annotation::{Annotation, AnnotationSet, PlacedAnnotation, TooltipContent};
pub use axis::{month_labels, y_axis_labels, MonthLabel};
pub use change::{js_round, WeekChange, WEEK_ROWS};
pub use locale::{parse_series_date, Locale, LocaleError, DEFAULT_LOCALE};
