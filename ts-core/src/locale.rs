//! Locale-dependent text: grouped numbers, month names and long dates.
//!
//! A [`Locale`] is a BCP-47 tag. In the browser every string is produced by
//! the page's `Intl` implementation through `js_sys`, the same way the rest of
//! the page formats dates. Native builds have no `Intl`; they fall back to
//! English names and comma grouping so the pure logic stays testable.

use std::fmt;

#[cfg(target_arch = "wasm32")]
use chrono::Datelike;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_LOCALE: &str = "en-GB";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed locale tag {0:?}")]
pub struct LocaleError(pub String);

/// BCP-47 language tag, e.g. `en-GB` or `de-DE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Default for Locale {
    fn default() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }
}

impl Locale {
    /// Accepts any well-formed tag; tags the browser does not know fall back
    /// to its default locale when formatting.
    pub fn new(tag: impl Into<String>) -> Result<Self, LocaleError> {
        let tag = tag.into();
        if is_well_formed(&tag) {
            Ok(Self(tag))
        } else {
            Err(LocaleError(tag))
        }
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Abbreviated month name, `month` is 1-based ("Jan", "Sept", "janv.").
    pub fn short_month(&self, month: u32) -> String {
        let month = month.clamp(1, 12);
        #[cfg(target_arch = "wasm32")]
        {
            intl::date(&self.0, 2021, month, 1, &[("month", "short")])
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            fallback::MONTHS[(month - 1) as usize][..3].to_string()
        }
    }

    /// Day, long month and year in the locale's order.
    pub fn long_date(&self, date: NaiveDate) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            intl::date(
                &self.0,
                date.year(),
                date.month(),
                date.day(),
                &[("day", "numeric"), ("month", "long"), ("year", "numeric")],
            )
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            fallback::long_date(&self.0, date)
        }
    }

    /// Grouped digits, at most three fraction digits rounded half away from zero.
    pub fn format_number(&self, value: f64) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            intl::number(&self.0, value)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            fallback::number(value)
        }
    }

    pub fn format_count(&self, value: u64) -> String {
        self.format_number(value as f64)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        Self::new(tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Language subtag of 2-3 or 5-8 letters, then alphanumeric subtags of 1-8.
/// `Intl` throws a `RangeError` on anything else.
fn is_well_formed(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let language_ok = subtags.next().is_some_and(|lang| {
        matches!(lang.len(), 2..=3 | 5..=8) && lang.chars().all(|c| c.is_ascii_alphabetic())
    });
    language_ok
        && subtags.all(|s| {
            (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

#[cfg(target_arch = "wasm32")]
mod intl {
    use js_sys::{Date, JsString, Number, Object, Reflect};

    fn options(pairs: &[(&str, &str)]) -> Object {
        let opts = Object::new();
        for (key, value) in pairs {
            let _ = Reflect::set(&opts, &JsString::from(*key), &JsString::from(*value));
        }
        opts
    }

    /// Local-time date, so the calendar day never shifts with the time zone.
    pub fn date(tag: &str, year: i32, month: u32, day: u32, opts: &[(&str, &str)]) -> String {
        let date = Date::new_with_year_month_day(year as u32, month as i32 - 1, day as i32);
        date.to_locale_string(tag, &options(opts)).into()
    }

    pub fn number(tag: &str, value: f64) -> String {
        Number::from(value).to_locale_string(tag).into()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod fallback {
    use chrono::{Datelike, NaiveDate};

    pub const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    pub fn long_date(tag: &str, date: NaiveDate) -> String {
        let month = MONTHS[date.month0() as usize];
        if tag == "en-US" {
            format!("{} {}, {}", month, date.day(), date.year())
        } else {
            format!("{} {} {}", date.day(), month, date.year())
        }
    }

    pub fn number(value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "∞" } else { "-∞" }.to_string();
        }

        // `{:.3}` alone rounds exact ties to even; Intl rounds them away from zero.
        let rounded = (value.abs() * 1000.0).round() / 1000.0;
        let fixed = format!("{rounded:.3}");
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let frac_part = frac_part.trim_end_matches('0');

        let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
        if value < 0.0 && rounded != 0.0 {
            out.push('-');
        }
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        if !frac_part.is_empty() {
            out.push('.');
            out.push_str(frac_part);
        }
        out
    }
}

/// Parse the date strings used by the series files and annotations.
///
/// Accepts `YYYY/MM/DD` (the charting library's own rendering) and ISO
/// `YYYY-MM-DD`; trailing time components are ignored.
pub fn parse_series_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(head, "%Y/%m/%d")
        .or_else(|_| NaiveDate::parse_from_str(head, "%Y-%m-%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en_gb() -> Locale {
        Locale::default()
    }

    #[test]
    fn groups_thousands() {
        let l = en_gb();
        assert_eq!(l.format_number(0.0), "0");
        assert_eq!(l.format_number(999.0), "999");
        assert_eq!(l.format_number(1000.0), "1,000");
        assert_eq!(l.format_number(6_500_000.0), "6,500,000");
        assert_eq!(l.format_number(-12_345.0), "-12,345");
        assert_eq!(l.format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn keeps_three_fraction_digits() {
        let l = en_gb();
        assert_eq!(l.format_number(1234.5), "1,234.5");
        assert_eq!(l.format_number(0.12345), "0.123");
        assert_eq!(l.format_number(-0.0001), "0");
    }

    #[test]
    fn fraction_ties_round_away_from_zero() {
        let l = en_gb();
        assert_eq!(l.format_number(0.0625), "0.063");
        assert_eq!(l.format_number(1.0625), "1.063");
        assert_eq!(l.format_number(-1.0625), "-1.063");
    }

    #[test]
    fn long_dates_follow_locale_order() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
        assert_eq!(en_gb().long_date(date), "4 January 2021");
        assert_eq!(Locale::new("en-US").unwrap().long_date(date), "January 4, 2021");
    }

    #[test]
    fn short_months_clamp_to_calendar() {
        let l = en_gb();
        assert_eq!(l.short_month(1), "Jan");
        assert_eq!(l.short_month(0), "Jan");
        assert_eq!(l.short_month(13), "Dec");
    }

    #[test]
    fn parses_slash_and_iso_dates() {
        let expected = NaiveDate::from_ymd_opt(2021, 10, 6);
        assert_eq!(parse_series_date("2021/10/06"), expected);
        assert_eq!(parse_series_date("2021-10-06"), expected);
        assert_eq!(parse_series_date("2021/10/06 00:00:00"), expected);
        assert_eq!(parse_series_date("yesterday"), None);
    }

    #[test]
    fn any_well_formed_tag_is_accepted() {
        for tag in ["de-DE", "fr", "zh-Hant-TW", "sr-Latn-RS", "es-419"] {
            let locale: Locale = serde_json::from_str(&format!("\"{tag}\"")).unwrap();
            assert_eq!(locale.tag(), tag);
        }
    }

    #[test]
    fn malformed_tags_are_rejected() {
        for tag in ["", "e", "en_GB", "en-", "toolonglanguage", "en-GB-$"] {
            assert_eq!(Locale::new(tag), Err(LocaleError(tag.to_string())));
        }
        assert!(serde_json::from_str::<Locale>("\"en GB\"").is_err());
    }

    #[test]
    fn locale_serializes_as_bcp47_tag() {
        let json = serde_json::to_string(&en_gb()).unwrap();
        assert_eq!(json, "\"en-GB\"");
        assert_eq!(en_gb().to_string(), DEFAULT_LOCALE);
    }
}
