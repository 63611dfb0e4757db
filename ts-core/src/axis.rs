use crate::locale::Locale;

/// Month tick for the custom x axis: initial and abbreviated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLabel {
    pub short: String,
    pub long: String,
}

/// Twelve month labels, January first.
pub fn month_labels(locale: &Locale) -> Vec<MonthLabel> {
    (1..=12)
        .map(|m| {
            let long = locale.short_month(m);
            let short = long.chars().take(1).collect();
            MonthLabel { short, long }
        })
        .collect()
}

/// Y-axis labels from `max` down to zero; the unit is dropped on the zero line.
pub fn y_axis_labels(max: u32, unit: &str) -> Vec<String> {
    (0..=max)
        .rev()
        .map(|i| {
            if i == 0 {
                "0".to_string()
            } else {
                format!("{i}{unit}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_months_with_initials() {
        let labels = month_labels(&Locale::default());
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0].long, "Jan");
        assert_eq!(labels[0].short, "J");
        assert_eq!(labels[8].long, "Sep");
        assert_eq!(labels[11].short, "D");
    }

    #[test]
    fn y_labels_descend_and_skip_unit_on_zero() {
        assert_eq!(y_axis_labels(4, "k"), vec!["4k", "3k", "2k", "1k", "0"]);
        assert_eq!(y_axis_labels(0, "m"), vec!["0"]);
    }
}
