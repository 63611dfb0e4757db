use crate::tabs::TabGroup;

/// Body classes a theme switch removes and adds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeChange {
    pub remove: Vec<String>,
    pub add: String,
}

/// The theme classes a tab group can put on `<body>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeSet {
    known: Vec<String>,
}

impl ThemeSet {
    pub fn from_tabs(group: &TabGroup) -> Self {
        let mut known: Vec<String> = Vec::new();
        for theme in group.tabs().iter().filter_map(|t| t.theme.as_ref()) {
            if !known.contains(theme) {
                known.push(theme.clone());
            }
        }
        Self { known }
    }

    pub fn known(&self) -> &[String] {
        &self.known
    }

    /// Switch to `theme`: clear every known theme class, then add it.
    pub fn switch_to(&self, theme: &str) -> ThemeChange {
        ThemeChange {
            remove: self.known.clone(),
            add: theme.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabs::Tab;

    fn group() -> TabGroup {
        let tab = |controls: &str, theme: Option<&str>| Tab {
            label: controls.into(),
            controls: controls.into(),
            theme: theme.map(Into::into),
        };
        TabGroup::new(
            vec![
                tab("panel-rs", Some("theme-rs")),
                tab("panel-osrs", Some("theme-osrs")),
                tab("panel-plain", None),
                tab("panel-rs-again", Some("theme-rs")),
            ],
            0,
        )
        .unwrap()
    }

    #[test]
    fn collects_distinct_themes_in_tab_order() {
        let set = ThemeSet::from_tabs(&group());
        assert_eq!(set.known(), ["theme-rs", "theme-osrs"]);
    }

    #[test]
    fn switch_removes_all_known_and_adds_target() {
        let change = ThemeSet::from_tabs(&group()).switch_to("theme-osrs");
        assert_eq!(change.remove, vec!["theme-rs", "theme-osrs"]);
        assert_eq!(change.add, "theme-osrs");
    }
}
