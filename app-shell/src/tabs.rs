use crate::error::TabError;

/// Slide direction of a panel swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Moving to a tab before the current one slides left.
    pub fn between(from: usize, to: usize) -> Self {
        if from > to {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub label: String,
    /// Id of the panel this tab shows (its `data-controls`).
    pub controls: String,
    /// Body class applied when the tab is clicked (its `data-theme`).
    pub theme: Option<String>,
}

/// Result of a successful selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSwitch {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

/// Mutually exclusive tabs; exactly one is selected at any time.
#[derive(Debug, Clone)]
pub struct TabGroup {
    tabs: Vec<Tab>,
    selected: usize,
}

impl TabGroup {
    pub fn new(tabs: Vec<Tab>, selected: usize) -> Result<Self, TabError> {
        if tabs.is_empty() {
            return Err(TabError::Empty);
        }
        if selected >= tabs.len() {
            return Err(TabError::OutOfRange {
                index: selected,
                len: tabs.len(),
            });
        }
        Ok(Self { tabs, selected })
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_tab(&self) -> &Tab {
        &self.tabs[self.selected]
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == index
    }

    /// Select `index`. Re-selecting the current tab or an unknown index changes nothing.
    pub fn select(&mut self, index: usize) -> Option<TabSwitch> {
        if index == self.selected || index >= self.tabs.len() {
            return None;
        }
        let from = self.selected;
        self.selected = index;
        Some(TabSwitch {
            from,
            to: index,
            direction: Direction::between(from, index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(controls: &str, theme: &str) -> Tab {
        Tab {
            label: controls.to_uppercase(),
            controls: controls.into(),
            theme: Some(theme.into()),
        }
    }

    fn group() -> TabGroup {
        TabGroup::new(
            vec![
                tab("panel-rs", "theme-rs"),
                tab("panel-osrs", "theme-osrs"),
                tab("panel-extra", "theme-extra"),
            ],
            0,
        )
        .unwrap()
    }

    fn selected_count(g: &TabGroup) -> usize {
        (0..g.tabs().len()).filter(|i| g.is_selected(*i)).count()
    }

    #[test]
    fn clicking_selected_tab_is_noop() {
        let mut g = group();
        assert_eq!(g.select(0), None);
        assert_eq!(g.selected(), 0);
    }

    #[test]
    fn direction_is_left_only_when_moving_back() {
        let mut g = group();
        let fwd = g.select(2).unwrap();
        assert_eq!((fwd.from, fwd.to, fwd.direction), (0, 2, Direction::Right));
        let back = g.select(1).unwrap();
        assert_eq!((back.from, back.to, back.direction), (2, 1, Direction::Left));
        assert_eq!(Direction::Left.as_str(), "left");
    }

    #[test]
    fn exactly_one_tab_selected_through_any_sequence() {
        let mut g = group();
        for idx in [1, 1, 0, 2, 7, 2, 0, 1] {
            g.select(idx);
            assert_eq!(selected_count(&g), 1);
        }
        assert_eq!(g.selected_tab().controls, "panel-osrs");
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut g = group();
        assert_eq!(g.select(9), None);
        assert_eq!(g.selected(), 0);
    }

    #[test]
    fn construction_rejects_bad_groups() {
        assert!(matches!(TabGroup::new(Vec::new(), 0), Err(TabError::Empty)));
        assert!(matches!(
            TabGroup::new(vec![tab("a", "t")], 1),
            Err(TabError::OutOfRange { index: 1, len: 1 })
        ));
    }
}
