//! Panel swap state machine for one tab container.
//!
//! A swap runs `idle → exiting → hidden → entering → idle`. The DOM layer
//! drives it with two timers and re-applies [`PanelState::classes`] after
//! every step. Each swap gets a generation number; a timer step carrying an
//! older generation is ignored, and starting a swap first settles the one in
//! flight.

use crate::tabs::Direction;

/// Exit animation length; must match `--anim-fast`.
pub const EXIT_MS: u32 = 125;
/// Enter animation length; must match `--anim-slow`.
pub const ENTER_MS: u32 = 325;

pub const HIDDEN_CLASS: &str = "panel-hidden";
pub const SLIDE_CLASS: &str = "slide";

/// Every class this module may put on a panel.
pub const MANAGED_CLASSES: [&str; 6] = [
    HIDDEN_CLASS,
    SLIDE_CLASS,
    "slide-left-fade-out",
    "slide-right-fade-out",
    "slide-left-fade-in",
    "slide-right-fade-in",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Idle,
    Exiting(Direction),
    Entering(Direction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub id: String,
    pub visible: bool,
    pub phase: PanelPhase,
}

impl PanelState {
    pub fn classes(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.visible {
            out.push(HIDDEN_CLASS.to_string());
        }
        match self.phase {
            PanelPhase::Idle => {}
            PanelPhase::Exiting(dir) => {
                out.push(SLIDE_CLASS.to_string());
                out.push(format!("slide-{}-fade-out", dir.as_str()));
            }
            PanelPhase::Entering(dir) => {
                out.push(SLIDE_CLASS.to_string());
                out.push(format!("slide-{}-fade-in", dir.as_str()));
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Exiting,
    Entering,
}

#[derive(Debug, Clone, Copy)]
struct Swap {
    generation: u64,
    from: usize,
    to: usize,
    direction: Direction,
    stage: Stage,
}

#[derive(Debug, Clone)]
pub struct PanelSwitcher {
    panels: Vec<PanelState>,
    swap: Option<Swap>,
    generation: u64,
}

impl PanelSwitcher {
    /// Panels of one container; only `visible` starts shown.
    pub fn new<I, S>(ids: I, visible: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let panels = ids
            .into_iter()
            .map(|id| {
                let id: String = id.into();
                PanelState {
                    visible: id == visible,
                    id,
                    phase: PanelPhase::Idle,
                }
            })
            .collect();
        Self {
            panels,
            swap: None,
            generation: 0,
        }
    }

    /// Switcher for one container of a tab group, keeping only the group's
    /// panels the container holds. `None` when it holds none of them, which
    /// means the container belongs to another group.
    pub fn for_container<'a, I, F>(ids: I, visible: &str, holds: F) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
        F: Fn(&str) -> bool,
    {
        let present: Vec<&str> = ids.into_iter().filter(|id| holds(id)).collect();
        if present.is_empty() {
            return None;
        }
        Some(Self::new(present, visible))
    }

    pub fn panels(&self) -> &[PanelState] {
        &self.panels
    }

    pub fn panel(&self, id: &str) -> Option<&PanelState> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn is_idle(&self) -> bool {
        self.swap.is_none()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.id == id)
    }

    /// Start swapping `from` out and `to` in. Returns the swap's generation,
    /// or `None` when either panel is unknown or both are the same.
    pub fn begin(&mut self, from: &str, to: &str, direction: Direction) -> Option<u64> {
        let (from, to) = (self.index_of(from)?, self.index_of(to)?);
        if from == to {
            return None;
        }
        self.settle();

        self.generation += 1;
        self.panels[from].phase = PanelPhase::Exiting(direction);
        self.swap = Some(Swap {
            generation: self.generation,
            from,
            to,
            direction,
            stage: Stage::Exiting,
        });
        Some(self.generation)
    }

    /// Exit animation done: hide the old panel and start revealing the new one.
    /// Returns the id of the revealed panel.
    pub fn finish_exit(&mut self, generation: u64) -> Option<&str> {
        let swap = self.swap.as_mut()?;
        if swap.generation != generation || swap.stage != Stage::Exiting {
            return None;
        }
        swap.stage = Stage::Entering;
        let (from, to, direction) = (swap.from, swap.to, swap.direction);

        let old = &mut self.panels[from];
        old.visible = false;
        old.phase = PanelPhase::Idle;

        let new = &mut self.panels[to];
        new.visible = true;
        new.phase = PanelPhase::Entering(direction);
        Some(new.id.as_str())
    }

    /// Enter animation done. Returns false for a stale or out-of-order step.
    pub fn finish_enter(&mut self, generation: u64) -> bool {
        match self.swap {
            Some(swap) if swap.generation == generation && swap.stage == Stage::Entering => {
                self.panels[swap.to].phase = PanelPhase::Idle;
                self.swap = None;
                true
            }
            _ => false,
        }
    }

    /// Jump the in-flight swap, if any, to its end state.
    pub fn settle(&mut self) {
        let Some(swap) = self.swap.take() else {
            return;
        };
        for (i, panel) in self.panels.iter_mut().enumerate() {
            panel.phase = PanelPhase::Idle;
            if i == swap.to {
                panel.visible = true;
            } else if i == swap.from {
                panel.visible = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switcher() -> PanelSwitcher {
        PanelSwitcher::new(["panel-rs", "panel-osrs"], "panel-rs")
    }

    fn visible(s: &PanelSwitcher) -> Vec<&str> {
        s.panels()
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.id.as_str())
            .collect()
    }

    #[test]
    fn full_swap_walks_every_phase() {
        let mut s = switcher();
        let g = s.begin("panel-rs", "panel-osrs", Direction::Right).unwrap();
        assert_eq!(
            s.panel("panel-rs").unwrap().classes(),
            vec!["slide", "slide-right-fade-out"]
        );
        assert_eq!(s.panel("panel-osrs").unwrap().classes(), vec!["panel-hidden"]);

        assert_eq!(s.finish_exit(g), Some("panel-osrs"));
        assert_eq!(s.panel("panel-rs").unwrap().classes(), vec!["panel-hidden"]);
        assert_eq!(
            s.panel("panel-osrs").unwrap().classes(),
            vec!["slide", "slide-right-fade-in"]
        );

        assert!(s.finish_enter(g));
        assert!(s.panel("panel-osrs").unwrap().classes().is_empty());
        assert!(s.is_idle());
        assert_eq!(visible(&s), vec!["panel-osrs"]);
    }

    #[test]
    fn new_swap_cancels_pending_one() {
        let mut s = switcher();
        let first = s.begin("panel-rs", "panel-osrs", Direction::Right).unwrap();
        let second = s.begin("panel-osrs", "panel-rs", Direction::Left).unwrap();
        assert_ne!(first, second);

        // Timers of the first swap fire late and must not touch anything.
        assert_eq!(s.finish_exit(first), None);
        assert!(!s.finish_enter(first));
        assert_eq!(
            s.panel("panel-osrs").unwrap().phase,
            PanelPhase::Exiting(Direction::Left)
        );

        assert_eq!(s.finish_exit(second), Some("panel-rs"));
        assert!(s.finish_enter(second));
        assert_eq!(visible(&s), vec!["panel-rs"]);
    }

    #[test]
    fn interrupting_during_enter_settles_first() {
        let mut s = switcher();
        let g = s.begin("panel-rs", "panel-osrs", Direction::Right).unwrap();
        s.finish_exit(g);
        s.begin("panel-osrs", "panel-rs", Direction::Left).unwrap();
        assert_eq!(visible(&s), vec!["panel-osrs"]);
        assert!(!s.finish_enter(g));
    }

    #[test]
    fn steps_out_of_order_are_ignored() {
        let mut s = switcher();
        let g = s.begin("panel-rs", "panel-osrs", Direction::Right).unwrap();
        assert!(!s.finish_enter(g));
        assert_eq!(s.finish_exit(g), Some("panel-osrs"));
        assert_eq!(s.finish_exit(g), None);
    }

    #[test]
    fn exactly_one_panel_visible_after_settling() {
        let mut s = PanelSwitcher::new(["a", "b", "c"], "a");
        let plan = [("a", "c"), ("c", "b"), ("b", "a"), ("a", "b")];
        for (from, to) in plan {
            s.begin(from, to, Direction::Right);
        }
        s.settle();
        assert_eq!(visible(&s), vec!["b"]);
        assert!(s.panels().iter().all(|p| p.phase == PanelPhase::Idle));
    }

    #[test]
    fn unknown_or_identical_panels_do_not_start() {
        let mut s = switcher();
        assert_eq!(s.begin("panel-rs", "nope", Direction::Right), None);
        assert_eq!(s.begin("panel-rs", "panel-rs", Direction::Right), None);
        assert!(s.is_idle());
    }

    #[test]
    fn container_keeps_only_panels_it_holds() {
        let mut s = PanelSwitcher::for_container(
            ["panel-rs", "panel-osrs", "panel-extra"],
            "panel-rs",
            |id| id != "panel-extra",
        )
        .unwrap();
        let ids: Vec<&str> = s.panels().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["panel-rs", "panel-osrs"]);
        assert_eq!(s.begin("panel-rs", "panel-extra", Direction::Right), None);
        assert!(s.begin("panel-rs", "panel-osrs", Direction::Right).is_some());
    }

    #[test]
    fn container_of_another_group_is_skipped() {
        let other = PanelSwitcher::for_container(["panel-a", "panel-b"], "panel-a", |_| false);
        assert!(other.is_none());
    }

    #[test]
    fn managed_classes_cover_every_emitted_class() {
        let mut s = switcher();
        let g = s.begin("panel-rs", "panel-osrs", Direction::Left).unwrap();
        s.finish_exit(g);
        for panel in s.panels() {
            for class in panel.classes() {
                assert!(MANAGED_CLASSES.contains(&class.as_str()), "{class}");
            }
        }
    }
}
