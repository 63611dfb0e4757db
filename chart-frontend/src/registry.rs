/// A chart that must be redrawn once its panel has real layout size.
pub trait Resize {
    fn resize(&self);
}

/// Chart handles grouped by the panel they live in.
///
/// Created at start-up and owned by whatever drives panel visibility; a chart
/// drawn while its panel is hidden gets a zero-sized canvas until resized.
pub struct ChartRegistry<H> {
    entries: Vec<(String, H)>,
}

impl<H> Default for ChartRegistry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H: Resize> ChartRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, panel: impl Into<String>, handle: H) {
        self.entries.push((panel.into(), handle));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn charts_in<'a>(&'a self, panel: &'a str) -> impl Iterator<Item = &'a H> + 'a {
        self.entries
            .iter()
            .filter(move |(p, _)| p == panel)
            .map(|(_, h)| h)
    }

    /// Resize every chart of `panel`; returns how many were touched.
    pub fn resize_panel(&self, panel: &str) -> usize {
        let mut n = 0;
        for chart in self.charts_in(panel) {
            chart.resize();
            n += 1;
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Fake {
        resized: Cell<u32>,
    }

    impl Resize for Fake {
        fn resize(&self) {
            self.resized.set(self.resized.get() + 1);
        }
    }

    #[test]
    fn resizes_only_charts_of_revealed_panel() {
        let mut reg = ChartRegistry::new();
        reg.register("panel-rs", Fake::default());
        reg.register("panel-osrs", Fake::default());
        reg.register("panel-rs", Fake::default());

        assert_eq!(reg.resize_panel("panel-rs"), 2);
        assert_eq!(reg.resize_panel("panel-unknown"), 0);

        let counts: Vec<u32> = reg.entries.iter().map(|(_, f)| f.resized.get()).collect();
        assert_eq!(counts, vec![1, 0, 1]);
        assert_eq!(reg.len(), 3);
    }
}
