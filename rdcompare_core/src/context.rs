use rdcompare_common::{RunStats, Side, SideStats, Vfs};

/// State for a single comparison run.
///
/// Built fresh by [`crate::ComparisonEngine`] for every run and passed by
/// reference through the enumerator, classifier and matcher. Dropped when the
/// run ends; nothing is carried over between runs.
pub struct RunContext<'a> {
    vfs: &'a dyn Vfs,
    stats: RunStats,
}

impl<'a> RunContext<'a> {
    pub fn new(vfs: &'a dyn Vfs) -> Self {
        Self {
            vfs,
            stats: RunStats::default(),
        }
    }

    pub fn vfs(&self) -> &'a dyn Vfs {
        self.vfs
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut RunStats {
        &mut self.stats
    }

    pub fn side_stats_mut(&mut self, side: Side) -> &mut SideStats {
        self.stats.side_mut(side)
    }

    pub fn into_stats(self) -> RunStats {
        self.stats
    }
}
