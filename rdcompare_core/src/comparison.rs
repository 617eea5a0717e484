use crate::classifier::FileClassifier;
use crate::context::RunContext;
use crate::diff_tool::DiffInvoker;
use crate::enumerator::TreeEnumerator;
use crate::matcher::PairMatcher;
use crate::report::PairReporter;
use crate::vfs::LocalVfs;
use rdcompare_common::{AppConfig, RdCompareError, RunReport, Side, Vfs};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Drives a comparison of two trees: enumerate, classify, match, diff.
pub struct ComparisonEngine {
    config: AppConfig,
    vfs: Box<dyn Vfs>,
}

impl ComparisonEngine {
    pub fn new(config: AppConfig) -> Self {
        Self::with_vfs(config, Box::new(LocalVfs::new()))
    }

    pub fn with_vfs(config: AppConfig, vfs: Box<dyn Vfs>) -> Self {
        Self { config, vfs }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Enumerate, classify and match both trees without running any diff.
    ///
    /// Side A is completely processed before side B is read.
    pub fn plan(&self, root_a: &Path, root_b: &Path) -> Result<RunReport, RdCompareError> {
        self.config.validate()?;
        self.validate_root(root_a)?;
        self.validate_root(root_b)?;

        let mut ctx = RunContext::new(self.vfs.as_ref());
        let enumerator = TreeEnumerator::new(&self.config);
        let classifier = FileClassifier::new();
        let matcher = PairMatcher::new();

        let tree_a = enumerator.enumerate(&mut ctx, Side::A, root_a)?;
        let classified_a = classifier.classify_tree(&mut ctx, &tree_a);
        let candidates = matcher.candidates(&classified_a);

        let tree_b = enumerator.enumerate(&mut ctx, Side::B, root_b)?;
        let classified_b = classifier.classify_tree(&mut ctx, &tree_b);

        let pairs = matcher.match_pairs(&mut ctx, &candidates, &classified_b);

        info!(
            "Side A: {} entries, side B: {} entries, {} pairs",
            tree_a.len(),
            tree_b.len(),
            pairs.len()
        );

        Ok(RunReport {
            pairs,
            stats: ctx.into_stats(),
        })
    }

    /// Run a full comparison.
    ///
    /// Each pair is printed to `out` before the diff program runs on it.
    /// Pairs without a side-A file are printed but not diffed. The first
    /// invocation failure aborts the run.
    pub fn run<W: Write>(
        &self,
        root_a: &Path,
        root_b: &Path,
        invoker: &mut dyn DiffInvoker,
        out: W,
    ) -> Result<RunReport, RdCompareError> {
        let mut report = self.plan(root_a, root_b)?;
        let mut reporter = PairReporter::new(out);

        for pair in &report.pairs {
            reporter.report(pair)?;

            let Some(left) = pair.left.as_deref() else {
                debug!("Not diffing {} without a side A file", pair.right.display());
                continue;
            };

            invoker.invoke(left, &pair.right)?;
            report.stats.diffs_invoked += 1;
        }

        Ok(report)
    }

    fn validate_root(&self, root: &Path) -> Result<(), RdCompareError> {
        if !self.vfs.is_dir(root) {
            return Err(RdCompareError::NotADirectory(root.display().to_string()));
        }
        Ok(())
    }
}
