use crate::context::RunContext;
use rdcompare_common::{ClassifiedTree, MatchPair};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Pairs comparable files of two classified trees by index.
///
/// Pairing is purely positional: the side-B file at index `i` is paired with
/// whatever side-A candidate sits at index `i`, independent of names or
/// content. This assumes both trees share the same layout (two builds of the
/// same ramdisk). When the layouts diverge the pairs are still index-aligned
/// and may compare unrelated files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairMatcher;

impl PairMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Side-A candidate set, index-aligned with the tree.
    ///
    /// Slot `i` holds the path of entry `i` when it is a regular file tagged
    /// `Other`, and `None` otherwise.
    pub fn candidates(&self, side_a: &ClassifiedTree) -> Vec<Option<PathBuf>> {
        side_a
            .entries
            .iter()
            .map(|entry| {
                if entry.is_comparable() {
                    Some(entry.entry.path.clone())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Emit a pair for every comparable side-B entry, in increasing index order
    pub fn match_pairs(
        &self,
        ctx: &mut RunContext<'_>,
        candidates: &[Option<PathBuf>],
        side_b: &ClassifiedTree,
    ) -> Vec<MatchPair> {
        let mut pairs = Vec::new();

        for (index, entry) in side_b.entries.iter().enumerate() {
            if !entry.is_comparable() {
                continue;
            }

            let left = candidates.get(index).cloned().flatten();
            if left.is_none() {
                warn!(
                    "No side A candidate at index {} for {}",
                    index,
                    entry.entry.path.display()
                );
                ctx.stats_mut().unmatched += 1;
            }

            pairs.push(MatchPair {
                index,
                left,
                right: entry.entry.path.clone(),
            });
        }

        ctx.stats_mut().pairs = pairs.len();
        debug!("Matched {} pairs", pairs.len());
        pairs
    }
}
