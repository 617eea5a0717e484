use crate::context::RunContext;
use rdcompare_common::{
    AppConfig, EntryKind, FileEntry, OverflowPolicy, RdCompareError, Side, Tree, TreeEntry,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Lists a root directory and the direct children of each of its
/// subdirectories into a capacity-bounded [`Tree`].
///
/// Root children come first in listing order, followed by the children of
/// each root subdirectory in the order the subdirectories were discovered.
/// Nothing deeper than one nested level is visited.
#[derive(Debug, Clone)]
pub struct TreeEnumerator {
    max_entries: usize,
    max_path_len: usize,
    overflow: OverflowPolicy,
    sort_entries: bool,
}

impl TreeEnumerator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            max_entries: config.max_entries,
            max_path_len: config.max_path_len,
            overflow: config.overflow,
            sort_entries: config.sort_entries,
        }
    }

    pub fn enumerate(
        &self,
        ctx: &mut RunContext<'_>,
        side: Side,
        root: &Path,
    ) -> Result<Tree, RdCompareError> {
        info!("Enumerating side {} from {}", side, root.display());

        let mut tree = Tree::with_capacity(side, root, self.max_entries);
        let listing = ctx.vfs().read_dir(root)?;

        let mut subdirs: Vec<PathBuf> = Vec::new();
        for entry in self.ordered(listing) {
            let path = entry.path.clone();
            if self.admit(ctx, &mut tree, entry)? == Some(true) {
                subdirs.push(path);
            }
        }

        for dir in subdirs {
            let listing = match ctx.vfs().read_dir(&dir) {
                Ok(listing) => listing,
                Err(e) => {
                    warn!("Skipping unreadable directory {}: {}", dir.display(), e);
                    ctx.side_stats_mut(side).unreadable_dirs += 1;
                    continue;
                }
            };

            for entry in self.ordered(listing) {
                self.admit(ctx, &mut tree, entry)?;
            }
        }

        let dropped = ctx.stats().side(side).capacity_dropped;
        if dropped > 0 {
            warn!(
                "Side {} exceeded {} entries; {} entries were not compared",
                side,
                tree.capacity(),
                dropped
            );
        }
        ctx.side_stats_mut(side).entries = tree.len();

        debug!("Enumerated {} entries for side {}", tree.len(), side);
        Ok(tree)
    }

    fn ordered(&self, mut listing: Vec<FileEntry>) -> Vec<FileEntry> {
        if self.sort_entries {
            listing.sort_by(|a, b| a.path.cmp(&b.path));
        }
        listing
    }

    /// Try to add one listing entry to the tree.
    ///
    /// Returns `Some(is_dir)` when the entry was stored and `None` when it was
    /// skipped (special file or full tree).
    fn admit(
        &self,
        ctx: &mut RunContext<'_>,
        tree: &mut Tree,
        entry: FileEntry,
    ) -> Result<Option<bool>, RdCompareError> {
        let side = tree.side();

        if entry.path.as_os_str().len() > self.max_path_len {
            return Err(RdCompareError::PathTooLong {
                path: entry.path.display().to_string(),
                limit: self.max_path_len,
            });
        }

        if !entry.kind.is_tracked() {
            debug!("Skipping {:?} entry {}", entry.kind, entry.path.display());
            ctx.side_stats_mut(side).special_skipped += 1;
            return Ok(None);
        }

        if tree.is_full() {
            return match self.overflow {
                OverflowPolicy::Truncate => {
                    debug!("Tree full, dropping {}", entry.path.display());
                    ctx.side_stats_mut(side).capacity_dropped += 1;
                    Ok(None)
                }
                OverflowPolicy::Error => Err(RdCompareError::CapacityExceeded {
                    path: entry.path.display().to_string(),
                    capacity: tree.capacity(),
                }),
            };
        }

        let is_dir = entry.kind == EntryKind::Directory;
        tree.push(TreeEntry {
            path: entry.path,
            is_dir,
        });
        Ok(Some(is_dir))
    }
}
