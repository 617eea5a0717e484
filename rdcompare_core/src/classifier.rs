use crate::context::RunContext;
use rdcompare_common::{
    ClassifiedEntry, ClassifiedTree, FileTag, Tree, TreeEntry, Vfs, VfsError, HMAC_MARKER,
    PNG_SIGNATURE, SNIFF_LEN,
};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Assigns a coarse content tag to enumerated entries by sniffing the
/// first [`SNIFF_LEN`] bytes of each file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileClassifier;

impl FileClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a single entry.
    ///
    /// Decision order: `.hmac` in the path, directory (no tag), open failure
    /// (no tag), size of exactly one byte, PNG signature, NUL byte, other.
    pub fn classify(&self, vfs: &dyn Vfs, entry: &TreeEntry) -> Option<FileTag> {
        if entry.path.to_string_lossy().contains(HMAC_MARKER) {
            return Some(FileTag::Hmac);
        }

        if entry.is_dir {
            return None;
        }

        match self.sniff(vfs, &entry.path) {
            Ok(tag) => Some(tag),
            Err(e) => {
                debug!("Leaving {} unclassified: {}", entry.path.display(), e);
                None
            }
        }
    }

    /// Classify every entry of a tree, keeping the tree's order
    pub fn classify_tree(&self, ctx: &mut RunContext<'_>, tree: &Tree) -> ClassifiedTree {
        let side = tree.side();
        let vfs = ctx.vfs();

        let entries: Vec<ClassifiedEntry> = tree
            .iter()
            .map(|entry| ClassifiedEntry {
                entry: entry.clone(),
                tag: self.classify(vfs, entry),
            })
            .collect();

        let stats = ctx.side_stats_mut(side);
        for classified in &entries {
            match classified.tag {
                Some(tag) => stats.tags.record(tag),
                None if !classified.entry.is_dir => stats.unclassified += 1,
                None => {}
            }
        }

        debug!(
            "Classified side {}: {} other, {} binary, {} png, {} empty, {} hmac",
            side, stats.tags.other, stats.tags.binary, stats.tags.png, stats.tags.empty, stats.tags.hmac
        );

        ClassifiedTree { side, entries }
    }

    fn sniff(&self, vfs: &dyn Vfs, path: &Path) -> Result<FileTag, VfsError> {
        let reader = vfs.open_file(path)?;

        // Single-byte files are filler, e.g. firmware catalogs
        if vfs.metadata(path)?.size == 1 {
            return Ok(FileTag::Empty);
        }

        let mut head = Vec::with_capacity(SNIFF_LEN);
        reader.take(SNIFF_LEN as u64).read_to_end(&mut head)?;
        Ok(Self::tag_for_prefix(&head))
    }

    /// Tag a file from its leading bytes alone
    pub fn tag_for_prefix(head: &[u8]) -> FileTag {
        if head.starts_with(&PNG_SIGNATURE) {
            FileTag::Png
        } else if head.iter().take(SNIFF_LEN).any(|&b| b == 0) {
            FileTag::Binary
        } else {
            FileTag::Other
        }
    }
}
