use crate::RdCompareError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Hard upper bound on the number of entries held by one tree
pub const MAX_TREE_ENTRIES: usize = 128;

/// Default upper bound on the byte length of an enumerated path
pub const MAX_PATH_LEN: usize = 256;

/// Number of leading bytes inspected when sniffing file content
pub const SNIFF_LEN: usize = 16;

/// PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Any path containing this marker is treated as an HMAC companion file
pub const HMAC_MARKER: &str = ".hmac";

pub const DEFAULT_DIFF_TOOL: &str = "diff";
pub const DEFAULT_COLOR_DIFF_TOOL: &str = "colordiff";
pub const DEFAULT_DIFF_OPTIONS: &str = "-ay --suppress-common-lines";

/// Which of the two compared trees an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// Filesystem type of an entry, as reported without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    /// Devices, sockets, fifos
    Other,
}

impl EntryKind {
    /// Only directories and regular files take part in a comparison
    pub fn is_tracked(self) -> bool {
        matches!(self, EntryKind::Directory | EntryKind::File)
    }
}

/// A directory listing entry returned by a [`crate::Vfs`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
    pub kind: EntryKind,
}

/// Metadata for a file or directory
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FileMetadata {
    pub size: u64,
    pub kind: EntryKind,
}

/// A directory or regular file kept in a [`Tree`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Ordered, capacity-bounded collection of entries discovered under one root.
///
/// Insertion order is discovery order. The capacity never exceeds
/// [`MAX_TREE_ENTRIES`].
#[derive(Debug, Clone)]
pub struct Tree {
    side: Side,
    root: PathBuf,
    capacity: usize,
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(side: Side, root: impl Into<PathBuf>) -> Self {
        Self::with_capacity(side, root, MAX_TREE_ENTRIES)
    }

    /// Capacity is clamped to `1..=MAX_TREE_ENTRIES`
    pub fn with_capacity(side: Side, root: impl Into<PathBuf>, capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_TREE_ENTRIES);
        Self {
            side,
            root: root.into(),
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Append an entry. Returns `false` and drops the entry when the tree is full.
    pub fn push(&mut self, entry: TreeEntry) -> bool {
        if self.is_full() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn get(&self, index: usize) -> Option<&TreeEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TreeEntry> {
        self.entries.iter()
    }
}

/// Coarse content classification of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileTag {
    /// Path contains `.hmac`
    Hmac,
    /// Exactly one byte long
    Empty,
    /// Starts with the PNG signature
    Png,
    /// NUL byte within the sniffed prefix
    Binary,
    /// Anything else; the only tag eligible for diffing
    Other,
}

impl fmt::Display for FileTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileTag::Hmac => "HMAC",
            FileTag::Empty => "Empty",
            FileTag::Png => "PNG",
            FileTag::Binary => "Binary",
            FileTag::Other => "Other",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEntry {
    pub entry: TreeEntry,
    pub tag: Option<FileTag>,
}

impl ClassifiedEntry {
    /// Regular file tagged exactly `Other`
    pub fn is_comparable(&self) -> bool {
        !self.entry.is_dir && self.tag == Some(FileTag::Other)
    }
}

/// A tree whose entries carry their classification, index-aligned with the [`Tree`]
#[derive(Debug, Clone)]
pub struct ClassifiedTree {
    pub side: Side,
    pub entries: Vec<ClassifiedEntry>,
}

impl ClassifiedTree {
    pub fn get(&self, index: usize) -> Option<&ClassifiedEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Two files associated by their position in the two trees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub index: usize,
    /// Side-A candidate at `index`, absent when side A has no comparable file there
    pub left: Option<PathBuf>,
    pub right: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCounts {
    pub hmac: usize,
    pub empty: usize,
    pub png: usize,
    pub binary: usize,
    pub other: usize,
}

impl TagCounts {
    pub fn record(&mut self, tag: FileTag) {
        match tag {
            FileTag::Hmac => self.hmac += 1,
            FileTag::Empty => self.empty += 1,
            FileTag::Png => self.png += 1,
            FileTag::Binary => self.binary += 1,
            FileTag::Other => self.other += 1,
        }
    }
}

/// Per-tree counters for everything skipped or classified during a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideStats {
    pub entries: usize,
    /// Symlinks, devices, sockets, fifos and entries whose type could not be read
    pub special_skipped: usize,
    pub capacity_dropped: usize,
    pub unreadable_dirs: usize,
    /// Files that could not be opened or read
    pub unclassified: usize,
    pub tags: TagCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub side_a: SideStats,
    pub side_b: SideStats,
    pub pairs: usize,
    /// Pairs emitted without a side-A candidate at the same index
    pub unmatched: usize,
    pub diffs_invoked: usize,
}

impl RunStats {
    pub fn side(&self, side: Side) -> &SideStats {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideStats {
        match side {
            Side::A => &mut self.side_a,
            Side::B => &mut self.side_b,
        }
    }
}

/// Outcome of a comparison run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub pairs: Vec<MatchPair>,
    pub stats: RunStats,
}

/// What to do when a tree reaches its capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Drop further entries, counting and logging them
    #[default]
    Truncate,
    /// Abort enumeration with a capacity error
    Error,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Diff program used by default
    pub diff_tool: String,

    /// Diff program used when colour output is requested
    pub color_diff_tool: String,

    /// Options passed to the diff program before the two paths
    pub diff_options: String,

    /// Tree capacity, at most [`MAX_TREE_ENTRIES`]
    pub max_entries: usize,

    /// Longest accepted path in bytes
    pub max_path_len: usize,

    pub overflow: OverflowPolicy,

    /// Sort each directory listing by name instead of using raw listing order
    pub sort_entries: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            diff_tool: DEFAULT_DIFF_TOOL.to_string(),
            color_diff_tool: DEFAULT_COLOR_DIFF_TOOL.to_string(),
            diff_options: DEFAULT_DIFF_OPTIONS.to_string(),
            max_entries: MAX_TREE_ENTRIES,
            max_path_len: MAX_PATH_LEN,
            overflow: OverflowPolicy::Truncate,
            sort_entries: false,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), RdCompareError> {
        if self.max_entries == 0 || self.max_entries > MAX_TREE_ENTRIES {
            return Err(RdCompareError::Config(format!(
                "max_entries must be between 1 and {}, got {}",
                MAX_TREE_ENTRIES, self.max_entries
            )));
        }
        if self.max_path_len == 0 {
            return Err(RdCompareError::Config(
                "max_path_len must be greater than 0".to_string(),
            ));
        }
        if self.diff_tool.trim().is_empty() {
            return Err(RdCompareError::Config("diff_tool must not be empty".to_string()));
        }
        if self.color_diff_tool.trim().is_empty() {
            return Err(RdCompareError::Config(
                "color_diff_tool must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The diff program to run, honouring the colour flag
    pub fn diff_program(&self, color: bool) -> &str {
        if color {
            &self.color_diff_tool
        } else {
            &self.diff_tool
        }
    }
}
