use crate::{EntryKind, FileEntry, FileMetadata, VfsError};
use std::io::Read;
use std::path::Path;

/// Virtual File System trait for abstracting filesystem operations
///
/// The comparison core only ever reads through this trait, which lets tests
/// substitute an in-memory tree with a fixed listing order and injected
/// failures.
pub trait Vfs: Send + Sync {
    /// Uniquely identifies the VFS instance (e.g., "local")
    fn instance_id(&self) -> &str;

    /// Returns the metadata for a path, following symlinks
    fn metadata(&self, path: &Path) -> Result<FileMetadata, VfsError>;

    /// Returns the metadata for a path without following symlinks
    fn symlink_metadata(&self, path: &Path) -> Result<FileMetadata, VfsError>;

    /// Lists the direct children of a directory in listing order.
    ///
    /// Each returned `path` is `dir` joined with the child name. Entries whose
    /// type cannot be determined are reported with [`EntryKind::Other`].
    fn read_dir(&self, path: &Path) -> Result<Vec<FileEntry>, VfsError>;

    /// Opens a file for reading
    fn open_file(&self, path: &Path) -> Result<Box<dyn Read + Send>, VfsError>;

    /// Checks if a path exists
    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }

    /// Checks if a path resolves to a directory
    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path)
            .map(|meta| meta.kind == EntryKind::Directory)
            .unwrap_or(false)
    }
}
