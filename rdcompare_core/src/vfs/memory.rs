//! In-memory VFS used by the unit tests.
//!
//! Children are listed in insertion order, and individual paths can be made
//! to fail on `read_dir` or `open_file`.

use rdcompare_common::{EntryKind, FileEntry, FileMetadata, Vfs, VfsError};
use std::collections::HashSet;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
struct Node {
    path: PathBuf,
    kind: EntryKind,
    content: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MemoryVfs {
    nodes: Vec<Node>,
    unreadable_dirs: HashSet<PathBuf>,
    unopenable_files: HashSet<PathBuf>,
}

impl MemoryVfs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, path: &str) -> Self {
        self.push(path, EntryKind::Directory, Vec::new());
        self
    }

    pub fn file(mut self, path: &str, content: &[u8]) -> Self {
        self.push(path, EntryKind::File, content.to_vec());
        self
    }

    pub fn special(mut self, path: &str, kind: EntryKind) -> Self {
        self.push(path, kind, Vec::new());
        self
    }

    pub fn unreadable(mut self, path: &str) -> Self {
        self.unreadable_dirs.insert(PathBuf::from(path));
        self
    }

    pub fn unopenable(mut self, path: &str) -> Self {
        self.unopenable_files.insert(PathBuf::from(path));
        self
    }

    fn push(&mut self, path: &str, kind: EntryKind, content: Vec<u8>) {
        self.nodes.push(Node {
            path: PathBuf::from(path),
            kind,
            content,
        });
    }

    fn find(&self, path: &Path) -> Option<&Node> {
        self.nodes.iter().find(|node| node.path == path)
    }
}

impl Vfs for MemoryVfs {
    fn instance_id(&self) -> &str {
        "memory"
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata, VfsError> {
        self.symlink_metadata(path)
    }

    fn symlink_metadata(&self, path: &Path) -> Result<FileMetadata, VfsError> {
        let node = self
            .find(path)
            .ok_or_else(|| VfsError::NotFound(path.display().to_string()))?;
        Ok(FileMetadata {
            size: node.content.len() as u64,
            kind: node.kind,
        })
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FileEntry>, VfsError> {
        let node = self
            .find(path)
            .ok_or_else(|| VfsError::NotFound(path.display().to_string()))?;
        if node.kind != EntryKind::Directory {
            return Err(VfsError::NotADirectory(path.display().to_string()));
        }
        if self.unreadable_dirs.contains(path) {
            return Err(VfsError::PermissionDenied(path.display().to_string()));
        }

        Ok(self
            .nodes
            .iter()
            .filter(|node| node.path.parent() == Some(path))
            .map(|node| FileEntry {
                path: node.path.clone(),
                size: node.content.len() as u64,
                kind: node.kind,
            })
            .collect())
    }

    fn open_file(&self, path: &Path) -> Result<Box<dyn Read + Send>, VfsError> {
        let node = self
            .find(path)
            .ok_or_else(|| VfsError::NotFound(path.display().to_string()))?;
        if node.kind == EntryKind::Directory {
            return Err(VfsError::NotAFile(path.display().to_string()));
        }
        if self.unopenable_files.contains(path) {
            return Err(VfsError::PermissionDenied(path.display().to_string()));
        }
        Ok(Box::new(Cursor::new(node.content.clone())))
    }
}
