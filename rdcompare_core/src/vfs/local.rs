use rdcompare_common::{EntryKind, FileEntry, FileMetadata, Vfs, VfsError};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Local filesystem VFS implementation.
///
/// Paths are used exactly as given; relative paths resolve against the
/// current working directory.
#[derive(Debug)]
pub struct LocalVfs {
    instance_id: String,
}

impl LocalVfs {
    pub fn new() -> Self {
        Self {
            instance_id: "local".to_string(),
        }
    }
}

impl Default for LocalVfs {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

fn to_metadata(meta: &fs::Metadata) -> FileMetadata {
    FileMetadata {
        size: meta.len(),
        kind: kind_of(meta.file_type()),
    }
}

impl Vfs for LocalVfs {
    fn instance_id(&self) -> &str {
        &self.instance_id
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata, VfsError> {
        let meta = fs::metadata(path).map_err(|e| VfsError::from_io(e, path))?;
        Ok(to_metadata(&meta))
    }

    fn symlink_metadata(&self, path: &Path) -> Result<FileMetadata, VfsError> {
        let meta = fs::symlink_metadata(path).map_err(|e| VfsError::from_io(e, path))?;
        Ok(to_metadata(&meta))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FileEntry>, VfsError> {
        if !path.is_dir() {
            return Err(VfsError::NotADirectory(path.display().to_string()));
        }

        // std never yields "." or ".."
        let entries = fs::read_dir(path)
            .map_err(|e| VfsError::from_io(e, path))?
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let (kind, size) = match entry.metadata() {
                    Ok(meta) => (kind_of(meta.file_type()), meta.len()),
                    Err(_) => (EntryKind::Other, 0),
                };

                Some(FileEntry {
                    path: path.join(entry.file_name()),
                    size,
                    kind,
                })
            })
            .collect();

        Ok(entries)
    }

    fn open_file(&self, path: &Path) -> Result<Box<dyn Read + Send>, VfsError> {
        if path.is_dir() {
            return Err(VfsError::NotAFile(path.display().to_string()));
        }

        let file = fs::File::open(path).map_err(|e| VfsError::from_io(e, path))?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_local_vfs_metadata() {
        let temp = TempDir::new().unwrap();
        let test_file = temp.path().join("test.txt");
        fs::write(&test_file, b"hello").unwrap();

        let vfs = LocalVfs::new();
        let meta = vfs.metadata(&test_file).unwrap();

        assert_eq!(meta.size, 5);
        assert_eq!(meta.kind, EntryKind::File);
        assert_eq!(vfs.instance_id(), "local");
    }

    #[test]
    fn test_local_vfs_read_dir_joins_parent() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("file1.txt"), b"a").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let vfs = LocalVfs::new();
        let mut entries = vfs.read_dir(temp.path()).unwrap();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, temp.path().join("file1.txt"));
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].size, 1);
        assert_eq!(entries[1].path, temp.path().join("sub"));
        assert_eq!(entries[1].kind, EntryKind::Directory);
    }

    #[test]
    fn test_local_vfs_read_dir_on_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();

        let vfs = LocalVfs::new();
        assert!(matches!(vfs.read_dir(&file), Err(VfsError::NotADirectory(_))));
    }

    #[test]
    fn test_local_vfs_open_file_on_directory() {
        let temp = TempDir::new().unwrap();
        let vfs = LocalVfs::new();
        assert!(matches!(vfs.open_file(temp.path()), Err(VfsError::NotAFile(_))));
    }

    #[test]
    fn test_local_vfs_open_file_not_found() {
        let temp = TempDir::new().unwrap();
        let vfs = LocalVfs::new();
        let result = vfs.open_file(&temp.path().join("missing.bin"));
        assert!(matches!(result, Err(VfsError::NotFound(_))));
    }

    #[test]
    fn test_local_vfs_is_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("f"), b"x").unwrap();

        let vfs = LocalVfs::new();
        assert!(vfs.is_dir(temp.path()));
        assert!(!vfs.is_dir(&temp.path().join("f")));
        assert!(!vfs.is_dir(&temp.path().join("nope")));
    }

    #[cfg(unix)]
    #[test]
    fn test_local_vfs_reports_symlinks() {
        use std::os::unix::fs as unix_fs;

        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target.txt");
        fs::write(&target, b"content").unwrap();
        let link = temp.path().join("link.txt");
        unix_fs::symlink(&target, &link).unwrap();

        let vfs = LocalVfs::new();
        assert_eq!(vfs.symlink_metadata(&link).unwrap().kind, EntryKind::Symlink);
        assert_eq!(vfs.metadata(&link).unwrap().kind, EntryKind::File);

        let entries = vfs.read_dir(temp.path()).unwrap();
        let link_entry = entries.iter().find(|e| e.path == link).unwrap();
        assert_eq!(link_entry.kind, EntryKind::Symlink);
    }
}
