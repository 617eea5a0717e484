use thiserror::Error;

#[derive(Error, Debug)]
pub enum RdCompareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("VFS error: {0}")]
    Vfs(#[from] VfsError),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Path exceeds {limit} bytes: {path}")]
    PathTooLong { path: String, limit: usize },

    #[error("Tree capacity of {capacity} entries exceeded while adding {path}")]
    CapacityExceeded { path: String, capacity: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Failed to run diff tool '{tool}': {source}")]
    DiffInvocation {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RdCompareError>;

#[derive(Error, Debug)]
pub enum VfsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),
}

impl VfsError {
    /// Map an IO error on `path` to the most specific variant
    pub fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => VfsError::NotFound(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => {
                VfsError::PermissionDenied(path.display().to_string())
            }
            _ => VfsError::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_vfs_error_from_io_not_found() {
        let err = VfsError::from_io(io::Error::from(io::ErrorKind::NotFound), Path::new("/a/b"));
        assert!(matches!(err, VfsError::NotFound(ref p) if p == "/a/b"));
    }

    #[test]
    fn test_vfs_error_from_io_permission_denied() {
        let err = VfsError::from_io(
            io::Error::from(io::ErrorKind::PermissionDenied),
            Path::new("/root/secret"),
        );
        assert!(matches!(err, VfsError::PermissionDenied(_)));
    }

    #[test]
    fn test_path_too_long_message() {
        let err = RdCompareError::PathTooLong {
            path: "/x".to_string(),
            limit: 256,
        };
        assert_eq!(err.to_string(), "Path exceeds 256 bytes: /x");
    }
}
