pub mod exec;
pub mod filter;
pub mod json;
pub mod paths;
pub mod temp;

use crate::errors::{VodError, VodResult};
use std::io::ErrorKind;
use std::path::Path;

/// Create `path` and any missing ancestors. An existing directory is success.
pub async fn ensure_dir_exists(path: &Path) -> VodResult<()> {
    match tokio::fs::create_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(source) => Err(VodError::CreateDir { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_dir_twice_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b").join("c");
        ensure_dir_exists(&dir).await.unwrap();
        ensure_dir_exists(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn ensure_dir_over_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("f");
        std::fs::write(&file, b"x").unwrap();
        let err = ensure_dir_exists(&file).await.unwrap_err();
        assert_eq!(err.code(), "CreateDir");
    }
}
