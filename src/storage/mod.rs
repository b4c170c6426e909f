use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::editor::ExportKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("export produced no bytes")]
    EmptyExport,
    #[error("io error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Writes exported images below one output directory.
#[derive(Debug, Clone)]
pub struct ExportStorage {
    output_dir: PathBuf,
}

impl ExportStorage {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Relative paths resolve against the output directory; without a path the
    /// export's default download name is used.
    pub fn target_path(&self, kind: ExportKind, path: Option<&Path>) -> PathBuf {
        match path {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.output_dir.join(path),
            None => self.output_dir.join(kind.default_file_name()),
        }
    }

    pub fn save_export(
        &self,
        kind: ExportKind,
        path: Option<&Path>,
        bytes: &[u8],
    ) -> StorageResult<PathBuf> {
        if bytes.is_empty() {
            return Err(StorageError::EmptyExport);
        }

        let target = self.target_path(kind, path);
        save_overwrite(&target, bytes)?;
        tracing::info!(path = %target.display(), bytes = bytes.len(), "export written");
        Ok(target)
    }
}

fn save_overwrite(destination: &Path, bytes: &[u8]) -> StorageResult<()> {
    let io_error = |source| StorageError::Io {
        path: destination.to_path_buf(),
        source,
    };

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    fs::write(destination, bytes).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pixgrid-storage-{name}-{}", std::process::id()))
    }

    #[test]
    fn target_path_uses_default_download_names() {
        let storage = ExportStorage::new("/tmp/out");
        assert_eq!(storage.output_dir(), Path::new("/tmp/out"));
        assert_eq!(
            storage.target_path(ExportKind::WithGrid, None),
            PathBuf::from("/tmp/out/pixel-art.png")
        );
        assert_eq!(
            storage.target_path(ExportKind::WithoutGrid, None),
            PathBuf::from("/tmp/out/pixel-art-no-grid.png")
        );
    }

    #[test]
    fn target_path_resolves_relative_and_keeps_absolute() {
        let storage = ExportStorage::new("/tmp/out");
        assert_eq!(
            storage.target_path(ExportKind::WithGrid, Some(Path::new("art/a.png"))),
            PathBuf::from("/tmp/out/art/a.png")
        );
        assert_eq!(
            storage.target_path(ExportKind::WithGrid, Some(Path::new("/srv/b.png"))),
            PathBuf::from("/srv/b.png")
        );
    }

    #[test]
    fn save_export_creates_parent_dirs_and_overwrites() {
        let root = scratch_dir("save");
        let storage = ExportStorage::new(&root);

        let first = storage
            .save_export(ExportKind::WithGrid, Some(Path::new("nested/art.png")), b"one")
            .expect("first export should be written");
        let second = storage
            .save_export(ExportKind::WithGrid, Some(Path::new("nested/art.png")), b"two")
            .expect("second export should overwrite");

        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second).expect("export readable"), b"two");

        std::fs::remove_dir_all(&root).expect("scratch dir should be removable");
    }

    #[test]
    fn empty_export_is_rejected() {
        let storage = ExportStorage::new(scratch_dir("empty"));
        let err = storage
            .save_export(ExportKind::WithoutGrid, None, &[])
            .expect_err("empty bytes should fail");
        assert!(matches!(err, StorageError::EmptyExport));
    }
}
