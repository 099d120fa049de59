use std::path::{Path, PathBuf};

/// Handle to the `public` visibility namespace of the file store.
///
/// Paths handed to [`PublicStorage::exists`] are relative, already stripped of
/// any `storage/` prefix. Anything that tries to climb out of the root is
/// treated as missing.
#[derive(Clone)]
pub struct PublicStorage {
    root: PathBuf,
}

impl PublicStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn exists(&self, relative_path: &str) -> bool {
        if relative_path.is_empty() || !is_safe_relative(relative_path) {
            return false;
        }
        let full = self.root.join(relative_path);
        tokio::fs::try_exists(&full).await.unwrap_or(false)
    }
}

fn is_safe_relative(path: &str) -> bool {
    let path = Path::new(path);
    !path.is_absolute()
        && path
            .components()
            .all(|c| matches!(c, std::path::Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("photos")).unwrap();
        std::fs::write(dir.path().join("photos/1.jpg"), b"jpg").unwrap();

        let storage = PublicStorage::new(dir.path());
        assert!(storage.exists("photos/1.jpg").await);
        assert!(!storage.exists("photos/2.jpg").await);
    }

    #[tokio::test]
    async fn rejects_traversal_and_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let storage = PublicStorage::new(dir.path());
        assert!(!storage.exists("../etc/passwd").await);
        assert!(!storage.exists("/etc/passwd").await);
        assert!(!storage.exists("").await);
    }
}
