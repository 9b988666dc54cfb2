//! Template store reading a directory of template files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use restdocs_application::ports::{FileSystem, FileSystemError, Template, TemplateError, TemplateStore};
use tokio::sync::OnceCell;

/// Loads templates from a directory.
///
/// Each file is one template: the file stem is the snippet name and the file
/// extension is the extension of the rendered snippet, so
/// `http-request.adoc` renders `http-request` into `.adoc` files.
/// Subdirectories and dotfiles such as `.gitkeep` are ignored.
pub struct FileTemplateStore<F: FileSystem> {
    fs: F,
    dir: PathBuf,
    templates: OnceCell<HashMap<String, Template>>,
}

impl<F: FileSystem> FileTemplateStore<F> {
    /// Creates a store over `dir`. Nothing is read until [`TemplateStore::load`].
    pub fn new(fs: F, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
            templates: OnceCell::new(),
        }
    }

    /// Returns the template directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_all(&self) -> Result<HashMap<String, Template>, TemplateError> {
        if !self.fs.is_dir(&self.dir).await {
            return Err(FileSystemError::NotADirectory(self.dir.clone()).into());
        }

        let mut templates = HashMap::new();
        for path in self.fs.read_dir(&self.dir).await? {
            if is_hidden(&path) || self.fs.is_dir(&path).await {
                continue;
            }
            let (name, extension) = split_template_name(&path)?;
            let content = self.fs.read_file_string(&path).await?;
            templates.insert(name, Template::new(extension, content));
        }

        tracing::debug!(dir = %self.dir.display(), count = templates.len(), "templates loaded");
        Ok(templates)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn split_template_name(path: &Path) -> Result<(String, String), TemplateError> {
    let stem = path.file_stem().and_then(|s| s.to_str());
    let extension = path.extension().and_then(|e| e.to_str());
    match (stem, extension) {
        (Some(stem), Some(ext)) if !stem.is_empty() && !ext.is_empty() => {
            Ok((stem.to_string(), ext.to_string()))
        }
        _ => Err(TemplateError::InvalidTemplate(path.to_path_buf())),
    }
}

impl<F: FileSystem> TemplateStore for FileTemplateStore<F> {
    async fn load(&self) -> Result<(), TemplateError> {
        self.templates.get_or_try_init(|| self.read_all()).await?;
        Ok(())
    }

    fn get(&self, name: &str) -> Result<&Template, TemplateError> {
        self.templates
            .get()
            .ok_or(TemplateError::NotLoaded)?
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use pretty_assertions::assert_eq;

    /// In-memory file system counting directory listings.
    #[derive(Default)]
    struct MockFileSystem {
        files: Mutex<HashMap<PathBuf, String>>,
        listings: AtomicUsize,
    }

    impl MockFileSystem {
        fn with_file(self, path: &str, content: &str) -> Self {
            self.files
                .lock()
                .expect("lock")
                .insert(PathBuf::from(path), content.to_string());
            self
        }
    }

    impl FileSystem for MockFileSystem {
        async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
            self.files
                .lock()
                .expect("lock")
                .get(path)
                .cloned()
                .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))
        }

        async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
            self.files.lock().expect("lock").insert(
                path.to_path_buf(),
                String::from_utf8_lossy(contents).into_owned(),
            );
            Ok(())
        }

        async fn create_dir_all(&self, _path: &Path) -> Result<(), FileSystemError> {
            Ok(())
        }

        async fn is_dir(&self, path: &Path) -> bool {
            let files = self.files.lock().expect("lock");
            files.keys().any(|f| f.starts_with(path) && f != path)
        }

        async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError> {
            self.listings.fetch_add(1, Ordering::SeqCst);
            let files = self.files.lock().expect("lock");
            let mut entries: Vec<PathBuf> = files
                .keys()
                .filter(|f| f.parent() == Some(path))
                .cloned()
                .collect();
            entries.sort();
            Ok(entries)
        }
    }

    #[tokio::test]
    async fn test_load_maps_stem_and_extension() {
        let fs = MockFileSystem::default()
            .with_file("tpl/http-request.adoc", "[source,http]\n")
            .with_file("tpl/response-body.md", "```json\n");
        let store = FileTemplateStore::new(fs, "tpl");

        store.load().await.expect("load");

        assert_eq!(
            store.get("http-request").expect("template"),
            &Template::new("adoc", "[source,http]\n")
        );
        assert_eq!(store.get("response-body").expect("template").extension, "md");
    }

    #[tokio::test]
    async fn test_get_before_load_fails() {
        let store = FileTemplateStore::new(MockFileSystem::default(), "tpl");
        assert!(matches!(store.get("http-request"), Err(TemplateError::NotLoaded)));
    }

    #[tokio::test]
    async fn test_unknown_template_is_not_found() {
        let fs = MockFileSystem::default().with_file("tpl/curl-request.adoc", "$ curl\n");
        let store = FileTemplateStore::new(fs, "tpl");
        store.load().await.expect("load");

        assert!(matches!(store.get("http-response"), Err(TemplateError::NotFound(name)) if name == "http-response"));
    }

    #[tokio::test]
    async fn test_load_runs_once() {
        let fs = MockFileSystem::default().with_file("tpl/curl-request.adoc", "$ curl\n");
        let store = FileTemplateStore::new(fs, "tpl");

        store.load().await.expect("load");
        store.load().await.expect("load");

        assert_eq!(store.fs.listings.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_directory_fails() {
        let store = FileTemplateStore::new(MockFileSystem::default(), "nowhere");
        let result = store.load().await;
        assert!(matches!(
            result,
            Err(TemplateError::FileSystem(FileSystemError::NotADirectory(_)))
        ));
    }

    #[tokio::test]
    async fn test_dotfiles_are_skipped() {
        let fs = MockFileSystem::default()
            .with_file("tpl/.gitkeep", "")
            .with_file("tpl/.DS_Store", "binary")
            .with_file("tpl/curl-request.adoc", "$ curl\n");
        let store = FileTemplateStore::new(fs, "tpl");

        store.load().await.expect("load");

        assert_eq!(store.get("curl-request").expect("template").extension, "adoc");
        assert!(matches!(store.get(".gitkeep"), Err(TemplateError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_file_without_extension_is_invalid() {
        let fs = MockFileSystem::default().with_file("tpl/README", "notes");
        let store = FileTemplateStore::new(fs, "tpl");
        assert!(matches!(store.load().await, Err(TemplateError::InvalidTemplate(_))));
    }
}
