//! [`TestDocs`]: a scratch directory for schema and document files

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temporary directory that test documents are written into.
///
/// # Example
///
/// ```rust
/// use febe_test_utils::TestDocs;
///
/// let docs = TestDocs::new();
/// let path = docs.write_json("doc.json", &serde_json::json!({"spec": []}));
/// assert!(path.exists());
/// ```
pub struct TestDocs {
    temp_dir: TempDir,
}

impl Default for TestDocs {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDocs {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write raw text to `name`, creating parent directories.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a value as pretty JSON.
    pub fn write_json(&self, name: &str, value: &Value) -> PathBuf {
        self.write(name, &serde_json::to_string_pretty(value).unwrap())
    }

    /// Read a file back as text
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root().join(name)).unwrap()
    }
}
