use std::path::PathBuf;

use tempfile::TempDir;

use crate::core::LabeledSpan;

/// Isolated directory holding extraction files and a store.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            data_path,
        }
    }

    /// Create a test file with content.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write `<stem>.txt` and `<stem>.spans.json`, returning both paths.
    #[must_use]
    pub fn create_extraction(
        &self,
        stem: &str,
        text: &str,
        spans: &[LabeledSpan],
    ) -> (PathBuf, PathBuf) {
        let pairs: Vec<[&str; 2]> = spans
            .iter()
            .map(|span| [span.label.as_str(), span.text.as_str()])
            .collect();
        let json = serde_json::to_string(&pairs).expect("Failed to encode spans");
        (
            self.create_file(&format!("{stem}.txt"), text),
            self.create_file(&format!("{stem}.spans.json"), &json),
        )
    }

    /// Path of the store file inside the fixture.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_path.join("records.csv")
    }
}
