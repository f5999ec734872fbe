use crate::model::Record;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive until the test is done
    _temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// Twelve blog posts: seven `tech`, five `life`.
pub fn blog_posts() -> Vec<Record> {
    let authors = ["ann", "bob", "cy"];
    (1..=12)
        .map(|i| {
            let category = if i <= 7 { "tech" } else { "life" };
            let tags: &[&str] = match i % 3 {
                0 => &["rust"],
                1 => &["rust", "cli"],
                _ => &["travel"],
            };
            Record::new(format!("post-{}", i))
                .with_text("title", format!("Post {}", i))
                .with_text("content", format!("Body of post {} about {}", i, category))
                .with_text("category", category)
                .with_text("author", authors[i % 3])
                .with_list("tags", tags.iter().copied())
        })
        .collect()
}
