//! On-disk sample store
//!
//! Samples are categorized by directory and filename prefix. Numbering for a
//! prefix always continues from the count of files already present, so
//! repeated runs append rather than clobber.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Sample category, mapped to a subdirectory of the store root
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleCategory {
    /// Clips containing the wake word
    Positive,
    /// Clips that must not trigger the wake word
    Negative,
}

impl SampleCategory {
    /// Subdirectory name for this category
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for SampleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Root of the sample directory tree (`samples/{positive,negative}`)
#[derive(Clone, Debug)]
pub struct SampleStore {
    root: PathBuf,
}

impl SampleStore {
    /// Create a store rooted at `root`; no directories are created yet
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for a category
    #[must_use]
    pub fn category_dir(&self, category: SampleCategory) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Create the category directory if absent and return its path
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created
    pub fn ensure_dir(&self, category: SampleCategory) -> Result<PathBuf> {
        let dir = self.category_dir(category);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Count existing `{prefix}_*.wav` files in a category
    ///
    /// A missing directory counts as zero.
    ///
    /// # Errors
    ///
    /// Returns error if the directory exists but cannot be read
    pub fn count_existing(&self, category: SampleCategory, prefix: &str) -> Result<usize> {
        let dir = self.category_dir(category);
        if !dir.exists() {
            return Ok(0);
        }

        let marker = format!("{prefix}_");
        let mut count = 0;
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(&marker) && name.ends_with(".wav") {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Count all `.wav` files in a category, regardless of prefix
    ///
    /// # Errors
    ///
    /// Returns error if the directory exists but cannot be read
    pub fn count_wavs(&self, category: SampleCategory) -> Result<usize> {
        let dir = self.category_dir(category);
        if !dir.exists() {
            return Ok(0);
        }

        let mut count = 0;
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.path().extension().is_some_and(|e| e == "wav") {
                count += 1;
            }
        }
        Ok(count)
    }

    /// All `.wav` paths in a category, sorted by filename
    ///
    /// # Errors
    ///
    /// Returns error if the directory exists but cannot be read
    pub fn wav_paths(&self, category: SampleCategory) -> Result<Vec<PathBuf>> {
        let dir = self.category_dir(category);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "wav") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Path for sample `index` of a prefix, e.g. `positive/mic_0007.wav`
    #[must_use]
    pub fn sample_path(&self, category: SampleCategory, prefix: &str, index: usize) -> PathBuf {
        self.category_dir(category)
            .join(format!("{prefix}_{index:04}.wav"))
    }

    /// Path for a tagged sample, e.g. `positive/synthetic_0003_Karen_180.wav`
    #[must_use]
    pub fn tagged_sample_path(
        &self,
        category: SampleCategory,
        prefix: &str,
        index: usize,
        tag: &str,
    ) -> PathBuf {
        self.category_dir(category)
            .join(format!("{prefix}_{index:04}_{tag}.wav"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn count_existing_missing_dir_is_zero() {
        let store = SampleStore::new("/nonexistent/wakeforge-test");
        assert_eq!(
            store.count_existing(SampleCategory::Positive, "mic").unwrap(),
            0
        );
    }

    #[test]
    fn count_existing_filters_by_prefix_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = SampleStore::new(dir.path());
        let positive = store.ensure_dir(SampleCategory::Positive).unwrap();

        touch(&positive.join("mic_0000.wav"));
        touch(&positive.join("mic_0001.wav"));
        touch(&positive.join("real_0000.wav"));
        touch(&positive.join("mic_0002.txt"));

        assert_eq!(
            store.count_existing(SampleCategory::Positive, "mic").unwrap(),
            2
        );
        assert_eq!(
            store.count_existing(SampleCategory::Positive, "real").unwrap(),
            1
        );
    }

    #[test]
    fn count_wavs_spans_prefixes() {
        let dir = tempfile::tempdir().unwrap();
        let store = SampleStore::new(dir.path());
        let negative = store.ensure_dir(SampleCategory::Negative).unwrap();

        touch(&negative.join("negative_0000.wav"));
        touch(&negative.join("mic_0000.wav"));
        touch(&negative.join("notes.md"));

        assert_eq!(store.count_wavs(SampleCategory::Negative).unwrap(), 2);
    }

    #[test]
    fn sample_paths_are_zero_padded() {
        let store = SampleStore::new("samples");
        let path = store.sample_path(SampleCategory::Positive, "real", 7);
        assert!(path.ends_with("positive/real_0007.wav"));

        let tagged = store.tagged_sample_path(SampleCategory::Positive, "synthetic", 12, "Karen_180");
        assert!(tagged.ends_with("positive/synthetic_0012_Karen_180.wav"));
    }

    #[test]
    fn numbering_continues_from_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = SampleStore::new(dir.path());
        let positive = store.ensure_dir(SampleCategory::Positive).unwrap();

        for i in 0..3 {
            touch(&positive.join(format!("real_{i:04}.wav")));
        }

        let next = store.count_existing(SampleCategory::Positive, "real").unwrap();
        assert_eq!(next, 3);

        let path = store.sample_path(SampleCategory::Positive, "real", next);
        assert!(!path.exists());
        assert!(path.ends_with("positive/real_0003.wav"));
    }
}
