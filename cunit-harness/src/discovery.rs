//! Decides which source files have a native test executable to collect.

use crate::testcase::TestFile;
use std::path::Path;

/// Default extension of native test sources.
pub const DEFAULT_SOURCE_EXTENSION: &str = "c";

/// Default file stem prefix of native test sources.
pub const DEFAULT_TEST_PREFIX: &str = "test";

/// Collection hook invoked for each candidate path found during discovery.
#[derive(Clone, Debug)]
pub struct Discoverer {
    extension: String,
    prefix: String,
}

impl Default for Discoverer {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_EXTENSION, DEFAULT_TEST_PREFIX)
    }
}

impl Discoverer {
    /// Creates a discoverer accepting `<prefix>*.<extension>` files.
    ///
    /// # Arguments
    ///
    /// * `extension` - Source extension, with or without a leading dot.
    /// * `prefix` - Required prefix of the file stem.
    pub fn new(extension: impl Into<String>, prefix: impl Into<String>) -> Self {
        let extension = extension.into();
        let extension = extension
            .strip_prefix('.')
            .map_or_else(|| extension.clone(), str::to_owned);

        Self {
            extension,
            prefix: prefix.into(),
        }
    }

    /// The source extension this discoverer accepts, without a leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The file stem prefix this discoverer requires.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns a collection node for `path` if it names a native test source.
    ///
    /// Paths that don't match are not an error; they are simply not tests.
    pub fn consider(&self, path: &Path) -> Option<TestFile> {
        let extension_matches = path
            .extension()
            .is_some_and(|ext| ext.to_str() == Some(self.extension.as_str()));

        let stem_matches = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.starts_with(self.prefix.as_str()));

        if extension_matches && stem_matches {
            tracing::debug!(target: "discover", "collecting {}", path.display());
            Some(TestFile::new(path))
        } else {
            tracing::trace!(target: "discover", "not a test source: {}", path.display());
            None
        }
    }
}
