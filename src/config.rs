//! Inspection configuration

use crate::utils::ignore::SkipMatcher;

/// Directories that never hold project sources worth extracting
pub const DEFAULT_SKIP_PATTERNS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "target",
    "node_modules",
    "vendor",
    "__pycache__",
    ".venv",
];

/// Controls how front-ends walk packages and projects
#[derive(Debug, Clone)]
pub struct InspectConfig {
    /// Parse test sources (`_test.go`, `test_*.py`, ...)
    pub include_tests: bool,
    /// Glob patterns matched against root-relative unix-style paths
    pub skip_patterns: Vec<String>,
    /// Capture non-source files below a package directory as assets
    pub collect_assets: bool,
    /// Extract the files of one package on the rayon pool
    pub parallel: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            include_tests: false,
            skip_patterns: DEFAULT_SKIP_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            collect_assets: true,
            parallel: true,
        }
    }
}

impl InspectConfig {
    pub fn with_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    pub fn with_assets(mut self, collect: bool) -> Self {
        self.collect_assets = collect;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Add a skip pattern on top of the defaults
    pub fn skip(mut self, pattern: impl Into<String>) -> Self {
        self.skip_patterns.push(pattern.into());
        self
    }

    pub fn skip_matcher(&self) -> SkipMatcher {
        SkipMatcher::new(&self.skip_patterns)
    }
}
