//! Skip-pattern matching for package and project scans
//!
//! Patterns come from [`InspectConfig::skip_patterns`](crate::config::InspectConfig).
//! Three shapes are supported:
//! - bare names (`target`, `.git`): match any path component exactly
//! - directory patterns (`generated/`): same as a bare name
//! - glob patterns (`*.min.js`, `docs/**`): matched against the whole
//!   root-relative path and against the file name
use glob::Pattern;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct SkipMatcher {
    names: Vec<String>,
    globs: Vec<Pattern>,
}

impl SkipMatcher {
    pub fn new(patterns: &[String]) -> Self {
        let mut matcher = SkipMatcher::default();

        for raw in patterns {
            let pattern = raw.trim().trim_end_matches('/');
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }

            if pattern.contains(['*', '?', '[']) {
                match Pattern::new(pattern) {
                    Ok(compiled) => matcher.globs.push(compiled),
                    Err(e) => warn!("Ignoring invalid skip pattern '{}': {}", raw, e),
                }
            } else {
                matcher.names.push(pattern.to_string());
            }
        }

        matcher
    }

    /// Check a root-relative unix-style path
    pub fn is_skipped(&self, relative_path: &str) -> bool {
        let path = relative_path.trim_start_matches("./");
        if path.is_empty() {
            return false;
        }

        if !self.names.is_empty()
            && path
                .split('/')
                .any(|component| self.names.iter().any(|name| name == component))
        {
            return true;
        }

        if self.names.iter().any(|name| name.contains('/') && path.starts_with(name.as_str())) {
            return true;
        }

        let file_name = path.rsplit('/').next().unwrap_or(path);
        self.globs
            .iter()
            .any(|glob| glob.matches(path) || glob.matches(file_name))
    }

    /// Hidden entries (dot files and dot directories) are never scanned
    pub fn is_hidden(name: &str) -> bool {
        name.starts_with('.') && name != "." && name != ".."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(patterns: &[&str]) -> SkipMatcher {
        let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        SkipMatcher::new(&owned)
    }

    #[test]
    fn test_bare_name_matches_component() {
        let m = matcher(&["target", "generated/"]);
        assert!(m.is_skipped("target"));
        assert!(m.is_skipped("crates/core/target/debug/build.rs"));
        assert!(m.is_skipped("api/generated/schema.go"));
        assert!(
            !m.is_skipped("my-target/lib.rs"),
            "Component match must respect word boundaries"
        );
    }

    #[test]
    fn test_glob_matches_path_and_file_name() {
        let m = matcher(&["*.min.js", "docs/**"]);
        assert!(m.is_skipped("web/static/app.min.js"));
        assert!(m.is_skipped("docs/guide/intro.md"));
        assert!(!m.is_skipped("web/static/app.js"));
    }

    #[test]
    fn test_comments_and_invalid_patterns_are_ignored() {
        let m = matcher(&["# comment", "", "[unclosed"]);
        assert!(!m.is_skipped("src/main.go"));
    }

    #[test]
    fn test_hidden_names() {
        assert!(SkipMatcher::is_hidden(".git"));
        assert!(SkipMatcher::is_hidden(".env"));
        assert!(!SkipMatcher::is_hidden("src"));
        assert!(!SkipMatcher::is_hidden("."));
    }
}
