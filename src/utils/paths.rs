// Path conversion utilities
//
// Graph entities store project-root-relative paths with `/` separators so the
// same graph can be stored under any destination root on any platform.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Convert a path to a root-relative Unix-style path
///
/// Falls back to the path itself (separators normalized) when it is not
/// below `root`. Both sides are canonicalized when possible so symlinked
/// temp directories (e.g. `/var` -> `/private/var` on macOS) still match.
///
/// ```text
/// relative_unix_path("/home/dev/project/pkg/user.go", "/home/dev/project")
/// // => "pkg/user.go"
/// ```
pub fn relative_unix_path(path: &Path, root: &Path) -> String {
    let (path_to_use, root_to_use) = match (path.canonicalize(), root.canonicalize()) {
        (Ok(p), Ok(r)) => (p, r),
        _ => (path.to_path_buf(), root.to_path_buf()),
    };

    let relative = path_to_use
        .strip_prefix(&root_to_use)
        .map(Path::to_path_buf)
        .unwrap_or(path_to_use);

    to_unix(&relative)
}

/// Render a path with `/` separators regardless of platform
pub fn to_unix(path: &Path) -> String {
    let text = path.to_string_lossy();
    if MAIN_SEPARATOR == '\\' {
        text.replace('\\', "/")
    } else {
        text.to_string()
    }
}

/// Join a relative unix-style directory and a file name
pub fn join_unix(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Resolve a relative unix-style path under a destination root
pub fn to_absolute_native(relative_unix: &str, root: &Path) -> PathBuf {
    // Path::join accepts '/' on every platform
    root.join(relative_unix.trim_start_matches('/'))
}

/// Last `/`-separated segment of a unix-style path
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_to_relative() {
        let root = PathBuf::from("/home/dev/source/project");
        let absolute = PathBuf::from("/home/dev/source/project/pkg/user/model.go");

        let result = relative_unix_path(&absolute, &root);
        assert_eq!(result, "pkg/user/model.go");
        assert!(!result.contains('\\'), "Should have no backslashes");
    }

    #[test]
    fn test_outside_root_keeps_path() {
        let root = PathBuf::from("/home/dev/project");
        let other = PathBuf::from("/opt/other/main.go");
        assert_eq!(relative_unix_path(&other, &root), "/opt/other/main.go");
    }

    #[test]
    fn test_unicode_in_paths() {
        let root = PathBuf::from("/home/dev/プロジェクト");
        let absolute = PathBuf::from("/home/dev/プロジェクト/src/日本語.go");
        assert_eq!(relative_unix_path(&absolute, &root), "src/日本語.go");
    }

    #[test]
    fn test_join_and_base_name() {
        assert_eq!(join_unix("", "main.go"), "main.go");
        assert_eq!(join_unix("pkg/api/", "server.go"), "pkg/api/server.go");
        assert_eq!(base_name("pkg/api/server.go"), "server.go");
    }

    #[test]
    fn test_to_absolute_native() {
        let root = PathBuf::from("/tmp/out");
        assert_eq!(
            to_absolute_native("pkg/user.go", &root),
            PathBuf::from("/tmp/out/pkg/user.go")
        );
    }
}
