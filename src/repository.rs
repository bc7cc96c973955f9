//! Best-effort project and repository detection
//!
//! Walks upward from a path looking for one marker file per ecosystem and,
//! independently, for a `.git` directory whose `config` names an origin URL.
//! Detection never fails: without a marker the path itself is the root and
//! the kind is `unknown`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Marker file → project kind, checked in order at each directory level
const MARKERS: &[(&str, &str)] = &[
    ("go.mod", "go"),
    ("Cargo.toml", "rust"),
    ("pyproject.toml", "python"),
    ("setup.py", "python"),
    ("package.json", "node"),
    ("pom.xml", "java"),
];

pub const UNKNOWN_KIND: &str = "unknown";

static GO_MODULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*module\s+(\S+)").expect("valid regex"));
static TOML_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*name\s*=\s*["']([^"']+)["']"#).expect("valid regex"));
static JSON_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""name"\s*:\s*"([^"]+)""#).expect("valid regex"));
static POM_ARTIFACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<artifactId>\s*([^<\s]+)\s*</artifactId>").expect("valid regex"));
static SETUP_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"name\s*=\s*["']([^"']+)["']"#).expect("valid regex"));
static GIT_ORIGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?ms)^\[remote\s+"origin"\][^\[]*?^\s*url\s*=\s*(\S+)"#).expect("valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub root: PathBuf,
    /// `go`, `rust`, `python`, `node`, `java` or `unknown`
    pub kind: String,
    pub name: String,
    /// Module path for Go projects (`github.com/acme/shop`)
    pub module: Option<String>,
    pub repository_url: Option<String>,
}

impl ProjectInfo {
    pub fn is_known(&self) -> bool {
        self.kind != UNKNOWN_KIND
    }
}

/// Detect the project enclosing `path` (a file or directory)
pub fn detect(path: &Path) -> ProjectInfo {
    let start = absolute(path);
    let start_dir = if start.is_file() {
        start.parent().map(Path::to_path_buf).unwrap_or_else(|| start.clone())
    } else {
        start.clone()
    };

    let marker = find_marker(&start_dir);
    let repository_url = find_git_dir(&start_dir).and_then(|git| origin_url(&git));

    let info = match marker {
        Some((root, marker_file, kind)) => {
            let manifest = fs::read_to_string(root.join(marker_file)).unwrap_or_default();
            let module = (kind == "go")
                .then(|| capture(&GO_MODULE, &manifest))
                .flatten();
            let name = manifest_name(marker_file, &manifest, module.as_deref())
                .unwrap_or_else(|| dir_name(&root));
            ProjectInfo {
                root,
                kind: kind.to_string(),
                name,
                module,
                repository_url,
            }
        }
        None => ProjectInfo {
            name: dir_name(&start_dir),
            root: start_dir,
            kind: UNKNOWN_KIND.to_string(),
            module: None,
            repository_url,
        },
    };

    debug!(
        "Detected {} project '{}' at {}",
        info.kind,
        info.name,
        info.root.display()
    );
    info
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

fn find_marker(start: &Path) -> Option<(PathBuf, &'static str, &'static str)> {
    start.ancestors().find_map(|dir| {
        MARKERS
            .iter()
            .find(|(file, _)| dir.join(file).is_file())
            .map(|(file, kind)| (dir.to_path_buf(), *file, *kind))
    })
}

fn find_git_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".git"))
        .find(|git| git.is_dir())
}

fn origin_url(git_dir: &Path) -> Option<String> {
    let config = fs::read_to_string(git_dir.join("config")).ok()?;
    capture(&GIT_ORIGIN, &config)
}

fn manifest_name(marker_file: &str, manifest: &str, module: Option<&str>) -> Option<String> {
    match marker_file {
        "go.mod" => module.map(|m| m.rsplit('/').next().unwrap_or(m).to_string()),
        "Cargo.toml" | "pyproject.toml" => capture(&TOML_NAME, manifest),
        "setup.py" => capture(&SETUP_NAME, manifest),
        "package.json" => capture(&JSON_NAME, manifest),
        "pom.xml" => capture(&POM_ARTIFACT, manifest),
        _ => None,
    }
}

fn capture(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
