//! Tool location resolution
//!
//! Historically the tool location was a single ambiguous string that
//! could name either the directory containing ILMerge.exe or the
//! executable itself. The resolver classifies that string explicitly
//! and produces a (search directory, executable name) pair; the layer
//! that launches the process joins the two back together.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default executable name when none is supplied.
pub const DEFAULT_TOOL_EXE: &str = "ILMerge.exe";

/// Explicit classification of the raw tool path input
#[derive(Debug, Clone, PartialEq, Eq)]
enum ToolPathKind {
    /// Blank input, nothing to resolve
    Unset,
    /// An existing directory to search for the default executable
    Directory(PathBuf),
    /// A full path to the executable itself
    Executable(PathBuf),
}

/// Resolved (search directory, executable name) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLocation {
    /// Directory to search for the executable, once resolved
    pub search_directory: Option<PathBuf>,

    /// Executable file name (defaults to ILMerge.exe)
    pub executable: String,
}

impl Default for ToolLocation {
    fn default() -> Self {
        Self {
            search_directory: None,
            executable: DEFAULT_TOOL_EXE.to_string(),
        }
    }
}

impl ToolLocation {
    /// Resolve an ambiguous tool path string
    ///
    /// One filesystem metadata query, no side effects, idempotent:
    /// - blank input resolves to the defaults without touching the
    ///   filesystem;
    /// - an existing directory becomes the search directory, keeping the
    ///   default executable name;
    /// - anything else is taken as a full executable path and split into
    ///   its file name and containing directory.
    ///
    /// A metadata failure other than NotFound (an inaccessible path)
    /// propagates as-is; it is an environment error this core neither
    /// retries nor masks.
    pub fn resolve(raw: &str) -> io::Result<Self> {
        match classify(raw)? {
            ToolPathKind::Unset => Ok(Self::default()),
            ToolPathKind::Directory(dir) => Ok(Self {
                search_directory: Some(dir),
                executable: DEFAULT_TOOL_EXE.to_string(),
            }),
            ToolPathKind::Executable(path) => {
                let executable = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| DEFAULT_TOOL_EXE.to_string());
                let search_directory = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf);
                Ok(Self {
                    search_directory,
                    executable,
                })
            }
        }
    }

    /// Full path to the executable: search directory joined with the
    /// executable name, or the bare name when no directory is set
    pub fn full_path(&self) -> PathBuf {
        match &self.search_directory {
            Some(dir) => dir.join(&self.executable),
            None => PathBuf::from(&self.executable),
        }
    }
}

/// Classify the trimmed input with a single metadata query
fn classify(raw: &str) -> io::Result<ToolPathKind> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(ToolPathKind::Unset);
    }

    let path = PathBuf::from(trimmed);
    match fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => Ok(ToolPathKind::Directory(path)),
        Ok(_) => Ok(ToolPathKind::Executable(path)),
        // A path that does not exist yet is still a legitimate executable
        // path; existence is checked by whoever launches the process.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ToolPathKind::Executable(path)),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_blank_input_resolves_to_defaults() {
        for raw in ["", "   ", "\t"] {
            let location = ToolLocation::resolve(raw).unwrap();
            assert_eq!(location, ToolLocation::default());
            assert_eq!(location.executable, DEFAULT_TOOL_EXE);
            assert!(location.search_directory.is_none());
        }
    }

    #[test]
    fn test_directory_keeps_default_executable() {
        let dir = tempfile::tempdir().unwrap();

        let location = ToolLocation::resolve(dir.path().to_str().unwrap()).unwrap();

        assert_eq!(location.search_directory.as_deref(), Some(dir.path()));
        assert_eq!(location.executable, DEFAULT_TOOL_EXE);
    }

    #[test]
    fn test_executable_path_is_split() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("tool.exe");
        File::create(&exe).unwrap();

        let location = ToolLocation::resolve(exe.to_str().unwrap()).unwrap();

        assert_eq!(location.search_directory.as_deref(), Some(dir.path()));
        assert_eq!(location.executable, "tool.exe");
    }

    #[test]
    fn test_input_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let padded = format!("  {}  ", dir.path().display());

        let location = ToolLocation::resolve(&padded).unwrap();

        assert_eq!(location.search_directory.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_missing_path_treated_as_executable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-yet-installed.exe");

        let location = ToolLocation::resolve(missing.to_str().unwrap()).unwrap();

        assert_eq!(location.executable, "not-yet-installed.exe");
        assert_eq!(location.search_directory.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_bare_file_name_has_no_search_directory() {
        let location = ToolLocation::resolve("tool.exe").unwrap();
        assert_eq!(location.executable, "tool.exe");
        assert!(location.search_directory.is_none());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().to_str().unwrap();

        let first = ToolLocation::resolve(raw).unwrap();
        let second = ToolLocation::resolve(raw).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_full_path_joins_pair() {
        let location = ToolLocation {
            search_directory: Some(PathBuf::from("/opt/ilmerge")),
            executable: "ILMerge.exe".to_string(),
        };
        assert_eq!(
            location.full_path(),
            PathBuf::from("/opt/ilmerge/ILMerge.exe")
        );

        assert_eq!(
            ToolLocation::default().full_path(),
            PathBuf::from(DEFAULT_TOOL_EXE)
        );
    }
}
