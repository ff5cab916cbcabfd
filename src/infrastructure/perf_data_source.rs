use crate::domain::errors::PerfDataError;
use crate::domain::ports::PerfDataSource;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_SUBDIR: &str = "HardwareVisualizer";
pub const DEFAULT_DATA_FILE: &str = "perfdata.txt";

/// Default data file location for an executable living in `exe_dir`:
/// two levels up, then `subdir/file_name`.
///
/// Returns `None` when `exe_dir` has fewer than two ancestors.
pub fn resolve_from_exe_dir(exe_dir: &Path, subdir: &str, file_name: &str) -> Option<PathBuf> {
    let root = exe_dir.parent()?.parent()?;
    Some(root.join(subdir).join(file_name))
}

/// Performance data read from a file on disk.
#[derive(Debug, Clone)]
pub struct FilePerfDataSource {
    path: Result<PathBuf, String>,
}

impl FilePerfDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Ok(path.into()),
        }
    }

    /// Derives the path from the running executable's location.
    pub fn beside_executable(subdir: &str, file_name: &str) -> Self {
        let path = std::env::current_exe()
            .map_err(|e| format!("cannot determine executable path: {}", e))
            .and_then(|exe| {
                let exe_dir = exe
                    .parent()
                    .ok_or_else(|| format!("{} has no parent directory", exe.display()))?;
                resolve_from_exe_dir(exe_dir, subdir, file_name).ok_or_else(|| {
                    format!(
                        "{} is less than two levels below the filesystem root",
                        exe_dir.display()
                    )
                })
            });
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref().ok()
    }
}

impl PerfDataSource for FilePerfDataSource {
    fn location(&self) -> String {
        match &self.path {
            Ok(path) => path.display().to_string(),
            Err(_) => "<unresolved>".to_string(),
        }
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>, PerfDataError> {
        let path = self
            .path
            .as_ref()
            .map_err(|reason| PerfDataError::LocationUnavailable {
                reason: reason.clone(),
            })?;
        let file = File::open(path).map_err(|source| PerfDataError::Unreadable {
            path: path.clone(),
            source,
        })?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Performance data held in memory; used by tests and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPerfData {
    text: String,
}

impl InMemoryPerfData {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl PerfDataSource for InMemoryPerfData {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>, PerfDataError> {
        Ok(Box::new(Cursor::new(self.text.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_goes_two_levels_up() {
        let resolved = resolve_from_exe_dir(
            Path::new("/home/dev/hwviz/target/debug"),
            DEFAULT_DATA_SUBDIR,
            DEFAULT_DATA_FILE,
        );
        assert_eq!(
            resolved,
            Some(PathBuf::from(
                "/home/dev/hwviz/HardwareVisualizer/perfdata.txt"
            ))
        );
    }

    #[test]
    fn test_resolve_near_root_is_unavailable() {
        assert_eq!(
            resolve_from_exe_dir(Path::new("/bin"), DEFAULT_DATA_SUBDIR, DEFAULT_DATA_FILE),
            None
        );
    }

    #[test]
    fn test_open_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let source = FilePerfDataSource::new(&path);
        match source.open() {
            Err(PerfDataError::Unreadable { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Unreadable, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_open_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[A]").unwrap();
        writeln!(file, "x = 1").unwrap();
        let source = FilePerfDataSource::new(file.path());
        let lines: Vec<String> = source.open().unwrap().lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["[A]", "x = 1"]);
        assert_eq!(source.location(), file.path().display().to_string());
    }

    #[test]
    fn test_beside_executable_resolves_in_tests() {
        // test binaries live in target/<profile>/deps, always deep enough
        let source = FilePerfDataSource::beside_executable(DEFAULT_DATA_SUBDIR, DEFAULT_DATA_FILE);
        let path = source.path().unwrap();
        assert!(path.ends_with("HardwareVisualizer/perfdata.txt"));
    }
}
