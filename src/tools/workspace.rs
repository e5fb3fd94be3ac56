use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File access the tools need, rooted at a project directory.
pub trait Workspace: Send + Sync {
    /// Directory relative paths are resolved against.
    fn root(&self) -> &Path;

    fn read_text(&self, path: &Path) -> io::Result<String>;

    fn write_text(&self, path: &Path, text: &str) -> io::Result<()>;

    /// Absolute paths pass through untouched; relative ones are joined to the root.
    fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root().join(p)
        }
    }
}

/// The real file system under a project root.
#[derive(Debug, Clone)]
pub struct ProjectDir {
    root: PathBuf,
}

impl ProjectDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Workspace for ProjectDir {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    /// Write through a sibling temp file and rename it over the target, keeping the
    /// target's permissions. Symlinks are followed so the rename lands on the real file.
    /// A file that does not exist yet is created plainly and gets the umask default mode.
    fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
        let target = match fs::canonicalize(path) {
            Ok(real) => real,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return fs::write(path, text),
            Err(e) => return Err(e),
        };
        let permissions = fs::metadata(&target)?.permissions();
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(text.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().set_permissions(permissions)?;
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }
}
