//! Database file location.
//!
//! A database is addressed either by a bare name, which lands in a default
//! data directory with the `.db3` extension, or by a path, which is used
//! as-is. The default directory comes from a [`PathResolver`] so tests and
//! configs can swap it out.

use crate::error::{LiteError, LiteResult};
use std::path::{Path, PathBuf};

/// Name used when no database name is configured.
pub const DEFAULT_DB_NAME: &str = "data_base";

/// Extension appended to bare database names.
pub const DB_EXTENSION: &str = "db3";

/// Source of the directory that bare database names resolve into.
pub trait PathResolver {
    fn data_dir(&self) -> LiteResult<PathBuf>;
}

/// Platform default directories.
///
/// - elevated (uid 0) on Linux: `/usr/local/share/data/<app>`
/// - otherwise: `<user data dir>/data/<app>`, i.e.
///   `~/.local/share/data/<app>` on Linux
/// - Windows: not supported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPaths {
    app: String,
}

impl SystemPaths {
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into() }
    }

    /// Use the lower-cased executable name as the application directory.
    pub fn from_current_exe() -> Self {
        let app = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().to_lowercase()))
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        Self::new(app)
    }

    pub fn app(&self) -> &str {
        &self.app
    }
}

#[cfg(target_os = "linux")]
fn is_elevated() -> bool {
    use std::os::unix::fs::MetadataExt;

    std::fs::metadata("/proc/self")
        .map(|meta| meta.uid() == 0)
        .unwrap_or(false)
}

#[cfg(not(target_os = "linux"))]
fn is_elevated() -> bool {
    false
}

impl PathResolver for SystemPaths {
    #[cfg(windows)]
    fn data_dir(&self) -> LiteResult<PathBuf> {
        Err(LiteError::UnsupportedPlatform(
            "no default data directory on Windows; set `dir` explicitly",
        ))
    }

    #[cfg(not(windows))]
    fn data_dir(&self) -> LiteResult<PathBuf> {
        if is_elevated() {
            return Ok(Path::new("/usr/local/share/data").join(&self.app));
        }
        let base = directories::BaseDirs::new().ok_or_else(|| {
            LiteError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine the user data directory",
            ))
        })?;
        Ok(base.data_dir().join("data").join(&self.app))
    }
}

/// A fixed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDir(pub PathBuf);

impl PathResolver for FixedDir {
    fn data_dir(&self) -> LiteResult<PathBuf> {
        Ok(self.0.clone())
    }
}

/// `foo/` and `..` name directories, not database files.
fn ensure_file_name(path: &Path) -> LiteResult<()> {
    let trailing_separator = path
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::is_separator);
    if trailing_separator || path.file_name().is_none() {
        return Err(LiteError::validation(format!(
            "'{}' does not name a database file",
            path.display()
        )));
    }
    Ok(())
}

/// Where a database file lives: its directory and file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbLocation {
    dir: PathBuf,
    name: String,
}

impl DbLocation {
    /// Resolve a bare name (`inventory` -> `<data dir>/inventory.db3`) or a
    /// path (`/srv/app/inventory.db3`, split into directory and file name).
    pub fn resolve(name_or_path: &str, resolver: &dyn PathResolver) -> LiteResult<Self> {
        if name_or_path.trim().is_empty() {
            return Err(LiteError::validation("database name cannot be empty"));
        }

        let path = Path::new(name_or_path);
        ensure_file_name(path)?;
        let has_dir = path
            .parent()
            .is_some_and(|parent| !parent.as_os_str().is_empty());

        if has_dir {
            return Self::from_path(path);
        }

        Ok(Self::in_dir(name_or_path, resolver.data_dir()?))
    }

    /// Split a file path into directory and file name. A path without a
    /// directory part lives in the current directory.
    pub fn from_path(path: impl AsRef<Path>) -> LiteResult<Self> {
        let path = path.as_ref();
        ensure_file_name(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                LiteError::validation(format!("'{}' has no file name", path.display()))
            })?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self { dir, name })
    }

    /// A bare name inside `dir`.
    pub fn in_dir(name: &str, dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            name: format!("{name}.{DB_EXTENSION}"),
        }
    }

    /// File name, including the extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn full_path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Create the directory tree if it does not exist.
    pub fn create_dir(&self) -> LiteResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_gets_extension_and_resolver_dir() {
        let resolver = FixedDir(PathBuf::from("/data/app"));
        let loc = DbLocation::resolve("data_base", &resolver).unwrap();
        assert_eq!(loc.name(), "data_base.db3");
        assert_eq!(loc.dir(), Path::new("/data/app"));
        assert_eq!(loc.full_path(), PathBuf::from("/data/app/data_base.db3"));
    }

    #[test]
    fn path_is_split() {
        let resolver = FixedDir(PathBuf::from("/unused"));
        let loc =
            DbLocation::resolve("/home/u/.local/share/tests/test2.db3", &resolver).unwrap();
        assert_eq!(loc.name(), "test2.db3");
        assert_eq!(loc.dir(), Path::new("/home/u/.local/share/tests"));
        assert_eq!(
            loc.full_path(),
            PathBuf::from("/home/u/.local/share/tests/test2.db3")
        );
    }

    #[test]
    fn relative_file_lives_in_current_dir() {
        let loc = DbLocation::from_path("local.db3").unwrap();
        assert_eq!(loc.name(), "local.db3");
        assert_eq!(loc.full_path(), PathBuf::from("./local.db3"));
        assert!(DbLocation::from_path("/").is_err());
    }

    #[test]
    fn empty_name_is_rejected() {
        let resolver = FixedDir(PathBuf::from("/data"));
        assert!(DbLocation::resolve("  ", &resolver).is_err());
    }

    #[test]
    fn directory_names_are_rejected() {
        let resolver = FixedDir(PathBuf::from("/d"));
        for name in ["foo/", "/srv/db/", "..", "."] {
            let err = DbLocation::resolve(name, &resolver).unwrap_err();
            assert!(matches!(err, LiteError::Validation(_)), "{name}: {err:?}");
        }
        assert!(DbLocation::from_path("/srv/db/").is_err());
        assert!(DbLocation::resolve("foo", &resolver).is_ok());
    }

    #[test]
    fn create_dir_builds_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let loc = DbLocation::in_dir("x", tmp.path().join("a").join("b"));
        loc.create_dir().unwrap();
        assert!(loc.dir().is_dir());
        loc.create_dir().unwrap();
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn system_paths_end_with_app() {
        let dir = SystemPaths::new("litegen_test").data_dir().unwrap();
        assert!(dir.ends_with("data/litegen_test"));
    }
}
