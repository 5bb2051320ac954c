use crate::error::{LiteError, LiteResult};
use crate::path::{DEFAULT_DB_NAME, DbLocation, FixedDir, SystemPaths};
use rusqlite::OpenFlags;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database configuration.
///
/// Every field has a default, so an empty TOML document is valid:
///
/// ```toml
/// name = "inventory"        # bare name gets `.db3`; a path is used as-is
/// dir = "/var/lib/myapp"    # optional: skip default directory resolution
/// app = "myapp"             # optional: subdirectory under the data dir
///
/// [mode]
/// read_only = false
/// create = true
/// no_mutex = true
///
/// [log]
/// level = "debug"
/// max_sql_length = 200
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database name or full path to the database file.
    pub name: String,
    /// Directory holding the database. `None` resolves the platform default.
    pub dir: Option<PathBuf>,
    /// Application directory name. `None` uses the executable name.
    pub app: Option<String>,
    pub mode: OpenMode,
    pub log: LogConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DB_NAME.to_string(),
            dir: None,
            app: None,
            mode: OpenMode::default(),
            log: LogConfig::default(),
        }
    }
}

impl DatabaseConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> LiteResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LiteError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> LiteResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LiteResult<()> {
        if self.name.trim().is_empty() {
            return Err(LiteError::Config("name cannot be empty".to_string()));
        }
        if let Some(app) = &self.app
            && (app.is_empty() || app.contains(['/', '\\']))
        {
            return Err(LiteError::Config(format!(
                "app must be a single directory name, got '{app}'"
            )));
        }
        if self.mode.read_only && self.mode.create {
            return Err(LiteError::Config(
                "mode.read_only and mode.create are mutually exclusive".to_string(),
            ));
        }
        Ok(())
    }

    /// Where the database file lives. A configured `dir` wins; otherwise
    /// the platform default directory for `app` (or the executable name).
    pub fn location(&self) -> LiteResult<DbLocation> {
        match (&self.dir, &self.app) {
            (Some(dir), _) => DbLocation::resolve(&self.name, &FixedDir(dir.clone())),
            (None, Some(app)) => DbLocation::resolve(&self.name, &SystemPaths::new(app.as_str())),
            (None, None) => DbLocation::resolve(&self.name, &SystemPaths::from_current_exe()),
        }
    }

    /// Set the database name (or full path).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the directory, bypassing default path resolution.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Set the application directory name.
    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    /// Open read-only (disables file creation).
    pub fn read_only(mut self) -> Self {
        self.mode.read_only = true;
        self.mode.create = false;
        self
    }

    /// Set the statement log level (`trace` .. `error`).
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log.level = level.into();
        self
    }
}

/// SQLite open flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpenMode {
    pub read_only: bool,
    pub create: bool,
    pub no_mutex: bool,
}

impl Default for OpenMode {
    fn default() -> Self {
        Self {
            read_only: false,
            create: true,
            no_mutex: true,
        }
    }
}

impl OpenMode {
    pub fn to_flags(&self) -> OpenFlags {
        let mut flags = if self.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE
        };
        if self.create {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }
        if self.no_mutex {
            flags |= OpenFlags::SQLITE_OPEN_NO_MUTEX;
        }
        flags | OpenFlags::SQLITE_OPEN_URI
    }
}

/// Statement logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Level statements are logged at.
    pub level: String,
    /// Truncate logged SQL (in bytes). 0 disables truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            max_sql_length: Some(200),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = DatabaseConfig::from_toml_str("").unwrap();
        assert_eq!(config, DatabaseConfig::default());
        assert_eq!(config.name, "data_base");
        assert!(config.mode.create);
    }

    #[test]
    fn parses_all_sections() {
        let config = DatabaseConfig::from_toml_str(
            r#"
            name = "inventory"
            dir = "/tmp/litegen"
            app = "demo"

            [mode]
            no_mutex = false

            [log]
            level = "info"
            max_sql_length = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.name, "inventory");
        assert_eq!(config.dir.as_deref(), Some(Path::new("/tmp/litegen")));
        assert_eq!(config.app.as_deref(), Some("demo"));
        assert!(!config.mode.no_mutex);
        assert!(config.mode.create);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.max_sql_length, Some(0));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            DatabaseConfig::from_toml_str("name = \"\""),
            Err(LiteError::Config(_))
        ));
        assert!(DatabaseConfig::from_toml_str("app = \"a/b\"").is_err());
        assert!(DatabaseConfig::from_toml_str("[mode]\nread_only = true").is_err());
        assert!(DatabaseConfig::from_toml_str("unknown = 1").is_err());
    }

    #[test]
    fn configured_dir_wins() {
        let config = DatabaseConfig::new().with_name("inv").with_dir("/srv/db").with_app("ignored");
        let loc = config.location().unwrap();
        assert_eq!(loc.full_path(), PathBuf::from("/srv/db/inv.db3"));

        let by_path = DatabaseConfig::new().with_name("/srv/other/x.sqlite");
        assert_eq!(by_path.location().unwrap().name(), "x.sqlite");
    }

    #[test]
    fn read_only_flags() {
        let config = DatabaseConfig::new().read_only();
        assert!(config.validate().is_ok());
        let flags = config.mode.to_flags();
        assert!(flags.contains(OpenFlags::SQLITE_OPEN_READ_ONLY));
        assert!(!flags.contains(OpenFlags::SQLITE_OPEN_CREATE));
    }
}
