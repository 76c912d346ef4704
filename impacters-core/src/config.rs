//! Application configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{ImpactersError, ImpactersResult};
use crate::export::DEFAULT_REPORT_FILENAME;
use crate::upcoming::DEFAULT_UPCOMING_LIMIT;

static DEFAULT_EXPORT_DIR: &str = ".";
static DEFAULT_LOG_LEVEL: &str = "warn";
static ENV_PREFIX: &str = "IMPACTERS";

fn default_report_filename() -> String {
    DEFAULT_REPORT_FILENAME.to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

fn default_upcoming_limit() -> usize {
    DEFAULT_UPCOMING_LIMIT
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Configuration at ~/.config/impacters/config.toml
///
/// Every key can be overridden with an `IMPACTERS_`-prefixed environment
/// variable, e.g. `IMPACTERS_UPCOMING_LIMIT=10`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_report_filename")]
    pub report_filename: String,

    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub load_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            report_filename: default_report_filename(),
            export_dir: default_export_dir(),
            upcoming_limit: default_upcoming_limit(),
            log_level: default_log_level(),
            load_demo_data: false,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> ImpactersResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ImpactersError::Config("Could not determine config directory".into()))?
            .join("impacters");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, writing a commented-out default file first if none exists.
    pub fn load() -> ImpactersResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) layered under `IMPACTERS_*` variables.
    pub fn load_from(path: &Path) -> ImpactersResult<Self> {
        Self::load_from_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from `path` with `env` as the override layer.
    pub fn load_from_with_env(path: &Path, env: Environment) -> ImpactersResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env.try_parsing(true))
            .build()
            .map_err(|e| ImpactersError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ImpactersError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ImpactersResult<()> {
        let contents = format!(
            "\
# impacters configuration

# File name used by `export`:
# report_filename = \"{DEFAULT_REPORT_FILENAME}\"

# Directory reports are written to:
# export_dir = \"{DEFAULT_EXPORT_DIR}\"

# How many upcoming events the dashboard lists:
# upcoming_limit = {DEFAULT_UPCOMING_LIMIT}

# Log filter (overridden by RUST_LOG):
# log_level = \"{DEFAULT_LOG_LEVEL}\"

# Start every session with the sample members and events:
# load_demo_data = false
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ImpactersError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ImpactersError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Directory for exported reports, with `~` expanded.
    pub fn export_dir(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.export_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// Where `export` writes when no explicit path is given.
    pub fn report_path(&self) -> PathBuf {
        self.export_dir().join(&self.report_filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;

    /// Environment layer fed from `vars` instead of the process environment.
    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn load(path: &Path) -> ImpactersResult<AppConfig> {
        AppConfig::load_from_with_env(path, env_with(&[]))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.report_filename, "Impacters_Attendance_Report.xlsx");
        assert_eq!(config.upcoming_limit, 5);
        assert!(!config.load_demo_data);
    }

    #[test]
    fn generated_default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        AppConfig::create_default_config(&path).unwrap();
        let config = load(&path).unwrap();

        assert_eq!(config.report_filename, AppConfig::default().report_filename);
        assert_eq!(config.upcoming_limit, AppConfig::default().upcoming_limit);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "report_filename = \"attendance.xlsx\"\nexport_dir = \"/tmp/reports\"\nupcoming_limit = 3\nload_demo_data = true\n",
        )
        .unwrap();

        let config = load(&path).unwrap();

        assert_eq!(config.upcoming_limit, 3);
        assert!(config.load_demo_data);
        assert_eq!(config.report_path(), PathBuf::from("/tmp/reports/attendance.xlsx"));
    }

    #[test]
    fn serialized_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = AppConfig {
            upcoming_limit: 8,
            log_level: "impacters_core=debug".into(),
            ..AppConfig::default()
        };
        std::fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

        assert_eq!(load(&path).unwrap(), config);
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "upcoming_limit = 3\nreport_filename = \"file.xlsx\"\n").unwrap();

        let env = env_with(&[
            ("IMPACTERS_UPCOMING_LIMIT", "9"),
            ("IMPACTERS_LOAD_DEMO_DATA", "true"),
            ("OTHER_UPCOMING_LIMIT", "1"),
        ]);
        let config = AppConfig::load_from_with_env(&path, env).unwrap();

        assert_eq!(config.upcoming_limit, 9);
        assert!(config.load_demo_data);
        assert_eq!(config.report_filename, "file.xlsx");
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "upcoming_limit = \"lots\"\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, ImpactersError::Config(_)));
    }
}
