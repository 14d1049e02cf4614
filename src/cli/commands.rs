//! CLI command implementations
//!
//! Boot sequence for `start`:
//! 1. Configuration load (defaults when no config file exists)
//! 2. Store initialization (create empty stores when missing)
//! 3. HTTP activation

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::store::{JsonStore, POSTS_FILE_NAME, PROCESSED_FILE_NAME};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Configuration file structure
///
/// Every field has a default, and a missing config file means
/// all-defaults, so `geopost start` works with no configuration present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding both store files (default: "data")
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory of static frontend assets (default: "public")
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// HTTP server settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_static_dir() -> String {
    "public".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            static_dir: default_static_dir(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults when the
    /// file does not exist
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.data_dir.is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        if self.static_dir.is_empty() {
            return Err(CliError::config_error("static_dir must not be empty"));
        }
        Ok(())
    }

    /// Data directory path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Static asset directory path
    pub fn static_path(&self) -> &Path {
        Path::new(&self.static_dir)
    }

    /// Posts store file path
    pub fn posts_file(&self) -> PathBuf {
        self.data_path().join(POSTS_FILE_NAME)
    }

    /// Processed-markers store file path
    pub fn processed_file(&self) -> PathBuf {
        self.data_path().join(PROCESSED_FILE_NAME)
    }
}

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Create the data directory, both store files, and the static asset
/// directory. Idempotent: existing files are left untouched.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    fs::create_dir_all(config.static_path()).map_err(|e| {
        CliError::io_error(format!(
            "Failed to create static directory {:?}: {}",
            config.static_path(),
            e
        ))
    })?;

    let (posts, processed) = open_stores(&config)?;

    println!("Initialized data directory at {:?}", config.data_path());
    println!("Posts store: {:?}", posts.path());
    println!("Processed markers store: {:?}", processed.path());

    Ok(())
}

/// Start the geopost server
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    // First-startup store creation; no-op when the files already exist
    let (posts, processed) = open_stores(&config)?;

    let server = HttpServer::with_config(config.http.clone(), posts, processed, config.static_path());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

fn open_stores(config: &Config) -> CliResult<(JsonStore, JsonStore)> {
    let posts = JsonStore::open(config.posts_file());
    let processed = JsonStore::open(config.processed_file());

    for store in [&posts, &processed] {
        store.init().map_err(|e| {
            CliError::boot_failed(format!("Failed to initialize {} store: {}", store.name(), e))
        })?;
    }

    Ok((posts, processed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.http.port, 3000);
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("absent.json")).unwrap();
        assert_eq!(config.data_dir, "data");
    }

    #[test]
    fn test_load_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("geopost.json");
        fs::write(
            &path,
            r#"{"data_dir": "var/stores", "http": {"port": 8080}}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, "var/stores");
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.http.port, 8080);
    }

    #[test]
    fn test_load_invalid_json_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("geopost.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("GEOPOST_CLI_CONFIG_ERROR"));
    }

    #[test]
    fn test_empty_data_dir_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("geopost.json");
        fs::write(&path, r#"{"data_dir": ""}"#).unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_store_file_paths() {
        let config = Config {
            data_dir: "var/data".to_string(),
            ..Default::default()
        };
        assert_eq!(config.posts_file(), PathBuf::from("var/data/posts_to_process.json"));
        assert_eq!(
            config.processed_file(),
            PathBuf::from("var/data/processed_markers.json")
        );
    }

    #[test]
    fn test_init_creates_stores_and_dirs() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("geopost.json");
        let data_dir = temp.path().join("data");
        let static_dir = temp.path().join("public");
        fs::write(
            &config_path,
            format!(
                r#"{{"data_dir": {:?}, "static_dir": {:?}}}"#,
                data_dir, static_dir
            ),
        )
        .unwrap();

        init(&config_path).unwrap();

        assert!(static_dir.is_dir());
        let posts = fs::read_to_string(data_dir.join(POSTS_FILE_NAME)).unwrap();
        let processed = fs::read_to_string(data_dir.join(PROCESSED_FILE_NAME)).unwrap();
        assert_eq!(posts.trim(), "[]");
        assert_eq!(processed.trim(), "[]");
    }

    #[test]
    fn test_init_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("geopost.json");
        let data_dir = temp.path().join("data");
        fs::write(
            &config_path,
            format!(
                r#"{{"data_dir": {:?}, "static_dir": {:?}}}"#,
                data_dir,
                temp.path().join("public")
            ),
        )
        .unwrap();

        init(&config_path).unwrap();
        fs::write(data_dir.join(POSTS_FILE_NAME), r#"[{"event": "kept"}]"#).unwrap();
        init(&config_path).unwrap();

        let posts = fs::read_to_string(data_dir.join(POSTS_FILE_NAME)).unwrap();
        assert!(posts.contains("kept"));
    }
}
