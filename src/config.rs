//! Configuration management for the RAX FTP download client
//!
//! Built-in defaults are layered under an optional `rax-ftp-get.toml` in
//! the working directory and `RAX_FTP_GET_*` environment overrides.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Only this name is read; other `config.*` files in the download
/// directory are left alone.
pub const CONFIG_FILE: &str = "rax-ftp-get.toml";

/// Complete client configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Control port used when the URL carries no explicit port
    /// Environment: RAX_FTP_GET_CONTROL_PORT
    pub control_port: u16,

    /// Size of each read from the data connection
    pub buffer_size: usize,

    /// Longest control line kept; excess bytes are dropped
    pub max_line_length: usize,

    /// Longest URL accepted
    pub max_url_length: usize,

    /// Connect timeout for control and data connections, 0 disables it
    pub connect_timeout_secs: u64,

    /// Timeout for every read on either connection, 0 disables it
    pub read_timeout_secs: u64,

    /// Directory the downloaded file is written into
    pub output_dir: String,

    /// Permission bits of a newly created destination file
    pub file_mode: u32,

    /// Render the progress bar and statistics on stdout
    pub show_progress: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            control_port: 21,
            buffer_size: 2048,
            max_line_length: 2048,
            max_url_length: 2048,
            connect_timeout_secs: 0,
            read_timeout_secs: 0,
            output_dir: ".".to_string(),
            file_mode: 0o640,
            show_progress: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `rax-ftp-get.toml` with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from a TOML file at `path`, if it exists
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let defaults = ClientConfig::default();

        let settings = Config::builder()
            .set_default("control_port", i64::from(defaults.control_port))?
            .set_default("buffer_size", defaults.buffer_size as i64)?
            .set_default("max_line_length", defaults.max_line_length as i64)?
            .set_default("max_url_length", defaults.max_url_length as i64)?
            .set_default("connect_timeout_secs", defaults.connect_timeout_secs as i64)?
            .set_default("read_timeout_secs", defaults.read_timeout_secs as i64)?
            .set_default("output_dir", defaults.output_dir.clone())?
            .set_default("file_mode", i64::from(defaults.file_mode))?
            .set_default("show_progress", defaults.show_progress)?
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("RAX_FTP_GET"))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.control_port == 0 {
            return Err(config::ConfigError::Message(
                "control_port cannot be 0".into(),
            ));
        }

        if self.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        // Room for a reply code and its separator
        if self.max_line_length < 4 {
            return Err(config::ConfigError::Message(
                "max_line_length must be at least 4".into(),
            ));
        }

        if self.max_url_length == 0 {
            return Err(config::ConfigError::Message(
                "max_url_length must be greater than 0".into(),
            ));
        }

        if self.output_dir.is_empty() {
            return Err(config::ConfigError::Message(
                "output_dir cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Get connect timeout as Duration, `None` when disabled
    pub fn connect_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.connect_timeout_secs)
    }

    /// Get read timeout as Duration, `None` when disabled
    pub fn read_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.read_timeout_secs)
    }

    /// Get output directory as PathBuf
    pub fn output_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
