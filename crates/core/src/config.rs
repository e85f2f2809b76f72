use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data: DataConfig,
    pub charts: ChartsConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DataConfig {
    pub movie_data_path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct ChartsConfig {
    pub output_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub health_check_port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub movie_data_path: Option<PathBuf>,
    pub charts_output_dir: Option<PathBuf>,
    pub server_port: Option<u16>,
    pub health_check_port: Option<u16>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig { movie_data_path: PathBuf::from("movie_data.csv") },
            charts: ChartsConfig { output_dir: PathBuf::from("static/charts") },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 5000,
                health_check_port: 8080,
                graceful_shutdown_secs: 15,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("boxoffice.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(data) = patch.data {
            if let Some(movie_data_path) = data.movie_data_path {
                self.data.movie_data_path = movie_data_path;
            }
        }

        if let Some(charts) = patch.charts {
            if let Some(output_dir) = charts.output_dir {
                self.charts.output_dir = output_dir;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(health_check_port) = server.health_check_port {
                self.server.health_check_port = health_check_port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("BOXOFFICE_DATA_PATH") {
            self.data.movie_data_path = PathBuf::from(value);
        }
        if let Some(value) = read_env("BOXOFFICE_CHARTS_DIR") {
            self.charts.output_dir = PathBuf::from(value);
        }

        if let Some(value) = read_env("BOXOFFICE_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("BOXOFFICE_SERVER_PORT") {
            self.server.port = parse_u16("BOXOFFICE_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("BOXOFFICE_SERVER_HEALTH_CHECK_PORT") {
            self.server.health_check_port =
                parse_u16("BOXOFFICE_SERVER_HEALTH_CHECK_PORT", &value)?;
        }
        if let Some(value) = read_env("BOXOFFICE_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("BOXOFFICE_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        let log_level =
            read_env("BOXOFFICE_LOGGING_LEVEL").or_else(|| read_env("BOXOFFICE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("BOXOFFICE_LOGGING_FORMAT").or_else(|| read_env("BOXOFFICE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(movie_data_path) = overrides.movie_data_path {
            self.data.movie_data_path = movie_data_path;
        }
        if let Some(output_dir) = overrides.charts_output_dir {
            self.charts.output_dir = output_dir;
        }
        if let Some(port) = overrides.server_port {
            self.server.port = port;
        }
        if let Some(health_check_port) = overrides.health_check_port {
            self.server.health_check_port = health_check_port;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_data(&self.data)?;
        validate_charts(&self.charts)?;
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("boxoffice.toml"), PathBuf::from("config/boxoffice.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_data(data: &DataConfig) -> Result<(), ConfigError> {
    if data.movie_data_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "data.movie_data_path must point at the movie CSV file".to_string(),
        ));
    }
    Ok(())
}

fn validate_charts(charts: &ChartsConfig) -> Result<(), ConfigError> {
    if charts.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "charts.output_dir must name a directory for chart artifacts".to_string(),
        ));
    }
    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation("server.bind_address must not be empty".to_string()));
    }

    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if server.health_check_port == 0 {
        return Err(ConfigError::Validation(
            "server.health_check_port must be greater than zero".to_string(),
        ));
    }

    if server.port == server.health_check_port {
        return Err(ConfigError::Validation(format!(
            "server.port and server.health_check_port must differ (both are {})",
            server.port
        )));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    data: Option<DataPatch>,
    charts: Option<ChartsPatch>,
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DataPatch {
    movie_data_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartsPatch {
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    health_check_port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_are_valid_without_a_file() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions {
            config_path: Some(PathBuf::from("definitely-missing-boxoffice.toml")),
            ..LoadOptions::default()
        })
        .map_err(|err| format!("config load failed: {err}"))?;

        ensure(
            config.data.movie_data_path == PathBuf::from("movie_data.csv"),
            "default data path should be movie_data.csv",
        )?;
        ensure(config.server.port == 5000, "default port should be 5000")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_BOXOFFICE_DATA_DIR", "/srv/data");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("boxoffice.toml");
            fs::write(
                &path,
                r#"
[data]
movie_data_path = "${TEST_BOXOFFICE_DATA_DIR}/movie_data.csv"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.data.movie_data_path == PathBuf::from("/srv/data/movie_data.csv"),
                "data path should be interpolated from environment",
            )
        })();

        clear_vars(&["TEST_BOXOFFICE_DATA_DIR"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("BOXOFFICE_LOG_LEVEL", "warn");
        env::set_var("BOXOFFICE_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )
        })();

        clear_vars(&["BOXOFFICE_LOG_LEVEL", "BOXOFFICE_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("BOXOFFICE_DATA_PATH", "from-env.csv");
        env::set_var("BOXOFFICE_SERVER_PORT", "7000");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("boxoffice.toml");
            fs::write(
                &path,
                r#"
[data]
movie_data_path = "from-file.csv"

[charts]
output_dir = "file-charts"

[server]
port = 6000

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    movie_data_path: Some(PathBuf::from("from-override.csv")),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.data.movie_data_path == PathBuf::from("from-override.csv"),
                "override data path should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.server.port == 7000, "env port should win over file and defaults")?;
            ensure(
                config.charts.output_dir == PathBuf::from("file-charts"),
                "file chart dir should win over defaults",
            )
        })();

        clear_vars(&["BOXOFFICE_DATA_PATH", "BOXOFFICE_SERVER_PORT"]);
        result
    }

    #[test]
    fn invalid_numeric_env_override_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("BOXOFFICE_SERVER_PORT", "not-a-port");

        let result = (|| -> Result<(), String> {
            match AppConfig::load(LoadOptions::default()) {
                Ok(_) => Err("expected env override failure but config load succeeded".to_string()),
                Err(error) => ensure(
                    matches!(
                        error,
                        ConfigError::InvalidEnvOverride { ref key, .. } if key == "BOXOFFICE_SERVER_PORT"
                    ),
                    "error should name the offending variable",
                ),
            }
        })();

        clear_vars(&["BOXOFFICE_SERVER_PORT"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let error = match AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                server_port: Some(9000),
                health_check_port: Some(9000),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }) {
            Ok(_) => {
                return Err("expected validation failure but config load succeeded".to_string())
            }
            Err(error) => error,
        };
        let has_message = matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("server.health_check_port")
        );
        ensure(has_message, "validation failure should mention server.health_check_port")
    }

    #[test]
    fn required_file_must_exist() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let result = AppConfig::load(LoadOptions {
            config_path: Some(PathBuf::from("missing/boxoffice.toml")),
            require_file: true,
            ..LoadOptions::default()
        });
        ensure(
            matches!(result, Err(ConfigError::MissingConfigFile(_))),
            "missing required file should be reported",
        )
    }
}
