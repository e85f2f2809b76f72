use std::sync::Arc;

use boxoffice_core::config::{AppConfig, ConfigError, LoadOptions};
use thiserror::Error;
use tracing::info;

use crate::charts::JsonChartSink;

pub struct Application {
    pub config: AppConfig,
    pub chart_sink: Arc<JsonChartSink>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("chart output directory `{path}` could not be created: {source}")]
    ChartsDir { path: String, source: std::io::Error },
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        movie_data_path = %config.data.movie_data_path.display(),
        "starting application bootstrap"
    );

    let output_dir = config.charts.output_dir.clone();
    tokio::fs::create_dir_all(&output_dir).await.map_err(|source| BootstrapError::ChartsDir {
        path: output_dir.display().to_string(),
        source,
    })?;
    info!(
        event_name = "system.bootstrap.charts_ready",
        correlation_id = "bootstrap",
        output_dir = %output_dir.display(),
        "chart output directory ready"
    );

    Ok(Application { config, chart_sink: Arc::new(JsonChartSink::new(output_dir)) })
}

#[cfg(test)]
mod tests {
    use boxoffice_core::config::{ConfigOverrides, LoadOptions};
    use tempfile::TempDir;

    use crate::bootstrap::bootstrap;

    #[tokio::test]
    async fn bootstrap_fails_fast_on_port_collision() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                server_port: Some(5050),
                health_check_port: Some(5050),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await;

        let message = result.err().expect("error").to_string();
        assert!(message.contains("server.health_check_port"));
    }

    #[tokio::test]
    async fn bootstrap_creates_chart_output_directory() {
        let dir = TempDir::new().expect("temp dir");
        let charts_dir = dir.path().join("static/charts");

        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                charts_output_dir: Some(charts_dir.clone()),
                movie_data_path: Some(dir.path().join("movie_data.csv")),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await
        .expect("bootstrap should succeed with valid overrides");

        assert!(charts_dir.is_dir());
        assert_eq!(app.chart_sink.output_dir(), charts_dir.as_path());
        assert_eq!(app.config.charts.output_dir, charts_dir);
    }
}
