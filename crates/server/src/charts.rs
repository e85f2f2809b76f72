use std::path::{Path, PathBuf};

use async_trait::async_trait;
use boxoffice_core::charts::{ChartError, ChartSeries, ChartSink};
use tokio::sync::Mutex;
use tracing::debug;

/// Persists each series as `<output_dir>/<artifact>.json`.
///
/// Artifact names are shared by every request, so writes go through one lock and a reader never
/// sees two requests' output interleaved in a file. The last writer wins.
pub struct JsonChartSink {
    output_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonChartSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into(), write_lock: Mutex::new(()) }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn artifact_path(&self, series: &ChartSeries) -> PathBuf {
        self.output_dir.join(format!("{}.json", series.kind.artifact_name()))
    }
}

#[async_trait]
impl ChartSink for JsonChartSink {
    async fn publish(&self, series: &ChartSeries) -> Result<(), ChartError> {
        let name = series.kind.artifact_name();
        let payload = serde_json::to_vec_pretty(series)
            .map_err(|error| ChartError::Encode { name, message: error.to_string() })?;
        let path = self.artifact_path(series);

        let _guard = self.write_lock.lock().await;
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| ChartError::Io { name, source })?;
        tokio::fs::write(&path, payload).await.map_err(|source| ChartError::Io { name, source })?;

        debug!(
            event_name = "web.charts.persisted",
            artifact = name,
            path = %path.display(),
            points = series.points.len(),
            "chart artifact written"
        );
        Ok(())
    }
}
