//! Readiness check on its own listener. Ready means the configured dataset loads and holds at
//! least one record.

use std::path::PathBuf;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use boxoffice_core::store::RecordStore;
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

#[derive(Clone)]
pub struct HealthState {
    movie_data_path: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    Degraded,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DatasetStatus {
    pub path: String,
    pub record_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatasetStatus {
    fn readiness(&self) -> Readiness {
        match self.record_count {
            Some(count) if count > 0 && self.error.is_none() => Readiness::Ready,
            _ => Readiness::Degraded,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: Readiness,
    pub version: &'static str,
    pub dataset: DatasetStatus,
    pub checked_at: String,
}

pub fn router(movie_data_path: PathBuf) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { movie_data_path })
}

pub async fn spawn(bind_address: &str, port: u16, movie_data_path: PathBuf) -> std::io::Result<()> {
    let address = format!("{bind_address}:{port}");
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        event_name = "system.health.start",
        correlation_id = "bootstrap",
        bind_address = %address,
        "health listener bound"
    );

    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, router(movie_data_path)).await {
            error!(
                event_name = "system.health.error",
                correlation_id = "bootstrap",
                error = %error,
                "health listener stopped"
            );
        }
    });

    Ok(())
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthReport>) {
    let dataset = inspect_dataset(state.movie_data_path).await;
    let status = dataset.readiness();

    let report = HealthReport {
        status,
        version: env!("CARGO_PKG_VERSION"),
        dataset,
        checked_at: Utc::now().to_rfc3339(),
    };

    let code = match status {
        Readiness::Ready => StatusCode::OK,
        Readiness::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(report))
}

async fn inspect_dataset(path: PathBuf) -> DatasetStatus {
    let display = path.display().to_string();
    let loaded = tokio::task::spawn_blocking(move || RecordStore::load(path)).await;

    let (record_count, error) = match loaded {
        Ok(Ok(store)) if store.is_empty() => (Some(0), Some("dataset has no records".to_string())),
        Ok(Ok(store)) => (Some(store.len()), None),
        Ok(Err(load_error)) => (None, Some(load_error.to_string())),
        Err(join_error) => (None, Some(format!("dataset inspection aborted: {join_error}"))),
    };
    DatasetStatus { path: display, record_count, error }
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode, Json};
    use tempfile::TempDir;

    use crate::health::{health, HealthState, Readiness};

    const HEADER: &str = "Rank,Title,Distributor,Release Date,Domestic Sales,\
International Sales,World Sales,Genre,Running Time,License";

    fn state_with(dir: &TempDir, contents: Option<&str>) -> State<HealthState> {
        let path = dir.path().join("movie_data.csv");
        if let Some(contents) = contents {
            std::fs::write(&path, contents).expect("write csv");
        }
        State(HealthState { movie_data_path: path })
    }

    #[tokio::test]
    async fn ready_when_dataset_loads_with_records() {
        let dir = TempDir::new().expect("temp dir");
        let contents = format!("{HEADER}\n1,A,Studio,Jun 2020,60,40,100,\"['Action']\",2 hr,PG\n");

        let (code, Json(report)) = health(state_with(&dir, Some(&contents))).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(report.status, Readiness::Ready);
        assert_eq!(report.dataset.record_count, Some(1));
        assert_eq!(report.dataset.error, None);
        assert!(report.dataset.path.ends_with("movie_data.csv"));
    }

    #[tokio::test]
    async fn degraded_when_dataset_is_missing() {
        let dir = TempDir::new().expect("temp dir");

        let (code, Json(report)) = health(state_with(&dir, None)).await;

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(report.status, Readiness::Degraded);
        assert_eq!(report.dataset.record_count, None);
        assert!(report.dataset.error.is_some());
    }

    #[tokio::test]
    async fn degraded_when_dataset_has_only_a_header() {
        let dir = TempDir::new().expect("temp dir");

        let (code, Json(report)) = health(state_with(&dir, Some(&format!("{HEADER}\n")))).await;

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(report.dataset.record_count, Some(0));

        let json = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["dataset"]["error"], "dataset has no records");
    }
}
