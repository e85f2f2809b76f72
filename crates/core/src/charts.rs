//! Labeled numeric series handed to whatever renders or persists charts.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    GenreSales,
    GenreRanks,
    RatingSales,
    SalesMonths,
    GenreHighLowComparison,
    MonthHighLowComparison,
    SeriesSalesComparisons,
    RatingSalesComparison,
}

impl ChartKind {
    pub const LANDING: [ChartKind; 4] =
        [Self::GenreSales, Self::GenreRanks, Self::RatingSales, Self::SalesMonths];

    /// Artifact name, used as the persisted file stem.
    pub fn artifact_name(self) -> &'static str {
        match self {
            Self::GenreSales => "genre_sales",
            Self::GenreRanks => "genre_ranks",
            Self::RatingSales => "rating_sales",
            Self::SalesMonths => "sales_months",
            Self::GenreHighLowComparison => "genre_high_low_comparison",
            Self::MonthHighLowComparison => "month_high_low_comparison",
            Self::SeriesSalesComparisons => "series_sales_comparisons",
            Self::RatingSalesComparison => "rating_sales_comparison",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub title: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(kind: ChartKind, title: impl Into<String>, points: Vec<ChartPoint>) -> Self {
        Self { kind, title: title.into(), points }
    }

    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.points.iter().find(|point| point.label == label).map(|point| point.value)
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("could not persist chart `{name}`: {source}")]
    Io { name: &'static str, source: std::io::Error },
    #[error("could not encode chart `{name}`: {message}")]
    Encode { name: &'static str, message: String },
}

/// Receives finished series. Implementations decide format and storage.
#[async_trait]
pub trait ChartSink: Send + Sync {
    async fn publish(&self, series: &ChartSeries) -> Result<(), ChartError>;

    async fn publish_all(&self, series: &[ChartSeries]) -> Result<(), ChartError> {
        for chart in series {
            self.publish(chart).await?;
        }
        Ok(())
    }
}

/// Keeps the latest series per kind in memory.
#[derive(Debug, Default)]
pub struct MemoryChartSink {
    published: Mutex<Vec<ChartSeries>>,
}

impl MemoryChartSink {
    pub fn latest(&self, kind: ChartKind) -> Option<ChartSeries> {
        let published = self.published.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        published.iter().rev().find(|series| series.kind == kind).cloned()
    }

    pub fn publish_count(&self) -> usize {
        self.published.lock().map(|published| published.len()).unwrap_or_default()
    }
}

#[async_trait]
impl ChartSink for MemoryChartSink {
    async fn publish(&self, series: &ChartSeries) -> Result<(), ChartError> {
        let mut published = self.published.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        published.push(series.clone());
        Ok(())
    }
}
