pub mod aggregation;
pub mod charts;
pub mod config;
pub mod domain;
pub mod errors;
pub mod format;
pub mod prediction;
pub mod query;
pub mod store;

pub use aggregation::LandingSummary;
pub use charts::{ChartKind, ChartPoint, ChartSeries, ChartSink, MemoryChartSink};
pub use domain::movie::{MovieRecord, GENRES, MONTHS};
pub use domain::selection::{Rating, SalesType};
pub use errors::{InsightError, InterfaceError};
pub use prediction::{PredictionEngine, PredictionOutcome, PredictionRequest};
pub use query::{SearchOutcome, SearchRequest};
pub use store::RecordStore;
