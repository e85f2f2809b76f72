//! Sales projection for a hypothetical title.
//!
//! Blends genre and release-month averages, then applies fixed percentage adjustments for an
//! R rating, membership in a known series, and very broad genre selections. The arithmetic is
//! deliberately naive; it is a display heuristic, not a model.

mod engine;
pub mod franchise;
mod types;

pub use engine::PredictionEngine;
pub use types::*;

use crate::errors::InsightError;

pub type PredictionResult<T> = Result<T, InsightError>;

/// Fixed percentage adjustments applied after the genre/month blend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Adjustments {
    /// Multiplier for domestic and international sales of R-rated selections (default: 0.7)
    pub restricted_rating_factor: f64,
    /// Fractional increase when the series already has a title in the dataset (default: 0.2)
    pub series_bonus: f64,
    /// Genre count above which the breadth penalty applies (default: 8)
    pub genre_penalty_threshold: usize,
    /// Fractional reduction per genre above the threshold (default: 0.1)
    pub genre_penalty_step: f64,
    /// Comparable titles returned (default: 3)
    pub comparable_limit: usize,
}

pub const DEFAULT_ADJUSTMENTS: Adjustments = Adjustments {
    restricted_rating_factor: 0.7,
    series_bonus: 0.2,
    genre_penalty_threshold: 8,
    genre_penalty_step: 0.1,
    comparable_limit: 3,
};

impl Default for Adjustments {
    fn default() -> Self {
        DEFAULT_ADJUSTMENTS
    }
}
