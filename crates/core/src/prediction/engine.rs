use tracing::info;

use super::franchise::belongs_to_series;
use super::types::{
    PredictionOutcome, PredictionRequest, ProjectedSales, RatingAverage, SalesBounds, SeriesEntry,
};
use super::{Adjustments, PredictionResult};
use crate::domain::movie::MovieRecord;
use crate::domain::selection::Rating;
use crate::errors::InsightError;
use crate::format::round_number_as_string;

/// Heuristic projection of a hypothetical title's sales from averages over similar records.
#[derive(Clone, Debug, Default)]
pub struct PredictionEngine {
    adjustments: Adjustments,
}

#[derive(Clone, Copy, Debug, Default)]
struct RatingTally {
    world_sum: i64,
    count: u64,
}

impl PredictionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_adjustments(adjustments: Adjustments) -> Self {
        Self { adjustments }
    }

    /// Runs the full projection. Steps apply in a fixed order and each one consumes the
    /// projection left by the previous step.
    pub fn predict(
        &self,
        records: &[MovieRecord],
        request: &PredictionRequest,
    ) -> PredictionResult<PredictionOutcome> {
        request.validate()?;
        let genre_count = request.genres.len();

        // Genre sums count a record once per matching selected genre. Rating tallies run once
        // per selected genre whether or not it matched.
        let mut genre_domestic = 0_i64;
        let mut genre_international = 0_i64;
        let mut genre_world = 0_i64;
        let mut match_count = 0_u64;
        let mut rating_tallies = [RatingTally::default(); 4];

        for movie in records {
            let domestic = movie.domestic_amount()?;
            let international = movie.international_amount()?;
            let world = movie.world_amount()?;

            for genre in &request.genres {
                if movie.genre_substring_match(genre) {
                    genre_domestic += domestic;
                    genre_international += international;
                    genre_world += world;
                    match_count += 1;
                }
                if let Some(slot) = Rating::ALL.iter().position(|rating| movie.has_rating(*rating)) {
                    rating_tallies[slot].world_sum += world;
                    rating_tallies[slot].count += 1;
                }
            }
        }

        let mut genre_bounds = exact_genre_bounds(records, &request.genres)?;

        if match_count == 0 {
            return Err(InsightError::no_matches(format!("genres {:?}", request.genres)));
        }
        let divisor = genre_count as f64 * match_count as f64;
        let genres_domestic = genre_domestic as f64 / divisor;
        let genres_international = genre_international as f64 / divisor;
        let genres_world = genre_world as f64 / divisor;

        let mut month_total = 0_i64;
        let mut month_releases = 0_u64;
        let mut month_bounds = SalesBounds::default();
        for movie in records.iter().filter(|movie| movie.released_in(&request.month)) {
            let world = movie.world_amount()?;
            month_total += world;
            month_releases += 1;
            month_bounds.observe(world);
        }
        if month_releases == 0 {
            return Err(InsightError::no_matches(format!("month `{}`", request.month)));
        }
        let month_average = month_total as f64 / month_releases as f64;

        // Domestic is replaced by the blend while the other two accumulate onto a fresh zero.
        let mut projected = ProjectedSales::default();
        projected.domestic = (month_average + genres_domestic) / 2.0;
        projected.international += (month_average + genres_international) / 2.0;
        projected.world += (month_average + genres_world) / 2.0;

        if request.rating == Some(Rating::R) {
            projected.scale(self.adjustments.restricted_rating_factor);
        }

        let mut series_sales = Vec::new();
        if let Some(series) = request.series.as_deref() {
            if records.iter().any(|movie| movie.title_contains(series)) {
                projected.scale(1.0 + self.adjustments.series_bonus);
            }
            for movie in records.iter().filter(|movie| belongs_to_series(movie, series)) {
                let world = movie.world_amount()?;
                genre_bounds.observe(world);
                series_sales.push(SeriesEntry { title: movie.title.clone(), world_sales: world });
            }
        }

        if genre_count > self.adjustments.genre_penalty_threshold {
            let excess = (genre_count - self.adjustments.genre_penalty_threshold) as f64;
            projected.scale(1.0 - self.adjustments.genre_penalty_step * excess);
        }

        let comparables = comparable_titles(
            records,
            &request.genres,
            request.rating_label(),
            self.adjustments.comparable_limit,
        )?;

        let rating_averages = Rating::ALL
            .iter()
            .zip(rating_tallies)
            .map(|(rating, tally)| {
                let scaled_sum = tally.world_sum as f64 / genre_count as f64;
                let scaled_count = tally.count as f64 / genre_count as f64;
                let average = if tally.count == 0 { 0.0 } else { scaled_sum / scaled_count };
                RatingAverage { rating: *rating, scaled_sum, scaled_count, average }
            })
            .collect();

        info!(
            event_name = "analytics.prediction.computed",
            genre_count,
            match_count,
            rating = request.rating_label(),
            month = %request.month,
            series = request.series.as_deref().unwrap_or("None"),
            projected_world = projected.world,
            "prediction computed"
        );

        Ok(PredictionOutcome {
            request: request.clone(),
            domestic_display: round_number_as_string(projected.domestic),
            international_display: round_number_as_string(projected.international),
            world_display: round_number_as_string(projected.world),
            projected,
            comparables,
            genre_bounds,
            month_average,
            month_bounds,
            series_sales,
            rating_averages,
        })
    }
}

/// Bounds over records whose genre text is exactly the selection's list literal, falling back
/// to records whose parsed genre list contains every selected genre.
fn exact_genre_bounds(
    records: &[MovieRecord],
    genres: &[String],
) -> PredictionResult<SalesBounds> {
    let mut bounds = SalesBounds::default();
    for movie in records.iter().filter(|movie| movie.genre_text_equals(genres)) {
        bounds.observe(movie.world_amount()?);
    }
    if !bounds.is_empty() {
        return Ok(bounds);
    }

    for movie in records {
        if movie.genre_list_contains_all(genres)? {
            bounds.observe(movie.world_amount()?);
        }
    }
    Ok(bounds)
}

/// First `limit` records in file order that carry every selected genre and the exact rating.
fn comparable_titles(
    records: &[MovieRecord],
    genres: &[String],
    rating: &str,
    limit: usize,
) -> PredictionResult<Vec<MovieRecord>> {
    let mut comparables = Vec::with_capacity(limit);
    for movie in records {
        if comparables.len() == limit {
            break;
        }
        if movie.rating == rating && movie.genre_list_contains_all(genres)? {
            comparables.push(movie.clone());
        }
    }
    Ok(comparables)
}
