//! Landing-page summaries: genre sales share, weighted genre rank, rating share, monthly sales.
//!
//! Each computation is a fixed number of passes over the full record list and returns an
//! ordered [`ChartSeries`] ready for a [`crate::charts::ChartSink`].

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::charts::{ChartKind, ChartPoint, ChartSeries};
use crate::domain::movie::{MovieRecord, GENRES, MONTHS};
use crate::domain::selection::Rating;
use crate::errors::InsightError;
use crate::format::{round2, round_number_billions};

/// Number of genres shown individually in the share chart before the `Other` bucket.
pub const TOP_GENRE_COUNT: usize = 5;
/// Multiplier applied to each genre's share of the accumulated denominator.
pub const GENRE_SHARE_SCALE: f64 = 1000.0;
/// The `Other` bucket is this value minus the top genres' scaled shares.
pub const GENRE_SHARE_BUDGET: f64 = 10.0;
/// Points awarded to the first record inspected in the weighted rank walk.
pub const RANK_START_POINTS: i64 = 1000;
pub const RANK_DIVISOR: f64 = 10_000.0;

/// Raw per-genre world-sales sums behind the share chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenreSalesTotals {
    pub per_genre: Vec<(String, i64)>,
    /// World sales summed once per record.
    pub single_pass_total: i64,
    /// World sales summed once per genre per record, the share chart's denominator.
    pub accumulated_total: i64,
}

impl GenreSalesTotals {
    pub fn sum_for(&self, genre: &str) -> Option<i64> {
        self.per_genre.iter().find(|(name, _)| name == genre).map(|(_, sum)| *sum)
    }

    /// Unscaled share against a single pass over the records.
    pub fn single_pass_fraction(&self, genre: &str) -> Option<f64> {
        if self.single_pass_total == 0 {
            return None;
        }
        self.sum_for(genre).map(|sum| sum as f64 / self.single_pass_total as f64)
    }
}

pub fn genre_sales_totals(records: &[MovieRecord]) -> Result<GenreSalesTotals, InsightError> {
    let world: Vec<i64> = records.iter().map(MovieRecord::world_amount).collect::<Result<_, _>>()?;

    let mut per_genre = Vec::with_capacity(GENRES.len());
    let mut accumulated_total = 0_i64;
    for genre in GENRES {
        let mut genre_sum = 0_i64;
        for (movie, sales) in records.iter().zip(&world) {
            accumulated_total += sales;
            if movie.genre_substring_match(genre) {
                genre_sum += sales;
            }
        }
        per_genre.push((genre.to_string(), genre_sum));
    }

    Ok(GenreSalesTotals { per_genre, single_pass_total: world.iter().sum(), accumulated_total })
}

/// Top five genres by scaled share plus an `Other` bucket.
///
/// Each share is the genre's sum over the accumulated (once per genre) total, times 1000.
pub fn genre_sales_share(records: &[MovieRecord]) -> Result<ChartSeries, InsightError> {
    let totals = genre_sales_totals(records)?;
    if totals.accumulated_total == 0 {
        return Err(InsightError::no_matches("any world sales for the genre share chart"));
    }

    let denominator = totals.accumulated_total as f64;
    let mut shares: Vec<ChartPoint> = totals
        .per_genre
        .iter()
        .map(|(genre, sum)| {
            ChartPoint::new(genre.clone(), round2(*sum as f64 / denominator * GENRE_SHARE_SCALE))
        })
        .collect();
    shares.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    shares.truncate(TOP_GENRE_COUNT);

    let top_sum: f64 = shares.iter().map(|point| point.value).sum();
    shares.push(ChartPoint::new("Other", round2(GENRE_SHARE_BUDGET - top_sum)));

    Ok(ChartSeries::new(ChartKind::GenreSales, "Genre sales share", shares))
}

/// File-order weighted score per genre.
///
/// Points start at 1000 and drop by one for every record inspected, matching or not; a
/// matching record adds the current points to its genre. Totals are divided by 10000.
pub fn weighted_genre_rank(records: &[MovieRecord]) -> ChartSeries {
    let points = GENRES
        .iter()
        .map(|genre| {
            let mut available = RANK_START_POINTS;
            let mut total = 0_i64;
            for movie in records {
                if movie.genre_substring_match(genre) {
                    total += available;
                }
                available -= 1;
            }
            ChartPoint::new(*genre, total as f64 / RANK_DIVISOR)
        })
        .collect();

    ChartSeries::new(ChartKind::GenreRanks, "Weighted genre rank", points)
}

/// Share of all records carrying each of the four ratings, matched exactly.
pub fn rating_distribution(records: &[MovieRecord]) -> Result<ChartSeries, InsightError> {
    if records.is_empty() {
        return Err(InsightError::no_matches("any record for the rating distribution"));
    }

    let total = records.len() as f64;
    let points = Rating::ALL
        .iter()
        .map(|rating| {
            let count = records.iter().filter(|movie| movie.has_rating(*rating)).count();
            ChartPoint::new(rating.as_str(), count as f64 / total)
        })
        .collect();

    Ok(ChartSeries::new(ChartKind::RatingSales, "Rating share", points))
}

/// World sales per release month, in billions rounded to two decimals.
pub fn monthly_sales(records: &[MovieRecord]) -> Result<ChartSeries, InsightError> {
    let mut points = Vec::with_capacity(MONTHS.len());
    for month in MONTHS {
        let mut month_total = 0_i64;
        for movie in records.iter().filter(|movie| movie.released_in(month)) {
            month_total += movie.world_amount()?;
        }
        points.push(ChartPoint::new(month, round_number_billions(month_total as f64)));
    }

    Ok(ChartSeries::new(ChartKind::SalesMonths, "World sales by month (billions)", points))
}

/// The four landing-page charts computed together.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LandingSummary {
    pub genre_sales: ChartSeries,
    pub genre_ranks: ChartSeries,
    pub rating_sales: ChartSeries,
    pub sales_months: ChartSeries,
}

impl LandingSummary {
    pub fn compute(records: &[MovieRecord]) -> Result<Self, InsightError> {
        let summary = Self {
            genre_sales: genre_sales_share(records)?,
            genre_ranks: weighted_genre_rank(records),
            rating_sales: rating_distribution(records)?,
            sales_months: monthly_sales(records)?,
        };
        debug!(
            event_name = "analytics.landing.computed",
            record_count = records.len(),
            "landing summary computed"
        );
        Ok(summary)
    }

    pub fn charts(&self) -> Vec<ChartSeries> {
        vec![
            self.genre_sales.clone(),
            self.genre_ranks.clone(),
            self.rating_sales.clone(),
            self.sales_months.clone(),
        ]
    }
}
