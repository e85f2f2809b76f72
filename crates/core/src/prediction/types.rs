use serde::Serialize;

use crate::charts::{ChartKind, ChartPoint, ChartSeries};
use crate::domain::movie::MovieRecord;
use crate::domain::selection::Rating;
use crate::errors::InsightError;

/// User selections from the prediction form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PredictionRequest {
    pub genres: Vec<String>,
    pub rating: Option<Rating>,
    pub month: String,
    pub series: Option<String>,
}

impl PredictionRequest {
    /// At least one genre and a release month are required; every later division depends on
    /// them, and a blank month would match every release date.
    pub fn validate(&self) -> Result<(), InsightError> {
        if self.genres.is_empty() {
            return Err(InsightError::InvalidInput("select at least one genre".to_string()));
        }
        if self.genres.iter().any(|genre| genre.trim().is_empty()) {
            return Err(InsightError::InvalidInput("genre names must not be blank".to_string()));
        }
        if self.month.trim().is_empty() {
            return Err(InsightError::InvalidInput("select a release month".to_string()));
        }
        Ok(())
    }

    /// Rating text compared against records; empty when no rating was chosen.
    pub fn rating_label(&self) -> &'static str {
        self.rating.map(Rating::as_str).unwrap_or("")
    }
}

/// Highest and lowest world sales seen among a set of records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SalesBounds {
    pub high: Option<i64>,
    pub low: Option<i64>,
}

impl SalesBounds {
    pub fn observe(&mut self, sales: i64) {
        self.high = Some(self.high.map_or(sales, |high| high.max(sales)));
        self.low = Some(self.low.map_or(sales, |low| low.min(sales)));
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_none()
    }

    fn chart(&self, kind: ChartKind, title: &str, projected: f64) -> ChartSeries {
        let mut points = Vec::with_capacity(3);
        if let Some(high) = self.high {
            points.push(ChartPoint::new("Highest", high as f64));
        }
        points.push(ChartPoint::new("Projected", projected));
        if let Some(low) = self.low {
            points.push(ChartPoint::new("Lowest", low as f64));
        }
        ChartSeries::new(kind, title, points)
    }
}

/// Running projection. World is recomputed from its parts after each adjustment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ProjectedSales {
    pub domestic: f64,
    pub international: f64,
    pub world: f64,
}

impl ProjectedSales {
    pub(crate) fn scale(&mut self, factor: f64) {
        self.domestic *= factor;
        self.international *= factor;
        self.world = self.domestic + self.international;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeriesEntry {
    pub title: String,
    pub world_sales: i64,
}

/// Average world sales for one rating, kept with its intermediate terms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RatingAverage {
    pub rating: Rating,
    /// Rating world-sales tally divided by the number of selected genres.
    pub scaled_sum: f64,
    /// Rating record tally divided by the number of selected genres.
    pub scaled_count: f64,
    pub average: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionOutcome {
    pub request: PredictionRequest,
    pub projected: ProjectedSales,
    pub domestic_display: String,
    pub international_display: String,
    pub world_display: String,
    pub comparables: Vec<MovieRecord>,
    pub genre_bounds: SalesBounds,
    pub month_average: f64,
    pub month_bounds: SalesBounds,
    pub series_sales: Vec<SeriesEntry>,
    pub rating_averages: Vec<RatingAverage>,
}

impl PredictionOutcome {
    /// Comparison charts for the results page, projected world sales alongside each.
    pub fn charts(&self) -> Vec<ChartSeries> {
        let projected = self.projected.world;

        let mut series_points: Vec<ChartPoint> = self
            .series_sales
            .iter()
            .map(|entry| ChartPoint::new(entry.title.clone(), entry.world_sales as f64))
            .collect();
        series_points.push(ChartPoint::new("Projected", projected));

        let mut rating_points: Vec<ChartPoint> = self
            .rating_averages
            .iter()
            .map(|average| ChartPoint::new(average.rating.as_str(), average.average))
            .collect();
        rating_points.push(ChartPoint::new("Projected", projected));

        vec![
            self.genre_bounds.chart(
                ChartKind::GenreHighLowComparison,
                "Genre high/low world sales",
                projected,
            ),
            self.month_bounds.chart(
                ChartKind::MonthHighLowComparison,
                "Month high/low world sales",
                projected,
            ),
            ChartSeries::new(ChartKind::SeriesSalesComparisons, "Series world sales", series_points),
            ChartSeries::new(
                ChartKind::RatingSalesComparison,
                "Average world sales by rating",
                rating_points,
            ),
        ]
    }
}
