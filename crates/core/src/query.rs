//! Filtered lookups behind the search form.

use serde::Serialize;

use crate::domain::movie::MovieRecord;
use crate::domain::selection::SalesType;
use crate::errors::InsightError;

/// Records whose selected sales figure lies strictly between `min` and `max`.
///
/// An empty match comes back as a single [`MovieRecord::no_results`] row so the results table
/// always has something to render.
pub fn filter_by_sales_range(
    records: &[MovieRecord],
    sales_type: SalesType,
    min: i64,
    max: i64,
) -> Result<Vec<MovieRecord>, InsightError> {
    let mut matches = Vec::new();
    for movie in records {
        let value = movie.sales(sales_type)?;
        if min < value && value < max {
            matches.push(movie.clone());
        }
    }

    if matches.is_empty() {
        matches.push(MovieRecord::no_results());
    }
    Ok(matches)
}

/// Highest world sales among records released in `month`; the first one wins ties.
pub fn top_in_month(
    records: &[MovieRecord],
    month: &str,
) -> Result<Option<MovieRecord>, InsightError> {
    top_by_world_sales(records, |movie| movie.released_in(month))
}

/// Highest world sales among records whose genre text contains `genre`.
pub fn top_in_genre(
    records: &[MovieRecord],
    genre: &str,
) -> Result<Option<MovieRecord>, InsightError> {
    top_by_world_sales(records, |movie| movie.genre_substring_match(genre))
}

fn top_by_world_sales<F>(
    records: &[MovieRecord],
    predicate: F,
) -> Result<Option<MovieRecord>, InsightError>
where
    F: Fn(&MovieRecord) -> bool,
{
    let mut best: Option<(i64, &MovieRecord)> = None;
    for movie in records.iter().filter(|movie| predicate(movie)) {
        let sales = movie.world_amount()?;
        if best.map_or(true, |(top, _)| sales > top) {
            best = Some((sales, movie));
        }
    }
    Ok(best.map(|(_, movie)| movie.clone()))
}

/// Everything the search results page shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub sales_type: SalesType,
    pub min: i64,
    pub max: i64,
    pub range_matches: Vec<MovieRecord>,
    pub month: String,
    pub top_month_movie: MovieRecord,
    pub genre: String,
    pub top_genre_movie: MovieRecord,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub sales_type: SalesType,
    pub min: i64,
    pub max: i64,
    pub month: String,
    pub genre: String,
}

impl SearchRequest {
    /// Builds a request from raw form text; bounds must be whole numbers.
    pub fn parse(
        sales_type: &str,
        min: &str,
        max: &str,
        month: &str,
        genre: &str,
    ) -> Result<Self, InsightError> {
        let bound = |name: &str, value: &str| {
            value.trim().parse::<i64>().map_err(|_| {
                InsightError::InvalidInput(format!("{name} must be a whole number, got `{value}`"))
            })
        };

        Ok(Self {
            sales_type: sales_type.parse()?,
            min: bound("min_input", min)?,
            max: bound("max_input", max)?,
            month: month.trim().to_string(),
            genre: genre.trim().to_string(),
        })
    }
}

/// Runs all three searches; missing top matches fall back to the zero placeholder.
pub fn search(
    records: &[MovieRecord],
    request: &SearchRequest,
) -> Result<SearchOutcome, InsightError> {
    let range_matches =
        filter_by_sales_range(records, request.sales_type, request.min, request.max)?;
    let top_month_movie =
        top_in_month(records, &request.month)?.unwrap_or_else(MovieRecord::placeholder);
    let top_genre_movie =
        top_in_genre(records, &request.genre)?.unwrap_or_else(MovieRecord::placeholder);

    Ok(SearchOutcome {
        sales_type: request.sales_type,
        min: request.min,
        max: request.max,
        range_matches,
        month: request.month.clone(),
        top_month_movie,
        genre: request.genre.clone(),
        top_genre_movie,
    })
}
