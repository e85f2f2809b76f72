use serde::{Deserialize, Serialize};

use crate::domain::selection::{Rating, SalesType};
use crate::errors::InsightError;

/// Genre names the landing-page charts and the prediction form iterate over.
pub const GENRES: [&str; 21] = [
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Music",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Sport",
    "Thriller",
    "War",
    "Western",
];

pub const MONTHS: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Number of columns in a data row.
pub const COLUMN_COUNT: usize = 10;

pub const NO_RESULTS_TITLE: &str = "No Results";

/// One row of the box-office dataset.
///
/// Numeric columns stay in their stored text form; the typed accessors parse them on demand and
/// fail with [`InsightError::DataFormat`] instead of coercing bad values to zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub rank: String,
    pub title: String,
    pub distributor: String,
    pub release_date: String,
    pub domestic_sales: String,
    pub international_sales: String,
    pub world_sales: String,
    /// List-literal text such as `['Action', 'Adventure']`.
    pub genre: String,
    pub runtime: String,
    pub rating: String,
}

impl MovieRecord {
    /// Zero-valued record used where a record-shaped value is required but nothing matched.
    pub fn placeholder() -> Self {
        Self {
            domestic_sales: "0".to_string(),
            international_sales: "0".to_string(),
            world_sales: "0".to_string(),
            ..Self::default()
        }
    }

    /// Sentinel row rendered in place of an empty search result.
    pub fn no_results() -> Self {
        Self { title: NO_RESULTS_TITLE.to_string(), ..Self::placeholder() }
    }

    pub fn is_no_results(&self) -> bool {
        self.title == NO_RESULTS_TITLE && self.rank.is_empty()
    }

    pub fn domestic_amount(&self) -> Result<i64, InsightError> {
        parse_sales("domestic_sales", &self.domestic_sales)
    }

    pub fn international_amount(&self) -> Result<i64, InsightError> {
        parse_sales("international_sales", &self.international_sales)
    }

    pub fn world_amount(&self) -> Result<i64, InsightError> {
        parse_sales("world_sales", &self.world_sales)
    }

    pub fn sales(&self, sales_type: SalesType) -> Result<i64, InsightError> {
        match sales_type {
            SalesType::Domestic => self.domestic_amount(),
            SalesType::International => self.international_amount(),
            SalesType::World => self.world_amount(),
        }
    }

    /// Raw containment check against the stored genre text, so `Music` also matches `Musical`.
    pub fn genre_substring_match(&self, genre: &str) -> bool {
        self.genre.contains(genre)
    }

    /// Parsed-list check: every selected genre must be an element of the record's genre list.
    pub fn genre_list_contains_all<S: AsRef<str>>(
        &self,
        genres: &[S],
    ) -> Result<bool, InsightError> {
        let parsed = parse_genre_list(&self.genre)?;
        Ok(genres.iter().all(|wanted| parsed.iter().any(|genre| genre == wanted.as_ref())))
    }

    /// Exact comparison of the stored genre text with the list-literal form of `genres`.
    pub fn genre_text_equals<S: AsRef<str>>(&self, genres: &[S]) -> bool {
        self.genre == genre_list_literal(genres)
    }

    pub fn released_in(&self, month: &str) -> bool {
        self.release_date.contains(month)
    }

    pub fn has_rating(&self, rating: Rating) -> bool {
        self.rating == rating.as_str()
    }

    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.contains(needle)
    }
}

/// Splits a stored genre literal into names: outer brackets stripped, quotes removed, split on
/// `", "`. Text that is not bracketed at all is rejected.
pub fn parse_genre_list(raw: &str) -> Result<Vec<String>, InsightError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        return Err(InsightError::data_format("genre", raw));
    }

    let inner = trimmed.trim_matches(|ch| ch == '[' || ch == ']').replace('\'', "");
    Ok(inner.split(", ").map(ToString::to_string).collect())
}

/// Renders genre names the way the dataset stores them: `['Action', 'Comedy']`.
pub fn genre_list_literal<S: AsRef<str>>(genres: &[S]) -> String {
    let quoted: Vec<String> = genres.iter().map(|genre| format!("'{}'", genre.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

fn parse_sales(field: &'static str, value: &str) -> Result<i64, InsightError> {
    value.trim().parse::<i64>().map_err(|_| InsightError::data_format(field, value))
}
