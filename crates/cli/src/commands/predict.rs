use boxoffice_core::domain::movie::GENRES;
use boxoffice_core::domain::selection::{parse_series, Rating};
use boxoffice_core::errors::InsightError;
use boxoffice_core::prediction::{PredictionEngine, PredictionRequest};
use clap::Args;

use crate::commands::{load_dataset, CommandResult};

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    #[arg(long = "genre", help = "Genre to include; repeat for several")]
    pub genres: Vec<String>,
    #[arg(long, default_value = "", help = "G, PG, PG-13 or R; omit for unrated")]
    pub rating: String,
    #[arg(long, help = "Release month, e.g. Jun")]
    pub month: String,
    #[arg(long, default_value = "None", help = "Series the title belongs to")]
    pub series: String,
}

pub fn run(args: &PredictArgs) -> CommandResult {
    let request = match build_request(args) {
        Ok(request) => request,
        Err(error) => return CommandResult::from_insight("predict", error),
    };

    let store = match load_dataset("predict") {
        Ok(store) => store,
        Err(failure) => return failure,
    };

    match PredictionEngine::new().predict(store.records(), &request) {
        Ok(outcome) => CommandResult::success_with_data(
            "predict",
            format!("projected world sales: {}", outcome.world_display),
            &outcome,
        ),
        Err(error) => CommandResult::from_insight("predict", error),
    }
}

/// Genres must be known names; they are kept in canonical order like the web form.
fn build_request(args: &PredictArgs) -> Result<PredictionRequest, InsightError> {
    if let Some(unknown) = args.genres.iter().find(|genre| !GENRES.contains(&genre.as_str())) {
        return Err(InsightError::InvalidInput(format!("unknown genre `{unknown}`")));
    }

    let request = PredictionRequest {
        genres: GENRES
            .iter()
            .filter(|genre| args.genres.iter().any(|selected| selected.as_str() == **genre))
            .map(ToString::to_string)
            .collect(),
        rating: Rating::parse_optional(&args.rating)?,
        month: args.month.trim().to_string(),
        series: parse_series(&args.series),
    };
    request.validate()?;
    Ok(request)
}
