use boxoffice_core::query::{search, SearchRequest};
use clap::Args;

use crate::commands::{load_dataset, CommandResult};

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    #[arg(long, default_value = "World", help = "Domestic, International or World")]
    pub sales_type: String,
    #[arg(long, help = "Exclusive lower sales bound")]
    pub min: String,
    #[arg(long, help = "Exclusive upper sales bound")]
    pub max: String,
    #[arg(long, help = "Release month for the top-in-month search, e.g. Jun")]
    pub month: String,
    #[arg(long, help = "Genre for the top-in-genre search")]
    pub genre: String,
}

pub fn run(args: &SearchArgs) -> CommandResult {
    let parsed = SearchRequest::parse(
        &args.sales_type,
        &args.min,
        &args.max,
        &args.month,
        &args.genre,
    );
    let request = match parsed {
        Ok(request) => request,
        Err(error) => return CommandResult::from_insight("search", error),
    };

    let store = match load_dataset("search") {
        Ok(store) => store,
        Err(failure) => return failure,
    };

    match search(store.records(), &request) {
        Ok(outcome) => {
            let matched =
                outcome.range_matches.iter().filter(|movie| !movie.is_no_results()).count();
            CommandResult::success_with_data(
                "search",
                format!("{matched} records between {} and {}", request.min, request.max),
                &outcome,
            )
        }
        Err(error) => CommandResult::from_insight("search", error),
    }
}
