use boxoffice_core::aggregation::LandingSummary;

use crate::commands::{load_dataset, CommandResult};

pub fn run() -> CommandResult {
    let store = match load_dataset("summary") {
        Ok(store) => store,
        Err(failure) => return failure,
    };

    match LandingSummary::compute(store.records()) {
        Ok(summary) => CommandResult::success_with_data(
            "summary",
            format!("summarized {} records", store.len()),
            &summary,
        ),
        Err(error) => CommandResult::from_insight("summary", error),
    }
}
