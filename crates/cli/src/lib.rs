pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::{predict::PredictArgs, search::SearchArgs};

#[derive(Debug, Parser)]
#[command(
    name = "boxoffice",
    about = "Box office insights operator CLI",
    long_about = "Summarize the movie dataset, run searches and sales projections, and check readiness.",
    after_help = "Examples:\n  boxoffice summary\n  boxoffice search --min 100000000 --max 500000000 --month Jun --genre Action\n  boxoffice predict --genre Action --genre Comedy --rating PG-13 --month Jul\n  boxoffice doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Compute the landing-page aggregates as structured output")]
    Summary,
    #[command(about = "Run the sales-range, top-in-month and top-in-genre searches")]
    Search(SearchArgs),
    #[command(about = "Project sales for a hypothetical title")]
    Predict(PredictArgs),
    #[command(about = "Validate config, chart output directory and dataset readability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Summary => commands::summary::run(),
        Command::Search(args) => commands::search::run(&args),
        Command::Predict(args) => commands::predict::run(&args),
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
