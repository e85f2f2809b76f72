use std::env;
use std::sync::{Mutex, OnceLock};

use boxoffice_cli::commands::{
    doctor, predict, predict::PredictArgs, search, search::SearchArgs, summary,
};
use serde_json::Value;
use tempfile::TempDir;

const DATASET: &str = "\
Rank,Title,Distributor,Release Date,Domestic Sales,International Sales,World Sales,Genre,Running Time,License
1,Alpha,Studio One,Jun 2020,60000000,40000000,100000000,\"['Action']\",2 hr,PG
2,Bravo,Studio Two,Jul 2021,180000000,120000000,300000000,\"['Action', 'Comedy']\",2 hr 10 min,R
3,Charlie,Studio One,Jun 2019,120000000,80000000,200000000,\"['Comedy']\",1 hr 40 min,PG
";

#[test]
fn summary_reports_landing_aggregates() {
    with_dataset(Some(DATASET), || {
        let result = summary::run();
        assert_eq!(result.exit_code, 0, "expected successful summary: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "summary");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["message"], "summarized 3 records");

        let ratings = payload["data"]["rating_sales"]["points"].as_array().expect("rating points");
        assert_eq!(ratings.len(), 4);
        assert_eq!(ratings[3]["label"], "R");
        let months = payload["data"]["sales_months"]["points"].as_array().expect("month points");
        assert_eq!(months.len(), 12);
    });
}

#[test]
fn summary_reports_data_load_failure_for_missing_file() {
    with_dataset(None, || {
        let result = summary::run();
        assert_eq!(result.exit_code, 3, "expected data load failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "data_load");
    });
}

#[test]
fn summary_reports_data_format_failure_for_bad_sales() {
    let broken = DATASET.replace("300000000", "lots");
    with_dataset(Some(&broken), || {
        let result = summary::run();
        assert_eq!(result.exit_code, 5, "expected data format failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "data_format");
    });
}

#[test]
fn search_returns_range_and_top_matches() {
    with_dataset(Some(DATASET), || {
        let result = search::run(&search_args("World", "150000000", "350000000"));
        assert_eq!(result.exit_code, 0, "expected successful search: {}", result.output);

        let payload = parse_payload(&result.output);
        let titles: Vec<&str> = payload["data"]["range_matches"]
            .as_array()
            .expect("range matches")
            .iter()
            .filter_map(|movie| movie["title"].as_str())
            .collect();
        assert_eq!(titles, vec!["Bravo", "Charlie"]);
        assert_eq!(payload["data"]["top_month_movie"]["title"], "Charlie");
        assert_eq!(payload["data"]["top_genre_movie"]["title"], "Bravo");
    });
}

#[test]
fn search_rejects_unknown_sales_type_before_loading() {
    with_dataset(None, || {
        let result = search::run(&search_args("Galactic", "0", "10"));
        assert_eq!(result.exit_code, 4, "expected invalid input code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "invalid_input");
    });
}

#[test]
fn predict_returns_formatted_projection() {
    with_dataset(Some(DATASET), || {
        let result = predict::run(&PredictArgs {
            genres: vec!["Action".to_string()],
            rating: "R".to_string(),
            month: "Jun".to_string(),
            series: "None".to_string(),
        });
        assert_eq!(result.exit_code, 0, "expected successful prediction: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "predict");
        let world = payload["data"]["world_display"].as_str().expect("world display");
        assert!(world.ends_with("Million"), "unexpected display {world}");
        assert_eq!(payload["data"]["comparables"][0]["title"], "Bravo");
    });
}

#[test]
fn predict_requires_a_known_genre() {
    with_dataset(Some(DATASET), || {
        let empty = predict::run(&PredictArgs {
            genres: Vec::new(),
            rating: String::new(),
            month: "Jun".to_string(),
            series: "None".to_string(),
        });
        assert_eq!(empty.exit_code, 4);
        assert_eq!(parse_payload(&empty.output)["error_class"], "invalid_input");

        let unknown = predict::run(&PredictArgs {
            genres: vec!["Space Opera".to_string()],
            rating: String::new(),
            month: "Jun".to_string(),
            series: "None".to_string(),
        });
        assert_eq!(unknown.exit_code, 4);
    });
}

#[test]
fn predict_reports_month_without_releases() {
    with_dataset(Some(DATASET), || {
        let result = predict::run(&PredictArgs {
            genres: vec!["Comedy".to_string()],
            rating: String::new(),
            month: "Dec".to_string(),
            series: "None".to_string(),
        });
        assert_eq!(result.exit_code, 4);
        assert_eq!(parse_payload(&result.output)["error_class"], "no_matching_records");
    });
}

#[test]
fn predict_rejects_blank_month_before_loading() {
    with_dataset(None, || {
        let result = predict::run(&PredictArgs {
            genres: vec!["Action".to_string()],
            rating: String::new(),
            month: "  ".to_string(),
            series: "None".to_string(),
        });
        assert_eq!(result.exit_code, 4, "expected invalid input code: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "invalid_input");
        assert!(payload["message"].as_str().unwrap_or_default().contains("release month"));
    });
}

#[test]
fn doctor_passes_with_readable_dataset() {
    with_dataset(Some(DATASET), || {
        let payload = parse_payload(&doctor::run(true));
        assert_eq!(payload["overall_status"], "pass");

        let names: Vec<&str> = payload["checks"]
            .as_array()
            .expect("checks")
            .iter()
            .filter_map(|check| check["name"].as_str())
            .collect();
        assert_eq!(
            names,
            vec!["config_validation", "charts_output_dir", "dataset_readable", "dataset_values"]
        );
    });
}

#[test]
fn doctor_fails_and_skips_when_config_is_invalid() {
    with_dataset(Some(DATASET), || {
        env::set_var("BOXOFFICE_SERVER_PORT", "not-a-port");

        let payload = parse_payload(&doctor::run(true));
        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][0]["status"], "fail");
        assert_eq!(payload["checks"][3]["status"], "skipped");

        let human = doctor::run(false);
        assert!(human.starts_with("doctor: one or more readiness checks failed"));
        assert!(human.contains("- [skip] dataset_values"));
    });
}

#[test]
fn commands_report_config_failure() {
    with_dataset(Some(DATASET), || {
        env::set_var("BOXOFFICE_LOG_LEVEL", "chatty");

        let result = summary::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

fn search_args(sales_type: &str, min: &str, max: &str) -> SearchArgs {
    SearchArgs {
        sales_type: sales_type.to_string(),
        min: min.to_string(),
        max: max.to_string(),
        month: "Jun".to_string(),
        genre: "Action".to_string(),
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

/// Points `BOXOFFICE_DATA_PATH` at a temp CSV (or a missing file) for the duration of the test.
fn with_dataset(contents: Option<&str>, test_fn: impl FnOnce()) {
    let dir = TempDir::new().expect("temp dir");
    let data_path = dir.path().join("movie_data.csv");
    if let Some(contents) = contents {
        std::fs::write(&data_path, contents).expect("write dataset");
    }
    let charts_dir = dir.path().join("charts");

    let data = data_path.to_string_lossy().into_owned();
    let charts = charts_dir.to_string_lossy().into_owned();
    with_env(&[("BOXOFFICE_DATA_PATH", &data), ("BOXOFFICE_CHARTS_DIR", &charts)], test_fn);
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "BOXOFFICE_DATA_PATH",
        "BOXOFFICE_CHARTS_DIR",
        "BOXOFFICE_SERVER_BIND_ADDRESS",
        "BOXOFFICE_SERVER_PORT",
        "BOXOFFICE_SERVER_HEALTH_CHECK_PORT",
        "BOXOFFICE_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "BOXOFFICE_LOGGING_LEVEL",
        "BOXOFFICE_LOGGING_FORMAT",
        "BOXOFFICE_LOG_LEVEL",
        "BOXOFFICE_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
