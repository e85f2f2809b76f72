use boxoffice_core::aggregation::LandingSummary;
use boxoffice_core::config::{AppConfig, LoadOptions};
use boxoffice_core::store::RecordStore;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_charts_dir(&config));
            checks.extend(check_dataset(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["charts_output_dir", "dataset_readable", "dataset_values"] {
                checks.push(skipped(name, "configuration did not load"));
            }
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_charts_dir(config: &AppConfig) -> DoctorCheck {
    let dir = &config.charts.output_dir;
    let (status, details) = if dir.is_dir() {
        (CheckStatus::Pass, format!("`{}` exists", dir.display()))
    } else if dir.exists() {
        (CheckStatus::Fail, format!("`{}` exists but is not a directory", dir.display()))
    } else {
        (CheckStatus::Pass, format!("`{}` will be created at server startup", dir.display()))
    };
    DoctorCheck { name: "charts_output_dir", status, details }
}

fn check_dataset(config: &AppConfig) -> Vec<DoctorCheck> {
    let store = match RecordStore::load(&config.data.movie_data_path) {
        Ok(store) => store,
        Err(error) => {
            return vec![
                DoctorCheck {
                    name: "dataset_readable",
                    status: CheckStatus::Fail,
                    details: error.to_string(),
                },
                skipped("dataset_values", "dataset did not load"),
            ];
        }
    };

    let readable = DoctorCheck {
        name: "dataset_readable",
        status: CheckStatus::Pass,
        details: format!(
            "loaded {} records from `{}`",
            store.len(),
            config.data.movie_data_path.display()
        ),
    };
    let values = match LandingSummary::compute(store.records()) {
        Ok(_) => DoctorCheck {
            name: "dataset_values",
            status: CheckStatus::Pass,
            details: "sales and genre fields parse for every record".to_string(),
        },
        Err(error) => {
            DoctorCheck { name: "dataset_values", status: CheckStatus::Fail, details: error.to_string() }
        }
    };

    vec![readable, values]
}

fn skipped(name: &'static str, reason: &str) -> DoctorCheck {
    DoctorCheck {
        name,
        status: CheckStatus::Skipped,
        details: format!("skipped because {reason}"),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
