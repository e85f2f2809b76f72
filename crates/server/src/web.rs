//! Browser-facing routes.
//!
//! - `GET  /`                    landing page with the four dataset summaries and both forms
//! - `GET  /movies`              the full dataset in file order
//! - `POST /prediction_results`  projected sales for the submitted selections
//! - `POST /search_results`      sales-range, top-in-month and top-in-genre searches
//! - `GET  /charts/*`            persisted chart artifacts

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};
use boxoffice_core::{
    aggregation::LandingSummary,
    charts::{ChartSeries, ChartSink},
    domain::{
        movie::{GENRES, MONTHS},
        selection::{parse_series, Rating, SalesType},
    },
    errors::{InsightError, InterfaceError},
    prediction::{franchise::KNOWN_SERIES, PredictionEngine, PredictionRequest},
    query::{search, SearchRequest},
    store::RecordStore,
};
use serde::Deserialize;
use tera::{Context, Tera};
use tower_http::services::ServeDir;
use tracing::{info, warn};
use uuid::Uuid;

type PageResult = Result<Html<String>, (StatusCode, Html<String>)>;

#[derive(Clone)]
pub struct WebState {
    movie_data_path: PathBuf,
    templates: Arc<Tera>,
    chart_sink: Arc<dyn ChartSink>,
    engine: PredictionEngine,
}

impl WebState {
    pub fn new(movie_data_path: PathBuf, chart_sink: Arc<dyn ChartSink>) -> Self {
        Self {
            movie_data_path,
            templates: init_templates(),
            chart_sink,
            engine: PredictionEngine::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub sales_type: String,
    #[serde(default)]
    pub min_input: String,
    #[serde(default)]
    pub max_input: String,
    #[serde(default)]
    pub top_month_movie: String,
    #[serde(default)]
    pub top_genre_movie: String,
}

/// Templates from `templates/` when present, the embedded copies otherwise.
pub fn init_templates() -> Arc<Tera> {
    let mut tera = match Tera::new("templates/**/*.html") {
        Ok(tera) => tera,
        Err(error) => {
            warn!(error = %error, "failed to load templates from filesystem, using embedded copies");
            Tera::default()
        }
    };

    if tera.get_template_names().next().is_none() {
        let embedded = vec![
            ("base.html", include_str!("../../../templates/base.html")),
            ("index.html", include_str!("../../../templates/index.html")),
            ("movies.html", include_str!("../../../templates/movies.html")),
            ("prediction_results.html", include_str!("../../../templates/prediction_results.html")),
            ("search_results.html", include_str!("../../../templates/search_results.html")),
        ];
        if let Err(error) = tera.add_raw_templates(embedded) {
            warn!(error = %error, "embedded templates failed to parse");
        }
    }

    Arc::new(tera)
}

pub fn router(state: WebState, charts_dir: &Path) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/movies", get(movies_page))
        .route("/prediction_results", post(prediction_results))
        .route("/search_results", post(search_results))
        .nest_service("/charts", ServeDir::new(charts_dir))
        .with_state(state)
}

async fn landing_page(State(state): State<WebState>) -> PageResult {
    let correlation_id = new_correlation_id();
    info!(event_name = "web.landing.requested", correlation_id = %correlation_id, "landing page");

    let store = load_records(&state, &correlation_id).await?;
    if store.is_empty() {
        // An empty dataset is reported as unavailable.
        let error = InsightError::DataLoad {
            path: state.movie_data_path.clone(),
            message: "dataset has no records".to_string(),
        };
        return Err(error_page(error.into_interface(correlation_id.as_str())));
    }
    let summary = LandingSummary::compute(store.records())
        .map_err(|error| error_page(error.into_interface(correlation_id.as_str())))?;
    let charts = summary.charts();
    publish_charts(state.chart_sink.as_ref(), &charts, &correlation_id).await;

    let mut context = form_context();
    context.insert("charts", &charts);
    context.insert("record_count", &store.len());
    render(&state, "index.html", &context, &correlation_id)
}

async fn movies_page(State(state): State<WebState>) -> PageResult {
    let correlation_id = new_correlation_id();
    info!(event_name = "web.movies.requested", correlation_id = %correlation_id, "dataset table");

    let store = load_records(&state, &correlation_id).await?;

    let mut context = Context::new();
    context.insert("movies", store.records());
    render(&state, "movies.html", &context, &correlation_id)
}

async fn prediction_results(
    State(state): State<WebState>,
    Form(form): Form<HashMap<String, String>>,
) -> PageResult {
    let correlation_id = new_correlation_id();

    let request = prediction_request(&form)
        .map_err(|error| error_page(error.into_interface(correlation_id.as_str())))?;
    info!(
        event_name = "web.prediction.requested",
        correlation_id = %correlation_id,
        genres = request.genres.len(),
        rating = request.rating_label(),
        month = %request.month,
        series = request.series.as_deref().unwrap_or("None"),
        "prediction requested"
    );

    let store = load_records(&state, &correlation_id).await?;
    let outcome = state
        .engine
        .predict(store.records(), &request)
        .map_err(|error| error_page(error.into_interface(correlation_id.as_str())))?;
    let charts = outcome.charts();
    publish_charts(state.chart_sink.as_ref(), &charts, &correlation_id).await;

    let mut context = Context::new();
    context.insert("outcome", &outcome);
    context.insert("charts", &charts);
    render(&state, "prediction_results.html", &context, &correlation_id)
}

async fn search_results(
    State(state): State<WebState>,
    Form(form): Form<SearchForm>,
) -> PageResult {
    let correlation_id = new_correlation_id();

    let request = SearchRequest::parse(
        &form.sales_type,
        &form.min_input,
        &form.max_input,
        &form.top_month_movie,
        &form.top_genre_movie,
    )
    .map_err(|error| error_page(error.into_interface(correlation_id.as_str())))?;
    info!(
        event_name = "web.search.requested",
        correlation_id = %correlation_id,
        sales_type = request.sales_type.as_str(),
        min = request.min,
        max = request.max,
        month = %request.month,
        genre = %request.genre,
        "search requested"
    );

    let store = load_records(&state, &correlation_id).await?;
    let outcome = search(store.records(), &request)
        .map_err(|error| error_page(error.into_interface(correlation_id.as_str())))?;

    let mut context = Context::new();
    context.insert("outcome", &outcome);
    render(&state, "search_results.html", &context, &correlation_id)
}

/// Reads the selections of the prediction form. Genre checkboxes are recognised by field
/// name and kept in canonical genre order.
fn prediction_request(form: &HashMap<String, String>) -> Result<PredictionRequest, InsightError> {
    let field = |name: &str| form.get(name).map(String::as_str).unwrap_or_default();

    let genres: Vec<String> =
        GENRES.iter().filter(|genre| form.contains_key(**genre)).map(ToString::to_string).collect();
    let rating = Rating::parse_optional(field("ratings"))?;
    let month = field("months").trim().to_string();

    let request = PredictionRequest { genres, rating, month, series: parse_series(field("series")) };
    request.validate()?;
    Ok(request)
}

fn form_context() -> Context {
    let ratings: Vec<&str> = Rating::ALL.iter().map(|rating| rating.as_str()).collect();
    let sales_types: Vec<&str> =
        [SalesType::Domestic, SalesType::International, SalesType::World]
            .iter()
            .map(|sales_type| sales_type.as_str())
            .collect();

    let mut context = Context::new();
    context.insert("genres", &GENRES);
    context.insert("months", &MONTHS);
    context.insert("ratings", &ratings);
    context.insert("series", &KNOWN_SERIES);
    context.insert("sales_types", &sales_types);
    context
}

async fn load_records(
    state: &WebState,
    correlation_id: &str,
) -> Result<RecordStore, (StatusCode, Html<String>)> {
    let path = state.movie_data_path.clone();
    let origin = path.clone();
    let loaded = tokio::task::spawn_blocking(move || RecordStore::load(path))
        .await
        .map_err(|error| InsightError::DataLoad {
            path: origin,
            message: format!("load task aborted: {error}"),
        })
        .and_then(|result| result);

    loaded.map_err(|error| error_page(error.into_interface(correlation_id)))
}

async fn publish_charts(sink: &dyn ChartSink, charts: &[ChartSeries], correlation_id: &str) {
    if let Err(error) = sink.publish_all(charts).await {
        warn!(
            event_name = "web.charts.publish_failed",
            correlation_id = %correlation_id,
            error = %error,
            "chart artifacts were not persisted"
        );
    }
}

fn render(state: &WebState, template: &str, context: &Context, correlation_id: &str) -> PageResult {
    state.templates.render(template, context).map(Html).map_err(|error| {
        error_page(InterfaceError::Internal {
            message: format!("template `{template}` failed to render: {error:?}"),
            correlation_id: correlation_id.to_string(),
        })
    })
}

fn status_for(error: &InterfaceError) -> StatusCode {
    match error {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_page(error: InterfaceError) -> (StatusCode, Html<String>) {
    let status = status_for(&error);
    warn!(
        event_name = "web.request.failed",
        correlation_id = %error.correlation_id(),
        status = status.as_u16(),
        error = %error,
        "request failed"
    );

    let html = format!(
        "<h1>{}</h1><p>{}</p><p>Reference: <code>{}</code></p>",
        status.canonical_reason().unwrap_or("Error"),
        error.user_message(),
        error.correlation_id()
    );
    (status, Html(html))
}

fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}
