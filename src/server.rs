//! Local web UI: upload a contract PDF, watch it get analyzed, review the
//! results, download the artifacts.
//!
//! The axum server owns no state beyond an in-memory map of completed runs.
//! The blocking pipeline (PDF parse + sequential model calls) runs on a
//! blocking task; the analyzer itself stays synchronous.

use std::collections::HashMap;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path as AxumPath, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::pipeline::analysis::analyzer::BatchAnalyzer;
use crate::pipeline::analysis::types::AnalysisRecord;
use crate::pipeline::run_pipeline;
use crate::report::{contract_summary, generate_rewritten_pdf, RiskSummary};
use crate::sink::{export_analysis_csv, export_high_risk_csv};

/// Maximum accepted upload size.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024; // 50 MB

/// One completed analysis run, kept in memory for the session.
#[derive(Debug, Clone)]
pub struct ContractReport {
    pub id: Uuid,
    pub name: String,
    pub records: Vec<AnalysisRecord>,
    pub summary: RiskSummary,
    pub analyzed_at: DateTime<Utc>,
}

/// Builds a fresh analyzer per run. Called on the blocking thread, so the
/// analyzer itself does not need to be Send.
pub type AnalyzerFactory = Arc<dyn Fn() -> BatchAnalyzer + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    reports: Arc<Mutex<HashMap<Uuid, ContractReport>>>,
    make_analyzer: AnalyzerFactory,
}

impl AppState {
    pub fn new(make_analyzer: AnalyzerFactory) -> Self {
        Self {
            reports: Arc::new(Mutex::new(HashMap::new())),
            make_analyzer,
        }
    }
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(upload_page))
        .route("/upload", post(handle_upload))
        .route("/results/:id", get(results_page))
        .route("/download/:id/analysis.csv", get(download_analysis_csv))
        .route("/download/:id/high-risk.csv", get(download_high_risk_csv))
        .route("/download/:id/rewrites.pdf", get(download_rewrites_pdf))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Serve until the process is stopped.
pub async fn serve(state: AppState, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "web UI listening");
    axum::serve(listener, app(state)).await
}

async fn upload_page() -> Html<String> {
    Html(page(
        "Compliance Checker",
        r#"<h1>Regulatory Compliance Checker</h1>
<p>Upload a contract in PDF format to extract clauses and assess regulatory risks.</p>
<form action="/upload" method="post" enctype="multipart/form-data">
  <input type="file" name="contract" accept="application/pdf" required>
  <button type="submit">Analyze</button>
</form>"#,
    ))
}

async fn handle_upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut file_name = "contract.pdf".to_string();
    let mut file_bytes: Option<Vec<u8>> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("contract") => {
                if let Some(name) = field.file_name() {
                    file_name = name.to_string();
                }
                match field.bytes().await {
                    Ok(bytes) => file_bytes = Some(bytes.to_vec()),
                    Err(e) => return error_page(StatusCode::BAD_REQUEST, &e.to_string()),
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(e) => return error_page(StatusCode::BAD_REQUEST, &e.to_string()),
        }
    }

    let Some(bytes) = file_bytes else {
        return error_page(StatusCode::BAD_REQUEST, "no PDF file in upload");
    };

    let make_analyzer = Arc::clone(&state.make_analyzer);
    let run = tokio::task::spawn_blocking(move || {
        // Stage the upload to a temp file so the run matches the CLI path.
        let mut tmp = tempfile::NamedTempFile::new()?;
        tmp.write_all(&bytes)?;

        let mut analyzer = make_analyzer();
        run_pipeline(tmp.path(), &mut analyzer, 1, |p| {
            tracing::info!(
                batch = p.batches_done,
                total = p.batches_total,
                "batch analyzed"
            );
        })
        .map_err(|e| std::io::Error::other(e.to_string()))
    })
    .await;

    let records = match run {
        Ok(Ok(records)) => records,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "extraction failed");
            return error_page(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string());
        }
        Err(e) => {
            tracing::error!(error = %e, "analysis task failed");
            return error_page(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    let report = ContractReport {
        id: Uuid::new_v4(),
        name: file_name,
        summary: RiskSummary::from_records(&records),
        records,
        analyzed_at: Utc::now(),
    };
    let id = report.id;
    state.reports.lock().await.insert(id, report);

    Redirect::to(&format!("/results/{id}")).into_response()
}

async fn results_page(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
) -> Response {
    let reports = state.reports.lock().await;
    let Some(report) = reports.get(&id) else {
        return error_page(StatusCode::NOT_FOUND, "no such report");
    };
    Html(render_results(report)).into_response()
}

async fn download_analysis_csv(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
) -> Response {
    with_report(&state, id, |report| {
        let bytes = export_analysis_csv(&report.records)?;
        Ok(attachment(bytes, "clause_analysis.csv", "text/csv"))
    })
    .await
}

async fn download_high_risk_csv(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
) -> Response {
    with_report(&state, id, |report| {
        let bytes = export_high_risk_csv(&report.records)?;
        Ok(attachment(bytes, "ai_modified_clauses.csv", "text/csv"))
    })
    .await
}

async fn download_rewrites_pdf(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
) -> Response {
    with_report(&state, id, |report| {
        let high_risk = crate::report::high_risk_subset(&report.records);
        let bytes = generate_rewritten_pdf(&high_risk)?;
        Ok(attachment(bytes, "ai_modified_clauses.pdf", "application/pdf"))
    })
    .await
}

async fn with_report(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&ContractReport) -> Result<Response, crate::sink::SinkError>,
) -> Response {
    let reports = state.reports.lock().await;
    let Some(report) = reports.get(&id) else {
        return error_page(StatusCode::NOT_FOUND, "no such report");
    };
    match f(report) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "artifact generation failed");
            error_page(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn attachment(bytes: Vec<u8>, filename: &str, content_type: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Render the results page: metrics, summary line, clause table, downloads.
fn render_results(report: &ContractReport) -> String {
    let s = &report.summary;
    let mut rows = String::new();
    for record in &report.records {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            record.clause_id,
            escape_html(&record.contract_clause),
            escape_html(&record.regulation),
            record.risk_level,
            escape_html(&record.risk_score),
        ));
    }

    let body = format!(
        r#"<h1>Compliance Risk Analysis Results</h1>
<p class="banner success">Analysis completed.</p>
<p>{summary_line}</p>
<ul class="metrics">
  <li>Total clauses: {total}</li>
  <li>High risk: {high} ({high_pct})</li>
  <li>Medium risk: {medium} ({medium_pct})</li>
  <li>Low risk: {low} ({low_pct})</li>
</ul>
<p>
  <a href="/download/{id}/analysis.csv">Download clause analysis CSV</a> ·
  <a href="/download/{id}/high-risk.csv">Download AI-modified clauses CSV</a> ·
  <a href="/download/{id}/rewrites.pdf">Download AI-modified clauses PDF</a>
</p>
<table border="1" cellpadding="4">
<tr><th>Clause ID</th><th>Contract Clause</th><th>Regulation</th><th>Risk Level</th><th>Risk Score</th></tr>
{rows}</table>
<p><a href="/">Analyze another contract</a></p>"#,
        summary_line = escape_html(&contract_summary(s, &report.name)),
        total = s.total,
        high = s.high,
        high_pct = s.percent(s.high),
        medium = s.medium,
        medium_pct = s.percent(s.medium),
        low = s.low,
        low_pct = s.percent(s.low),
        id = report.id,
        rows = rows,
    );
    page("Analysis Results", &body)
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        r#"<h1>Something went wrong</h1>
<p class="banner error">{}</p>
<p><a href="/">Back to upload</a></p>"#,
        escape_html(message)
    );
    (status, Html(page("Error", &body))).into_response()
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width,initial-scale=1">
  <title>{title}</title>
  <style>
    body {{ font-family: sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }}
    .banner.success {{ color: #1b6e1b; }}
    .banner.error {{ color: #a11a1a; }}
    .metrics li {{ margin: 0.2rem 0; }}
    table {{ border-collapse: collapse; width: 100%; }}
    th {{ text-align: left; }}
  </style>
</head>
<body>
{body}
</body>
</html>"#
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
