use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clausecheck::config;
use clausecheck::pipeline::analysis::analyzer::BatchAnalyzer;
use clausecheck::pipeline::analysis::groq::GroqClient;
use clausecheck::pipeline::analysis::model_pool::ModelPool;
use clausecheck::pipeline::run_pipeline;
use clausecheck::report::{contract_summary, generate_rewritten_pdf, high_risk_subset, RiskSummary};
use clausecheck::server::{serve, AnalyzerFactory, AppState};
use clausecheck::sink::{
    export_analysis_csv, export_high_risk_csv, GoogleSheetsClient, SpreadsheetSink,
};

#[derive(Parser)]
#[command(name = "clausecheck", version, about = "Contract clause compliance checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a contract PDF and write review artifacts.
    Analyze {
        /// Path to the contract PDF.
        pdf: PathBuf,

        /// Clauses per model request.
        #[arg(long, default_value_t = config::DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Where to write the full clause-analysis CSV.
        #[arg(long, default_value = "clause_analysis.csv")]
        csv_out: PathBuf,

        /// Where to write the high-risk-only CSV.
        #[arg(long, default_value = "ai_modified_clauses.csv")]
        high_risk_out: PathBuf,

        /// Also write the rewritten-clauses PDF report here.
        #[arg(long)]
        pdf_report: Option<PathBuf>,

        /// Also push results to this worksheet of the configured spreadsheet
        /// (requires GSHEET_ID and the service-account key file).
        #[arg(long)]
        worksheet: Option<String>,
    },
    /// Run the local web UI.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Clauses per model request.
        #[arg(long, default_value_t = config::DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            pdf,
            batch_size,
            csv_out,
            high_risk_out,
            pdf_report,
            worksheet,
        } => analyze(pdf, batch_size, csv_out, high_risk_out, pdf_report, worksheet),
        Command::Serve { port, batch_size } => {
            let api_key = require_api_key()?;
            // Fail fast on HTTP client construction; per-run analyzers clone it.
            let client = GroqClient::with_api_key(&api_key)?;
            let factory: AnalyzerFactory = Arc::new(move || {
                BatchAnalyzer::new(Box::new(client.clone()), ModelPool::default(), batch_size)
            });
            let state = AppState::new(factory);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve(state, port))?;
            Ok(())
        }
    }
}

fn require_api_key() -> Result<String, Box<dyn std::error::Error>> {
    config::groq_api_key().ok_or_else(|| "GROQ_API_KEY is not set".into())
}

fn analyze(
    pdf: PathBuf,
    batch_size: usize,
    csv_out: PathBuf,
    high_risk_out: PathBuf,
    pdf_report: Option<PathBuf>,
    worksheet: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = require_api_key()?;
    let client = GroqClient::with_api_key(&api_key)?;
    let mut analyzer = BatchAnalyzer::new(Box::new(client), ModelPool::default(), batch_size);

    let records = run_pipeline(&pdf, &mut analyzer, 1, |p| {
        tracing::info!(
            batch = p.batches_done,
            total = p.batches_total,
            clauses = p.records_done,
            "batch analyzed"
        );
    })?;

    let summary = RiskSummary::from_records(&records);
    let name = pdf
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "contract".to_string());
    println!("{}", contract_summary(&summary, &name));

    std::fs::write(&csv_out, export_analysis_csv(&records)?)?;
    tracing::info!(path = %csv_out.display(), "clause analysis CSV written");

    std::fs::write(&high_risk_out, export_high_risk_csv(&records)?)?;
    tracing::info!(path = %high_risk_out.display(), "high-risk CSV written");

    if let Some(path) = pdf_report {
        let bytes = generate_rewritten_pdf(&high_risk_subset(&records))?;
        std::fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), "PDF report written");
    }

    if let Some(worksheet) = worksheet {
        let sheet_id = config::gsheet_id().ok_or("GSHEET_ID is not set")?;
        let sheets =
            GoogleSheetsClient::from_key_file(&config::service_account_file(), &sheet_id)?;
        sheets.replace_records(&worksheet, &records)?;
        println!("Results written to worksheet '{worksheet}'.");
    }

    Ok(())
}
