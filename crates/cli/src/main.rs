//! Command-line runner for the guided prompt sequence.
//!
//! Loads a prompt file, walks every prompt in order against the configured
//! model endpoint (each call carrying the full prior history), and writes
//! the compiled PDF report. A failed model call is recorded as the response
//! for that prompt and the run continues.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use promptdeck::catalog::{self, PromptFormat};
use promptdeck::providers::ai::AiProvider;
use promptdeck::providers::factory::create_ai_provider;
use promptdeck::render;
use promptdeck::sequence::PromptSequence;
use promptdeck_report::{build_report, Report, ReportEntry};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "promptdeck",
    about = "Runs a guided prompt sequence against a model and writes a PDF report"
)]
struct Args {
    /// Prompt-file format: analysis, plan, research, neurips, or iclr.
    #[arg(long)]
    mode: String,

    /// Path to the prompt file.
    #[arg(long)]
    prompt_file: PathBuf,

    /// The idea (or paper text) substituted into each prompt template.
    #[arg(long, conflicts_with = "idea_file")]
    idea: Option<String>,

    /// Read the idea text from a file instead.
    #[arg(long)]
    idea_file: Option<PathBuf>,

    /// Directory the report is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Chat completions endpoint URL.
    #[arg(long, env = "AI_API_URL")]
    api_url: String,

    /// Bearer token for the endpoint.
    #[arg(long, env = "AI_API_KEY")]
    api_key: Option<String>,

    /// Model name passed through to the endpoint.
    #[arg(long, env = "AI_MODEL")]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let args = Args::parse();

    let format: PromptFormat = args
        .mode
        .parse()
        .with_context(|| format!("unrecognized mode '{}'", args.mode))?;

    let raw = fs::read_to_string(&args.prompt_file)
        .with_context(|| format!("failed to read {}", args.prompt_file.display()))?;
    let prompt_catalog = catalog::parse(format, &raw);
    if prompt_catalog.is_empty() {
        bail!(
            "no prompts parsed from {} as {} format",
            args.prompt_file.display(),
            format.label()
        );
    }
    info!(
        "Loaded {} prompts across {} sections",
        prompt_catalog.prompt_count(),
        prompt_catalog.sections.len()
    );

    let idea = match (&args.idea, &args.idea_file) {
        (Some(idea), _) => idea.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("either --idea or --idea-file is required"),
    };
    if idea.trim().is_empty() {
        bail!("the idea text is empty");
    }

    let provider = create_ai_provider(
        "openai",
        args.api_url.clone(),
        args.api_key.clone(),
        args.model.clone(),
    )?;

    let mut sequence = PromptSequence::new(&prompt_catalog);
    for index in 0..sequence.len() {
        let prompt = sequence.get(index).expect("index within sequence");
        info!(
            "[{}/{}] {}: {}. {}",
            index + 1,
            sequence.len(),
            prompt.section,
            prompt.record.number,
            prompt.record.title
        );

        let request = sequence
            .request_for(index, &idea)
            .expect("index within sequence");
        let response = match provider.generate(request).await {
            Ok(text) => text,
            Err(err) => {
                error!("Model call failed: {err}");
                format!(
                    "Error: the model call for this prompt failed ({err}). \
                     This failure is recorded so the rest of the report can still be generated."
                )
            }
        };
        sequence.record_response(index, response);
    }

    let entries: Vec<ReportEntry> = sequence
        .answered()
        .map(|(_, prompt, response)| ReportEntry {
            section: prompt.section.clone(),
            number: prompt.record.number.clone(),
            title: prompt.record.title.clone(),
            blocks: render::render(response),
        })
        .collect();

    let now = Local::now();
    let report = Report {
        title: "Analysis Report".to_string(),
        generated_on: now.date_naive(),
        entries,
    };
    let bytes = build_report(&report)?;

    let filename = format!(
        "{}_Report_{}.pdf",
        format.label(),
        now.format("%Y%m%d_%H%M%S")
    );
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;
    let path = args.out_dir.join(filename);
    fs::write(&path, &bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Report written to {}", path.display());

    Ok(())
}
