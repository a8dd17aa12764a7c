use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use diligence_core::{DueDiligenceReport, ProfileSet, SpokenMessage, Transcript};
use diligence_engine::claude::ClaudeBackend;
use diligence_engine::verification::extract_claims;
use diligence_engine::websearch::GoogleSearchBackend;
use diligence_engine::Analyzer;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "diligencectl", version, about = "Due-diligence analysis over pitch-call transcripts")]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Run the full four-procedure analysis over one transcript.
    Analyze {
        /// Transcript file: plain "speaker: message" text, or a JSON array
        /// of {role, message, time_in_call_secs} records. "-" reads stdin.
        #[arg(long)]
        file: String,

        /// Overall analysis deadline.
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,

        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Override the language model.
        #[arg(long)]
        model: Option<String>,
    },
    /// Extract verifiable claims without running the full analysis.
    Claims {
        #[arg(long)]
        file: String,

        #[arg(long)]
        model: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.cmd {
        Cmd::Analyze {
            file,
            timeout_secs,
            format,
            model,
        } => {
            let transcript = load_transcript(&file).await?;
            let language = language_backend(model)?;
            let search = Arc::new(GoogleSearchBackend::from_env());
            let analyzer = Analyzer::new(Arc::new(language), search)
                .with_deadline(Duration::from_secs(timeout_secs));

            let report = analyzer.analyze(&transcript).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => print_summary(&report),
            }
        }
        Cmd::Claims { file, model } => {
            let transcript = load_transcript(&file).await?;
            let language = language_backend(model)?;
            let profiles = ProfileSet::builtin();

            let claims = extract_claims(&language, &profiles, &transcript).await?;
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
    }

    Ok(())
}

fn language_backend(model: Option<String>) -> anyhow::Result<ClaudeBackend> {
    let mut backend = ClaudeBackend::from_env().context("ANTHROPIC_API_KEY must be set")?;
    if let Some(model) = model {
        backend = backend.with_model(model);
    }
    Ok(backend)
}

async fn load_transcript(file: &str) -> anyhow::Result<Transcript> {
    let raw = if file == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("read stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("read transcript file {file}"))?
    };

    let transcript = if raw.trim_start().starts_with('[') {
        let messages: Vec<SpokenMessage> =
            serde_json::from_str(raw.trim_start()).context("parse transcript JSON")?;
        Transcript::from_messages(&messages)?
    } else {
        Transcript::from_text(&raw)?
    };
    Ok(transcript)
}

fn print_summary(report: &DueDiligenceReport) {
    println!("quantitative:  {}", report.quantitative.verdict);
    println!("qualitative:   {}", report.qualitative.verdict);
    println!("strategic:     {}", report.strategic.verdict);
    println!(
        "verification:  {} (confidence {}, {} sources)",
        report.verification.verdict,
        report.verification.confidence,
        report.verification.sources_found
    );
    println!();
    println!(
        "decision:      {}",
        if report.accept { "ACCEPT" } else { "REJECT" }
    );
}
