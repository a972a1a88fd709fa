// ==============================================================================
// main.rs - Genetics Interpreter Entry Point
// ==============================================================================
// Description: Command-line entry point for genome interpretation
// Author: Matt Barham
// Created: 2026-09-24
// Modified: 2026-10-14
// Version: 1.1.0
// ==============================================================================

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genetics_interpreter::audit::{self, AuditEventType};
use genetics_interpreter::output::{self, OutputFormat};
use genetics_interpreter::validator::{self, MAX_INPUT_SIZE};
use genetics_interpreter::{legacy, AnalysisOptions, GeneticsAnalyzer};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Match result JSON produced by the variant matcher
    #[arg(short, long, env = "INTERPRETER_INPUT")]
    input: PathBuf,

    /// Output path (stdout when omitted)
    #[arg(short, long, env = "INTERPRETER_OUTPUT")]
    output: Option<PathBuf>,

    /// Skip GWAS trait association analysis
    #[arg(long, env = "INTERPRETER_SKIP_TRAITS")]
    skip_traits: bool,

    /// Skip polygenic risk scoring
    #[arg(long, env = "INTERPRETER_SKIP_PRS")]
    skip_prs: bool,

    /// Emit the legacy flattened report shape
    #[arg(long, env = "INTERPRETER_LEGACY")]
    legacy: bool,

    /// Pretty-print JSON output
    #[arg(long, env = "INTERPRETER_PRETTY")]
    pretty: bool,

    /// Maximum accepted input size in bytes
    #[arg(long, env = "INTERPRETER_MAX_INPUT_BYTES", default_value_t = MAX_INPUT_SIZE)]
    max_input_bytes: u64,
}

fn main() -> Result<()> {
    // Initialize tracing (stderr, stdout may carry the report)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genetics_interpreter=info,audit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    info!("Genetics Interpreter starting...");

    let resource = Some(args.input.display().to_string());

    // 1. Load and validate input
    let validated = match validator::load_match_result(&args.input, args.max_input_bytes) {
        Ok(validated) => validated,
        Err(e) => {
            audit::log_event(
                AuditEventType::InputRejected,
                None,
                resource,
                serde_json::json!({ "reason": e.to_string() }),
            );
            return Err(e).context("Failed to load match result");
        }
    };
    let genome_id = validated.match_result.genome_id.clone();

    audit::log_event(
        AuditEventType::InputValidated,
        Some(&genome_id),
        resource.clone(),
        serde_json::json!({
            "size": validated.size,
            "hash": validated.hash_sha256,
            "validatedAt": validated.validated_at,
        }),
    );

    // 2. Analyze
    let options = AnalysisOptions {
        include_traits: !args.skip_traits,
        include_prs: !args.skip_prs,
        ..AnalysisOptions::default()
    };
    audit::log_event(
        AuditEventType::AnalysisStarted,
        Some(&genome_id),
        resource.clone(),
        serde_json::to_value(&options).unwrap_or_default(),
    );

    let analyzer = GeneticsAnalyzer::new(options);
    let result = analyzer.analyze(&validated.match_result);

    audit::log_event(
        AuditEventType::AnalysisCompleted,
        Some(&genome_id),
        resource,
        serde_json::to_value(&result.summary).unwrap_or_default(),
    );

    // 3. Write report
    let format = if args.pretty {
        OutputFormat::JsonPretty
    } else {
        OutputFormat::Json
    };

    let write_result = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            write_report(BufWriter::new(file), &result, args.legacy, format)
        }
        None => write_report(io::stdout().lock(), &result, args.legacy, format),
    };

    if let Err(e) = write_result {
        audit::log_event(
            AuditEventType::AnalysisFailed,
            Some(&genome_id),
            args.output.as_ref().map(|p| p.display().to_string()),
            serde_json::json!({ "reason": e.to_string() }),
        );
        return Err(e);
    }

    audit::log_event(
        AuditEventType::ResultWritten,
        Some(&genome_id),
        args.output.as_ref().map(|p| p.display().to_string()),
        serde_json::json!({ "format": format, "legacy": args.legacy }),
    );

    info!("Interpretation complete for {}", genome_id);
    Ok(())
}

fn write_report<W: Write>(
    mut writer: W,
    result: &genetics_interpreter::AnalysisResult,
    legacy_shape: bool,
    format: OutputFormat,
) -> Result<()> {
    let serialised = if legacy_shape {
        output::write_json(&mut writer, &legacy::to_legacy(result), format)
    } else {
        output::write_json(&mut writer, result, format)
    };
    serialised.context("Failed to serialise report")?;

    writeln!(writer).context("Failed to write report")?;
    writer.flush().context("Failed to flush report")?;
    Ok(())
}
