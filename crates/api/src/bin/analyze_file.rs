use anyhow::{Context, Result};
use api::{AnalysisReport, FileReader, config::LoggingConfig, logging};
use clap::Parser;
use extract::{BuilderConfig, Extractor, OtherSpanPolicy};
use std::path::PathBuf;

/// Extract the process structure of a text file.
#[derive(Parser, Debug)]
#[command(name = "analyze_file", version)]
struct Args {
    /// A .txt or .md file describing the process
    path: PathBuf,

    /// Print the PlantUML diagram instead of the JSON report
    #[arg(long)]
    plantuml: bool,

    /// Keep untagged words inside an open phrase
    #[arg(long)]
    absorb_other: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_tracing(&LoggingConfig {
        level: (if args.verbose { "debug" } else { "warn" }).to_string(),
        json: false,
    })?;

    let text = FileReader::read_file(&args.path).await?;

    let other_spans = if args.absorb_other {
        OtherSpanPolicy::Absorb
    } else {
        OtherSpanPolicy::Flush
    };
    let extractor = Extractor::with_config(BuilderConfig { other_spans });

    let report = AnalysisReport::build(&extractor, &text)
        .with_context(|| format!("Nothing to analyze in {:?}", args.path))?;

    if args.plantuml {
        println!("{}", report.plantuml);
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
