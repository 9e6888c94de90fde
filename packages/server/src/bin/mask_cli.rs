//! CLI for masking PII in a file or stdin
//!
//! Uses the same engine as the HTTP server. Prints the masked text, or with
//! `--analyze` the findings as JSON.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pii::{EntityType, OperatorConfig, DEFAULT_LANGUAGE};
use server_core::kernel::{BasePiiMasker, EngineMasker, MaskOptions};
use server_core::server::routes::Finding;

#[derive(Parser)]
#[command(name = "mask_cli")]
#[command(about = "Mask PII in a file or stdin")]
struct Cli {
    /// File to read (stdin when omitted)
    input: Option<PathBuf>,

    /// Language of the text
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Print findings as JSON instead of masking
    #[arg(long)]
    analyze: bool,

    /// Drop findings scoring below this
    #[arg(long, default_value_t = 0.0)]
    score_threshold: f64,

    /// Only detect these entities (comma separated, e.g. EMAIL_ADDRESS,US_SSN)
    #[arg(long, value_delimiter = ',')]
    entities: Vec<String>,

    /// Operator map as JSON, e.g. '{"DEFAULT": {"type": "redact"}}'
    #[arg(long)]
    operators: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let entities = if cli.entities.is_empty() {
        None
    } else {
        Some(
            cli.entities
                .iter()
                .map(|name| name.trim().parse::<EntityType>())
                .collect::<Result<Vec<_>, _>>()?,
        )
    };

    let operators = match &cli.operators {
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("--operators must be valid JSON")?;
            OperatorConfig::from_value(&value)?
        }
        None => OperatorConfig::default(),
    };

    let options = MaskOptions {
        language: cli.language.clone(),
        entities,
        score_threshold: cli.score_threshold,
        operators,
    };

    let masker = EngineMasker::new();

    if cli.analyze {
        let findings: Vec<Finding> = masker
            .analyze(&text, &options)
            .await?
            .into_iter()
            .map(Finding::from)
            .collect();
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        let result = masker.mask(&text, &options).await?;
        print!("{}", result.masked);
    }

    Ok(())
}
