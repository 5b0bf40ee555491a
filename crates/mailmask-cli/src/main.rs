//! Mailmask CLI
//!
//! Masks PII in email text and restores it again.
//!
//! Usage:
//! ```bash
//! # Mask an email, writing masked text and entities as JSON
//! mailmask mask --input email.txt > masked.json
//!
//! # Restore the original text
//! mailmask demask --input masked.json
//!
//! # Show the pattern rules in priority order
//! mailmask rules
//! ```

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::{MailmaskConfig, RecognizerKind};
use mailmask_core::MaskObserver;
use mailmask_observability::{init_logging, Metrics};
use mailmask_pii::{clean_bytes, demask_with_report, Error, MaskOutput, MaskingEngine, RuleDateRecognizer};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "mailmask")]
#[command(about = "Mailmask - reversible PII masking for email text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "MAILMASK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print Prometheus metrics to stderr when done
    #[arg(long, global = true)]
    metrics: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Mask PII in an email and print masked text plus entities as JSON
    Mask {
        /// Email file to read (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long, default_value = "false")]
        pretty: bool,
    },
    /// Restore original text from the JSON written by `mask`
    Demask {
        /// JSON file to read (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// List the pattern rules in priority order
    Rules,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MailmaskConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MailmaskConfig::default(),
    };
    config.merge_env();
    if cli.metrics {
        config.metrics.enabled = true;
    }

    init_logging(&config.logging)?;

    let metrics = Metrics::new()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Mask { input, pretty } => {
            let bytes = read_input(input.as_ref())?;
            let engine = build_engine(&config)?.with_observer(Arc::new(metrics.clone()));
            let output = run_mask(&engine, &bytes)?;
            if pretty {
                write!(out, "{}", output.to_json_pretty()?)?;
            } else {
                serde_json::to_writer(&mut out, &output)?;
            }
            writeln!(out)?;
        }
        Commands::Demask { input } => {
            let bytes = read_input(input.as_ref())?;
            let text = run_demask(&bytes, &metrics)?;
            writeln!(out, "{}", text)?;
        }
        Commands::Rules => {
            let engine = build_engine(&config)?;
            write_rules(&engine, &mut out)?;
        }
    }

    if config.metrics.enabled {
        eprint!("{}", metrics.gather_text()?);
    }

    Ok(())
}

fn build_engine(config: &MailmaskConfig) -> anyhow::Result<MaskingEngine> {
    let engine = match config.masking.date_recognizer {
        RecognizerKind::Rules => MaskingEngine::new(Arc::new(RuleDateRecognizer::new()?))?,
        RecognizerKind::None => MaskingEngine::without_recognizer()?,
    };
    info!(rules = engine.cascade().len(), recognizer = ?config.masking.date_recognizer, "Masking engine ready");
    Ok(engine)
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}

fn run_mask(engine: &MaskingEngine, bytes: &[u8]) -> anyhow::Result<MaskOutput> {
    if bytes.is_empty() {
        return Err(Error::EmptyInput.into());
    }
    Ok(engine.mask_cleaned(&clean_bytes(bytes))?)
}

fn run_demask(bytes: &[u8], observer: &dyn MaskObserver) -> anyhow::Result<String> {
    let masked = MaskOutput::from_json(bytes).context("Input is not mask output JSON")?;
    let outcome = demask_with_report(&masked.masked_text, &masked.entities);
    observer.on_demask_completed(&outcome.padded);
    Ok(outcome.text)
}

fn write_rules(engine: &MaskingEngine, out: &mut impl Write) -> std::io::Result<()> {
    for (index, rule) in engine.cascade().rules().iter().enumerate() {
        let kind = if rule.has_context() { "context" } else { "bare" };
        writeln!(out, "{:>2}  {:<16} {:<8} {}", index, rule.classification(), kind, rule.pattern())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailmask_pii::Classification;

    fn engine() -> MaskingEngine {
        build_engine(&MailmaskConfig::default()).unwrap()
    }

    #[test]
    fn test_mask_then_demask() {
        let metrics = Metrics::new().unwrap();
        let output = run_mask(&engine(), b"Subject: Hi\r\n\r\nCVV: 123, email is jane@example.com.").unwrap();

        assert_eq!(output.masked_text, "CVV: [cvv_no], email is [email].");

        let json = serde_json::to_vec(&output).unwrap();
        let text = run_demask(&json, &metrics).unwrap();
        assert_eq!(text, "CVV: 123, email is jane@example.com.");
        assert_eq!(metrics.demask_requests_total.get(), 1.0);
    }

    #[test]
    fn test_mask_empty_input() {
        let err = run_mask(&engine(), b"").unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::EmptyInput)));
    }

    #[test]
    fn test_mask_invalid_utf8() {
        let output = run_mask(&engine(), b"CVV: 123 \xff\xfe ok").unwrap();
        assert_eq!(output.masked_text, "CVV: [cvv_no] ok");
    }

    #[test]
    fn test_demask_rejects_garbage() {
        let metrics = Metrics::new().unwrap();
        assert!(run_demask(b"not json", &metrics).is_err());
    }

    #[test]
    fn test_demask_records_padding() {
        let metrics = Metrics::new().unwrap();
        let json = br#"{"masked_text":"[cvv_no] and [cvv_no]","entities":[{"position":[0,3],"classification":"cvv_no","entity":"123"}]}"#;

        assert_eq!(run_demask(json, &metrics).unwrap(), "123 and 123");
        assert_eq!(
            metrics
                .demask_padded_total
                .with_label_values(&[Classification::CvvNo.as_str()])
                .get(),
            1.0
        );
    }

    #[test]
    fn test_without_recognizer_config() {
        let mut config = MailmaskConfig::default();
        config.masking.date_recognizer = RecognizerKind::None;
        let engine = build_engine(&config).unwrap();

        let output = run_mask(&engine, b"born 3 May 1990").unwrap();
        assert_eq!(output.masked_text, "born 3 May 1990");
    }

    #[test]
    fn test_write_rules() {
        let mut out = Vec::new();
        write_rules(&engine(), &mut out).unwrap();
        let listing = String::from_utf8(out).unwrap();

        assert_eq!(listing.lines().count(), 10);
        assert!(listing.lines().next().unwrap().contains("full_name"));
        assert!(listing.lines().last().unwrap().contains("expiry_no"));
    }
}
