//! Batch processing command for multiple invoice text files.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use paylint_core::error::LookupError;
use paylint_core::models::config::PaylintConfig;
use paylint_core::models::status::InvoiceStatus;
use paylint_core::pipeline::{InvoicePipeline, ProcessedInvoice};
use paylint_core::validate::DuplicateLookup;
use paylint_core::PatternExtractor;

use super::process::{format_processed, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Restrict the summary to one lifecycle status (e.g. REVIEW_REQUIRED)
    #[arg(long)]
    status: Option<String>,

    /// Skip flagging invoice numbers already seen earlier in the batch
    #[arg(long)]
    no_check_duplicates: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    processed: Option<ProcessedInvoice>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// Duplicate lookup over invoice numbers seen earlier in this batch.
///
/// Each recorded number gets a sequential id, standing in for the row
/// id a storage backend would return.
#[derive(Default)]
struct BatchLedger {
    seen: RefCell<HashMap<String, i64>>,
}

impl BatchLedger {
    fn record(&self, invoice_number: &str) {
        let mut seen = self.seen.borrow_mut();
        let next_id = seen.len() as i64 + 1;
        seen.entry(invoice_number.to_string()).or_insert(next_id);
    }
}

impl DuplicateLookup for BatchLedger {
    fn find_existing(&self, invoice_number: &str) -> Result<Option<i64>, LookupError> {
        Ok(self.seen.borrow().get(invoice_number).copied())
    }
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        PaylintConfig::from_file(std::path::Path::new(path))?
    } else {
        PaylintConfig::default()
    };

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let extractor = PatternExtractor::new()
        .with_currency_inference(config.extraction.infer_currency_from_symbol);
    let pipeline = InvoicePipeline::new(extractor).with_auto_correct(config.correction.enabled);

    let ledger = BatchLedger::default();
    let use_ledger = config.validation.check_duplicates && !args.no_check_duplicates;

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let lookup: Option<&dyn DuplicateLookup> = if use_ledger { Some(&ledger) } else { None };

        let result = fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|text| Ok(pipeline.process(&text, lookup)?));

        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(processed) => {
                if let Some(number) = processed.record.invoice_number.as_deref() {
                    if use_ledger && !number.trim().is_empty() {
                        ledger.record(number.trim());
                    }
                }
                results.push(ProcessResult {
                    path: path.clone(),
                    processed: Some(processed),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path: path.clone(),
                        processed: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    // Write outputs
    let successful: Vec<_> = results.iter().filter(|r| r.processed.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let (Some(processed), Some(output_dir)) = (&result.processed, &args.output_dir) {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("invoice");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", output_name, extension));
            let content = format_processed(processed, args.format)?;

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        let status_filter = args
            .status
            .as_deref()
            .map(|s| {
                InvoiceStatus::from_str(s)
                    .ok_or_else(|| anyhow::anyhow!("Unknown status filter: {}", s))
            })
            .transpose()?;

        write_summary(&summary_path, &results, status_filter)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    let review_required = successful
        .iter()
        .filter(|r| {
            r.processed
                .as_ref()
                .is_some_and(|p| !p.validation.is_valid)
        })
        .count();
    if review_required > 0 {
        println!(
            "   {} require review",
            style(review_required).yellow()
        );
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(
    path: &PathBuf,
    results: &[ProcessResult],
    status_filter: Option<InvoiceStatus>,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "invoice_number",
        "invoice_date",
        "vendor_name",
        "subtotal",
        "discount_percentage",
        "discount_amount",
        "cgst_rate",
        "cgst_amount",
        "sgst_rate",
        "sgst_amount",
        "tax",
        "total_amount",
        "currency",
        "valid",
        "errors",
        "warnings",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(processed) = &result.processed {
            if status_filter.is_some_and(|f| f != processed.status) {
                continue;
            }
            let record = &processed.record;
            wtr.write_record([
                filename.to_string(),
                processed.status.as_str().to_string(),
                record.invoice_number.clone().unwrap_or_default(),
                record.invoice_date.clone().unwrap_or_default(),
                record.vendor_name.clone().unwrap_or_default(),
                decimal_field(record.subtotal),
                decimal_field(record.discount_percentage),
                decimal_field(record.discount_amount),
                decimal_field(record.cgst_rate),
                decimal_field(record.cgst_amount),
                decimal_field(record.sgst_rate),
                decimal_field(record.sgst_amount),
                decimal_field(record.tax),
                decimal_field(record.total_amount),
                record.currency.clone().unwrap_or_default(),
                processed.validation.is_valid.to_string(),
                processed.validation.errors.len().to_string(),
                processed.validation.warnings.len().to_string(),
                result.processing_time_ms.to_string(),
                String::new(),
            ])?;
        } else {
            if status_filter.is_some() {
                continue;
            }
            let mut row = vec![filename.to_string(), "failed".to_string()];
            row.extend(std::iter::repeat_n(String::new(), 16));
            row.push(result.processing_time_ms.to_string());
            row.push(result.error.clone().unwrap_or_default());
            wtr.write_record(&row)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

fn decimal_field(value: Option<rust_decimal::Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
