//! Process command - extract and validate a single invoice text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use paylint_core::models::config::PaylintConfig;
use paylint_core::pipeline::{InvoicePipeline, ProcessedInvoice};
use paylint_core::PatternExtractor;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file containing extracted invoice text, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip the math correction stage
    #[arg(long)]
    no_correct: bool,

    /// Print validation findings to stderr
    #[arg(long)]
    show_findings: bool,

    /// Exit with a nonzero code when validation finds errors
    #[arg(long)]
    fail_on_invalid: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        PaylintConfig::from_file(std::path::Path::new(path))?
    } else {
        PaylintConfig::default()
    };

    let text = if args.input.as_os_str() == "-" {
        info!("Reading document text from stdin");
        std::io::read_to_string(std::io::stdin())?
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        info!("Processing file: {}", args.input.display());
        fs::read_to_string(&args.input)?
    };

    if text.trim().is_empty() {
        anyhow::bail!("Input is empty: {}", args.input.display());
    }

    let extractor = PatternExtractor::new()
        .with_currency_inference(config.extraction.infer_currency_from_symbol);
    let pipeline = InvoicePipeline::new(extractor)
        .with_auto_correct(config.correction.enabled && !args.no_correct);

    let processed = pipeline.process(&text, None)?;

    if args.show_findings {
        print_findings(&processed);
    }

    // Format output
    let output = format_processed(&processed, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if args.fail_on_invalid && !processed.validation.is_valid {
        anyhow::bail!(
            "Validation failed with {} errors",
            processed.validation.errors.len()
        );
    }

    Ok(())
}

fn print_findings(processed: &ProcessedInvoice) {
    if !processed.validation.errors.is_empty() {
        eprintln!("{}", style("Errors:").red());
        for finding in &processed.validation.errors {
            eprintln!("  - [{}] {}", finding.field, finding.message);
        }
    }
    if !processed.validation.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for finding in &processed.validation.warnings {
            eprintln!("  - [{}] {}", finding.field, finding.message);
        }
    }
    if processed.validation.errors.is_empty() && processed.validation.warnings.is_empty() {
        eprintln!("{} No validation findings", style("✓").green());
    }
}

pub fn format_processed(
    processed: &ProcessedInvoice,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(processed)?),
        OutputFormat::Csv => format_csv(processed),
        OutputFormat::Text => Ok(format_text(processed)),
    }
}

fn format_csv(processed: &ProcessedInvoice) -> anyhow::Result<String> {
    let record = &processed.record;
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "invoice_number",
        "invoice_date",
        "vendor_name",
        "subtotal",
        "discount_amount",
        "tax",
        "total_amount",
        "currency",
        "status",
        "errors",
        "warnings",
    ])?;

    wtr.write_record([
        record.invoice_number.clone().unwrap_or_default(),
        record.invoice_date.clone().unwrap_or_default(),
        record.vendor_name.clone().unwrap_or_default(),
        decimal_field(record.subtotal),
        decimal_field(record.discount_amount),
        decimal_field(record.tax),
        decimal_field(record.total_amount),
        record.currency.clone().unwrap_or_default(),
        processed.status.as_str().to_string(),
        processed.validation.errors.len().to_string(),
        processed.validation.warnings.len().to_string(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn decimal_field(value: Option<rust_decimal::Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn format_text(processed: &ProcessedInvoice) -> String {
    let record = &processed.record;
    let mut output = String::new();
    let unknown = "(unknown)".to_string();

    output.push_str(&format!(
        "Invoice: {}\n",
        record.invoice_number.as_ref().unwrap_or(&unknown)
    ));
    output.push_str(&format!(
        "Vendor:  {}\n",
        record.vendor_name.as_ref().unwrap_or(&unknown)
    ));
    output.push_str(&format!(
        "Date:    {}\n",
        record.invoice_date.as_ref().unwrap_or(&unknown)
    ));
    output.push('\n');

    if !record.line_items.is_empty() {
        output.push_str("Line items:\n");
        for item in &record.line_items {
            output.push_str(&format!(
                "  {} x {} @ {} = {}\n",
                item.product_name.as_ref().unwrap_or(&unknown),
                decimal_field(item.quantity),
                decimal_field(item.unit_price),
                decimal_field(item.amount),
            ));
        }
        output.push('\n');
    }

    output.push_str("Summary:\n");
    output.push_str(&format!("  Subtotal: {}\n", decimal_field(record.subtotal)));
    if record.discount_amount.is_some() {
        output.push_str(&format!(
            "  Discount: {}\n",
            decimal_field(record.discount_amount)
        ));
    }
    output.push_str(&format!("  Tax:      {}\n", decimal_field(record.tax)));
    output.push_str(&format!(
        "  Total:    {} {}\n",
        decimal_field(record.total_amount),
        record.currency.clone().unwrap_or_default()
    ));
    output.push('\n');

    output.push_str(&format!("Status: {}\n", processed.status));
    output.push_str(&format!(
        "Validation: {} errors, {} warnings\n",
        processed.validation.errors.len(),
        processed.validation.warnings.len()
    ));

    output
}
