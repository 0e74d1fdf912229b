//! Main entry point for the pfsverify CLI application.
//!
//! This binary verifies PFS0/NSP archives from both the local filesystem
//! and remote HTTP URLs, printing a per-file report and mapping the verdict
//! to the process exit status.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use pfsverify::{
    ArchiveOutcome, Cli, HttpRangeReader, LocalFileReader, PfsError, PfsVerifier, ReadAt,
    VerificationReport,
};

/// Application entry point.
///
/// Parses command-line arguments and dispatches to the appropriate reader
/// based on whether the input is a local file or HTTP URL. Errors surface
/// through `main`'s `Result` and exit with status 1.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();

    if cli.is_http_url() {
        let reader = HttpRangeReader::new(cli.file.clone())
            .await
            .with_context(|| format!("Failed to open {}", cli.file))?;
        let transferred_before = reader.transferred_bytes();
        let reader = Arc::new(reader);

        let code = process_archive(reader.clone(), &cli).await?;

        // Display network transfer statistics for HTTP sources
        if !cli.is_quiet() {
            let transferred = reader.transferred_bytes() - transferred_before;
            eprintln!("\nTotal bytes transferred: {}", format_size(transferred));
        }

        Ok(code)
    } else {
        let reader = LocalFileReader::new(Path::new(&cli.file))
            .with_context(|| format!("Failed to open {}", cli.file))?;
        process_archive(Arc::new(reader), &cli).await
    }
}

/// Log to stderr so the report on stdout stays clean.
///
/// Verbosity comes from `RUST_LOG` and defaults to warnings only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Verify or list an archive based on CLI options.
///
/// # Returns
///
/// The exit status for the verdict, or an error if the archive could not
/// be parsed.
async fn process_archive<R: ReadAt + 'static>(reader: Arc<R>, cli: &Cli) -> Result<ExitCode> {
    let verifier = PfsVerifier::new(reader);

    if cli.list {
        let files = verifier
            .list_files()
            .await
            .map_err(|e| describe_error(e, &cli.file))?;
        for file in &files {
            println!("{}", file.name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let report = verifier
        .verify()
        .await
        .map_err(|e| describe_error(e, &cli.file))?;

    if !cli.is_quiet() {
        print_report(&report);
    }
    println!("NSP file {}", report.outcome);

    Ok(exit_code(report.outcome))
}

/// Print the archive layout and one line per entry.
fn print_report(report: &VerificationReport) {
    println!("File size: {:08X}", report.total_size);
    println!();

    println!("Number of files: {}", report.header.entry_count);
    println!(
        "String Table offset: {:08X}",
        report.layout.string_table_offset
    );
    println!("Data offset: {:08X}", report.layout.data_offset);
    println!();

    for entry in &report.entries {
        println!(
            "{}: {:08X} - {:08X} [{}]",
            entry.name, entry.start, entry.end, entry.status
        );
    }
    println!();
}

/// Map the archive verdict to the process exit status.
fn exit_code(outcome: ArchiveOutcome) -> ExitCode {
    match outcome {
        ArchiveOutcome::Verified => ExitCode::SUCCESS,
        ArchiveOutcome::Incomplete => ExitCode::from(2),
        ArchiveOutcome::ExtraData => ExitCode::from(3),
    }
}

/// Turn a parse failure into a user-facing error naming the archive.
fn describe_error(err: PfsError, file: &str) -> anyhow::Error {
    match err {
        PfsError::Format(reason) => anyhow!("Not a valid NSP file: {} ({})", file, reason),
        PfsError::Io(io_err) => anyhow!("I/O error while reading '{}': {}", file, io_err),
        other => anyhow::Error::from(other).context(format!("Corrupt NSP file '{}'", file)),
    }
}

/// Format a byte size into a human-readable string.
///
/// Automatically selects the appropriate unit (bytes, KB, MB, GB)
/// based on the size magnitude.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
