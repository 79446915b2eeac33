//! Command implementations.
//!
//! Every command writes exactly one JSON document to `out`; logs go through
//! `tracing` to stderr.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use anyhow::{bail, Context};
use docscan_core::extraction::{process_document, CommandExtractor, DocumentInput};
use docscan_core::validation::{evaluate, DocumentType, ErrorMode, ValidationReport};
use docscan_core::{CoreError, ExtractedRecord, SchemaRegistry};
use serde_json::{json, Value};

use crate::args::Command;
use crate::config::CliConfig;

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// The document failed validation.
    Rejected,
}

impl CommandOutcome {
    /// Process exit code: `0` on success, `2` on rejection.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Rejected => 2,
        }
    }
}

/// Dispatch a parsed command.
pub async fn run<W: Write>(
    command: Command,
    config: &CliConfig,
    out: &mut W,
) -> anyhow::Result<CommandOutcome> {
    match command {
        Command::Validate {
            document_type,
            input,
            collect_all,
        } => match input {
            Some(path) => {
                let file = File::open(&path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                validate_record(&document_type, BufReader::new(file), collect_all, out)
            }
            None => validate_record(&document_type, io::stdin().lock(), collect_all, out),
        },
        Command::Extract {
            document_type,
            file,
            extractor,
            timeout_secs,
        } => {
            let command_line = extractor
                .or_else(|| config.extractor_cmd.clone())
                .context("no extractor configured; pass --extractor or set DOCSCAN_EXTRACTOR_CMD")?;
            let Some(extractor) = CommandExtractor::from_command_line(&command_line) else {
                bail!("extractor command line is empty");
            };
            let timeout = timeout_secs
                .map(std::time::Duration::from_secs)
                .unwrap_or(config.extractor_timeout);
            extract_document(&document_type, &file, &extractor.with_timeout(timeout), out).await
        }
        Command::Schemas { document_type } => print_schemas(document_type.as_deref(), out),
    }
}

/// Validate a JSON field map read from `reader` and print the report.
pub fn validate_record<R: Read, W: Write>(
    tag: &str,
    reader: R,
    collect_all: bool,
    out: &mut W,
) -> anyhow::Result<CommandOutcome> {
    let document_type: DocumentType = tag.parse()?;
    let schema = SchemaRegistry::builtin()
        .get(&document_type)
        .ok_or_else(|| CoreError::UnknownDocumentType(tag.to_string()))?;
    let schema = if collect_all {
        schema.with_mode(ErrorMode::CollectAll)
    } else {
        schema.clone()
    };

    let value: Value = serde_json::from_reader(reader).context("input is not valid JSON")?;
    let record = ExtractedRecord::from_json(value)?;

    let outcome = evaluate(&schema, &record);
    tracing::info!(
        document_type = %document_type,
        accepted = outcome.is_accepted(),
        "Record validated",
    );

    write_json(out, &ValidationReport::new(&schema, &outcome))?;
    Ok(if outcome.is_accepted() {
        CommandOutcome::Success
    } else {
        CommandOutcome::Rejected
    })
}

/// Run `extractor` on the document at `path`, validate, and print the report.
///
/// A rejection prints exactly what [`validate_record`] prints for the same
/// record. An acceptance adds the request id and the extracted fields.
pub async fn extract_document<W: Write>(
    tag: &str,
    path: &Path,
    extractor: &CommandExtractor,
    out: &mut W,
) -> anyhow::Result<CommandOutcome> {
    let document_type: DocumentType = tag.parse()?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let input = DocumentInput::new(document_type, file_name, mime_type_for(path), bytes);

    let processed = process_document(extractor, SchemaRegistry::builtin(), &input).await?;
    if !processed.is_accepted() {
        write_json(out, &processed.report)?;
        return Ok(CommandOutcome::Rejected);
    }

    let mut body = serde_json::to_value(&processed.report).context("failed to encode report")?;
    body["request_id"] = json!(input.request_id);
    body["fields"] = json!(processed.record);
    write_json(out, &body)?;
    Ok(CommandOutcome::Success)
}

/// Print every registered schema, or only the one for `tag`.
pub fn print_schemas<W: Write>(tag: Option<&str>, out: &mut W) -> anyhow::Result<CommandOutcome> {
    let registry = SchemaRegistry::builtin();
    match tag {
        Some(tag) => {
            let document_type: DocumentType = tag.parse()?;
            let schema = registry
                .get(&document_type)
                .ok_or_else(|| CoreError::UnknownDocumentType(tag.to_string()))?;
            write_json(out, schema)?;
        }
        None => {
            let schemas: Vec<_> = registry.schemas().collect();
            write_json(out, &schemas)?;
        }
    }
    Ok(CommandOutcome::Success)
}

/// Whether `err` comes from bad input rather than configuration or an
/// upstream failure.
pub fn is_input_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CoreError>()
        .is_some_and(CoreError::is_client_error)
}

/// Guess a MIME type from the file extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to write output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}
