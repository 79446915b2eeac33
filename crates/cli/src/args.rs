//! CLI argument definitions using clap
//!
//! Commands:
//! - docscan validate <TYPE> [--input <PATH>] [--collect-all]
//! - docscan extract <TYPE> <FILE> [--extractor <CMD>] [--timeout-secs <N>]
//! - docscan schemas [TYPE]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Validate fields extracted from scanned identity documents
#[derive(Parser, Debug)]
#[command(name = "docscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate an extracted field map (JSON object)
    Validate {
        /// Document type tag, e.g. `aadhaar` or `id_card:ration_card`
        document_type: String,

        /// JSON file to read; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Report every failing field instead of the schema's own mode
        #[arg(long)]
        collect_all: bool,
    },

    /// Run the configured extractor on a document, then validate its output
    Extract {
        /// Document type tag
        document_type: String,

        /// Scanned document (PDF or image)
        file: PathBuf,

        /// Extractor command line; overrides `DOCSCAN_EXTRACTOR_CMD`
        #[arg(long)]
        extractor: Option<String>,

        /// Extractor timeout in seconds; overrides `DOCSCAN_EXTRACTOR_TIMEOUT_SECS`
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Print registered document schemas
    Schemas {
        /// Only print the schema for this document type
        document_type: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_validate_flags() {
        let cli = Cli::try_parse_from([
            "docscan",
            "validate",
            "income_certificate",
            "--input",
            "record.json",
            "--collect-all",
        ])
        .expect("parse");
        match cli.command {
            Command::Validate {
                document_type,
                input,
                collect_all,
            } => {
                assert_eq!(document_type, "income_certificate");
                assert_eq!(input, Some(PathBuf::from("record.json")));
                assert!(collect_all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn extract_requires_file() {
        assert!(Cli::try_parse_from(["docscan", "extract", "aadhaar"]).is_err());
    }

    #[test]
    fn schemas_type_is_optional() {
        let cli = Cli::try_parse_from(["docscan", "schemas"]).expect("parse");
        assert!(matches!(cli.command, Command::Schemas { document_type: None }));
    }
}
