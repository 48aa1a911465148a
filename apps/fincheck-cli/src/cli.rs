//! CLI argument definitions
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check-digit` | Compute the check digit for an identifier body |
//! | `validate` | Validate complete identifiers |
//! | `find` | Extract identifiers from a file or stdin |
//! | `describe` | Break down a CUSIP and resolve its metadata |
//! | `to-isin` | Derive the ISIN for a CUSIP |
//!
//! # Examples
//!
//! ```bash
//! fincheck check-digit cusip 93114210
//! fincheck validate isin US0378331005 US0378331006
//! fincheck find --family cusip --family isin filing.txt
//! fincheck describe 037833100 --metadata securities.csv --json
//! fincheck to-isin 98986X109 --country US
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fincheck_identifiers::IdentifierFamily;

/// Check digits and extraction for CUSIP, ISIN, SEDOL and ABA numbers
#[derive(Debug, Parser)]
#[command(name = "fincheck", author, version, about)]
pub struct Cli {
    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Strip whitespace and uppercase inputs before checking them
    #[arg(long, global = true)]
    pub normalize: bool,

    /// Config file (defaults to $FINCHECK_CONFIG or the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the check digit for an identifier body
    CheckDigit {
        /// cusip, isin, sedol or aba
        family: IdentifierFamily,
        /// Identifier without its check digit
        body: String,
    },

    /// Validate complete identifiers; exits 1 if any fail
    Validate {
        /// cusip, isin, sedol or aba
        family: IdentifierFamily,
        #[arg(required = true)]
        candidates: Vec<String>,
    },

    /// Extract checksum-valid identifiers from text
    Find {
        /// Family to search for; repeat for several (defaults to config)
        #[arg(short, long = "family")]
        families: Vec<IdentifierFamily>,
        /// Input file; `-` or omitted reads stdin
        input: Option<PathBuf>,
    },

    /// Break down a CUSIP and resolve issuer metadata
    Describe {
        cusip: String,
        /// CSV metadata dataset (key,name,security_type)
        #[arg(long, value_name = "PATH")]
        metadata: Option<PathBuf>,
    },

    /// Derive the ISIN for a CUSIP
    ToIsin {
        cusip: String,
        /// Two-letter country code (defaults to config, then US)
        #[arg(long)]
        country: Option<String>,
    },
}
