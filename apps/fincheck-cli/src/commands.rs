//! Command implementations
//!
//! Every command writes to the given sink so it can be exercised without a
//! terminal.

use std::io::{Read, Write};
use std::path::Path;

use fincheck_identifiers::{
    extract_all, family_check_digit, normalize_candidate, routing_symbol, validate, Cusip,
    IdentifierFamily, MetadataTable,
};
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::config::FincheckConfig;
use crate::error::CliError;

/// Settings shared by every command after flags and config are merged
#[derive(Debug, Clone)]
pub struct Context {
    pub json: bool,
    pub normalize: bool,
    pub config: FincheckConfig,
}

impl Context {
    pub fn new(cli: &Cli, config: FincheckConfig) -> Self {
        Self {
            json: cli.json,
            normalize: cli.normalize || config.normalize,
            config,
        }
    }

    fn prepare(&self, input: &str) -> String {
        if self.normalize {
            normalize_candidate(input)
        } else {
            input.to_string()
        }
    }
}

pub fn run(cli: &Cli, ctx: &Context, out: &mut dyn Write) -> Result<(), CliError> {
    match &cli.command {
        Command::CheckDigit { family, body } => check_digit(ctx, *family, body, out),
        Command::Validate { family, candidates } => validate_all(ctx, *family, candidates, out),
        Command::Find { families, input } => {
            let text = read_input(input.as_deref())?;
            find(ctx, families, &text, out)
        }
        Command::Describe { cusip, metadata } => describe(ctx, cusip, metadata.as_deref(), out),
        Command::ToIsin { cusip, country } => to_isin(ctx, cusip, country.as_deref(), out),
    }
}

#[derive(Debug, Serialize)]
struct CheckDigitReport<'a> {
    family: IdentifierFamily,
    body: &'a str,
    check_digit: u8,
    identifier: String,
}

pub fn check_digit(
    ctx: &Context,
    family: IdentifierFamily,
    body: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let body = ctx.prepare(body);
    let digit = family_check_digit(family, &body)?;

    if ctx.json {
        let report = CheckDigitReport {
            family,
            body: &body,
            check_digit: digit.value(),
            identifier: format!("{}{}", body, digit),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", digit)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ValidationReport {
    candidate: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    routing_symbol: Option<&'static str>,
}

pub fn validate_all(
    ctx: &Context,
    family: IdentifierFamily,
    candidates: &[String],
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let reports: Vec<ValidationReport> = candidates
        .iter()
        .map(|raw| {
            let candidate = ctx.prepare(raw);
            match validate(family, &candidate) {
                Ok(id) => ValidationReport {
                    routing_symbol: routing_symbol(&id).map(|s| s.description()),
                    candidate,
                    valid: true,
                    error: None,
                },
                Err(e) => ValidationReport {
                    candidate,
                    valid: false,
                    error: Some(e.to_string()),
                    routing_symbol: None,
                },
            }
        })
        .collect();

    if ctx.json {
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
    } else {
        for report in &reports {
            match (&report.error, report.routing_symbol) {
                (Some(error), _) => writeln!(out, "INVALID {}: {}", report.candidate, error)?,
                (None, Some(symbol)) => writeln!(out, "VALID   {} ({})", report.candidate, symbol)?,
                (None, None) => writeln!(out, "VALID   {}", report.candidate)?,
            }
        }
    }

    let failed = reports.iter().filter(|r| !r.valid).count();
    if failed > 0 {
        return Err(CliError::Invalid {
            count: failed,
            total: reports.len(),
        });
    }
    Ok(())
}

pub fn find(
    ctx: &Context,
    families: &[IdentifierFamily],
    text: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let families = if families.is_empty() {
        ctx.config.families.as_slice()
    } else {
        families
    };
    let hits = extract_all(text, families);
    tracing::debug!(hits = hits.len(), ?families, "extraction finished");

    if ctx.json {
        serde_json::to_writer_pretty(&mut *out, &hits)?;
        writeln!(out)?;
    } else {
        for hit in &hits {
            writeln!(out, "{}\t{}\t{}", hit.family, hit.value, hit.start_index)?;
        }
    }
    Ok(())
}

pub fn describe(
    ctx: &Context,
    cusip: &str,
    metadata: Option<&Path>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cusip = ctx.prepare(cusip);
    let metadata_path = metadata.or(ctx.config.metadata_path.as_deref());

    let record = match metadata_path {
        Some(path) => {
            let table = MetadataTable::from_path(path)?;
            Cusip::with_lookup(&cusip, &table)?
        }
        None => Cusip::parse(&cusip)?,
    };

    if ctx.json {
        serde_json::to_writer_pretty(&mut *out, &record)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "CUSIP:         {}", record.id())?;
    writeln!(out, "Issuer code:   {}", record.issuer())?;
    writeln!(out, "Issue code:    {} ({})", record.issue(), record.issue_type())?;
    writeln!(out, "Check digit:   {}", record.check_digit())?;
    writeln!(out, "Name:          {}", record.name().unwrap_or("-"))?;
    writeln!(out, "Security type: {}", record.security_type().unwrap_or("-"))?;
    Ok(())
}

pub fn to_isin(
    ctx: &Context,
    cusip: &str,
    country: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cusip = ctx.prepare(cusip);
    let country = ctx.prepare(country.unwrap_or(ctx.config.default_country.as_str()));
    let isin = Cusip::parse(&cusip)?.to_isin(&country)?;

    if ctx.json {
        serde_json::to_writer_pretty(
            &mut *out,
            &serde_json::json!({ "cusip": cusip, "country": country, "isin": isin }),
        )?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", isin)?;
    }
    Ok(())
}

/// Read `find` input; invalid UTF-8 is replaced rather than rejected
fn read_input(input: Option<&Path>) -> Result<String, CliError> {
    let bytes = match input {
        Some(path) if path != Path::new("-") => std::fs::read(path)?,
        _ => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            bytes
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
