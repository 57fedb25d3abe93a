//! Report formatting and printing utilities.
//!
//! Output is cargo-style. Kept apart from the commands so the crate can be
//! used as a library without printing anything.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    BuildSummary, CommandResult, CommandSummary, InitSummary, MissingKey, ResolveSummary,
};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result to stdout.
pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

/// Print a command result to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Build(summary) => print_build(summary, verbose, writer),
        CommandSummary::Resolve(summary) => print_resolve(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn print_build<W: Write>(summary: &BuildSummary, verbose: bool, writer: &mut W) {
    let mut missing = summary.missing.clone();
    missing.sort();

    for item in &missing {
        print_missing_key(item, summary.strict, writer);
    }

    if verbose {
        let config = if summary.from_file {
            CONFIG_FILE_NAME.to_string()
        } else {
            format!("using defaults (no {} found)", CONFIG_FILE_NAME)
        };
        let _ = writeln!(writer, "{} {}", "config:".bold(), config);
        let _ = writeln!(
            writer,
            "{} {}",
            "locales:".bold(),
            if summary.locales.is_empty() {
                "(none)".dimmed().to_string()
            } else {
                summary.locales.join(", ")
            }
        );
    }

    let checked = format!(
        "Scanned {} source {}, {} with translation calls, {} {}",
        summary.source_files,
        plural(summary.source_files, "file", "files"),
        summary.files_with_keys,
        summary.key_count,
        plural(summary.key_count, "key", "keys"),
    );

    if missing.is_empty() {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), checked.green());
    } else if summary.strict {
        let _ = writeln!(
            writer,
            "{} {} ({} missing {})",
            FAILURE_MARK.red(),
            checked.red(),
            missing.len(),
            plural(missing.len(), "key", "keys")
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} ({} missing {})",
            SUCCESS_MARK.yellow(),
            checked.yellow(),
            missing.len(),
            plural(missing.len(), "key", "keys")
        );
    }

    if let Some(out) = &summary.out {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Wrote {}", out.display()).green()
        );
    }
}

fn print_missing_key<W: Write>(item: &MissingKey, strict: bool, writer: &mut W) {
    let severity = if strict {
        "error".bold().red()
    } else {
        "warning".bold().yellow()
    };
    let _ = writeln!(
        writer,
        "{}: missing translation key \"{}\"",
        severity, item.key
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), item.source_id);
}

fn print_resolve<W: Write>(summary: &ResolveSummary, writer: &mut W) {
    let _ = writeln!(writer, "{}", summary.value);
    if summary.fell_back {
        let _ = writeln!(
            io::stderr().lock(),
            "{} no message for \"{}\" in locale \"{}\"",
            "warning:".bold().yellow(),
            summary.key,
            summary.locale
        );
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    match &summary.error {
        Some(error) => {
            let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), error.red());
        }
        None => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", summary.path.display()).green()
            );
        }
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
