//! CLI: enumerate a directory tree and print matches, plain or as JSON.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::warn;
use serde::Serialize;
use std::path::PathBuf;

use crate::pattern::PATTERN_DELIMITER;
use crate::types::{FileRecord, SkipLog, WalkOptions};
use crate::utils::setup_logging;
use crate::walk::Walker;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
    pub const FILTER: &'static str = "*";
}

/// Resilient directory-tree enumeration with multi-pattern glob filters.
#[derive(Clone, Parser)]
#[command(name = "sweepdir")]
#[command(about = "List files under a directory; unreadable subtrees are reported, not fatal.")]
pub struct Cli {
    /// Directory to enumerate. Default: current directory.
    #[arg(value_name = "DIR", default_value = DefaultArgs::DIR)]
    pub dir: PathBuf,

    /// Filter string: one or more glob patterns, delimiter-separated
    /// (e.g. "*.txt|*.log").
    #[arg(long, short = 'f', default_value = DefaultArgs::FILTER)]
    pub filter: String,

    /// Descend into subdirectories.
    #[arg(long, short = 'r')]
    pub recursive: bool,

    /// Character separating patterns in the filter string.
    #[arg(long, short = 'd', default_value_t = PATTERN_DELIMITER)]
    pub delimiter: char,

    /// Emit results as a JSON document instead of one path per line.
    #[arg(long)]
    pub json: bool,

    /// Verbose output: debug logging plus per-path skip reasons.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: &'a [FileRecord],
    skipped: &'a SkipLog,
}

/// Run one walk per the parsed arguments and print the results.
pub fn handle_run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose);
    let options = WalkOptions {
        recursive: cli.recursive,
        delimiter: cli.delimiter,
    };
    let walker = Walker::with_source(
        crate::source::StdSource::new(),
        &cli.dir,
        &cli.filter,
        &options,
    )?;

    if cli.json {
        let (files, skipped) = walker.collect_all();
        let report = JsonReport {
            files: &files,
            skipped: &skipped,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // Plain mode streams: print each match as the walk produces it.
    let mut walker = walker;
    let mut count = 0_usize;
    for record in &mut walker {
        println!("{}", record.full_path.display());
        count += 1;
    }
    let skipped = walker.into_skip_log();
    report_skipped(&skipped, cli.verbose);
    eprintln!("{}", format!("{count} file(s)").bold());
    Ok(())
}

fn report_skipped(skipped: &SkipLog, verbose: bool) {
    if skipped.is_empty() {
        return;
    }
    warn!(
        "Skipped {} director{} due to permission or access errors",
        skipped.len(),
        if skipped.len() == 1 { "y" } else { "ies" }
    );
    if verbose {
        for entry in skipped {
            eprintln!("  skipped: {} ({})", entry.path.display(), entry.reason);
        }
    }
}
