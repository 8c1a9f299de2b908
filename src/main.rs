//! `gifront`: interactive front-end and fragment classifier for a Go subset.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gifront::front::{Classification, ClassifyError, ClassifyOptions, Session, SourceFragment};
use gifront::repl::{EchoEvaluator, Repl, ReplConfig, Verbosity};

const EXIT_SYNTAX_ERROR: i32 = 1;
const EXIT_NEED_MORE_INPUT: i32 = 2;
const EXIT_FAULT: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "gifront", version, about = "Go-subset statement classifier and REPL")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Token budget for one classification.
    #[arg(long, global = true, default_value_t = ClassifyOptions::default().max_tokens)]
    max_tokens: usize,

    /// Nesting budget for one classification.
    #[arg(long, global = true, default_value_t = ClassifyOptions::default().max_nesting)]
    max_nesting: usize,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Read statements interactively from stdin.
    Repl {
        /// Suppress the banner and prompts.
        #[arg(long)]
        quiet: bool,
    },
    /// Classify a file (or stdin) as one fragment.
    Classify {
        /// Source file; stdin when omitted.
        file: Option<PathBuf>,

        /// Emit the classification as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ClassifyOptions {
        max_tokens: cli.max_tokens,
        max_nesting: cli.max_nesting,
        ..ClassifyOptions::default()
    };

    let status = match cli.command {
        Mode::Repl { quiet } => run_repl(options, quiet, cli.verbose).map(|()| 0),
        Mode::Classify { file, json } => run_classify(options, file, json),
    };

    match status {
        Ok(code) => process::exit(code),
        Err(error) => {
            eprintln!("error: {error:#}");
            process::exit(EXIT_FAULT);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "gifront=warn",
        1 => "gifront=debug",
        _ => "gifront=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run_repl(options: ClassifyOptions, quiet: bool, verbose: u8) -> Result<()> {
    let config = ReplConfig {
        quiet,
        verbosity: Verbosity::from_count(verbose),
        classify: options,
        ..ReplConfig::default()
    };
    let mut repl = Repl::new(config, EchoEvaluator);

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl.run(stdin.lock(), stdout.lock())
        .context("repl session failed")?;
    Ok(())
}

fn run_classify(options: ClassifyOptions, file: Option<PathBuf>, json: bool) -> Result<i32> {
    let bytes = match &file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .context("reading stdin")?;
            buffer
        }
    };
    debug!(bytes = bytes.len(), "classifying input");

    let session = Session::new(options);
    let classification =
        SourceFragment::from_bytes(&bytes).and_then(|fragment| session.classify(&fragment));

    let mut stdout = io::stdout().lock();
    match classification {
        Ok(classification) => {
            report_classification(&mut stdout, &classification, json)?;
            Ok(exit_code(&classification))
        }
        Err(error) => {
            report_error(&mut stdout, &error, json)?;
            Ok(EXIT_FAULT)
        }
    }
}

fn exit_code(classification: &Classification) -> i32 {
    if classification.is_syntax_error() {
        EXIT_SYNTAX_ERROR
    } else if classification.is_eof() {
        EXIT_NEED_MORE_INPUT
    } else {
        0
    }
}

fn report_classification(
    out: &mut impl Write,
    classification: &Classification,
    json: bool,
) -> Result<()> {
    if json {
        let document = serde_json::to_string_pretty(classification)
            .context("serializing classification")?;
        writeln!(out, "{document}")?;
        return Ok(());
    }

    match (classification.statement(), classification.pending_reason()) {
        (Some(statement), _) => writeln!(out, "{}: {statement}", classification.verdict())?,
        (None, Some(reason)) => {
            writeln!(out, "{}: {}", classification.verdict(), reason.describe())?
        }
        (None, None) => writeln!(out, "{}", classification.verdict())?,
    }
    for diagnostic in classification.diagnostics() {
        writeln!(out, "  {diagnostic}")?;
    }
    Ok(())
}

fn report_error(out: &mut impl Write, error: &ClassifyError, json: bool) -> Result<()> {
    if json {
        let kind = if error.is_malformed_input() {
            "malformed_input"
        } else {
            "internal_fault"
        };
        let document = json!({
            "error": kind,
            "message": error.to_string(),
            "diagnostic": error.diagnostic(),
        });
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&document).context("serializing error")?
        )?;
        return Ok(());
    }
    writeln!(out, "error: {error}")?;
    Ok(())
}

