//! Speculative parse driver.
//!
//! Runs the primary top-level parse with a diagnostic collector attached and,
//! after a syntax error, keeps going in recovery mode so later problems are
//! reported too. Only the primary parse decides the verdict.

use std::thread;

use tracing::debug;

use crate::front::error::{ClassifyError, InternalFault};
use crate::parser::{DiagnosticCollector, ParseOptions, ParseStep, Parser, TopLevelReport};

/// Stack reserved for the parse thread.
///
/// Sized so that [`MAX_NESTING_CEILING`] levels of the deepest grammar path
/// fit in an unoptimized build.
pub const PARSE_STACK_BYTES: usize = 64 * 1024 * 1024;

/// Upper bound applied to any configured nesting budget.
pub const MAX_NESTING_CEILING: usize = 1024;

/// Runs one parse attempt over `input`, collecting diagnostics into `collector`.
///
/// The grammar runs on its own thread with [`PARSE_STACK_BYTES`] of stack, so
/// the nesting budget fires before the stack runs out whatever thread the
/// caller is on. A panic in the grammar comes back as an internal fault.
pub(crate) fn run(
    input: &str,
    options: ParseOptions,
    collector: &mut DiagnosticCollector,
) -> Result<TopLevelReport, ClassifyError> {
    collector.reset();
    let options = ParseOptions {
        max_nesting: options.max_nesting.min(MAX_NESTING_CEILING),
        ..options
    };

    thread::scope(|scope| {
        let worker = thread::Builder::new()
            .name("gifront-parse".to_string())
            .stack_size(PARSE_STACK_BYTES)
            .spawn_scoped(scope, move || attempt(input, options, collector))
            .map_err(|error| InternalFault::ParseThread {
                message: error.to_string(),
            })?;

        match worker.join() {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                debug!(%message, "grammar panicked");
                Err(InternalFault::Panic { message }.into())
            }
        }
    })
}

fn attempt(
    input: &str,
    options: ParseOptions,
    collector: &mut DiagnosticCollector,
) -> Result<TopLevelReport, ClassifyError> {
    let mut parser = Parser::for_input(input, options, collector);
    let report = parser.parse_top_level()?;

    if matches!(report.step, ParseStep::SyntaxError(_)) {
        match parser.recover() {
            Ok(extra) => debug!(extra, "recovery finished"),
            Err(error) => debug!(%error, "recovery stopped"),
        }
    }

    debug!(
        input_len = input.len(),
        tokens = report.tokens_scanned,
        observed_end_of_input = report.observed_end_of_input,
        step = ?report.step,
        "primary parse finished"
    );
    Ok(report)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "unknown panic payload".to_string()
}
