//! Interactive front-end classification.
//!
//! Given the text typed so far, decides whether it is one complete statement,
//! a valid prefix that needs more input, or a syntax error that no further
//! input can repair.

mod driver;
pub mod error;
pub mod outcome;
pub mod session;

pub use driver::{MAX_NESTING_CEILING, PARSE_STACK_BYTES};
pub use error::{ClassifyError, InternalFault};
pub use outcome::{ClassificationResult, ParseOutcome, Verdict, classify_outcome};
pub use session::{Classification, ClassifyOptions, Session, SourceFragment, classify};
