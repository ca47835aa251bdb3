//! Free-text date parsing.
//!
//! Parsing sits behind [`DateParser`] so a host can plug in its own
//! natural-language parser. [`NaturalDateParser`] is the built-in one.

mod absolute;
mod natural;

use chrono::{DateTime, Local};

pub use natural::NaturalDateParser;

/// A successfully parsed date expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    pub datetime: DateTime<Local>,
    /// What the parser understood, e.g. "Tomorrow (start of day)".
    pub description: String,
}

impl ParsedDate {
    pub(crate) fn new(datetime: DateTime<Local>, description: impl Into<String>) -> Self {
        Self {
            datetime,
            description: description.into(),
        }
    }
}

/// Turns user input into an instant.
///
/// Relative expressions must be resolved against `now`, not the wall clock,
/// so results are reproducible.
pub trait DateParser: Send + Sync {
    fn parse(&self, input: &str, now: &DateTime<Local>) -> Option<ParsedDate>;
}
