//! Core types for dtstamp.
//!
//! These are the values handed back to a host: one display record per
//! timestamp style, grouped in a [`Conversion`].

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::styles::{IconKind, Modifier};

/// One row a launcher shows: preview text, subtitle, icon and the
/// markup copied when the row is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampRecord {
    /// Stable identifier within a result list.
    pub id: String,
    /// `None` for notice rows that don't carry markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Modifier>,
    pub text: String,
    pub subtext: String,
    pub icon: IconKind,
    /// Clipboard payload, e.g. `<t:1630123728:f>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipboard: Option<String>,
}

impl TimestampRecord {
    /// A row without markup, e.g. an error message.
    #[must_use]
    pub fn notice(text: impl Into<String>, subtext: impl Into<String>) -> Self {
        Self {
            id: "error".to_string(),
            modifier: None,
            text: text.into(),
            subtext: subtext.into(),
            icon: IconKind::Time,
            clipboard: None,
        }
    }

    /// The row shown when the query could not be parsed.
    #[must_use]
    pub fn parse_failure(query: &str) -> Self {
        Self::notice(format!("Couldn't parse date: {}", query), "Please try again")
    }
}

/// Settings that shape record output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Table used to preview the absolute styles.
    pub locale: Locale,
    /// Restrict output to these styles. Empty means all of them.
    pub only: Vec<Modifier>,
}

impl ConversionConfig {
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_only(mut self, only: Vec<Modifier>) -> Self {
        self.only = only;
        self
    }

    pub(crate) fn includes(&self, modifier: Modifier) -> bool {
        self.only.is_empty() || self.only.contains(&modifier)
    }
}

/// Complete result for a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    pub input: String,
    /// What the parser understood the input as.
    pub description: String,
    pub target: DateTime<Local>,
    pub unix_seconds: i64,
    pub records: Vec<TimestampRecord>,
}

impl Conversion {
    /// The record for one style, if it was produced.
    #[must_use]
    pub fn record(&self, modifier: Modifier) -> Option<&TimestampRecord> {
        self.records.iter().find(|r| r.modifier == Some(modifier))
    }
}
