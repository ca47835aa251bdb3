//! dtstamp core
//!
//! Turns a date expression such as `tomorrow 3pm` into Discord timestamp
//! markup (`<t:1700000000:R>`) for every display style, with a preview of
//! how each style renders.
//!
//! # Quick Start
//!
//! ```
//! use dtstamp_core::{Dtstamp, Modifier};
//!
//! let dts = Dtstamp::new();
//! let conversion = dts.convert("1704067200").unwrap();
//!
//! assert_eq!(conversion.unix_seconds, 1704067200);
//! let relative = conversion.record(Modifier::Relative).unwrap();
//! assert_eq!(relative.clipboard.as_deref(), Some("<t:1704067200:R>"));
//! ```
//!
//! # Relative Time
//!
//! ```
//! use chrono::{TimeDelta, Utc};
//! use dtstamp_core::relative_time;
//!
//! let now = Utc::now();
//! assert_eq!(relative_time(&now, &(now - TimeDelta::days(3))), "3 days ago");
//! ```

pub mod error;
pub mod locale;
pub mod parse;
pub mod relative;
pub mod styles;
pub mod types;

pub use error::QueryError;
pub use locale::{Locale, LocaleFormats};
pub use parse::{DateParser, NaturalDateParser, ParsedDate};
pub use relative::{relative_time, Direction, Phrase, TimeUnit};
pub use styles::{IconKind, Modifier, Rendering, TimestampStyle, STYLES};
pub use types::*;

use chrono::{DateTime, Local};
use tracing::{debug, trace};

/// Main entry point - a configured converter instance.
pub struct Dtstamp {
    parser: Box<dyn DateParser>,
    config: ConversionConfig,
}

impl Default for Dtstamp {
    fn default() -> Self {
        Self::new()
    }
}

impl Dtstamp {
    /// Create a converter with the built-in parser and default config.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: Box::new(NaturalDateParser),
            config: ConversionConfig::default(),
        }
    }

    /// Create a converter with custom configuration.
    #[must_use]
    pub fn with_config(config: ConversionConfig) -> Self {
        Self {
            parser: Box::new(NaturalDateParser),
            config,
        }
    }

    /// Replace the date parser.
    #[must_use]
    pub fn with_parser(mut self, parser: impl DateParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert a query relative to the current time.
    pub fn convert(&self, query: &str) -> Result<Conversion, QueryError> {
        self.convert_at(query, Local::now())
    }

    /// Convert a query relative to `now`.
    ///
    /// An empty query converts `now` itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Local, TimeZone};
    /// use dtstamp_core::{Dtstamp, Modifier};
    ///
    /// let now = Local.with_ymd_and_hms(2024, 6, 12, 14, 30, 0).unwrap();
    /// let conversion = Dtstamp::new().convert_at("in 3 weeks", now).unwrap();
    ///
    /// let relative = conversion.record(Modifier::Relative).unwrap();
    /// assert_eq!(relative.text, "in 3 weeks");
    /// ```
    pub fn convert_at(&self, query: &str, now: DateTime<Local>) -> Result<Conversion, QueryError> {
        let trimmed = query.trim();

        let (target, description) = if trimmed.is_empty() {
            (now, "Current time".to_string())
        } else {
            debug!(query = trimmed, "parsing query as date");
            let parsed = self
                .parser
                .parse(trimmed, &now)
                .ok_or_else(|| QueryError::Unparseable(trimmed.to_string()))?;
            (parsed.datetime, parsed.description)
        };

        let unix_seconds = target.timestamp();
        debug!(unix_seconds, "showing results for timestamp");

        let records = self.build_records(&target, &now, unix_seconds);

        Ok(Conversion {
            input: trimmed.to_string(),
            description,
            target,
            unix_seconds,
            records,
        })
    }

    /// Host-facing query handler: never fails.
    ///
    /// A parse failure becomes a single notice record instead of an error.
    #[must_use]
    pub fn handle_query(&self, query: &str) -> Vec<TimestampRecord> {
        self.handle_query_at(query, Local::now())
    }

    #[must_use]
    pub fn handle_query_at(&self, query: &str, now: DateTime<Local>) -> Vec<TimestampRecord> {
        match self.convert_at(query, now) {
            Ok(conversion) => conversion.records,
            Err(QueryError::Unparseable(input)) => vec![TimestampRecord::parse_failure(&input)],
            Err(e) => vec![TimestampRecord::notice(e.to_string(), "Please try again")],
        }
    }

    fn build_records(
        &self,
        target: &DateTime<Local>,
        now: &DateTime<Local>,
        unix_seconds: i64,
    ) -> Vec<TimestampRecord> {
        STYLES
            .iter()
            .enumerate()
            .filter(|(_, style)| self.config.includes(style.modifier))
            .map(|(i, style)| {
                let text = style.rendering.render(target, now, self.config.locale);
                trace!(modifier = %style.modifier, text = %text, "built record");
                TimestampRecord {
                    id: i.to_string(),
                    modifier: Some(style.modifier),
                    text,
                    subtext: style.label.to_string(),
                    icon: style.icon,
                    clipboard: Some(style.modifier.markup(unix_seconds)),
                }
            })
            .collect()
    }
}
