//! Locale-specific date/time rendering tables.
//!
//! A locale only decides how the absolute styles (`f`, `F`, `t`, `T`, `d`, `D`)
//! are previewed. The relative style is always English.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// strftime patterns for the six absolute styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleFormats {
    pub short_date_time: &'static str,
    pub long_date_time: &'static str,
    pub short_time: &'static str,
    pub long_time: &'static str,
    pub short_date: &'static str,
    pub long_date: &'static str,
}

const EN_US: LocaleFormats = LocaleFormats {
    short_date_time: "%B %-d, %Y %-I:%M %p",
    long_date_time: "%A, %B %-d, %Y %-I:%M %p",
    short_time: "%-I:%M %p",
    long_time: "%-I:%M:%S %p",
    short_date: "%m/%d/%Y",
    long_date: "%B %-d, %Y",
};

const EN_GB: LocaleFormats = LocaleFormats {
    short_date_time: "%-d %B %Y %H:%M",
    long_date_time: "%A, %-d %B %Y %H:%M",
    short_time: "%H:%M",
    long_time: "%H:%M:%S",
    short_date: "%d/%m/%Y",
    long_date: "%-d %B %Y",
};

const ISO: LocaleFormats = LocaleFormats {
    short_date_time: "%Y-%m-%d %H:%M",
    long_date_time: "%A %Y-%m-%d %H:%M",
    short_time: "%H:%M",
    long_time: "%H:%M:%S",
    short_date: "%Y-%m-%d",
    long_date: "%Y-%m-%d (%A)",
};

/// Which table to render absolute styles with.
///
/// Deserializes through [`FromStr`], so config files accept the same
/// spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "iso")]
    Iso,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::EnUs, Locale::EnGb, Locale::Iso];

    #[must_use]
    pub fn formats(self) -> &'static LocaleFormats {
        match self {
            Self::EnUs => &EN_US,
            Self::EnGb => &EN_GB,
            Self::Iso => &ISO,
        }
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::Iso => "iso",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en-us" | "us" => Ok(Self::EnUs),
            "en-gb" | "gb" | "uk" => Ok(Self::EnGb),
            "iso" => Ok(Self::Iso),
            _ => Err(QueryError::UnknownLocale(s.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = QueryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
