//! The Discord timestamp style table.
//!
//! Each style pairs a modifier letter with how its preview text is rendered,
//! a label and an icon. Record building walks [`STYLES`] once.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::locale::{Locale, LocaleFormats};
use crate::relative::relative_time;

/// Discord timestamp display style.
///
/// See <https://discord.com/developers/docs/reference#message-formatting-timestamp-styles>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    #[serde(rename = "f")]
    ShortDateTime,
    #[serde(rename = "F")]
    LongDateTime,
    #[serde(rename = "t")]
    ShortTime,
    #[serde(rename = "T")]
    LongTime,
    #[serde(rename = "d")]
    ShortDate,
    #[serde(rename = "D")]
    LongDate,
    #[serde(rename = "R")]
    Relative,
}

impl Modifier {
    pub const ALL: [Modifier; 7] = [
        Modifier::ShortDateTime,
        Modifier::LongDateTime,
        Modifier::ShortTime,
        Modifier::LongTime,
        Modifier::ShortDate,
        Modifier::LongDate,
        Modifier::Relative,
    ];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::ShortDateTime => 'f',
            Self::LongDateTime => 'F',
            Self::ShortTime => 't',
            Self::LongTime => 'T',
            Self::ShortDate => 'd',
            Self::LongDate => 'D',
            Self::Relative => 'R',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_char() == c)
    }

    /// Discord markup for a unix timestamp, e.g. `<t:1704067200:R>`.
    #[must_use]
    pub fn markup(self, unix_seconds: i64) -> String {
        format!("<t:{}:{}>", unix_seconds, self.as_char())
    }

    /// The table entry for this modifier.
    #[must_use]
    pub fn style(self) -> &'static TimestampStyle {
        // STYLES holds exactly one entry per modifier, in ALL order.
        &STYLES[Self::ALL.iter().position(|m| *m == self).unwrap_or(0)]
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Modifier {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_char(c).ok_or_else(|| QueryError::UnknownModifier(s.to_string()))
            }
            _ => Err(QueryError::UnknownModifier(s.to_string())),
        }
    }
}

/// Icon category shown next to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKind {
    Date,
    Time,
    Relative,
}

impl IconKind {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Date => "date.svg",
            Self::Time => "time.svg",
            Self::Relative => "relative-time.svg",
        }
    }
}

/// How a style's preview text is produced.
#[derive(Clone, Copy)]
pub enum Rendering {
    /// strftime pattern picked from the active locale table.
    Pattern(fn(&LocaleFormats) -> &'static str),
    /// Humanized distance from "now".
    Relative,
}

impl fmt::Debug for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(_) => f.write_str("Pattern"),
            Self::Relative => f.write_str("Relative"),
        }
    }
}

impl Rendering {
    /// Render `target` as preview text.
    #[must_use]
    pub fn render(&self, target: &DateTime<Local>, now: &DateTime<Local>, locale: Locale) -> String {
        match self {
            Self::Pattern(pick) => target.format(pick(locale.formats())).to_string(),
            Self::Relative => relative_time(now, target),
        }
    }
}

/// One row of the style table.
#[derive(Debug, Clone, Copy)]
pub struct TimestampStyle {
    pub modifier: Modifier,
    pub rendering: Rendering,
    pub label: &'static str,
    pub icon: IconKind,
}

/// All Discord timestamp styles in display order.
pub static STYLES: [TimestampStyle; 7] = [
    TimestampStyle {
        modifier: Modifier::ShortDateTime,
        rendering: Rendering::Pattern(|l| l.short_date_time),
        label: "Short Date/Time",
        icon: IconKind::Date,
    },
    TimestampStyle {
        modifier: Modifier::LongDateTime,
        rendering: Rendering::Pattern(|l| l.long_date_time),
        label: "Long Date/Time",
        icon: IconKind::Date,
    },
    TimestampStyle {
        modifier: Modifier::ShortTime,
        rendering: Rendering::Pattern(|l| l.short_time),
        label: "Short Time",
        icon: IconKind::Time,
    },
    TimestampStyle {
        modifier: Modifier::LongTime,
        rendering: Rendering::Pattern(|l| l.long_time),
        label: "Long Time",
        icon: IconKind::Time,
    },
    TimestampStyle {
        modifier: Modifier::ShortDate,
        rendering: Rendering::Pattern(|l| l.short_date),
        label: "Short Date",
        icon: IconKind::Date,
    },
    TimestampStyle {
        modifier: Modifier::LongDate,
        rendering: Rendering::Pattern(|l| l.long_date),
        label: "Long Date",
        icon: IconKind::Date,
    },
    TimestampStyle {
        modifier: Modifier::Relative,
        rendering: Rendering::Relative,
        label: "Relative Time",
        icon: IconKind::Relative,
    },
];
