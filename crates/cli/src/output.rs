//! Human-readable rendering of conversion results.

use std::io::{self, Write};

use colored::Colorize;
use dtstamp_core::{Conversion, IconKind, TimestampRecord, STYLES};

fn icon_glyph(icon: IconKind) -> &'static str {
    match icon {
        IconKind::Date => "▦",
        IconKind::Time => "◷",
        IconKind::Relative => "↻",
    }
}

/// Header line: what the input was understood as.
pub fn header(conversion: &Conversion) -> String {
    let input = if conversion.input.is_empty() {
        "(now)".to_string()
    } else {
        conversion.input.clone()
    };
    format!(
        "{} {} {}\n  {} {} {}",
        "▶".blue(),
        input.green().bold(),
        format!("({})", conversion.description).dimmed(),
        "→".cyan(),
        conversion.target.to_rfc3339().yellow(),
        format!("unix {}", conversion.unix_seconds).dimmed(),
    )
}

/// One record per line: icon, label, preview text, markup.
pub fn record_line(record: &TimestampRecord) -> String {
    let label = format!("{:<16}", record.subtext);
    match &record.clipboard {
        Some(markup) => format!(
            "  {} {} {}  {}",
            icon_glyph(record.icon).cyan(),
            label.dimmed(),
            record.text.bold(),
            markup.yellow()
        ),
        None => format!("{} {}", record.text.red().bold(), record.subtext.dimmed()),
    }
}

pub fn write_conversion(out: &mut impl Write, conversion: &Conversion) -> io::Result<()> {
    writeln!(out, "{}", header(conversion))?;
    for record in &conversion.records {
        writeln!(out, "{}", record_line(record))?;
    }
    Ok(())
}

/// `--raw`: one clipboard payload per line.
pub fn write_raw(out: &mut impl Write, records: &[TimestampRecord]) -> io::Result<()> {
    for markup in records.iter().filter_map(|r| r.clipboard.as_deref()) {
        writeln!(out, "{}", markup)?;
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write, records: &[TimestampRecord]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out)
}

/// `--styles`: the style table itself.
pub fn write_styles(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "Timestamp Styles".bold().underline())?;
    writeln!(out)?;
    for style in &STYLES {
        writeln!(
            out,
            "  {} {:<16} {}",
            style.modifier.to_string().yellow().bold(),
            style.label,
            style.modifier.markup(0).dimmed()
        )?;
    }
    Ok(())
}
