mod config;
mod output;

use config::Config;

use std::io::{self, BufRead, Write};

use clap::Parser;
use colored::{control::set_override, Colorize};
use dtstamp_core::{ConversionConfig, Dtstamp, Locale, Modifier, QueryError, TimestampRecord};
use is_terminal::IsTerminal;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

const LONG_ABOUT: &str = r##"
dts turns a date expression into Discord timestamp markup.

Type a date the way you'd say it and get <t:UNIX:STYLE> markup for every
Discord timestamp style, with a preview of how each one renders.

UNDERSTOOD INPUT:
  Relative words:   now, today, tomorrow, yesterday
  Times of day:     15:00, 3:30pm, 9am
  Offsets:          in 2 days, 3 hours ago, a week from now
  Periods:          next week, last month, next year
  Weekdays:         friday, next monday, last tue
  Calendar dates:   dec 15, 15th march 2025, august 28, 2021 4:08am
  Absolute:         1704067200, 2024-01-15 10:30, 2024-01-15T10:30:00Z

STYLES:
  f  Short Date/Time   August 28, 2021 4:08 AM
  F  Long Date/Time    Saturday, August 28, 2021 4:08 AM
  t  Short Time        4:08 AM
  T  Long Time         4:08:48 AM
  d  Short Date        08/28/2021
  D  Long Date         August 28, 2021
  R  Relative Time     in 3 weeks

EXAMPLES:
  dts                          Markup for right now
  dts tomorrow 3pm             Every style for tomorrow afternoon
  dts -m R next friday         Just the relative markup
  dts -r -o f,R dec 15         Raw payloads for two styles
  dts --json in 2 hours        JSON records for launcher integration

PIPED INPUT:
  With no QUERY and stdin not a terminal, the first line of stdin is used:
    echo "next friday" | dts -m F

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting   | CLI flag        | Env var        | Default
  ----------|-----------------|----------------|---------
  locale    | -L, --locale    | DTS_LOCALE     | en-US
  only      | -o, --only      | DTS_ONLY       | (all)
  no_color  | -C, --no-color  | DTS_NO_COLOR   | false

  Config file location: dts --config-path
  Generate default config: dts --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)"##;

#[derive(Parser)]
#[command(name = "dts")]
#[command(version)]
#[command(about = "Turn date expressions into Discord timestamp markup")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// The date expression (words are joined with spaces; empty = now)
    #[arg(value_name = "QUERY")]
    query: Vec<String>,

    /// Output records as JSON (for launchers and scripting)
    #[arg(long, short = 'j')]
    json: bool,

    /// Output only the markup payloads, one per line
    #[arg(long, short = 'r')]
    raw: bool,

    /// Only show these styles (comma-separated letters, e.g. f,R)
    #[arg(long, short = 'o', value_delimiter = ',')]
    only: Option<Vec<Modifier>>,

    /// Print just the markup for a single style
    #[arg(long, short = 'm', value_name = "STYLE")]
    modifier: Option<Modifier>,

    /// Locale table for previews: en-US, en-GB or iso
    #[arg(long, short = 'L')]
    locale: Option<Locale>,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// List the timestamp styles
    #[arg(long)]
    styles: bool,

    /// Enable verbose logging (use multiple times for more detail)
    ///
    /// -v shows debug messages, -vv shows trace messages.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Show config file path
    #[arg(long)]
    config_path: bool,

    /// Generate default config file (see --config-path for location)
    #[arg(long)]
    config_init: bool,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Query from arguments, or the first line of piped stdin.
fn read_query(words: &[String]) -> String {
    if !words.is_empty() {
        return words.join(" ");
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return String::new();
    }

    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(_) => line.trim().to_string(),
        Err(e) => {
            tracing::warn!("Failed to read stdin: {}", e);
            String::new()
        }
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", "error".red().bold(), message);
    std::process::exit(1);
}

/// Finish a stdout write. A reader that hung up early is not an error.
fn finish(result: io::Result<()>) {
    match result {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed early");
        }
        Err(e) => fail(e),
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle --config-path
    if cli.config_path {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => fail("Cannot determine config directory"),
        }
        return;
    }

    // Handle --config-init
    if cli.config_init {
        match config::init_config() {
            Ok(path) => println!("Created config file: {}", path.display()),
            Err(e) => fail(e),
        }
        return;
    }

    init_tracing(cli.verbose);

    // Precedence: CLI args > Environment vars > Config file > Defaults
    let file_config = Config::load();

    let locale = if let Some(l) = cli.locale {
        tracing::debug!("locale = {} (from CLI)", l);
        l
    } else {
        let (l, source) = file_config.locale();
        tracing::debug!("locale = {} (from {})", l, source);
        l
    };

    let only = if let Some(o) = cli.only.clone() {
        tracing::debug!("only = {:?} (from CLI)", o);
        o
    } else {
        let (o, source) = file_config.only();
        tracing::debug!("only = {:?} (from {})", o, source);
        o
    };

    let no_color = cli.no_color || file_config.no_color() || !io::stdout().is_terminal();
    if no_color {
        tracing::debug!("no_color = true");
        set_override(false);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.styles {
        finish(output::write_styles(&mut out));
        return;
    }

    let dts = Dtstamp::with_config(
        ConversionConfig::default()
            .with_locale(locale)
            .with_only(only),
    );
    let query = read_query(&cli.query);

    let conversion = match dts.convert(&query) {
        Ok(conversion) => conversion,
        Err(QueryError::Unparseable(input)) => {
            let notice = TimestampRecord::parse_failure(&input);
            if cli.json {
                finish(output::write_json(&mut out, &[notice]));
            } else {
                eprintln!("{}", output::record_line(&notice));
            }
            std::process::exit(1);
        }
        Err(e) => fail(e),
    };

    let result = if let Some(modifier) = cli.modifier {
        writeln!(out, "{}", modifier.markup(conversion.unix_seconds))
    } else if cli.json {
        output::write_json(&mut out, &conversion.records)
    } else if cli.raw {
        output::write_raw(&mut out, &conversion.records)
    } else {
        output::write_conversion(&mut out, &conversion)
    };
    finish(result.and_then(|()| out.flush()));
}
