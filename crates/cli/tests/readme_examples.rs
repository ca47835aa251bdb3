//! Validates that README.md examples still work, and pins down the
//! output contract of the `dts` binary.
//!
//! Run with: cargo test -p dtstamp-cli --test readme_examples

#[cfg(target_os = "linux")]
use std::fs;
#[cfg(target_os = "linux")]
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Extract dts commands from the bash blocks of README.md
fn extract_dts_commands() -> Vec<String> {
    let readme = include_str!("../../../README.md");
    let mut commands = Vec::new();
    let mut in_code_block = false;

    for line in readme.lines() {
        if line.starts_with("```") {
            in_code_block = !in_code_block && line.starts_with("```bash");
            continue;
        }

        if in_code_block {
            let trimmed = line.trim();
            let cmd = trimmed.strip_prefix("$ ").unwrap_or(trimmed);
            if cmd == "dts" || cmd.starts_with("dts ") {
                commands.push(cmd.to_string());
            }
        }
    }

    commands
}

/// Commands that we skip testing (pipes, files outside the sandbox)
fn should_skip(cmd: &str) -> bool {
    cmd.contains(" | ") || cmd.contains("--config-init")
}

/// A `dts` command with no settings leaking in from the environment or
/// the user's config file.
fn dts_command(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dts"));
    cmd.args(args)
        .env("XDG_CONFIG_HOME", std::env::temp_dir().join("dts-tests-no-config"))
        .env_remove("DTS_LOCALE")
        .env_remove("DTS_ONLY")
        .env_remove("DTS_NO_COLOR");
    cmd
}

fn dts(args: &[&str]) -> Output {
    dts_command(args).output().expect("Failed to run dts")
}

fn dts_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = dts_command(args);
    cmd.envs(env.iter().copied());
    cmd.output().expect("Failed to run dts")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Noon UTC, so the local calendar date is January 15 almost everywhere.
const NOON: &str = "2024-01-15T12:00:00Z";
const NOON_UNIX: i64 = 1_705_320_000;

/// Short date (`d`) preview from `--json` output.
fn short_date_preview(output: &Output) -> String {
    let records: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    records
        .as_array()
        .and_then(|r| r.iter().find(|r| r["modifier"] == "d"))
        .and_then(|r| r["text"].as_str())
        .expect("a short date record")
        .to_string()
}

#[test]
fn test_readme_examples_parse() {
    let commands = extract_dts_commands();

    assert!(
        commands.len() >= 15,
        "Expected at least 15 dts examples in README, found {}",
        commands.len()
    );
}

#[test]
fn test_readme_examples_run() {
    let commands = extract_dts_commands();

    let mut failed = Vec::new();
    for cmd in &commands {
        if should_skip(cmd) {
            continue;
        }

        let args: Vec<&str> = cmd.split_whitespace().skip(1).collect();
        let result = dts(&args);
        let stdout = String::from_utf8_lossy(&result.stdout);

        if !result.status.success() || stdout.trim().is_empty() {
            failed.push(format!(
                "{}: exit code {:?}, stderr: {}",
                cmd,
                result.status.code(),
                String::from_utf8_lossy(&result.stderr).trim()
            ));
        }
    }

    if !failed.is_empty() {
        eprintln!("\nFailed examples:");
        for f in &failed {
            eprintln!("  - {}", f);
        }
        panic!("{} README examples failed", failed.len());
    }
}

#[test]
fn test_single_modifier_prints_markup_only() {
    let output = dts(&["-m", "R", "1704067200"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "<t:1704067200:R>\n");
}

#[test]
fn test_raw_prints_every_style_in_order() {
    let output = dts(&["--raw", "1704067200"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "<t:1704067200:f>",
            "<t:1704067200:F>",
            "<t:1704067200:t>",
            "<t:1704067200:T>",
            "<t:1704067200:d>",
            "<t:1704067200:D>",
            "<t:1704067200:R>",
        ]
    );
}

#[test]
fn test_raw_respects_only() {
    let output = dts(&["-r", "-o", "D,f", "1704067200"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    // Table order, not the order given
    assert_eq!(lines, vec!["<t:1704067200:f>", "<t:1704067200:D>"]);
}

#[test]
fn test_json_records() {
    let output = dts(&["--json", "-L", "iso", "2024-01-15T10:30:00Z"]);
    assert!(output.status.success());

    let records: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let records = records.as_array().expect("JSON array");
    assert_eq!(records.len(), 7);

    let ids: Vec<&str> = records.iter().filter_map(|r| r["id"].as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "2", "3", "4", "5", "6"]);

    assert_eq!(records[6]["modifier"], "R");
    assert_eq!(records[6]["subtext"], "Relative Time");
    assert_eq!(records[6]["icon"], "relative");
    assert_eq!(records[6]["clipboard"], "<t:1705314600:R>");
    assert_eq!(records[0]["icon"], "date");
    assert_eq!(records[2]["icon"], "time");
}

#[test]
fn test_unparseable_query_fails_with_notice() {
    let output = dts(&["blorp"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Couldn't parse date: blorp"), "stderr: {}", stderr);
    assert!(stderr.contains("Please try again"));
}

#[test]
fn test_unparseable_query_json_notice() {
    let output = dts(&["--json", "blorp"]);
    assert_eq!(output.status.code(), Some(1));

    let records: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let records = records.as_array().expect("JSON array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["text"], "Couldn't parse date: blorp");
    assert_eq!(records[0]["subtext"], "Please try again");
    assert!(records[0].get("clipboard").is_none());
}

#[test]
fn test_styles_listing() {
    let output = dts(&["--styles"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for label in [
        "Short Date/Time",
        "Long Date/Time",
        "Short Time",
        "Long Time",
        "Short Date",
        "Long Date",
        "Relative Time",
    ] {
        assert!(stdout.contains(label), "missing {}", label);
    }
    assert!(stdout.contains("<t:0:R>"));
}

#[test]
fn test_empty_query_is_now() {
    let output = dts(&["-m", "R"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let unix: i64 = stdout
        .trim()
        .strip_prefix("<t:")
        .and_then(|s| s.strip_suffix(":R>"))
        .and_then(|s| s.parse().ok())
        .expect("markup with unix seconds");
    let now = chrono::Utc::now().timestamp();
    assert!((now - unix).abs() < 60, "{} is not close to {}", unix, now);
}

// =============================================================================
// Settings precedence: CLI args > environment > config file > defaults
// =============================================================================

#[test]
fn test_env_locale_applies() {
    let output = dts_with_env(&["-j", NOON], &[("DTS_LOCALE", "iso")]);
    assert_eq!(short_date_preview(&output), "2024-01-15");
}

#[test]
fn test_cli_locale_beats_env() {
    let output = dts_with_env(&["-j", "-L", "en-US", NOON], &[("DTS_LOCALE", "iso")]);
    assert_eq!(short_date_preview(&output), "01/15/2024");
}

#[test]
fn test_invalid_env_locale_is_ignored() {
    let output = dts_with_env(&["-j", NOON], &[("DTS_LOCALE", "klingon")]);
    assert!(output.status.success());
    assert_eq!(short_date_preview(&output), "01/15/2024");
}

#[test]
fn test_env_only_applies() {
    let output = dts_with_env(&["-r", NOON], &[("DTS_ONLY", "R")]);
    assert_eq!(stdout_lines(&output), vec![format!("<t:{}:R>", NOON_UNIX)]);
}

#[test]
fn test_cli_only_beats_env() {
    let output = dts_with_env(&["-r", "-o", "f", NOON], &[("DTS_ONLY", "R")]);
    assert_eq!(stdout_lines(&output), vec![format!("<t:{}:f>", NOON_UNIX)]);
}

#[test]
fn test_invalid_env_only_is_ignored() {
    let output = dts_with_env(&["-r", NOON], &[("DTS_ONLY", "f,x")]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 7);
}

/// Config home holding a `dts/config.toml` with the given contents.
#[cfg(target_os = "linux")]
fn config_home(name: &str, contents: &str) -> PathBuf {
    let home = std::env::temp_dir().join(format!("dts-tests-{}-{}", name, std::process::id()));
    let dir = home.join("dts");
    fs::create_dir_all(&dir).expect("create config dir");
    fs::write(dir.join("config.toml"), contents).expect("write config");
    home
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_file_below_env_and_cli() {
    let home = config_home("precedence", "locale = \"uk\"\nonly = [\"R\", \"d\"]\n");
    let home = home.to_string_lossy().to_string();

    // File alone
    let output = dts_with_env(&["-r", NOON], &[("XDG_CONFIG_HOME", &home)]);
    assert_eq!(
        stdout_lines(&output),
        vec![format!("<t:{}:d>", NOON_UNIX), format!("<t:{}:R>", NOON_UNIX)]
    );
    let output = dts_with_env(&["-j", NOON], &[("XDG_CONFIG_HOME", &home)]);
    assert_eq!(short_date_preview(&output), "15/01/2024");

    // Environment beats the file
    let output = dts_with_env(
        &["-j", "-o", "d", NOON],
        &[("XDG_CONFIG_HOME", &home), ("DTS_LOCALE", "iso")],
    );
    assert_eq!(short_date_preview(&output), "2024-01-15");
    let output = dts_with_env(
        &["-r", NOON],
        &[("XDG_CONFIG_HOME", &home), ("DTS_ONLY", "T")],
    );
    assert_eq!(stdout_lines(&output), vec![format!("<t:{}:T>", NOON_UNIX)]);

    // CLI beats both
    let output = dts_with_env(
        &["-j", "-L", "en-US", NOON],
        &[("XDG_CONFIG_HOME", &home), ("DTS_LOCALE", "iso")],
    );
    assert_eq!(short_date_preview(&output), "01/15/2024");

    let _ = fs::remove_dir_all(&home);
}

// =============================================================================
// Piping
// =============================================================================

#[test]
fn test_closed_stdout_is_not_a_crash() {
    for args in [["--json", NOON], ["--raw", NOON], ["--styles", NOON]] {
        let mut child = dts_command(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn dts");

        // Hang up before reading anything
        drop(child.stdout.take());

        let output = child.wait_with_output().expect("Failed to wait for dts");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("panicked"), "{:?}: {}", args, stderr);
        assert!(output.status.success(), "{:?}: {:?}", args, output.status);
    }
}
