//! Talking to the GitHub Actions runner through workflow commands and environment files, see
//! https://docs.github.com/en/actions/using-workflows/workflow-commands-for-github-actions.

use std::{borrow::Cow, env, fs, io::Write, path::Path};

use log::Level;

use crate::Result;

pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";

/// Returns true when running inside a GitHub Actions job.
pub fn is_github_actions() -> bool {
    env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true")
}

/// Returns true when the runner has step debug logging enabled.
pub fn is_debug() -> bool {
    env::var("RUNNER_DEBUG").is_ok_and(|value| value == "1")
}

/// Escapes the data part of a workflow command.
pub fn escape_data(value: &str) -> Cow<str> {
    if !value.contains(['%', '\r', '\n']) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A"),
    )
}

/// Escapes a property value of a workflow command.
pub fn escape_property(value: &str) -> Cow<str> {
    match escape_data(value) {
        Cow::Borrowed(value) if !value.contains([':', ',']) => Cow::Borrowed(value),
        value => Cow::Owned(value.replace(':', "%3A").replace(',', "%2C")),
    }
}

/// The workflow command that a log record of the given level is written as. Info records are
/// written as plain lines.
pub fn command_for_level(level: Level) -> Option<&'static str> {
    match level {
        Level::Error => Some("error"),
        Level::Warn => Some("warning"),
        Level::Info => None,
        Level::Debug | Level::Trace => Some("debug"),
    }
}

/// Formats log records as workflow commands so the runner annotates errors and warnings and hides
/// debug output unless step debugging is enabled.
pub fn format_record(
    buf: &mut env_logger::fmt::Formatter,
    record: &log::Record,
) -> std::io::Result<()> {
    let message = record.args().to_string();
    match command_for_level(record.level()) {
        Some(command) => writeln!(buf, "::{command}::{}", escape_data(&message)),
        None => writeln!(buf, "{message}"),
    }
}

/// Initializes `env_logger`. `RUST_LOG` takes precedence over the runner's debug setting.
pub fn init_logger() {
    let default_filter = if is_debug() { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if is_github_actions() {
        builder
            .format(format_record)
            .target(env_logger::Target::Stdout);
    }
    builder.init();
}

fn random_delimiter() -> String {
    use rand::distributions::{Alphanumeric, DistString};

    const PREFIX: &str = "ghadelimiter_";
    const LEN: usize = 16;

    let mut delimiter = String::with_capacity(PREFIX.len() + LEN);
    delimiter.push_str(PREFIX);
    Alphanumeric.append_string(&mut rand::thread_rng(), &mut delimiter, LEN);
    delimiter
}

fn format_output(name: &str, value: &str, delimiter: &str) -> Result<String> {
    if name.contains(delimiter) || value.contains(delimiter) {
        return Err(format!("unexpected delimiter {delimiter:?} in output {name:?}").into());
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

/// Appends an output to the runner's output file.
pub fn write_output(path: &Path, name: &str, value: &str) -> Result<()> {
    let entry = format_output(name, value, &random_delimiter())?;
    let mut file = fs::OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(entry.as_bytes())?;
    Ok(())
}

/// Sets a step output, falling back to the `set-output` command on runners without an output
/// file.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    match env::var_os(OUTPUT_FILE_ENV) {
        Some(path) if !path.is_empty() => write_output(Path::new(&path), name, value),
        _ => {
            println!(
                "::set-output name={name}::{value}",
                name = escape_property(name),
                value = escape_data(value)
            );
            Ok(())
        }
    }
}

/// Reports the step as failed. The caller is expected to exit with a non-zero status afterwards.
pub fn set_failed(message: &str) {
    if is_github_actions() {
        println!("::error::{}", escape_data(message));
    } else {
        const BOLD_RED: &str = "\x1b[1;31m";
        const BOLD: &str = "\x1b[1m";
        const RESET: &str = "\x1b[0m";
        eprintln!("{BOLD_RED}error{RESET}{BOLD}:{RESET} {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_data_works() {
        assert_eq!(escape_data("Kaboom!"), Cow::Borrowed("Kaboom!"));
        assert_eq!(escape_data("100%"), "100%25");
        assert_eq!(escape_data("line 1\r\nline 2"), "line 1%0D%0Aline 2");
        assert_eq!(escape_data("%0A"), "%250A");
    }

    #[test]
    fn escape_property_works() {
        assert_eq!(escape_property("image"), Cow::Borrowed("image"));
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
        assert_eq!(escape_property("50%:x"), "50%25%3Ax");
    }

    #[test]
    fn levels_map_to_commands() {
        assert_eq!(command_for_level(Level::Error), Some("error"));
        assert_eq!(command_for_level(Level::Warn), Some("warning"));
        assert_eq!(command_for_level(Level::Info), None);
        assert_eq!(command_for_level(Level::Debug), Some("debug"));
        assert_eq!(command_for_level(Level::Trace), Some("debug"));
    }

    #[test]
    fn random_delimiter_is_unique() {
        let delimiter = random_delimiter();
        assert!(delimiter.starts_with("ghadelimiter_"));
        assert_eq!(delimiter.len(), "ghadelimiter_".len() + 16);
        assert_ne!(delimiter, random_delimiter());
    }

    #[test]
    fn output_uses_heredoc_syntax() {
        assert_eq!(
            format_output("image", "ghcr.io/o/r/n:git-6c631b0", "EOF").unwrap(),
            "image<<EOF\nghcr.io/o/r/n:git-6c631b0\nEOF\n"
        );
        assert!(format_output("image", "EOF", "EOF").is_err());
    }

    #[test]
    fn write_output_appends_to_file() {
        let path = env::temp_dir().join(format!("{}.output", random_delimiter()));
        fs::write(&path, "previous<<X\nvalue\nX\n").unwrap();

        write_output(&path, "image", "ghcr.io/peachjar/peachjar-svc-auth/svc-auth:git-6c631b0")
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("previous<<X"));
        assert_eq!(lines.next(), Some("value"));
        assert_eq!(lines.next(), Some("X"));
        let delimiter = lines.next().unwrap().strip_prefix("image<<").unwrap();
        assert_eq!(
            lines.next(),
            Some("ghcr.io/peachjar/peachjar-svc-auth/svc-auth:git-6c631b0")
        );
        assert_eq!(lines.next(), Some(delimiter));
        assert_eq!(lines.next(), None);
    }
}
