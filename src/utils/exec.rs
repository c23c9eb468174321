//! External command execution utilities.
//!
//! Runs the style compiler and reports its diagnostics through `log!`.

use crate::log;
use anyhow::{Context, Result};
use regex::Regex;
use std::{
    ffi::OsString,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
    sync::OnceLock,
    thread,
};

/// Convert a configured command line into `OsString`s, dropping empty args.
pub fn to_os_args<S: AsRef<str>>(args: &[S]) -> Vec<OsString> {
    args.iter()
        .map(AsRef::as_ref)
        .filter(|a| !a.is_empty())
        .map(OsString::from)
        .collect()
}

/// Execute a command and capture its output.
///
/// When `input` is given it is written to the child's stdin on a separate
/// thread, so a child that streams stdout before draining stdin can't
/// deadlock us.
///
/// # Errors
/// Returns error if command fails to execute or returns non-zero exit code.
pub fn exec(
    root: Option<&Path>,
    cmd: &[OsString],
    args: &[OsString],
    input: Option<&[u8]>,
    filter: &'static FilterRule,
) -> Result<Output> {
    let (name, mut command) = prepare(root, cmd, args)?;

    let output = match input {
        None => command
            .output()
            .with_context(|| format!("Failed to execute `{name}`"))?,
        Some(bytes) => {
            command
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
            let mut child = command
                .spawn()
                .with_context(|| format!("Failed to spawn `{name}`"))?;
            let mut stdin = child.stdin.take().context("Failed to acquire stdin")?;

            thread::scope(|scope| {
                let writer = scope.spawn(move || stdin.write_all(bytes));
                let output = child.wait_with_output();
                let written = writer
                    .join()
                    .map_err(|_| anyhow::anyhow!("Failed to join stdin writer thread"))?;
                let output = output.with_context(|| format!("`{name}` process failed"))?;
                // A broken pipe is expected when the child exits early;
                // its exit status carries the real error.
                if let Err(err) = written
                    && output.status.success()
                {
                    return Err(err).with_context(|| format!("Failed to write stdin of `{name}`"));
                }
                Ok::<_, anyhow::Error>(output)
            })?
        }
    };

    log_output(&name, &output, filter)?;
    Ok(output)
}

/// Prepare a Command from components.
fn prepare(root: Option<&Path>, cmd: &[OsString], args: &[OsString]) -> Result<(String, Command)> {
    let (program, rest) = cmd.split_first().context("Empty command")?;
    let name = program.to_string_lossy().into_owned();

    let mut command = Command::new(program);
    command.args(rest).args(args);

    if let Some(dir) = root {
        command.current_dir(dir);
    }

    Ok((name, command))
}

fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("ANSI escape pattern is valid"));
    re.replace_all(s, "")
}

/// Prefixes of known-noise lines in command output.
pub struct FilterRule {
    pub skip_prefixes: &'static [&'static str],
}

impl FilterRule {
    pub const fn new(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }

    fn should_skip(&self, output: &str) -> bool {
        output.is_empty() || self.skip_prefixes.iter().any(|p| output.starts_with(p))
    }

    fn log(&self, name: &str, output: &str) {
        let valid_lines: Vec<&str> = output
            .lines()
            .filter(|line| {
                let plain = strip_ansi(line);
                !self.should_skip(plain.trim())
            })
            .collect();

        if !valid_lines.is_empty() {
            log!(name; "{}", valid_lines.join("\n"));
        }
    }
}

/// On success only stderr (warnings) is logged; stdout is the caller's data.
fn log_output(name: &str, output: &Output, filter: &'static FilterRule) -> Result<()> {
    if !output.status.success() {
        anyhow::bail!(format_error(name, output, filter));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    filter.log(name, stderr.trim());

    Ok(())
}

fn format_error(name: &str, output: &Output, filter: &'static FilterRule) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let error_msg = filter
        .skip_prefixes
        .iter()
        .fold(stderr.trim(), |s, p| s.trim_start_matches(p).trim_start());

    let mut msg = format!("Command `{name}` failed with {}\n", output.status);
    if !error_msg.is_empty() {
        msg.push_str(&strip_ansi(error_msg));
    }

    let stdout_trimmed = stdout.trim();
    if !stdout_trimmed.is_empty() {
        msg.push_str("\nStdout:\n");
        msg.push_str(stdout_trimmed);
    }
    msg
}
