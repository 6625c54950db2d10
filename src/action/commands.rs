//! Workflow commands understood by the Actions runner.
//!
//! Outputs and exported variables go to the files named by `GITHUB_OUTPUT` and
//! `GITHUB_ENV` when the runner provides them, otherwise to the legacy `::` commands
//! on stdout. Failures are always a `::error::` command.

use std::fs::OpenOptions;
use std::io::{Stdout, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

pub struct WorkflowCommands<W: Write> {
    stdout: W,
    output_file: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

impl WorkflowCommands<Stdout> {
    pub fn from_env() -> Self {
        let file_from = |name: &str| {
            std::env::var_os(name)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
        };
        Self::new(std::io::stdout(), file_from("GITHUB_OUTPUT"), file_from("GITHUB_ENV"))
    }
}

impl<W: Write> WorkflowCommands<W> {
    pub fn new(stdout: W, output_file: Option<PathBuf>, env_file: Option<PathBuf>) -> Self {
        Self {
            stdout,
            output_file,
            env_file,
        }
    }

    pub fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        match &self.output_file {
            Some(path) => append_key_value(path, name, value),
            None => self.issue("set-output", &[("name", name)], value),
        }
    }

    /// Also sets the variable for the rest of this process.
    pub fn export_variable(&mut self, name: &str, value: &str) -> Result<()> {
        std::env::set_var(name, value);
        match &self.env_file {
            Some(path) => append_key_value(path, name, value),
            None => self.issue("set-env", &[("name", name)], value),
        }
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        self.issue("error", &[], message)
    }

    pub fn into_inner(self) -> W {
        self.stdout
    }

    fn issue(&mut self, command: &str, properties: &[(&str, &str)], message: &str) -> Result<()> {
        let mut line = format!("::{command}");
        for (i, (key, value)) in properties.iter().enumerate() {
            line.push(if i == 0 { ' ' } else { ',' });
            line.push_str(&format!("{key}={}", escape_property(value)));
        }
        line.push_str(&format!("::{}", escape_data(message)));
        writeln!(self.stdout, "{line}").context("failed to write workflow command")
    }
}

fn escape_data(text: &str) -> String {
    text.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(text: &str) -> String {
    escape_data(text).replace(':', "%3A").replace(',', "%2C")
}

fn heredoc_delimiter() -> String {
    let now = chrono::Utc::now();
    format!(
        "ghadelimiter_{}_{}_{}",
        std::process::id(),
        now.timestamp(),
        now.timestamp_subsec_nanos()
    )
}

/// Appends `name<<DELIM`, the value and `DELIM` so multi-line values survive.
fn append_key_value(path: &Path, name: &str, value: &str) -> Result<()> {
    let delimiter = heredoc_delimiter();
    if name.contains(&delimiter) {
        bail!("Unexpected input: name should not contain the delimiter \"{delimiter}\"")
    }
    if value.contains(&delimiter) {
        bail!("Unexpected input: value should not contain the delimiter \"{delimiter}\"")
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("unable to open command file {}", path.display()))?;
    writeln!(file, "{name}<<{delimiter}\n{value}\n{delimiter}")
        .with_context(|| format!("unable to write command file {}", path.display()))
}
