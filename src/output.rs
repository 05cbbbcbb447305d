//! Command-line surface of the `deploy-insights` binary.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::fixtures::Fixtures;
use crate::schema;

pub const USAGE: &str = "usage: deploy-insights <attempts|test-runs|cluster-test-runs|summary|digest|schema> [--out <path>] [--compact]";

/// What to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Attempts,
    TestRuns,
    ClusterTestRuns,
    Summary,
    Digest,
    Schema,
}

impl Command {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "attempts" => Some(Self::Attempts),
            "test-runs" => Some(Self::TestRuns),
            "cluster-test-runs" => Some(Self::ClusterTestRuns),
            "summary" => Some(Self::Summary),
            "digest" => Some(Self::Digest),
            "schema" => Some(Self::Schema),
            _ => None,
        }
    }

    /// Whether the command needs a built fixture set.
    pub fn needs_fixtures(&self) -> bool {
        !matches!(self, Self::Schema)
    }
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub out: Option<PathBuf>,
    pub compact: bool,
}

impl CliArgs {
    /// Parse arguments, program name excluded.
    pub fn parse<I, S>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut command = None;
        let mut out = None;
        let mut compact = false;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--compact" => compact = true,
                "--out" => {
                    let path = args
                        .next()
                        .ok_or_else(|| AppError::InvalidInput("--out requires a path".to_string()))?;
                    out = Some(PathBuf::from(path));
                }
                other if command.is_none() => {
                    command = Some(Command::parse(other).ok_or_else(|| {
                        AppError::InvalidInput(format!("unknown command '{}'\n{}", other, USAGE))
                    })?);
                }
                other => {
                    return Err(AppError::InvalidInput(format!(
                        "unexpected argument '{}'\n{}",
                        other, USAGE
                    )));
                }
            }
        }

        let command = command.ok_or_else(|| AppError::InvalidInput(USAGE.to_string()))?;
        Ok(CliArgs {
            command,
            out,
            compact,
        })
    }

    /// `--compact` wins over the configured default.
    pub fn pretty(&self, configured: bool) -> bool {
        configured && !self.compact
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> AppResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Render `command`; `fixtures` may be `None` only for [`Command::Schema`].
pub fn render(command: Command, fixtures: Option<&Fixtures>, pretty: bool) -> AppResult<String> {
    if command == Command::Schema {
        return Ok(schema::render(pretty)?);
    }
    let fixtures = fixtures.ok_or_else(|| {
        AppError::InvalidInput(format!("{:?} needs a built fixture set", command))
    })?;
    match command {
        Command::Attempts => to_json(fixtures.list_deployment_attempts(), pretty),
        Command::TestRuns => to_json(fixtures.list_test_runs(), pretty),
        Command::ClusterTestRuns => to_json(fixtures.list_cluster_test_runs(), pretty),
        Command::Summary => to_json(&fixtures.summary()?, pretty),
        Command::Digest => fixtures.digest(),
        Command::Schema => Ok(schema::render(pretty)?),
    }
}

/// Write `body` plus a trailing newline to `out`, or to stdout.
pub fn emit(body: &str, out: Option<&PathBuf>) -> AppResult<()> {
    match out {
        Some(path) => fs::write(path, format!("{}\n", body))?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", body)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
