//! Small helpers shared across CLI tests.

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

use super::{
    Cli, CliError, Command, CommandOutput, IdKind, InputFormat, OutputFormat, PropagationSummary,
    RunCommand, StrategyArg, render_output, run_cli,
};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn run_args(path: PathBuf, input: InputFormat, output: OutputFormat) -> RunCommand {
    RunCommand {
        path,
        input,
        output,
        ids: IdKind::Auto,
        strategy: StrategyArg::Sequential,
    }
}

pub(super) fn run_summary(command: RunCommand) -> Result<PropagationSummary, CliError> {
    match run_cli(Cli {
        command: Command::Run(command),
    })? {
        CommandOutput::Propagation(summary) => Ok(summary),
        CommandOutput::Generated(_) => panic!("run must produce a propagation summary"),
    }
}

pub(super) fn rendered(output: &CommandOutput) -> String {
    let mut buffer = Vec::new();
    if let Err(err) = render_output(output, &mut buffer) {
        panic!("rendering into memory must succeed: {err}");
    }
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => panic!("report must be UTF-8: {err}"),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
