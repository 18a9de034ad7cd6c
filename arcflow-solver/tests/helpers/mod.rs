//! Helpers to run the `arcflow-solver` binary in integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;

use regex::Regex;
use wait_timeout::ChildExt;

/// The outcome of one run of the binary.
#[derive(Debug)]
pub(crate) struct SolverRun {
    pub(crate) status: ExitStatus,
    pub(crate) log: String,
    pub(crate) err: String,
}

/// The numbers of the summary line `nodes=.. arcs=.. dp_states=..`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) num_nodes: usize,
    pub(crate) num_arcs: usize,
    pub(crate) num_dp_states: usize,
}

impl SolverRun {
    pub(crate) fn summary(&self) -> Summary {
        let pattern = Regex::new(r"(?m)^nodes=(\d+) arcs=(\d+) dp_states=(\d+)$").unwrap();
        let captures = pattern
            .captures(&self.log)
            .unwrap_or_else(|| panic!("no summary in the output:\n{}", self.log));
        let number = |index: usize| captures[index].parse::<usize>().unwrap();

        Summary {
            num_nodes: number(1),
            num_arcs: number(2),
            num_dp_states: number(3),
        }
    }

    /// The lines `packing ..` as count vectors.
    pub(crate) fn packings(&self) -> Vec<Vec<usize>> {
        self.log
            .lines()
            .filter_map(|line| line.strip_prefix("packing "))
            .map(|counts| {
                counts
                    .split_whitespace()
                    .map(|count| count.parse().unwrap())
                    .collect()
            })
            .collect()
    }
}

pub(crate) fn instance_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("instances")
        .join(name)
}

/// A path in the temporary directory which is unique for the given test.
pub(crate) fn output_path(test_name: &str, extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "arcflow-solver-{}-{test_name}.{extension}",
        std::process::id()
    ))
}

pub(crate) fn run_solver(instance_path: impl AsRef<Path>, test_name: &str) -> SolverRun {
    run_solver_with_options(instance_path, test_name, std::iter::empty())
}

pub(crate) fn run_solver_with_options(
    instance_path: impl AsRef<Path>,
    test_name: &str,
    args: impl IntoIterator<Item = String>,
) -> SolverRun {
    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let solver = PathBuf::from(env!("CARGO_BIN_EXE_arcflow-solver"));

    let log_file_path = output_path(test_name, "log");
    let err_file_path = output_path(test_name, "err");

    let mut command = Command::new(solver);
    for arg in args {
        let _ = command.arg(arg);
    }

    let mut child = command
        .arg(instance_path.as_ref())
        .stdout(File::create(&log_file_path).expect("Failed to create log file."))
        .stderr(File::create(&err_file_path).expect("Failed to create error file."))
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs()),
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting solver: {e}"),
    };

    let log = std::fs::read_to_string(&log_file_path).expect("Failed to read log file.");
    let err = std::fs::read_to_string(&err_file_path).expect("Failed to read error file.");
    std::fs::remove_file(log_file_path).expect("Failed to remove log file.");
    std::fs::remove_file(err_file_path).expect("Failed to remove error file.");

    SolverRun { status, log, err }
}
