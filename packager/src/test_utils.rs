//! Scripted `tar` runner for archiver tests.

use crate::command::CommandExecutor;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::process::{ExitStatus, Output};

/// Build an `ExitStatus` carrying `code`.
pub fn exit_status(code: i32) -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }
}

/// Output of a `tar` run that succeeded and printed `stdout`.
pub fn tar_succeeded(stdout: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Output of a `tar` run that exited with status 2 after printing `stderr`.
pub fn tar_failed(stderr: &str) -> Output {
    Output {
        status: exit_status(2),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

struct Step {
    args: Vec<String>,
    result: io::Result<Output>,
}

/// Replays scripted `tar` invocations in order.
///
/// Any other program, an unexpected argument vector, or a call beyond the
/// script fails the test.
#[derive(Default)]
pub struct ScriptedTar {
    steps: RefCell<VecDeque<Step>>,
}

impl ScriptedTar {
    /// Start an empty script; every invocation is unexpected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an invocation expecting `args` and answering with `result`.
    #[must_use]
    pub fn then(self, args: &[&str], result: io::Result<Output>) -> Self {
        self.steps.borrow_mut().push_back(Step {
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
            result,
        });
        self
    }

    /// Assert the whole script was consumed.
    pub fn assert_finished(&self) {
        let remaining = self.steps.borrow().len();
        assert_eq!(remaining, 0, "{remaining} scripted tar call(s) never ran");
    }
}

impl CommandExecutor for ScriptedTar {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        assert_eq!(cmd, "tar", "only tar is scripted");
        let step = self.steps.borrow_mut().pop_front();
        let Some(step) = step else {
            panic!("unscripted invocation: tar {}", args.join(" "));
        };
        assert_eq!(step.args, args);
        step.result
    }
}
