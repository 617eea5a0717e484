use rdcompare_common::{AppConfig, RdCompareError};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Runs a comparison of two files
pub trait DiffInvoker {
    fn invoke(&mut self, left: &Path, right: &Path) -> Result<(), RdCompareError>;
}

/// Spawns an external `diff`-compatible program and waits for it.
///
/// The child inherits stdout and stderr. Its exit status is only logged,
/// since `diff` exits non-zero whenever the files differ.
#[derive(Debug, Clone)]
pub struct ExternalDiff {
    program: String,
    options: Vec<String>,
}

impl ExternalDiff {
    pub fn new(program: impl Into<String>, options: &str) -> Self {
        Self {
            program: program.into(),
            options: options.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn from_config(config: &AppConfig, color: bool) -> Self {
        Self::new(config.diff_program(color), &config.diff_options)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn command(&self, left: &Path, right: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.options).arg(left).arg(right);
        cmd
    }
}

impl DiffInvoker for ExternalDiff {
    fn invoke(&mut self, left: &Path, right: &Path) -> Result<(), RdCompareError> {
        let status = self
            .command(left, right)
            .status()
            .map_err(|source| RdCompareError::DiffInvocation {
                tool: self.program.clone(),
                source,
            })?;

        debug!(
            "{} {} {} exited with {}",
            self.program,
            left.display(),
            right.display(),
            status
        );
        Ok(())
    }
}
