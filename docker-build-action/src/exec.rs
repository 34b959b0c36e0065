use crate::{process, Result};

/// Runs external commands on behalf of the pipeline. Each call returns only after the command has
/// finished.
pub trait Executor {
    fn execute(&mut self, command: process::Command) -> Result<()>;
}

/// Runs commands as child processes that inherit stdio, so their output ends up in the job log.
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn execute(&mut self, command: process::Command) -> Result<()> {
        command.status()?;
        Ok(())
    }
}
