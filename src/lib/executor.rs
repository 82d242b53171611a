use std::path::PathBuf;

use crate::lib::CommandLine;

const STDERR_LIMIT: usize = 2048;

#[derive(thiserror::Error, Debug)]
pub enum ExecutorError {
    #[error("Couldn't start `{binary}`")]
    Spawn {
        binary: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("`{binary}` exited with {status}: {stderr}")]
    Exit {
        binary: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Runs BLAST+ invocations. Implementations block until the process exits.
pub trait Executor: Send + Sync {
    fn run(&self, command: &CommandLine) -> Result<(), ExecutorError>;
}

/// Executes BLAST+ binaries as child processes.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    binary_dir: Option<PathBuf>,
}

impl ProcessExecutor {
    /// Without `binary_dir` the binaries are looked up in `PATH`.
    pub fn new(binary_dir: Option<PathBuf>) -> Self {
        Self { binary_dir }
    }

    fn binary_path(&self, binary: &str) -> PathBuf {
        match &self.binary_dir {
            Some(dir) => dir.join(binary),
            None => PathBuf::from(binary),
        }
    }
}

impl Executor for ProcessExecutor {
    fn run(&self, command: &CommandLine) -> Result<(), ExecutorError> {
        let binary_path = self.binary_path(command.binary);

        log::debug!("{} {}", binary_path.display(), command.display_args());

        let output = std::process::Command::new(&binary_path)
            .args(&command.args)
            .stdin(std::process::Stdio::null())
            .output()
            .map_err(|source| ExecutorError::Spawn {
                binary: command.binary,
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();

        Err(ExecutorError::Exit {
            binary: command.binary,
            status: output.status,
            stderr: match stderr.char_indices().nth(STDERR_LIMIT) {
                Some((index, _)) => format!("{}…", &stderr[..index]),
                None => String::from(stderr),
            },
        })
    }
}
