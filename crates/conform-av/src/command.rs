//! Async builder for external tool invocations.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use conform_common::{Error, Result};
use tokio::process::Command;

/// Default invocation timeout. Clip encodes of long ranges can take a
/// while; anything past this is treated as a hung tool.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Captured output of a finished tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Standard output, lossy UTF-8.
    pub stdout: String,
    /// Standard error, lossy UTF-8.
    pub stderr: String,
}

/// An external tool invocation: program, arguments, timeout.
///
/// ```no_run
/// use conform_av::ToolCommand;
///
/// # async fn example() -> conform_common::Result<()> {
/// let output = ToolCommand::new("ffprobe")
///     .args(["-v", "quiet", "-print_format", "json", "-show_format"])
///     .arg("/media/plate.mov")
///     .run()
///     .await?;
/// println!("{}", output.stdout);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ToolCommand {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Override the default timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.to_string_lossy().into_owned())
    }

    /// Run the tool, capturing stdout and stderr.
    ///
    /// Fails on spawn errors, non-zero exit (stderr included in the
    /// message), or timeout. On timeout the child is killed rather than
    /// left running.
    pub async fn run(&self) -> Result<ToolOutput> {
        let tool = self.tool_name();
        tracing::debug!(%tool, args = ?self.args, "running external tool");

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::tool(&tool, format!("failed to spawn: {e}")))?;

        let waited = tokio::time::timeout(self.timeout, child.wait_with_output()).await;

        let output = match waited {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(Error::tool(&tool, format!("failed waiting for process: {e}")))
            }
            // kill_on_drop reaps the child when the cancelled future drops.
            Err(_) => {
                return Err(Error::tool(
                    &tool,
                    format!("timed out after {:?}", self.timeout),
                ))
            }
        };

        let result = ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.status.success() {
            return Err(Error::tool(
                &tool,
                format!(
                    "exited with {}: {}",
                    result.status,
                    result.stderr.trim()
                ),
            ));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout() {
        let output = ToolCommand::new("echo").arg("conform").run().await;
        if let Ok(out) = output {
            assert!(out.status.success());
            assert_eq!(out.stdout.trim(), "conform");
        }
        // echo missing on a bare environment is not a test failure.
    }

    #[tokio::test]
    async fn missing_program_is_a_tool_error() {
        let result = ToolCommand::new("conform_no_such_tool_9f2a").run().await;
        assert!(matches!(result, Err(Error::Tool { .. })));
    }

    #[tokio::test]
    async fn timeout_kills_the_child() {
        let result = ToolCommand::new("sleep")
            .arg("30")
            .timeout(Duration::from_millis(100))
            .run()
            .await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("timed out"), "unexpected error: {err}");
    }
}
