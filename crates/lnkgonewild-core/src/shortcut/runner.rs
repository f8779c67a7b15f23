//! Running generated scripts in the external scripting host.
//!
//! The script is written to a uniquely named temp file, the host is started
//! with an explicit argument vector (never through a shell), and the wait is
//! bounded by a timeout. The temp file is removed on every exit path.

use crate::config::ScriptHostConfig;
use crate::error::{LnkError, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempPath;
use tokio::process::Command;
use tracing::{debug, warn};

/// What the scripting host left behind.
///
/// Kept for diagnostics only: a non-zero exit code is not treated as a
/// failure.
#[derive(Debug, Clone, Default)]
pub struct ScriptOutcome {
    /// Exit code, `None` if the host was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Executes a generated script.
#[async_trait]
pub trait ScriptExecutor: Send + Sync {
    /// Run the script text to completion.
    async fn execute(&self, script: &str) -> Result<ScriptOutcome>;
}

/// Scripting host settings.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Host executable, looked up on `PATH` when not absolute.
    pub host: PathBuf,
    /// Arguments placed before the script path.
    pub host_args: Vec<String>,
    /// Temp file extension, including the dot.
    pub extension: String,
    pub timeout: Duration,
    /// Directory for the temp script; the system temp dir when `None`.
    pub temp_dir: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            host: PathBuf::from(ScriptHostConfig::DEFAULT_HOST),
            host_args: ScriptHostConfig::DEFAULT_HOST_ARGS
                .iter()
                .map(|arg| arg.to_string())
                .collect(),
            extension: ScriptHostConfig::SCRIPT_EXTENSION.to_string(),
            timeout: ScriptHostConfig::RUN_TIMEOUT,
            temp_dir: None,
        }
    }
}

impl RunnerConfig {
    pub fn with_host(mut self, host: impl Into<PathBuf>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_host_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.host_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_temp_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.temp_dir = Some(dir.as_ref().to_path_buf());
        self
    }
}

/// Runs scripts through the configured scripting host.
#[derive(Debug, Clone, Default)]
pub struct ScriptRunner {
    config: RunnerConfig,
}

impl ScriptRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Write the script to a fresh temp file and close the handle so the
    /// host can open it.
    fn write_script(&self, script: &str) -> Result<TempPath> {
        let mut builder = tempfile::Builder::new();
        builder
            .prefix(ScriptHostConfig::TEMP_PREFIX)
            .suffix(&self.config.extension);

        let created = match &self.config.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        let mut file = created.map_err(|e| LnkError::Io {
            message: "create temporary script".to_string(),
            path: self.config.temp_dir.clone(),
            source: Some(e),
        })?;

        // Dropping the temp path on error removes the file
        file.write_all(script.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| LnkError::io_with_path(e, file.path()))?;

        Ok(file.into_temp_path())
    }

    fn command(&self, script_path: &Path) -> Command {
        let mut cmd = Command::new(&self.config.host);
        cmd.args(&self.config.host_args)
            .arg(script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        cmd.creation_flags(ScriptHostConfig::CREATE_NO_WINDOW);

        cmd
    }

    async fn run_host(&self, script_path: &Path) -> Result<ScriptOutcome> {
        let host = self.config.host.display().to_string();

        let child = self
            .command(script_path)
            .spawn()
            .map_err(|e| LnkError::LaunchFailed {
                program: host.clone(),
                message: e.to_string(),
            })?;
        debug!("Started {} (pid {:?})", host, child.id());

        // Stdin is closed before waiting, so the host can never block on input.
        // If the timeout fires, the child future is dropped and the host killed.
        let output = tokio::time::timeout(self.config.timeout, child.wait_with_output())
            .await
            .map_err(|_| LnkError::Timeout(self.config.timeout))?
            .map_err(|e| LnkError::Io {
                message: format!("wait for {host}"),
                path: Some(script_path.to_path_buf()),
                source: Some(e),
            })?;

        let outcome = ScriptOutcome {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !output.status.success() {
            warn!(
                "{} exited with {:?}; the shortcut may not have been written. stderr: {}",
                host,
                outcome.exit_code,
                outcome.stderr.trim()
            );
        }

        Ok(outcome)
    }
}

#[async_trait]
impl ScriptExecutor for ScriptRunner {
    async fn execute(&self, script: &str) -> Result<ScriptOutcome> {
        let script_path = self.write_script(script)?;
        debug!("Wrote script to {}", script_path.display());

        let result = self.run_host(&script_path).await;

        let shown = script_path.display().to_string();
        if let Err(e) = script_path.close() {
            warn!("Failed to remove temporary script {}: {}", shown, e);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.host, PathBuf::from("wscript.exe"));
        assert_eq!(config.host_args, vec!["//B", "//Nologo"]);
        assert_eq!(config.extension, ".js");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.temp_dir.is_none());
    }

    #[cfg(unix)]
    mod sh_host {
        use super::*;
        use tempfile::TempDir;

        fn sh_runner(temp_dir: &Path) -> ScriptRunner {
            ScriptRunner::new(
                RunnerConfig::default()
                    .with_host("sh")
                    .with_host_args(Vec::<String>::new())
                    .with_extension(".sh")
                    .with_temp_dir(temp_dir),
            )
        }

        fn leftover_scripts(dir: &Path) -> usize {
            std::fs::read_dir(dir).unwrap().count()
        }

        #[tokio::test]
        async fn test_runs_script_and_cleans_up() {
            let temp_dir = TempDir::new().unwrap();
            let marker = temp_dir.path().join("marker");
            let scripts = temp_dir.path().join("scripts");
            std::fs::create_dir_all(&scripts).unwrap();

            let outcome = sh_runner(&scripts)
                .execute(&format!("printf ran > '{}'\necho done\n", marker.display()))
                .await
                .unwrap();

            assert_eq!(outcome.exit_code, Some(0));
            assert_eq!(outcome.stdout.trim(), "done");
            assert_eq!(std::fs::read_to_string(&marker).unwrap(), "ran");
            assert_eq!(leftover_scripts(&scripts), 0);
        }

        #[tokio::test]
        async fn test_nonzero_exit_is_not_an_error() {
            let temp_dir = TempDir::new().unwrap();

            let outcome = sh_runner(temp_dir.path())
                .execute("echo broken >&2\nexit 3\n")
                .await
                .unwrap();

            assert_eq!(outcome.exit_code, Some(3));
            assert_eq!(outcome.stderr.trim(), "broken");
            assert_eq!(leftover_scripts(temp_dir.path()), 0);
        }

        #[tokio::test]
        async fn test_timeout_cleans_up() {
            let temp_dir = TempDir::new().unwrap();
            let runner = ScriptRunner::new(
                sh_runner(temp_dir.path())
                    .config()
                    .clone()
                    .with_timeout(Duration::from_millis(200)),
            );

            let started = std::time::Instant::now();
            let result = runner.execute("sleep 30\n").await;

            assert!(matches!(result, Err(LnkError::Timeout(d)) if d == Duration::from_millis(200)));
            assert!(started.elapsed() < Duration::from_secs(10));
            assert_eq!(leftover_scripts(temp_dir.path()), 0);
        }

        #[tokio::test]
        async fn test_launch_failure_cleans_up() {
            let temp_dir = TempDir::new().unwrap();
            let runner = ScriptRunner::new(
                RunnerConfig::default()
                    .with_host(temp_dir.path().join("no-such-host"))
                    .with_temp_dir(temp_dir.path()),
            );

            let result = runner.execute("WScript.Echo(1);").await;

            assert!(matches!(result, Err(LnkError::LaunchFailed { .. })));
            assert_eq!(leftover_scripts(temp_dir.path()), 0);
        }

        #[tokio::test]
        async fn test_host_args_precede_script_path() {
            let temp_dir = TempDir::new().unwrap();
            let runner = ScriptRunner::new(
                sh_runner(temp_dir.path())
                    .config()
                    .clone()
                    .with_host_args(["-c", "echo \"$1\"", "sh"]),
            );

            let outcome = runner.execute("ignored\n").await.unwrap();

            let reported = PathBuf::from(outcome.stdout.trim());
            assert_eq!(reported.parent(), Some(temp_dir.path()));
            assert!(reported.extension().is_some_and(|ext| ext == "sh"));
            assert!(!reported.exists());
        }

        #[tokio::test]
        async fn test_host_cannot_read_stdin() {
            let temp_dir = TempDir::new().unwrap();

            // `read` sees EOF immediately instead of waiting for a terminal
            let outcome = sh_runner(temp_dir.path())
                .execute("if read line; then echo got; else echo eof; fi\n")
                .await
                .unwrap();

            assert_eq!(outcome.stdout.trim(), "eof");
        }

        #[tokio::test]
        async fn test_missing_temp_dir_is_io_error() {
            let temp_dir = TempDir::new().unwrap();
            let runner = sh_runner(&temp_dir.path().join("missing"));

            let result = runner.execute("true\n").await;

            assert!(matches!(result, Err(LnkError::Io { .. })));
        }

        #[tokio::test]
        async fn test_script_removed_by_host_is_not_an_error() {
            let temp_dir = TempDir::new().unwrap();

            // The script deletes itself, so the final cleanup finds nothing
            let outcome = sh_runner(temp_dir.path())
                .execute("rm -f \"$0\"\necho gone\n")
                .await
                .unwrap();

            assert_eq!(outcome.exit_code, Some(0));
            assert_eq!(outcome.stdout.trim(), "gone");
            assert_eq!(leftover_scripts(temp_dir.path()), 0);
        }
    }
}
