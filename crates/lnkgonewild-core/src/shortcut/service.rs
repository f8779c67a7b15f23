//! Shortcut creation pipeline.
//!
//! Stages run strictly in order: validate, escape, generate, run and, when
//! elevation was requested, patch. The first failing stage ends the call.
//! A shortcut that was written before a failed patch is left in place
//! (valid but not elevated); nothing is rolled back.

use super::elevation::ElevationPatcher;
use super::escape::EscapedShortcut;
use super::runner::{RunnerConfig, ScriptExecutor, ScriptRunner};
use super::script::ScriptGenerator;
use super::spec::ShortcutSpec;
use crate::error::{LnkError, Result};
use std::fs;
use tracing::{debug, info, warn};

/// Creates shortcuts through a [`ScriptExecutor`].
pub struct ShortcutService {
    generator: ScriptGenerator,
    executor: Box<dyn ScriptExecutor>,
    patcher: ElevationPatcher,
}

impl Default for ShortcutService {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

impl ShortcutService {
    /// Create a service that runs scripts through the scripting host.
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_executor(Box::new(ScriptRunner::new(config)))
    }

    /// Create a service with a custom script executor.
    pub fn with_executor(executor: Box<dyn ScriptExecutor>) -> Self {
        Self {
            generator: ScriptGenerator::new(),
            executor,
            patcher: ElevationPatcher::new(),
        }
    }

    /// Generate the script for a spec without running it.
    pub fn render_script(&self, spec: &ShortcutSpec) -> Result<String> {
        spec.validate()?;
        Ok(self.generator.render(&EscapedShortcut::from_spec(spec)))
    }

    /// Create the shortcut described by `spec`.
    ///
    /// Returns the generated script text. Success means the scripting host
    /// exited in time; its exit code is not checked, so callers that need
    /// certainty should confirm the file exists.
    pub async fn create(&self, spec: &ShortcutSpec) -> Result<String> {
        let script = self.render_script(spec)?;
        debug!("Generated script for {}:\n{}", spec.shortcut_path.display(), script);

        if let Some(parent) = spec
            .shortcut_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(|e| LnkError::Io {
                message: "create shortcut directory".to_string(),
                path: Some(parent.to_path_buf()),
                source: Some(e),
            })?;
        }

        self.executor.execute(&script).await?;

        if spec.elevate {
            if let Err(e) = self.patcher.patch(&spec.shortcut_path) {
                warn!(
                    "Shortcut {} was created but could not be marked to run as administrator",
                    spec.shortcut_path.display()
                );
                return Err(e);
            }
        }

        info!(
            "Created shortcut {} -> {} (window={}, elevate={})",
            spec.shortcut_path.display(),
            spec.target.display(),
            spec.window_mode,
            spec.elevate
        );

        Ok(script)
    }
}
