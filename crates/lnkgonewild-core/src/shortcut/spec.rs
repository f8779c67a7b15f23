//! Shortcut creation input.

use crate::error::{LnkError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Window state the target starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum WindowMode {
    Normal,
    #[default]
    Minimized,
    Maximized,
}

impl WindowMode {
    /// Windows "show window" code written into the shortcut.
    ///
    /// These are the values the shell object model accepts for
    /// `WindowStyle`: `SW_SHOWNOACTIVATE` (4), `SW_SHOWMINNOACTIVE` (7) and
    /// 0, which the shell maps to maximized.
    pub fn show_command(self) -> i32 {
        match self {
            WindowMode::Minimized => 7,
            WindowMode::Maximized => 0,
            WindowMode::Normal => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WindowMode::Normal => "normal",
            WindowMode::Minimized => "minimized",
            WindowMode::Maximized => "maximized",
        }
    }
}

/// Unknown names fall back to [`WindowMode::Normal`].
impl From<&str> for WindowMode {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "minimized" => WindowMode::Minimized,
            "maximized" => WindowMode::Maximized,
            "normal" => WindowMode::Normal,
            other => {
                warn!("Unknown window mode {:?}, using normal", other);
                WindowMode::Normal
            }
        }
    }
}

impl From<String> for WindowMode {
    fn from(name: String) -> Self {
        WindowMode::from(name.as_str())
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments for the shortcut target.
///
/// Either form ends up as one space-joined string in the shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arguments {
    /// Individual tokens, joined with a single space.
    List(Vec<String>),
    /// A command line that is already joined.
    Joined(String),
}

impl Default for Arguments {
    fn default() -> Self {
        Arguments::List(Vec::new())
    }
}

impl Arguments {
    pub fn is_empty(&self) -> bool {
        match self {
            Arguments::List(tokens) => tokens.is_empty(),
            Arguments::Joined(line) => line.is_empty(),
        }
    }
}

impl From<Vec<String>> for Arguments {
    fn from(tokens: Vec<String>) -> Self {
        Arguments::List(tokens)
    }
}

impl From<&str> for Arguments {
    fn from(line: &str) -> Self {
        Arguments::Joined(line.to_string())
    }
}

/// Everything needed to author one shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutSpec {
    /// Destination `.lnk` file. Its parent directory is created if missing.
    pub shortcut_path: PathBuf,
    /// Program or file the shortcut launches.
    pub target: PathBuf,
    #[serde(default)]
    pub arguments: Arguments,
    /// Key combination such as `Ctrl+Alt+Q`. Not interpreted, only escaped.
    #[serde(default)]
    pub hotkey: String,
    /// Defaults to the directory containing `target`.
    #[serde(default)]
    pub working_directory: Option<PathBuf>,
    #[serde(default)]
    pub window_mode: WindowMode,
    /// Mark the shortcut "Run as administrator".
    #[serde(default)]
    pub elevate: bool,
}

impl ShortcutSpec {
    /// Create a new shortcut spec builder.
    pub fn builder(
        shortcut_path: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
    ) -> ShortcutSpecBuilder {
        ShortcutSpecBuilder::new(shortcut_path, target)
    }

    /// Working directory to record, or `None` when it should be derived
    /// from the target.
    ///
    /// An empty value and the literal `None` both count as absent.
    pub fn explicit_working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref().filter(|dir| {
            let text = dir.to_string_lossy();
            let text = text.trim();
            !text.is_empty() && text != "None"
        })
    }

    /// Check the spec before anything touches the filesystem.
    pub fn validate(&self) -> Result<()> {
        check_path("shortcut_path", &self.shortcut_path)?;
        check_path("target", &self.target)?;
        if let Some(dir) = self.explicit_working_directory() {
            check_path("working_directory", dir)?;
        }

        Ok(())
    }
}

/// Reject paths that are empty or that no Windows path can contain.
fn check_path(field: &str, path: &Path) -> Result<()> {
    let text = path.to_string_lossy();
    if text.trim().is_empty() {
        return Err(LnkError::validation(field, "must not be empty"));
    }
    if text.chars().any(|c| c == '"' || c.is_control()) {
        return Err(LnkError::validation(
            field,
            format!("{text:?} contains a quote or control character"),
        ));
    }
    Ok(())
}

/// Builder for [`ShortcutSpec`].
#[derive(Debug, Clone)]
pub struct ShortcutSpecBuilder {
    spec: ShortcutSpec,
}

impl ShortcutSpecBuilder {
    pub fn new(shortcut_path: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            spec: ShortcutSpec {
                shortcut_path: shortcut_path.into(),
                target: target.into(),
                arguments: Arguments::default(),
                hotkey: String::new(),
                working_directory: None,
                window_mode: WindowMode::default(),
                elevate: false,
            },
        }
    }

    pub fn arguments(mut self, arguments: impl Into<Arguments>) -> Self {
        self.spec.arguments = arguments.into();
        self
    }

    pub fn hotkey(mut self, hotkey: impl Into<String>) -> Self {
        self.spec.hotkey = hotkey.into();
        self
    }

    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spec.working_directory = Some(dir.into());
        self
    }

    pub fn window_mode(mut self, mode: WindowMode) -> Self {
        self.spec.window_mode = mode;
        self
    }

    pub fn elevate(mut self, elevate: bool) -> Self {
        self.spec.elevate = elevate;
        self
    }

    pub fn build(self) -> ShortcutSpec {
        self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_command_mapping() {
        assert_eq!(WindowMode::Minimized.show_command(), 7);
        assert_eq!(WindowMode::Maximized.show_command(), 0);
        assert_eq!(WindowMode::Normal.show_command(), 4);
        assert_eq!(WindowMode::default(), WindowMode::Minimized);
    }

    #[test]
    fn test_window_mode_from_name() {
        assert_eq!(WindowMode::from("minimized"), WindowMode::Minimized);
        assert_eq!(WindowMode::from(" Maximized "), WindowMode::Maximized);
        assert_eq!(WindowMode::from("normal"), WindowMode::Normal);
        assert_eq!(WindowMode::from("invisible"), WindowMode::Normal);
        assert_eq!(WindowMode::from(""), WindowMode::Normal);
    }

    #[test]
    fn test_builder_defaults() {
        let spec = ShortcutSpec::builder("C:\\out\\app.lnk", "C:\\bin\\app.exe").build();

        assert!(spec.arguments.is_empty());
        assert!(spec.hotkey.is_empty());
        assert!(spec.working_directory.is_none());
        assert_eq!(spec.window_mode, WindowMode::Minimized);
        assert!(!spec.elevate);
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let spec = ShortcutSpec::builder("  ", "C:\\bin\\app.exe").build();
        assert!(matches!(
            spec.validate(),
            Err(LnkError::Validation { ref field, .. }) if field == "shortcut_path"
        ));

        let spec = ShortcutSpec::builder("C:\\out\\app.lnk", "").build();
        assert!(matches!(
            spec.validate(),
            Err(LnkError::Validation { ref field, .. }) if field == "target"
        ));
    }

    #[test]
    fn test_validate_rejects_quote_in_path() {
        let spec = ShortcutSpec::builder("C:\\out\\app.lnk", "C:\\bin\\a\"pp.exe").build();
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_any_hotkey() {
        for hotkey in ["Ctrl+Alt+Q", "Ctrl+\"", "Alt+\\", ""] {
            let spec = ShortcutSpec::builder("C:\\out\\app.lnk", "C:\\bin\\app.exe")
                .hotkey(hotkey)
                .build();
            assert!(spec.validate().is_ok(), "{hotkey}");
        }
    }

    #[test]
    fn test_explicit_working_directory() {
        let base = ShortcutSpec::builder("C:\\out\\app.lnk", "C:\\bin\\app.exe");

        assert!(base.clone().build().explicit_working_directory().is_none());
        assert!(base
            .clone()
            .working_directory("")
            .build()
            .explicit_working_directory()
            .is_none());
        assert!(base
            .clone()
            .working_directory("None")
            .build()
            .explicit_working_directory()
            .is_none());
        assert_eq!(
            base.working_directory("D:\\work")
                .build()
                .explicit_working_directory(),
            Some(Path::new("D:\\work"))
        );
    }

    #[test]
    fn test_deserialize_spec() {
        let spec: ShortcutSpec = serde_json::from_str(
            r#"{
                "shortcut_path": "C:\\out\\app.lnk",
                "target": "C:\\bin\\app.exe",
                "arguments": ["-a", "-d"],
                "window_mode": "maximized",
                "elevate": true
            }"#,
        )
        .unwrap();

        assert_eq!(spec.arguments, Arguments::List(vec!["-a".into(), "-d".into()]));
        assert_eq!(spec.window_mode, WindowMode::Maximized);
        assert!(spec.elevate);
        assert!(spec.hotkey.is_empty());

        let joined: ShortcutSpec = serde_json::from_str(
            r#"{"shortcut_path": "a.lnk", "target": "a.exe", "arguments": "-x 1"}"#,
        )
        .unwrap();
        assert_eq!(joined.arguments, Arguments::Joined("-x 1".into()));
        assert_eq!(joined.window_mode, WindowMode::Minimized);
    }

    #[test]
    fn test_deserialize_window_mode_leniently() {
        for (name, mode) in [
            ("Maximized", WindowMode::Maximized),
            ("MINIMIZED", WindowMode::Minimized),
            ("Invisible", WindowMode::Normal),
        ] {
            let spec: ShortcutSpec = serde_json::from_str(&format!(
                r#"{{"shortcut_path": "a.lnk", "target": "a.exe", "window_mode": "{name}"}}"#
            ))
            .unwrap();
            assert_eq!(spec.window_mode, mode, "{name}");
        }

        assert_eq!(
            serde_json::to_string(&WindowMode::Maximized).unwrap(),
            "\"maximized\""
        );
    }
}
