//! Escaping for values embedded in generated script string literals.

use super::spec::{Arguments, ShortcutSpec, WindowMode};
use crate::platform::{normalize_windows_path, windows_parent};

/// A [`ShortcutSpec`] with every string field ready to be placed between
/// double quotes in a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapedShortcut {
    pub shortcut_path: String,
    pub target: String,
    /// Escaped tokens joined by a single space. Empty when there are none.
    pub arguments: String,
    pub hotkey: String,
    pub working_directory: String,
    pub window_mode: WindowMode,
}

impl EscapedShortcut {
    /// Escape every field of a validated spec.
    pub fn from_spec(spec: &ShortcutSpec) -> Self {
        let target = spec.target.to_string_lossy();
        let working_directory = match spec.explicit_working_directory() {
            Some(dir) => normalize_windows_path(&dir.to_string_lossy()),
            None => windows_parent(&target),
        };

        Self {
            shortcut_path: escape_path(&spec.shortcut_path.to_string_lossy()),
            target: escape_path(&target),
            arguments: escape_arguments(&spec.arguments).join(" "),
            hotkey: escape_argument(&spec.hotkey),
            working_directory: escape_path(&working_directory),
            window_mode: spec.window_mode,
        }
    }
}

/// Normalize a path to Windows form and double every backslash.
pub fn escape_path(path: &str) -> String {
    normalize_windows_path(path).replace('\\', "\\\\")
}

/// Escape argument tokens for a double-quoted script literal.
///
/// Backslashes are doubled, double quotes get a backslash, and line breaks
/// become `\r` / `\n` escapes. Empty input yields no tokens.
pub fn escape_arguments(arguments: &Arguments) -> Vec<String> {
    match arguments {
        Arguments::List(tokens) if tokens.is_empty() => Vec::new(),
        Arguments::List(tokens) => tokens.iter().map(|t| escape_argument(t)).collect(),
        Arguments::Joined(line) if line.is_empty() => Vec::new(),
        Arguments::Joined(line) => vec![escape_argument(line)],
    }
}

fn escape_argument(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());
    for c in token.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Reverse [`escape_arguments`] for a single token.
pub fn unescape_argument(escaped: &str) -> String {
    let mut token = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            token.push(c);
            continue;
        }
        match chars.next() {
            Some('r') => token.push('\r'),
            Some('n') => token.push('\n'),
            Some(other) => token.push(other),
            None => token.push('\\'),
        }
    }
    token
}
