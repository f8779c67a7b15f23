//! JScript generation for the Windows Script Host.

use super::escape::EscapedShortcut;

/// Renders the script that authors a shortcut through `WScript.Shell`.
///
/// Rendering is pure: the same input always gives byte-identical text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptGenerator;

impl ScriptGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate the script text.
    ///
    /// The icon is taken from the target itself.
    pub fn render(&self, shortcut: &EscapedShortcut) -> String {
        format!(
            r#"var sh = WScript.CreateObject("WScript.Shell");
var shortcut = sh.CreateShortcut("{shortcut_path}");
shortcut.WindowStyle = {window_style};
shortcut.TargetPath = "{target}";
shortcut.Hotkey = "{hotkey}";
shortcut.Arguments = "{arguments}";
shortcut.WorkingDirectory = "{working_directory}";
shortcut.IconLocation = "{target}";
shortcut.Save();
"#,
            shortcut_path = shortcut.shortcut_path,
            window_style = shortcut.window_mode.show_command(),
            target = shortcut.target,
            hotkey = shortcut.hotkey,
            arguments = shortcut.arguments,
            working_directory = shortcut.working_directory,
        )
    }
}
