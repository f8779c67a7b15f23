//! Centralized configuration for lnkgonewild.
//!
//! Constants for the scripting host invocation and the one part of the
//! shortcut binary layout this crate touches.

use std::time::Duration;

/// Scripting host defaults.
pub struct ScriptHostConfig;

impl ScriptHostConfig {
    /// Windows Script Host, GUI flavour (no console window of its own).
    pub const DEFAULT_HOST: &'static str = "wscript.exe";
    /// Batch mode: script errors and prompts are never shown.
    pub const DEFAULT_HOST_ARGS: &'static [&'static str] = &["//B", "//Nologo"];
    /// The extension tells the host which engine runs the file (JScript).
    pub const SCRIPT_EXTENSION: &'static str = ".js";
    pub const TEMP_PREFIX: &'static str = "lnkgonewild-";
    pub const RUN_TIMEOUT: Duration = Duration::from_secs(5);
    /// `CREATE_NO_WINDOW` process creation flag.
    pub const CREATE_NO_WINDOW: u32 = 0x0800_0000;
}

/// Shell link (.lnk) header layout.
pub struct LinkFormat;

impl LinkFormat {
    /// Byte inside the header `LinkFlags` field that carries `RunAsUser`.
    pub const ELEVATION_FLAG_OFFSET: u64 = 0x15;
    pub const ELEVATION_FLAG_BIT: u8 = 0x20;
}
