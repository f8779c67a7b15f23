//! lnkgonewild core - Windows shortcut creation with "Run as administrator".
//!
//! The Windows shell object model can author `.lnk` files but cannot mark
//! them to run elevated. This crate drives the Windows Script Host to write
//! the shortcut, then flips the elevation bit in the file header.
//!
//! See [`shortcut`] for the pipeline and an example.

pub mod config;
pub mod error;
pub mod platform;
pub mod shortcut;

// Re-export commonly used types
pub use config::{LinkFormat, ScriptHostConfig};
pub use error::{LnkError, Result};
pub use shortcut::{
    Arguments, ElevationPatcher, RunnerConfig, ScriptExecutor, ScriptOutcome, ScriptRunner,
    ShortcutService, ShortcutSpec, WindowMode,
};
