//! Windows shortcut (.lnk) creation.
//!
//! Shortcuts are authored by the Windows Script Host through the
//! `WScript.Shell` object model, then optionally patched to request
//! elevation, which the object model cannot express.
//!
//! # Example
//!
//! ```rust,ignore
//! use lnkgonewild_core::{RunnerConfig, ShortcutService, ShortcutSpec, WindowMode};
//!
//! #[tokio::main]
//! async fn main() -> lnkgonewild_core::Result<()> {
//!     let service = ShortcutService::new(RunnerConfig::default());
//!
//!     let spec = ShortcutSpec::builder("C:\\Users\\me\\Desktop\\lsattr.lnk", "C:\\cygwin\\bin\\lsattr.exe")
//!         .arguments(vec!["-a".to_string(), "-d".to_string()])
//!         .hotkey("Ctrl+Alt+Q")
//!         .window_mode(WindowMode::Minimized)
//!         .elevate(true)
//!         .build();
//!
//!     let script = service.create(&spec).await?;
//!     println!("{script}");
//!     Ok(())
//! }
//! ```

mod elevation;
mod escape;
mod runner;
mod script;
mod service;
mod spec;

pub use elevation::ElevationPatcher;
pub use escape::{escape_arguments, escape_path, unescape_argument, EscapedShortcut};
pub use runner::{RunnerConfig, ScriptExecutor, ScriptOutcome, ScriptRunner};
pub use script::ScriptGenerator;
pub use service::ShortcutService;
pub use spec::{Arguments, ShortcutSpec, ShortcutSpecBuilder, WindowMode};
