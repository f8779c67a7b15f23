//! Platform path handling.
//!
//! Shortcuts are always authored for Windows, so path handling here follows
//! Windows rules regardless of the OS this crate is compiled for.

pub mod paths;

pub use paths::{normalize_windows_path, windows_parent};
