//! A minimal build automation tool for C and C++ projects.
//!
//! A JSON config file declares executables and external dynamic libraries.
//! pimake picks a compiler/linker preset per language, writes a resolved
//! build plan to `pimake-build.json`, and later compiles and links from it.
//!
//! ```json
//! {
//!     "mylib": {
//!         "type": "external-dynamic-library",
//!         "libraries_path": ["$project$/lib"],
//!         "libraries": ["foo"]
//!     },
//!     "app": {
//!         "type": "executable",
//!         "sources": ["main.c"],
//!         "lang": "C",
//!         "libraries": ["mylib"]
//!     }
//! }
//! ```

/// Contains code to execute build plans
pub mod builder;
/// Contains code that handles the CLI flags
pub mod commands;
/// Error types
pub mod error;
/// Contains parse related functions
pub mod parser;
/// Build plan compilation and persistence
pub mod plan;
/// Toolchain presets
pub mod preset;
/// Executables and libraries declared in a config
pub mod project;
/// Contains logger, path helpers and platform detection
pub mod utils;

pub use error::{Error, Result};
