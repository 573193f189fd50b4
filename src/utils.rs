//! This module contains logging, path handling and platform detection
//! used by the pimake library

pub mod log;
pub mod path;
pub mod platform;
