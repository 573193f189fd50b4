//! Toolchain presets
//!
//! A preset ties a source language to a compiler/linker pair installed at a
//! well-known location. The registry is scanned in order and the first
//! available preset for a language wins.

use crate::utils::platform::OsFamily;
use std::path::Path;

/// Answers whether a toolchain binary is installed
pub trait Probe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probes the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl Probe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

impl<F: Fn(&Path) -> bool> Probe for F {
    fn exists(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Resolved compiler and linker binaries
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub compiler: String,
    pub linker: String,
}

impl Toolchain {
    pub fn new(compiler: &str, linker: &str) -> Self {
        Toolchain {
            compiler: compiler.to_string(),
            linker: linker.to_string(),
        }
    }
}

/// A named toolchain for one language
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub language: String,
    windows: Option<Toolchain>,
    posix: Option<Toolchain>,
    always_available: bool,
}

impl Preset {
    pub fn new(name: &str, language: &str) -> Self {
        Preset {
            name: name.to_string(),
            language: language.to_string(),
            windows: None,
            posix: None,
            always_available: false,
        }
    }

    /// The empty preset adopted when nothing else matches
    pub fn fallback() -> Self {
        Preset {
            always_available: true,
            ..Preset::new("", "")
        }
    }

    pub fn on_windows(mut self, compiler: &str, linker: &str) -> Self {
        self.windows = Some(Toolchain::new(compiler, linker));
        self
    }

    pub fn on_posix(mut self, compiler: &str, linker: &str) -> Self {
        self.posix = Some(Toolchain::new(compiler, linker));
        self
    }

    /// Returns the toolchain if both binaries exist at this family's location
    pub fn check(&self, os: OsFamily, probe: &dyn Probe) -> Option<Toolchain> {
        if self.always_available {
            return Some(Toolchain::default());
        }
        let toolchain = match os {
            OsFamily::Windows => self.windows.as_ref()?,
            OsFamily::Posix => self.posix.as_ref()?,
        };
        if probe.exists(Path::new(&toolchain.compiler)) && probe.exists(Path::new(&toolchain.linker)) {
            Some(toolchain.clone())
        } else {
            None
        }
    }
}

/// Outcome of looking up a language in the registry
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    pub preset: &'a Preset,
    pub toolchain: Toolchain,
}

impl Resolved<'_> {
    pub fn is_fallback(&self) -> bool {
        self.preset.always_available
    }
}

/// Ordered list of presets consulted per language
pub struct PresetRegistry {
    presets: Vec<Preset>,
    fallback: Preset,
    os: OsFamily,
    probe: Box<dyn Probe>,
}

impl PresetRegistry {
    pub fn new(presets: Vec<Preset>, os: OsFamily, probe: Box<dyn Probe>) -> Self {
        PresetRegistry {
            presets,
            fallback: Preset::fallback(),
            os,
            probe,
        }
    }

    /// clang, clang++, gcc and g++ at their usual install locations
    pub fn builtin() -> Self {
        Self::new(builtin_presets(), OsFamily::current(), Box::new(FsProbe))
    }

    pub fn os(&self) -> OsFamily {
        self.os
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// First preset for `language` whose binaries are installed, else the fallback
    pub fn resolve(&self, language: &str) -> Resolved<'_> {
        self.presets
            .iter()
            .filter(|preset| preset.language == language)
            .find_map(|preset| {
                preset
                    .check(self.os, self.probe.as_ref())
                    .map(|toolchain| Resolved { preset, toolchain })
            })
            .unwrap_or_else(|| Resolved {
                preset: &self.fallback,
                toolchain: Toolchain::default(),
            })
    }
}

fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::new("clang", "C")
            .on_windows("C:/Program Files/LLVM/bin/clang.exe", "C:/Program Files/LLVM/bin/clang.exe")
            .on_posix("/usr/bin/clang", "/usr/bin/clang"),
        Preset::new("clang++", "C++")
            .on_windows("C:/Program Files/LLVM/bin/clang++.exe", "C:/Program Files/LLVM/bin/clang++.exe")
            .on_posix("/usr/bin/clang++", "/usr/bin/clang++"),
        Preset::new("gcc", "C").on_posix("/usr/bin/gcc", "/usr/bin/gcc"),
        Preset::new("g++", "C++").on_posix("/usr/bin/g++", "/usr/bin/g++"),
    ]
}
