//! Platform detection

/// Operating system family that decides toolchain locations and output names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Posix,
}

impl OsFamily {
    /// The family of the host this binary was built for
    pub fn current() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Posix
        }
    }

    /// Suffix appended to linked executables
    pub fn exe_suffix(self) -> &'static str {
        match self {
            OsFamily::Windows => ".exe",
            OsFamily::Posix => "",
        }
    }
}
