//! Entity Model
//!
//! A configuration declares entities: buildable units ([`Executable`]) and
//! capability providers ([`ExternalDynamicLibrary`]). Both share a [`Project`]
//! base holding the directory they were declared in.

use crate::utils::path;
use crate::utils::platform::OsFamily;
use std::path::{Path, PathBuf};

/// Token replaced with the declaring entity's absolute directory
pub const PLACEHOLDER: &str = "$project$";

/// Directory and name shared by every entity
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub directory: PathBuf,
    pub name: String,
}

impl Project {
    pub fn new(directory: impl AsRef<Path>, name: &str) -> Self {
        Project {
            directory: path::absolute(directory),
            name: name.to_string(),
        }
    }

    /// Replaces every `$project$` in `val` with the project directory
    pub fn placeholder(&self, val: &str) -> String {
        val.replace(PLACEHOLDER, &path::display(&self.directory))
    }
}

/// An entity built from source files
pub trait Sources {
    fn project(&self) -> &Project;
    fn sources(&self) -> &[String];
    fn language(&self) -> &str;
    /// Names of the library entities this one links against
    fn libraries(&self) -> &[String];

    /// Source paths joined onto the project directory
    fn abs_sources(&self) -> Vec<String> {
        let directory = path::display(&self.project().directory);
        self.sources()
            .iter()
            .map(|source| path::display(&path::absolute(format!("{}/{}", directory, source))))
            .collect()
    }

    fn output_name(&self, _os: OsFamily) -> String {
        self.project().name.clone()
    }
}

/// Compiler and linker flags contributed to entities that reference a library
pub trait Library {
    fn includes(&self) -> Vec<String>;
    fn library_path(&self) -> Vec<String>;
    fn library(&self) -> Vec<String>;
}

/// An executable linked from its sources
#[derive(Debug, Clone, PartialEq)]
pub struct Executable {
    pub project: Project,
    pub sources: Vec<String>,
    pub language: String,
    pub libraries: Vec<String>,
}

impl Executable {
    pub fn new(
        directory: impl AsRef<Path>,
        name: &str,
        sources: Vec<String>,
        language: &str,
        libraries: Vec<String>,
    ) -> Self {
        Executable {
            project: Project::new(directory, name),
            sources,
            language: language.to_string(),
            libraries,
        }
    }

    pub fn info(&self) -> String {
        let mut info = format!("{}: Executable ({})\n", self.project.name, self.language);
        info.push_str(" Sources:\n");
        for source in &self.sources {
            info.push_str(&format!("  {}\n", source));
        }
        info
    }
}

impl Sources for Executable {
    fn project(&self) -> &Project {
        &self.project
    }

    fn sources(&self) -> &[String] {
        &self.sources
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn libraries(&self) -> &[String] {
        &self.libraries
    }

    fn output_name(&self, os: OsFamily) -> String {
        format!("{}{}", self.project.name, os.exe_suffix())
    }
}

/// A prebuilt dynamic library found through include and search directories
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalDynamicLibrary {
    pub project: Project,
    pub includes: Vec<String>,
    pub libraries_path: Vec<String>,
    pub libraries: Vec<String>,
}

impl ExternalDynamicLibrary {
    pub fn new(
        directory: impl AsRef<Path>,
        name: &str,
        includes: Vec<String>,
        libraries_path: Vec<String>,
        libraries: Vec<String>,
    ) -> Self {
        ExternalDynamicLibrary {
            project: Project::new(directory, name),
            includes,
            libraries_path,
            libraries,
        }
    }

    /// Substitutes the placeholder, makes the result absolute and prefixes it
    fn flags(&self, dirs: &[String], prefix: &str) -> Vec<String> {
        dirs.iter()
            .map(|dir| {
                let abs = path::absolute(self.project.placeholder(dir));
                format!("{}{}", prefix, path::display(&abs))
            })
            .collect()
    }

    pub fn info(&self) -> String {
        let mut info = format!("{}: External Dynamic Library\n", self.project.name);
        info.push_str(" Library:\n");
        for library in &self.libraries {
            info.push_str(&format!("  {}\n", library));
        }
        info.push_str(" Library path:\n");
        for library in &self.libraries_path {
            info.push_str(&format!("  {}\n", library));
        }
        info.push_str(" Include path:\n");
        for include in &self.includes {
            info.push_str(&format!("  {}\n", include));
        }
        info
    }
}

impl Library for ExternalDynamicLibrary {
    fn includes(&self) -> Vec<String> {
        self.flags(&self.includes, "-I")
    }

    fn library_path(&self) -> Vec<String> {
        self.flags(&self.libraries_path, "-L")
    }

    fn library(&self) -> Vec<String> {
        self.libraries.iter().map(|l| format!("-l{}", l)).collect()
    }
}

/// Every kind of entity a configuration can declare
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Executable(Executable),
    ExternalDynamicLibrary(ExternalDynamicLibrary),
}

impl Entity {
    pub fn name(&self) -> &str {
        &self.project().name
    }

    pub fn project(&self) -> &Project {
        match self {
            Entity::Executable(exe) => &exe.project,
            Entity::ExternalDynamicLibrary(lib) => &lib.project,
        }
    }

    /// Human-readable description printed by `--info`
    pub fn info(&self) -> String {
        match self {
            Entity::Executable(exe) => exe.info(),
            Entity::ExternalDynamicLibrary(lib) => lib.info(),
        }
    }

    pub fn as_buildable(&self) -> Option<&dyn Sources> {
        match self {
            Entity::Executable(exe) => Some(exe),
            Entity::ExternalDynamicLibrary(_) => None,
        }
    }

    pub fn as_library(&self) -> Option<&dyn Library> {
        match self {
            Entity::Executable(_) => None,
            Entity::ExternalDynamicLibrary(lib) => Some(lib),
        }
    }
}
