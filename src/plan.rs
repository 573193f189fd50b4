//! Build plan
//!
//! The plan is the fully resolved list of compiler and linker parameters for
//! every buildable entity. It is persisted as JSON so that planning and
//! building can run as separate invocations.

use crate::error::{Error, Result};
use crate::preset::PresetRegistry;
use crate::project::Entity;
use crate::utils::log::{log, LogLevel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default file name of the persisted plan
pub const PLAN_FILE: &str = "pimake-build.json";

/// Everything needed to compile and link one entity
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildElement {
    pub compiler: String,
    pub linker: String,
    pub output: String,
    pub sources: Vec<String>,
    #[serde(rename = "linker-flags")]
    pub linker_flags: Vec<String>,
    #[serde(rename = "compiler-flags")]
    pub compiler_flags: Vec<String>,
}

/// Build elements keyed by entity name, in declaration order
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    #[serde(with = "ordered_map")]
    elements: Vec<(String, BuildElement)>,
}

impl BuildPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every buildable entity into a build element
    pub fn compile(entities: &[Entity], registry: &PresetRegistry) -> Self {
        let mut plan = BuildPlan::new();
        for entity in entities {
            let Some(buildable) = entity.as_buildable() else {
                continue;
            };
            let name = entity.name();
            let resolved = registry.resolve(buildable.language());
            if resolved.is_fallback() {
                log(
                    LogLevel::Warn,
                    &format!(
                        "No toolchain available for {} (language '{}')",
                        name,
                        buildable.language()
                    ),
                );
            } else {
                log(
                    LogLevel::Info,
                    &format!("Using preset {} for {}", resolved.preset.name, name),
                );
            }

            let mut element = BuildElement {
                compiler: resolved.toolchain.compiler,
                linker: resolved.toolchain.linker,
                output: buildable.output_name(registry.os()),
                sources: buildable.abs_sources(),
                ..BuildElement::default()
            };
            for library in buildable.libraries() {
                let found = entities
                    .iter()
                    .filter(|e| e.name() == library.as_str())
                    .find_map(Entity::as_library);
                match found {
                    Some(lib) => {
                        element.linker_flags.extend(lib.library_path());
                        element.linker_flags.extend(lib.library());
                        element.compiler_flags.extend(lib.includes());
                    }
                    None => log(
                        LogLevel::Warn,
                        &format!("{} references unknown library: {}", name, library),
                    ),
                }
            }
            plan.insert(name, element);
        }
        plan
    }

    /// Adds an element, replacing an existing one of the same name in place
    pub fn insert(&mut self, name: &str, element: BuildElement) {
        match self.elements.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => {
                log(LogLevel::Warn, &format!("Duplicate entity name: {}", name));
                slot.1 = element;
            }
            None => self.elements.push((name.to_string(), element)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&BuildElement> {
        self.elements
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, element)| element)
    }

    pub fn elements(&self) -> impl Iterator<Item = (&str, &BuildElement)> + '_ {
        self.elements.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serializes the plan as `{"elements": {...}}` with four-space indentation.
    /// Non-ASCII text is written as raw UTF-8, not as `\u` escapes.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
    }

    /// Writes the plan to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json().map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log(LogLevel::Log, &format!("Build plan written to {}", path.display()));
        Ok(())
    }

    /// Reads a plan written by [`BuildPlan::save`]; its contents are trusted as-is
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// (De)serializes the ordered element list as a JSON object
mod ordered_map {
    use super::BuildElement;
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(
        elements: &[(String, BuildElement)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(elements.iter().map(|(k, v)| (k, v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, BuildElement)>, D::Error> {
        struct ElementsVisitor;

        impl<'de> Visitor<'de> for ElementsVisitor {
            type Value = Vec<(String, BuildElement)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of build elements")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut elements: Vec<(String, BuildElement)> = Vec::new();
                while let Some((name, element)) = map.next_entry::<String, BuildElement>()? {
                    match elements.iter_mut().find(|(n, _)| *n == name) {
                        Some(slot) => slot.1 = element,
                        None => elements.push((name, element)),
                    }
                }
                Ok(elements)
            }
        }

        deserializer.deserialize_map(ElementsVisitor)
    }
}
