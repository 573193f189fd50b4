//! Parsing Module

use crate::error::{Error, Result};
use crate::project::{Entity, Executable, ExternalDynamicLibrary};
use crate::utils::log::{log, LogLevel};
use crate::utils::path;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// This function is used to parse the config file of the local project
/// # Arguments
/// * `path` - The path to the config file
///
/// Every entity is rooted at the directory containing the config file.
pub fn parse_config(config_path: &Path) -> Result<Vec<Entity>> {
    let contents = fs::read_to_string(config_path).map_err(|source| Error::Io {
        path: config_path.to_path_buf(),
        source,
    })?;
    let directory = path::absolute(config_path.parent().unwrap_or(Path::new("")));
    log(
        LogLevel::Debug,
        &format!("Parsing {} rooted at {}", config_path.display(), directory.display()),
    );
    parse_entities(&contents, &directory, config_path)
}

/// Parses the entities of a config document
pub fn parse_entities(contents: &str, directory: &Path, config_path: &Path) -> Result<Vec<Entity>> {
    let config: Value = serde_json::from_str(contents).map_err(|source| Error::Json {
        path: config_path.to_path_buf(),
        source,
    })?;
    let config = config.as_object().ok_or_else(|| Error::InvalidRoot {
        path: config_path.to_path_buf(),
    })?;

    let mut entities = Vec::new();
    for (name, definition) in config {
        let table = definition
            .as_object()
            .ok_or_else(|| Error::InvalidEntity { entity: name.clone() })?;
        let typ = parse_cfg_string(table, name, "type")?;
        let entity = match typ.as_str() {
            "executable" => Entity::Executable(Executable::new(
                directory,
                name,
                parse_cfg_vector(table, name, "sources")?,
                &parse_cfg_string(table, name, "lang")?,
                parse_cfg_vector_or_default(table, name, "libraries")?,
            )),
            "external-dynamic-library" => Entity::ExternalDynamicLibrary(ExternalDynamicLibrary::new(
                directory,
                name,
                parse_cfg_vector_or_default(table, name, "includes")?,
                parse_cfg_vector_or_default(table, name, "libraries_path")?,
                parse_cfg_vector(table, name, "libraries")?,
            )),
            _ => {
                return Err(Error::UnknownType {
                    entity: name.clone(),
                    typ: typ.clone(),
                })
            }
        };
        log(LogLevel::Info, &format!("Loaded {}: {}", typ, name));
        entities.push(entity);
    }
    Ok(entities)
}

/// Looks up a required field
fn required<'a>(table: &'a Map<String, Value>, entity: &str, field: &str) -> Result<&'a Value> {
    table.get(field).ok_or_else(|| Error::MissingKey {
        entity: entity.to_string(),
        key: field.to_string(),
    })
}

/// Parses a required field of the string type
fn parse_cfg_string(table: &Map<String, Value>, entity: &str, field: &str) -> Result<String> {
    required(table, entity, field)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidField {
            entity: entity.to_string(),
            key: field.to_string(),
            expected: "a string",
        })
}

/// Parses a required field of the vector type
fn parse_cfg_vector(table: &Map<String, Value>, entity: &str, field: &str) -> Result<Vec<String>> {
    to_strings(required(table, entity, field)?, entity, field)
}

/// Parses an optional field of the vector type, each call gets its own empty vector
fn parse_cfg_vector_or_default(
    table: &Map<String, Value>,
    entity: &str,
    field: &str,
) -> Result<Vec<String>> {
    match table.get(field) {
        Some(value) => to_strings(value, entity, field),
        None => Ok(Vec::new()),
    }
}

fn to_strings(value: &Value, entity: &str, field: &str) -> Result<Vec<String>> {
    let invalid = || Error::InvalidField {
        entity: entity.to_string(),
        key: field.to_string(),
        expected: "an array of strings",
    };
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}
