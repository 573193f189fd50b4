use crate::builder::{Builder, CommandRunner};
use crate::error::Result;
use crate::plan::BuildPlan;
use crate::preset::PresetRegistry;
use crate::project::Entity;
use crate::utils::log::{log, LogLevel};
use std::path::Path;

/// Prints the description of every entity
pub fn info(entities: &[Entity]) {
    for entity in entities {
        println!("{}", entity.info());
    }
}

/// Resolves the entities into a build plan and writes it to `plan_path`
/// # Arguments
/// * `entities` - The entities loaded from the config file
/// * `registry` - The toolchain presets to choose from
/// * `plan_path` - Where the plan is persisted
pub fn make(entities: &[Entity], registry: &PresetRegistry, plan_path: &Path) -> Result<BuildPlan> {
    log(LogLevel::Log, "Planning build...");
    let plan = BuildPlan::compile(entities, registry);
    plan.save(plan_path)?;
    Ok(plan)
}

/// Loads the persisted plan from `plan_path` and builds it
pub fn build(plan_path: &Path) -> Result<()> {
    let plan = BuildPlan::load(plan_path)?;
    log(
        LogLevel::Log,
        &format!("Building {} element(s) from {}", plan.len(), plan_path.display()),
    );
    Builder::new(&plan, CommandRunner).build()
}
