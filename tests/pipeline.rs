//! Plans a project from a config file on disk and builds it from the saved plan

use pimake::builder::{Builder, Runner};
use pimake::parser::parse_config;
use pimake::plan::{BuildPlan, PLAN_FILE};
use pimake::preset::{Preset, PresetRegistry};
use pimake::utils::path;
use pimake::utils::platform::OsFamily;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"{
    "mylib": {
        "type": "external-dynamic-library",
        "includes": ["$project$/include"],
        "libraries_path": ["$project$/lib"],
        "libraries": ["foo"]
    },
    "app": {
        "type": "executable",
        "sources": ["main.c", "src/util.c"],
        "lang": "C",
        "libraries": ["mylib", "nowhere"]
    },
    "tool": {
        "type": "executable",
        "sources": ["tool.cpp"],
        "lang": "C++"
    }
}"#;

#[derive(Default)]
struct Recorder {
    calls: Vec<Vec<String>>,
}

impl Runner for Recorder {
    fn run(&mut self, argv: &[String]) -> pimake::Result<bool> {
        self.calls.push(argv.to_vec());
        Ok(true)
    }
}

fn registry() -> PresetRegistry {
    PresetRegistry::new(
        vec![Preset::new("fake-cc", "C").on_posix("/fake/cc", "/fake/ld")],
        OsFamily::Posix,
        Box::new(|_: &Path| true),
    )
}

#[test]
fn plan_then_build() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pimake.json");
    fs::write(&config, CONFIG).unwrap();
    let root = path::absolute(temp.path());
    let at = |rel: &str| path::display(&root.join(rel));

    let entities = parse_config(&config).unwrap();
    let plan = BuildPlan::compile(&entities, &registry());
    let plan_file = temp.path().join(PLAN_FILE);
    plan.save(&plan_file).unwrap();

    let loaded = BuildPlan::load(&plan_file).unwrap();
    assert_eq!(loaded, plan);
    let names: Vec<_> = loaded.elements().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["app", "tool"]);

    let app = loaded.get("app").unwrap();
    assert_eq!(app.sources, vec![at("main.c"), at("src/util.c")]);
    assert_eq!(app.compiler_flags, vec![format!("-I{}", at("include"))]);
    assert_eq!(app.linker_flags, vec![format!("-L{}", at("lib")), "-lfoo".to_string()]);

    let tool = loaded.get("tool").unwrap();
    assert_eq!(tool.compiler, "");
    assert_eq!(tool.linker, "");

    let mut recorder = Recorder::default();
    Builder::new(&loaded, &mut recorder).build().unwrap();
    assert_eq!(recorder.calls.len(), 5);
    assert_eq!(
        recorder.calls[0],
        vec![
            "/fake/cc".to_string(),
            format!("-I{}", at("include")),
            "-c".to_string(),
            at("main.c"),
            "-o".to_string(),
            format!("{}.o", at("main.c")),
        ]
    );
    assert_eq!(
        recorder.calls[3],
        vec![
            "/fake/ld".to_string(),
            format!("-L{}", at("lib")),
            "-lfoo".to_string(),
            format!("{}.o", at("main.c")),
            format!("{}.o", at("src/util.c")),
            "-o".to_string(),
            "app".to_string(),
        ]
    );
}

#[test]
fn persisted_plan_is_stable_across_runs() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pimake.json");
    fs::write(&config, CONFIG).unwrap();

    let first = BuildPlan::compile(&parse_config(&config).unwrap(), &registry());
    let second = BuildPlan::compile(&parse_config(&config).unwrap(), &registry());
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}
