//! Loads a config through a relative path, then compiles from another
//! working directory. Kept in its own file because it changes the process cwd.

use pimake::parser::parse_config;
use pimake::plan::BuildPlan;
use pimake::preset::{Preset, PresetRegistry};
use pimake::utils::platform::OsFamily;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"{
    "local": {
        "type": "external-dynamic-library",
        "includes": ["rel"],
        "libraries": ["local"]
    },
    "app": {
        "type": "executable",
        "sources": ["m.c"],
        "lang": "C",
        "libraries": ["local"]
    }
}"#;

#[test]
fn sources_stay_rooted_after_changing_directory() {
    let temp = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("proj")).unwrap();
    fs::write(temp.path().join("proj").join("pimake.json"), CONFIG).unwrap();

    env::set_current_dir(temp.path()).unwrap();
    let root = env::current_dir().unwrap();
    let entities = parse_config(Path::new("proj/pimake.json")).unwrap();

    env::set_current_dir(elsewhere.path()).unwrap();
    let later_cwd = env::current_dir().unwrap();
    let registry = PresetRegistry::new(
        vec![Preset::new("cc", "C").on_posix("/bin/cc", "/bin/cc")],
        OsFamily::Posix,
        Box::new(|_: &Path| true),
    );
    let plan = BuildPlan::compile(&entities, &registry);
    let app = plan.get("app").unwrap();

    let source = root.join("proj").join("m.c");
    assert_eq!(app.sources, vec![source.to_string_lossy().into_owned()]);
    // Relative include directories follow the cwd at plan time
    assert_eq!(
        app.compiler_flags,
        vec![format!("-I{}", later_cwd.join("rel").to_string_lossy())]
    );

    env::set_current_dir(env::temp_dir()).unwrap();
}
