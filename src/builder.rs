//! Build executor
//!
//! Runs a [`BuildPlan`] in two sequential phases: every source of every
//! element is compiled to `<source>.o`, then every element is linked.

use crate::error::{Error, Result};
use crate::plan::{BuildElement, BuildPlan};
use crate::utils::log::{log, LogLevel};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use std::io;
use std::process::{Command, Stdio};

/// Runs one toolchain invocation and reports whether it succeeded
pub trait Runner {
    fn run(&mut self, argv: &[String]) -> Result<bool>;
}

impl<R: Runner + ?Sized> Runner for &mut R {
    fn run(&mut self, argv: &[String]) -> Result<bool> {
        (**self).run(argv)
    }
}

/// Spawns real processes, inheriting the console
#[derive(Debug, Default)]
pub struct CommandRunner;

impl Runner for CommandRunner {
    fn run(&mut self, argv: &[String]) -> Result<bool> {
        let (program, args) = argv.split_first().ok_or_else(|| Error::Spawn {
            program: String::new(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
        })?;
        log(LogLevel::Debug, &format!("Command: {}", argv.iter().join(" ")));
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;
        Ok(status.success())
    }
}

/// Object file written next to its source
pub fn object_name(source: &str) -> String {
    format!("{}.o", source)
}

/// `<compiler> <compiler-flags> -c <source> -o <source>.o`
pub fn compile_command(element: &BuildElement, source: &str) -> Vec<String> {
    let mut cmd = vec![element.compiler.clone()];
    cmd.extend(element.compiler_flags.iter().cloned());
    cmd.push("-c".to_string());
    cmd.push(source.to_string());
    cmd.push("-o".to_string());
    cmd.push(object_name(source));
    cmd
}

/// `<linker> <linker-flags> <objects> -o <output>`
pub fn link_command(element: &BuildElement) -> Vec<String> {
    let mut cmd = vec![element.linker.clone()];
    cmd.extend(element.linker_flags.iter().cloned());
    cmd.extend(element.sources.iter().map(|s| object_name(s)));
    cmd.push("-o".to_string());
    cmd.push(element.output.clone());
    cmd
}

/// Executes a loaded plan
pub struct Builder<'a, R: Runner> {
    plan: &'a BuildPlan,
    runner: R,
    failed: Vec<String>,
}

impl<'a, R: Runner> Builder<'a, R> {
    pub fn new(plan: &'a BuildPlan, runner: R) -> Self {
        Builder {
            plan,
            runner,
            failed: Vec::new(),
        }
    }

    /// Compiles and links every element.
    ///
    /// An element with a failing compile step is not linked; the remaining
    /// elements still build and the failures are returned together.
    pub fn build(mut self) -> Result<()> {
        self.compile();
        self.link();
        if self.failed.is_empty() {
            log(LogLevel::Log, "Build complete!");
            Ok(())
        } else {
            Err(Error::BuildFailed {
                failed: self.failed,
            })
        }
    }

    fn compile(&mut self) {
        let total: usize = self.plan.elements().map(|(_, e)| e.sources.len()).sum();
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        for (name, element) in self.plan.elements() {
            for source in &element.sources {
                pb.set_message(format!("{}: {}", name, source));
                let cmd = compile_command(element, source);
                pb.suspend(|| log(LogLevel::Info, &format!("Compiling: {}", source)));
                let ok = run_step(&mut self.runner, &cmd);
                if !ok {
                    pb.suspend(|| {
                        log(LogLevel::Error, &format!("  Error: {} failed to compile {}", name, source))
                    });
                    mark_failed(&mut self.failed, name);
                }
                pb.inc(1);
            }
        }
        pb.finish_and_clear();
    }

    fn link(&mut self) {
        for (name, element) in self.plan.elements() {
            if self.failed.iter().any(|f| f == name) {
                log(LogLevel::Warn, &format!("Skipping link of {}", name));
                continue;
            }
            log(LogLevel::Log, &format!("Linking: {}", element.output));
            if !run_step(&mut self.runner, &link_command(element)) {
                log(LogLevel::Error, &format!("  Error: {} failed to link", name));
                mark_failed(&mut self.failed, name);
            }
        }
    }
}

/// A step that cannot even be started counts as failed
fn run_step<R: Runner>(runner: &mut R, cmd: &[String]) -> bool {
    runner.run(cmd).unwrap_or_else(|e| {
        log(LogLevel::Error, &e.to_string());
        false
    })
}

fn mark_failed(failed: &mut Vec<String>, name: &str) {
    if !failed.iter().any(|f| f == name) {
        failed.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records invocations, failing those whose output ends with a given suffix
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Vec<String>>,
        fail_output: Option<String>,
    }

    impl Runner for Recorder {
        fn run(&mut self, argv: &[String]) -> Result<bool> {
            self.calls.push(argv.to_vec());
            let output = argv.last().cloned().unwrap_or_default();
            Ok(self.fail_output.as_deref() != Some(output.as_str()))
        }
    }

    fn element(compiler: &str, sources: &[&str], output: &str) -> BuildElement {
        BuildElement {
            compiler: compiler.to_string(),
            linker: format!("{}-ld", compiler),
            output: output.to_string(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
            linker_flags: vec!["-L/lib".to_string(), "-lfoo".to_string()],
            compiler_flags: vec!["-I/inc".to_string()],
        }
    }

    fn plan() -> BuildPlan {
        let mut plan = BuildPlan::new();
        plan.insert("app", element("cc", &["/p/a.c", "/p/b.c"], "app"));
        plan.insert("tool", element("c++", &["/p/t.cpp"], "tool"));
        plan
    }

    #[test]
    fn commands_have_the_expected_shape() {
        let e = element("cc", &["/p/a.c", "/p/b.c"], "app");
        assert_eq!(
            compile_command(&e, "/p/a.c"),
            vec!["cc", "-I/inc", "-c", "/p/a.c", "-o", "/p/a.c.o"]
        );
        assert_eq!(
            link_command(&e),
            vec!["cc-ld", "-L/lib", "-lfoo", "/p/a.c.o", "/p/b.c.o", "-o", "app"]
        );
    }

    #[test]
    fn all_compiles_run_before_any_link() {
        let plan = plan();
        let mut recorder = Recorder::default();
        Builder::new(&plan, &mut recorder).build().unwrap();
        let programs: Vec<_> = recorder.calls.iter().map(|c| c[0].as_str()).collect();
        assert_eq!(programs, vec!["cc", "cc", "c++", "cc-ld", "c++-ld"]);
    }

    #[test]
    fn compile_failure_skips_only_that_link() {
        let plan = plan();
        let mut recorder = Recorder {
            fail_output: Some("/p/b.c.o".to_string()),
            ..Recorder::default()
        };
        let err = Builder::new(&plan, &mut recorder).build().unwrap_err();
        match err {
            Error::BuildFailed { failed } => assert_eq!(failed, vec!["app"]),
            other => panic!("unexpected error {:?}", other),
        }
        let links: Vec<_> = recorder
            .calls
            .iter()
            .filter(|c| c[0].ends_with("-ld"))
            .map(|c| c[0].as_str())
            .collect();
        assert_eq!(links, vec!["c++-ld"]);
    }

    #[test]
    fn link_failure_is_reported() {
        let plan = plan();
        let mut recorder = Recorder {
            fail_output: Some("tool".to_string()),
            ..Recorder::default()
        };
        let err = Builder::new(&plan, &mut recorder).build().unwrap_err();
        assert_eq!(err.to_string(), "Build failed for: tool");
    }

    #[test]
    fn unstartable_toolchain_fails_the_element() {
        let mut plan = BuildPlan::new();
        plan.insert("app", element("", &["/p/a.c"], "app"));
        plan.insert("empty", BuildElement::default());
        let err = Builder::new(&plan, CommandRunner).build().unwrap_err();
        match err {
            Error::BuildFailed { failed } => assert_eq!(failed, vec!["app", "empty"]),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
