use clap::Parser;
use pimake::commands;
use pimake::parser;
use pimake::plan::PLAN_FILE;
use pimake::preset::PresetRegistry;
use pimake::utils::log::{log, LogLevel};
use std::path::PathBuf;

/// Simple open-source software for build automation of C/C++ projects
#[derive(Parser, Debug)]
#[command(name = "pimake", version, about)]
struct Args {
    /// Config file describing the project
    #[arg(short, long)]
    file: PathBuf,
    /// Print a description of every entity
    #[arg(short = 'I', long)]
    info: bool,
    /// Resolve toolchains and write the build plan
    #[arg(short, long)]
    make: bool,
    /// Compile and link from the written build plan
    #[arg(short, long)]
    build: bool,
    /// Build plan file
    #[arg(short, long, default_value = PLAN_FILE)]
    plan: PathBuf,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        log(LogLevel::Error, &e.to_string());
        std::process::exit(1);
    }
}

fn run(args: &Args) -> pimake::Result<()> {
    let entities = parser::parse_config(&args.file)?;

    if args.info {
        commands::info(&entities);
    }
    if args.make {
        commands::make(&entities, &PresetRegistry::builtin(), &args.plan)?;
    }
    if args.build {
        commands::build(&args.plan)?;
    }
    Ok(())
}
