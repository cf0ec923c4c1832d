//! tersecss - command line compiler
//!
//! Compiles one or more tersecss source units into a single stylesheet.
//! Units are compiled in order with one shared context, so scope names must
//! be unique across all of them. Nothing is written unless every unit
//! compiles.

mod cli;
mod config;
mod log_init;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use cli::Args;
use config::TerseConfig;

fn main() -> Result<()> {
    let args = Args::parse();
    log_init::init_logger(
        log_init::level_from_flags(args.verbose, args.quiet),
        args.log_file.as_deref(),
    )?;

    let config = TerseConfig::resolve(args.config.as_deref(), &std::env::current_dir()?)?;
    let inputs = if args.inputs.is_empty() {
        config.build.inputs.clone()
    } else {
        args.inputs.clone()
    };
    if inputs.is_empty() {
        bail!("No input files given and no `build.inputs` in the configuration");
    }
    let output = args.out.clone().or_else(|| config.build.output.clone());

    let css = compile_all(&config, &inputs)?;
    write_output(output, &css)
}

fn compile_all(config: &TerseConfig, inputs: &[PathBuf]) -> Result<String> {
    let mut compiler = config.compiler()?;
    let mut sheets = Vec::with_capacity(inputs.len());

    for path in inputs {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let unit = compiler
            .compile(&path.display().to_string(), &source)
            .with_context(|| format!("Failed to compile {}", path.display()))?;
        log::info!(
            "{}: scope `{}`, {} classes",
            path.display(),
            unit.scope,
            unit.classes.len()
        );
        if !unit.css.is_empty() {
            sheets.push(unit.css);
        }
    }

    Ok(sheets.join("\n"))
}

fn write_output(output: Option<PathBuf>, css: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&path, format!("{css}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{css}"),
    }
    Ok(())
}
