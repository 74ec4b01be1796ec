//! Subcommand implementations

pub mod check;
pub mod lower;

use anyhow::Context;
use cfgen::ast::{Function, Module};
use cfgen::LowerOptions;
use std::path::Path;

/// Options from `config`, or the defaults when no file was given
pub fn load_options(config: Option<&Path>) -> anyhow::Result<LowerOptions> {
    match config {
        Some(path) => LowerOptions::from_file(path)
            .with_context(|| format!("loading options from {}", path.display())),
        None => Ok(LowerOptions::default()),
    }
}

/// Read a module from `path`. A file holding a bare function is treated as a
/// module with that one function.
pub fn load_module(path: &Path) -> anyhow::Result<Module> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_module(&source).with_context(|| format!("parsing {}", path.display()))
}

fn parse_module(source: &str) -> serde_json::Result<Module> {
    match serde_json::from_str::<Module>(source) {
        Ok(module) => Ok(module),
        Err(module_err) => match serde_json::from_str::<Function>(source) {
            Ok(function) => Ok(Module {
                functions: vec![function],
            }),
            Err(_) => Err(module_err),
        },
    }
}
