//! `cfgen lower`: print the graphs of every function in a module.

use super::{load_module, load_options};
use crate::Emit;
use anyhow::Context;
use cfgen::PrettyPrint;
use std::path::Path;

pub fn execute(file: &Path, emit: Emit, config: Option<&Path>) -> anyhow::Result<()> {
    let options = load_options(config)?;
    let module = load_module(file)?;
    let ir = cfgen::lower_module(&module, &options)
        .with_context(|| format!("lowering {}", file.display()))?;

    match emit {
        Emit::Text => print!("{}", ir.pretty_print()),
        Emit::Json => println!("{}", serde_json::to_string_pretty(&ir)?),
    }
    Ok(())
}
