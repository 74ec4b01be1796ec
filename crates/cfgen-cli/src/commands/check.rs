//! `cfgen check`: lower and verify without printing the graphs.

use super::{load_module, load_options};
use anyhow::Context;
use std::path::Path;

pub fn execute(file: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let mut options = load_options(config)?;
    options.verify = true;
    let module = load_module(file)?;
    let ir = cfgen::lower_module(&module, &options)
        .with_context(|| format!("checking {}", file.display()))?;

    for cfg in &ir.functions {
        let unreachable = cfg.block_count() - cfg.reachable_blocks().len();
        if unreachable > 0 {
            tracing::warn!(function = %cfg.name, unreachable, "graph has unreachable blocks");
        }
        println!(
            "{}: {} blocks, {} instructions",
            cfg.name,
            cfg.block_count(),
            cfg.instruction_count()
        );
    }
    println!("ok: {} function(s)", ir.function_count());
    Ok(())
}
