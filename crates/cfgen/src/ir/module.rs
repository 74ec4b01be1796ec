//! IR Modules

use super::cfg::Cfg;
use serde::Serialize;

/// The lowered graphs of every function in a module, in source order
#[derive(Debug, Clone, Default, Serialize)]
pub struct IrModule {
    pub functions: Vec<Cfg>,
}

impl IrModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, cfg: Cfg) {
        self.functions.push(cfg);
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn get_function_by_name(&self, name: &str) -> Option<&Cfg> {
        self.functions.iter().find(|f| f.name == name)
    }
}
