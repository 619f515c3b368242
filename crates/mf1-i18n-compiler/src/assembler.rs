use mf1_i18n_core::Artifact;
use mf1_i18n_runtime::{ExportTarget, encode_module};
use tracing::debug;

use crate::error::CompileResult;

/// A compiled artifact, either callable right away or rendered for later loading.
#[derive(Debug, Clone)]
pub enum Assembled {
    Live(Artifact),
    Module(String),
}

impl Assembled {
    pub fn into_live(self) -> Option<Artifact> {
        match self {
            Assembled::Live(artifact) => Some(artifact),
            Assembled::Module(_) => None,
        }
    }

    pub fn into_module(self) -> Option<String> {
        match self {
            Assembled::Live(_) => None,
            Assembled::Module(text) => Some(text),
        }
    }
}

/// No target keeps the live tree; a target renders a portable module.
pub fn assemble(artifact: Artifact, target: Option<&ExportTarget>) -> CompileResult<Assembled> {
    let Some(target) = target else {
        return Ok(Assembled::Live(artifact));
    };
    let module = encode_module(&artifact, target)?;
    debug!(export = ?target, bytes = module.len(), "assembled portable module");
    Ok(Assembled::Module(module))
}
