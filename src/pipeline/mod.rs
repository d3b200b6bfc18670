// Thu Jan 22 2026 - Alex

pub mod diagnostic;
pub mod error;
pub mod fold;
pub mod normalize;
pub mod prune;
pub mod resolve;
pub mod stats;

pub use diagnostic::{Diagnostic, DiagnosticLog};
pub use error::PipelineError;
pub use fold::{fold, CgFunction, FoldedGraph, Folder};
pub use normalize::{NormalizedUnit, Normalizer};
pub use prune::{PrunedNode, PrunedUnit, Pruner};
pub use resolve::{CrateGraph, CratePattern, Resolver};
pub use stats::{FoldStats, ResolveStats};

use crate::config::Config;
use crate::graph::RecordParser;

/// A raw call graph of one compilation unit.
#[derive(Debug, Clone)]
pub struct Unit {
    pub name: String,
    pub text: String,
}

impl Unit {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub folded: FoldedGraph,
    pub crates: CrateGraph,
}

/// Runs prune, normalize, fold and resolve over raw units, handing records
/// from stage to stage in memory.
pub struct Pipeline {
    pruner: Pruner,
    resolver: Resolver,
}

impl Pipeline {
    pub fn new(config: &Config) -> Result<Self, PipelineError> {
        Ok(Self {
            pruner: Pruner::new().with_external_label(config.external_node_label.as_str()),
            resolver: Resolver::from_config(config)?,
        })
    }

    pub fn run(&self, units: &[Unit]) -> Result<PipelineOutput, PipelineError> {
        let parser = RecordParser::raw();
        let mut folder = Folder::new();

        for unit in units {
            log::info!("Processing unit {}", unit.name);
            let pruned = self.pruner.prune(&parser.parse_document(&unit.text))?;
            let normalized = Normalizer::new().normalize(&pruned.to_records())?;
            folder.add_records(&normalized.records);
        }

        let folded = folder.finish();
        folded.stats().log();

        let crates = self.resolver.resolve(&folded.to_records());
        crates.stats().log();

        Ok(PipelineOutput { folded, crates })
    }
}
