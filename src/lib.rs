// Fri Jan 16 2026 - Alex

pub mod config;
pub mod graph;
pub mod pipeline;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use graph::{Record, RecordParser, RecordWriter};
pub use pipeline::{CrateGraph, FoldedGraph, Folder, Normalizer, Pipeline, PipelineError, Pruner, Resolver};
