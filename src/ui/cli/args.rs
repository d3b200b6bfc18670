// Sat Jan 24 2026 - Alex

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crate-depgraph")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Crate dependency graphs from per-unit call graphs", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Surround the output in a digraph block.
    #[arg(long, global = true)]
    pub wrap: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Drop the external node and null edges from a raw unit.
    Prune(UnitArgs),
    /// Replace raw node ids with their labels.
    Normalize(UnitArgs),
    /// Merge labeled units into one function graph.
    Fold(FoldArgs),
    /// Collapse a folded graph into crates.
    Resolve(ResolveArgs),
    /// Prune, normalize, fold and resolve raw units in one pass.
    Run(ResolveArgs),
}

#[derive(ClapArgs, Debug)]
pub struct UnitArgs {
    pub input: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct FoldArgs {
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ResolveArgs {
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[arg(long)]
    pub crate_pattern: Option<String>,

    /// Add function and occurrence counts to crate nodes and edges.
    #[arg(long)]
    pub counts: bool,
}

impl UnitArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.exists() {
            return Err(format!("Input file does not exist: {:?}", self.input));
        }
        Ok(())
    }
}

impl FoldArgs {
    pub fn validate(&self) -> Result<(), String> {
        validate_inputs(&self.inputs)
    }
}

impl ResolveArgs {
    pub fn validate(&self) -> Result<(), String> {
        validate_inputs(&self.inputs)?;
        if let Some(pattern) = &self.crate_pattern {
            if pattern.is_empty() {
                return Err("Crate pattern must not be empty".to_string());
            }
        }
        Ok(())
    }
}

fn validate_inputs(inputs: &[PathBuf]) -> Result<(), String> {
    if inputs.is_empty() {
        return Err("At least one input file must be specified".to_string());
    }
    match inputs.iter().find(|path| !path.exists()) {
        Some(missing) => Err(format!("Input file does not exist: {:?}", missing)),
        None => Ok(()),
    }
}
