// Sat Jan 24 2026 - Alex

pub mod args;
pub mod handler;

pub use args::{Args, Command, FoldArgs, ResolveArgs, UnitArgs};
pub use handler::CommandHandler;

use crate::config::Config;
use crate::utils::LoggingUtils;
use clap::Parser;

pub fn parse_args() -> Args {
    Args::parse()
}

pub fn run() -> anyhow::Result<()> {
    let args = parse_args();
    LoggingUtils::init_logger(LoggingUtils::level_for(&args.log_level, args.quiet));

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.wrap {
        config = config.with_wrap_output(true);
    }
    log::debug!("Using crate pattern {}", config.crate_pattern);

    let handler = CommandHandler::new(config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    handler.execute_to(&args.command, &mut out)
}
