// Fri Jan 23 2026 - Alex

pub mod input;
pub mod logging;

pub use input::{read_input, read_inputs};
pub use logging::LoggingUtils;
