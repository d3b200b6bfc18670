// Sat Jan 24 2026 - Alex

pub mod cli;
