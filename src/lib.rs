// Library module for filesum
// Re-exports modules for use in integration tests and the command-line binary

pub mod cli;
pub mod encoding;
pub mod hash;
