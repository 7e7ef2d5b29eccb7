// Hashing core
// Shared types for digest selection, streaming computation and comparison

pub mod algorithm;
pub mod engine;
pub mod error;
pub mod progress;
pub mod text;

// Re-export commonly used types for convenience
pub use algorithm::{AlgorithmInfo, HashAlgorithm, Hasher};
pub use engine::{HashEngine, Outcome};
pub use error::HashError;
pub use progress::{NullReporter, ProgressReporter};
pub use text::TextEncoding;
