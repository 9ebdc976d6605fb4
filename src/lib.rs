pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod fs;
pub mod runner;
pub mod utils;

// Re-export key items for convenience
pub use config::{OutputFormat, StratumConfig};
pub use core::{AnalysisContext, AnalysisReport, ClassRegistry, ClassType, DocComment, Token, TokenKind, tokenize};
pub use error::AnalyzeError;
pub use runner::{run, run_analysis};
