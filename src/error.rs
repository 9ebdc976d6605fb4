//! Fatal analysis errors
//!
//! Anything here aborts the whole run; recoverable ambiguity is handled
//! in place by the analyzer instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// A string literal hit end of line before its closing quote.
    #[error("Unfinished string at {}:{line}", .file.display())]
    UnfinishedString { file: PathBuf, line: usize },

    /// A doc comment used a tag outside the recognized set.
    #[error("unknown documentation tag @{tag} at {}:{line}", .file.display())]
    UnknownDocTag {
        tag: String,
        file: PathBuf,
        line: usize,
    },

    /// A class was declared somewhere other than the top level of a file.
    #[error("class declared at wrong block level at {}:{line}", .file.display())]
    WrongBlockLevel { file: PathBuf, line: usize },

    /// A relative import walked above the project root.
    #[error("cannot resolve import {specifier:?} from {}", .file.display())]
    UnresolvedImport { specifier: String, file: PathBuf },
}
