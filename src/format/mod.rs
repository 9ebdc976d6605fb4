//! Output format modules for stratum
//!
//! The ordered file list and the class registry are the two artifacts the
//! pipeline exposes; each formatter renders both for a different consumer
//! (machine-readable JSON for tooling, Markdown for documentation, plain
//! text for concatenation scripts).

pub mod json;
pub mod markdown;
pub mod plain;

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

use crate::config::OutputFormat;
use crate::core::types::{ClassRegistry, ParsedFile};

pub trait Formatter {
    fn write_header(&mut self, output: &mut dyn Write) -> Result<()>;

    fn write_ordering(&mut self, output: &mut dyn Write, files: &[PathBuf]) -> Result<()>;

    fn write_imports(&mut self, output: &mut dyn Write, files: &[ParsedFile]) -> Result<()>;

    fn write_classes(&mut self, output: &mut dyn Write, registry: &ClassRegistry) -> Result<()>;

    fn write_footer(&mut self, output: &mut dyn Write) -> Result<()>;
}

pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(json::JsonFormatter::new()),
        OutputFormat::Markdown => Box::new(markdown::MarkdownFormatter),
        OutputFormat::Plain => Box::new(plain::PlainFormatter),
    }
}
