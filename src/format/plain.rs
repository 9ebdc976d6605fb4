//! Plain output: the ordered file list only, one path per line, ready to be
//! consumed by concatenation or transpile scripts.

use anyhow::Result;

use std::io::Write;
use std::path::PathBuf;

use super::Formatter;
use crate::core::types::{ClassRegistry, ParsedFile};

pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn write_header(&mut self, _output: &mut dyn Write) -> Result<()> {
        Ok(())
    }

    fn write_ordering(&mut self, output: &mut dyn Write, files: &[PathBuf]) -> Result<()> {
        for path in files {
            writeln!(output, "{}", path.display())?;
        }
        Ok(())
    }

    fn write_imports(&mut self, _output: &mut dyn Write, _files: &[ParsedFile]) -> Result<()> {
        Ok(())
    }

    fn write_classes(&mut self, _output: &mut dyn Write, _registry: &ClassRegistry) -> Result<()> {
        Ok(())
    }

    fn write_footer(&mut self, _output: &mut dyn Write) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_just_paths() {
        let mut formatter = PlainFormatter;
        let mut output = Vec::new();
        formatter.write_header(&mut output).unwrap();
        formatter
            .write_ordering(
                &mut output,
                &[PathBuf::from("a.ts"), PathBuf::from("sub/b.ts")],
            )
            .unwrap();
        formatter.write_imports(&mut output, &[]).unwrap();
        formatter
            .write_classes(&mut output, &ClassRegistry::new())
            .unwrap();
        formatter.write_footer(&mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "a.ts\nsub/b.ts\n");
    }
}
