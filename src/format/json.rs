//! JSON output format for stratum

use anyhow::Result;

use std::io::Write;
use std::path::PathBuf;

use super::Formatter;
use crate::core::types::{ClassRegistry, ParsedFile};

/// Streams the report as one JSON object: the ordered file list, then the
/// class registry keyed by class name in registration order.
pub struct JsonFormatter {
    first_class: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { first_class: true }
    }
}

impl Formatter for JsonFormatter {
    fn write_header(&mut self, output: &mut dyn Write) -> Result<()> {
        writeln!(output, "{{")?;
        Ok(())
    }

    fn write_ordering(&mut self, output: &mut dyn Write, files: &[PathBuf]) -> Result<()> {
        writeln!(output, "  \"files\": [")?;
        for (i, path) in files.iter().enumerate() {
            let comma = if i < files.len() - 1 { "," } else { "" };
            writeln!(
                output,
                "    {}{}",
                serde_json::to_string(&path.display().to_string())?,
                comma
            )?;
        }
        writeln!(output, "  ],")?;
        Ok(())
    }

    fn write_imports(&mut self, output: &mut dyn Write, files: &[ParsedFile]) -> Result<()> {
        writeln!(output, "  \"imports\": {{")?;
        for (i, file) in files.iter().enumerate() {
            let comma = if i < files.len() - 1 { "," } else { "" };
            let imports: Vec<String> = file
                .imports
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            writeln!(
                output,
                "    {}: {}{}",
                serde_json::to_string(&file.path.display().to_string())?,
                serde_json::to_string(&imports)?,
                comma
            )?;
        }
        writeln!(output, "  }},")?;
        Ok(())
    }

    fn write_classes(&mut self, output: &mut dyn Write, registry: &ClassRegistry) -> Result<()> {
        writeln!(output, "  \"classes\": {{")?;
        // Classes are written one by one so large registries stream.
        for class in registry.iter() {
            if !self.first_class {
                writeln!(output, ",")?;
            }
            self.first_class = false;
            write!(
                output,
                "    {}: {}",
                serde_json::to_string(&class.name)?,
                serde_json::to_string(class)?
            )?;
        }
        if !self.first_class {
            writeln!(output)?;
        }
        writeln!(output, "  }}")?;
        Ok(())
    }

    fn write_footer(&mut self, output: &mut dyn Write) -> Result<()> {
        writeln!(output, "}}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ClassType;

    #[test]
    fn test_json_output_is_valid() {
        let mut registry = ClassRegistry::new();
        registry.insert(ClassType {
            name: "Widget".to_string(),
            file: PathBuf::from("src/widget.ts"),
            base_class: Some("Node".to_string()),
            doc: None,
            members: vec![],
            imported_class_names: vec!["Node".to_string()],
        });

        let files = vec![ParsedFile {
            path: PathBuf::from("src/widget.ts"),
            classes: vec!["Widget".to_string()],
            imports: vec![PathBuf::from("src/node.ts")],
        }];

        let mut formatter = JsonFormatter::new();
        let mut output = Vec::new();
        formatter.write_header(&mut output).unwrap();
        formatter
            .write_ordering(&mut output, &[PathBuf::from("src/widget.ts")])
            .unwrap();
        formatter.write_imports(&mut output, &files).unwrap();
        formatter.write_classes(&mut output, &registry).unwrap();
        formatter.write_footer(&mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["files"][0], "src/widget.ts");
        assert_eq!(value["imports"]["src/widget.ts"][0], "src/node.ts");
        assert_eq!(value["classes"]["Widget"]["base_class"], "Node");
        assert_eq!(value["classes"]["Widget"]["file"], "src/widget.ts");
    }

    #[test]
    fn test_empty_registry_still_valid() {
        let mut formatter = JsonFormatter::new();
        let mut output = Vec::new();
        formatter.write_header(&mut output).unwrap();
        formatter.write_ordering(&mut output, &[]).unwrap();
        formatter.write_imports(&mut output, &[]).unwrap();
        formatter
            .write_classes(&mut output, &ClassRegistry::new())
            .unwrap();
        formatter.write_footer(&mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value["files"].as_array().unwrap().is_empty());
        assert!(value["imports"].as_object().unwrap().is_empty());
        assert!(value["classes"].as_object().unwrap().is_empty());
    }
}
