use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
    Plain,
}

/// Main configuration for stratum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StratumConfig {
    /// Path to the project root to analyze
    pub path: PathBuf,
    /// Path to the output file
    pub output: PathBuf,
    /// Entry files forced to the front of the ordering, in given order
    pub entry_points: Vec<PathBuf>,
    /// Source file extension to analyze (without the dot)
    pub extension: String,
    /// List of glob patterns to ignore (e.g. "*.d.ts")
    pub ignore_patterns: Vec<String>,
    /// Output format (JSON, Markdown, Plain)
    pub output_format: OutputFormat,
    /// Enables verbose logging to stdout
    pub verbose: bool,
}

impl StratumConfig {
    /// Validates the configuration, ensuring the project path exists.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.path.exists() {
            anyhow::bail!("Path does not exist: {:?}", self.path);
        }
        Ok(())
    }

    /// Attempts to load configuration from `stratum.toml` in the current
    /// directory.
    pub fn load_from_file() -> Option<Self> {
        std::fs::read_to_string("stratum.toml")
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
    }
}

impl Default for StratumConfig {
    fn default() -> Self {
        let defaults = vec![
            // Version Control
            ".git",
            ".hg",
            ".svn",
            // IDEs
            ".idea",
            ".vscode",
            // Build / Dependency
            "node_modules",
            "dist",
            "build",
            "out",
            "vendor",
            "coverage",
            // Generated sources the orderer must never see
            "*.d.ts",
            "*.min.js",
            "*.spec.ts",
            "*.test.ts",
        ];

        Self {
            path: PathBuf::from("."),
            output: PathBuf::from("stratum-report.json"),
            entry_points: Vec::new(),
            extension: "ts".to_string(),
            ignore_patterns: defaults.into_iter().map(String::from).collect(),
            output_format: OutputFormat::Json,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = StratumConfig {
            path: PathBuf::from("non_existent_path_xyz_123"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_extension() {
        let config = StratumConfig::default();
        assert_eq!(config.extension, "ts");
        assert_eq!(config.output_format, OutputFormat::Json);
    }
}
