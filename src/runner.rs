//! Analysis runner
//!
//! Drives the whole pipeline for one build invocation: discover source
//! files, tokenize and analyze each one, compute the dependency-safe
//! ordering, and write the report. Files are processed one at a time in
//! discovery order; the first fatal parse error aborts the run.

use crate::config::StratumConfig;
use crate::core::analyzer::AnalysisContext;
use crate::core::tokenizer::tokenize;
use crate::core::types::AnalysisReport;
use crate::format::create_formatter;
use crate::fs::walk_source_files;
use crate::utils::order::order_files;
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::fs as std_fs;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Main entry point for the stratum analyzer in CLI mode.
pub fn run(config: StratumConfig) -> Result<()> {
    config.validate()?;
    let report = run_analysis(&config)?;

    let mut file = File::create(&config.output)
        .with_context(|| format!("Failed to create output: {:?}", config.output))?;
    let mut formatter = create_formatter(config.output_format);
    formatter.write_header(&mut file)?;
    formatter.write_ordering(&mut file, &report.ordered)?;
    formatter.write_imports(&mut file, &report.files)?;
    formatter.write_classes(&mut file, &report.registry)?;
    formatter.write_footer(&mut file)?;

    if config.verbose {
        println!(
            "Analyzed {} files: {} classes, {} members. Written to {:?}",
            report.files.len(),
            report.class_count(),
            report.member_count(),
            config.output
        );
    }

    Ok(())
}

/// Runs discovery, analysis, and ordering without writing output. The
/// registry is rebuilt from scratch on every invocation.
pub fn run_analysis(config: &StratumConfig) -> Result<AnalysisReport> {
    let root = config
        .path
        .canonicalize()
        .with_context(|| format!("Failed to find directory: {:?}", config.path))?;

    let paths = walk_source_files(&root, &config.ignore_patterns, &config.extension)?;
    if config.verbose {
        println!("Found {} source files.", paths.len());
    }

    let bar = ProgressBar::new(paths.len() as u64);
    let mut ctx = AnalysisContext::new(config.extension.clone());
    let mut discovered: Vec<PathBuf> = Vec::new();

    for path in &paths {
        let relative = path.strip_prefix(&root).unwrap_or(path).to_path_buf();
        let text = std_fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let tokens = tokenize(&relative, &text)?;
        ctx.analyze_file(&relative, &tokens)?;
        if config.verbose {
            println!("Analyzed: {}", relative.display());
        }
        discovered.push(relative);
        bar.inc(1);
    }
    bar.finish_and_clear();

    let seeds = normalize_seeds(&config.entry_points, &root);
    let ordered = order_files(&ctx.registry, &discovered, &seeds);

    Ok(AnalysisReport {
        ordered,
        registry: ctx.registry,
        files: ctx.files,
    })
}

/// Entry paths may be given absolute or project-relative; the ordering works
/// in project-relative terms.
fn normalize_seeds(entries: &[PathBuf], root: &Path) -> Vec<PathBuf> {
    entries
        .iter()
        .map(|e| e.strip_prefix(root).unwrap_or(e).to_path_buf())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> StratumConfig {
        StratumConfig {
            path: root.to_path_buf(),
            output: root.join("report.json"),
            ..Default::default()
        }
    }

    #[test]
    fn test_analysis_is_idempotent() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join("a.ts"), "class A {}\n")?;
        fs::write(
            root.join("b.ts"),
            "import { A } from \"./a\";\nclass B extends A {}\n",
        )?;

        let config = config_for(root);
        let first = run_analysis(&config)?;
        let second = run_analysis(&config)?;

        assert_eq!(first.ordered, second.ordered);
        assert_eq!(first.registry, second.registry);
        assert_eq!(first.files, second.files);
        Ok(())
    }

    #[test]
    fn test_dependency_order_end_to_end() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join("a.ts"), "class A {}\n")?;
        fs::write(root.join("b.ts"), "class B extends A {}\n")?;

        let report = run_analysis(&config_for(root))?;
        let a = report
            .ordered
            .iter()
            .position(|p| p == Path::new("a.ts"))
            .unwrap();
        let b = report
            .ordered
            .iter()
            .position(|p| p == Path::new("b.ts"))
            .unwrap();
        assert!(a < b);
        Ok(())
    }

    #[test]
    fn test_malformed_file_fails_whole_run() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join("ok.ts"), "class Ok {}\n")?;
        fs::write(root.join("zz.ts"), "let s = \"abc\n")?;

        let err = run_analysis(&config_for(root)).unwrap_err();
        assert!(
            err.to_string().contains("Unfinished string at zz.ts:1"),
            "{err}"
        );
        Ok(())
    }
}
