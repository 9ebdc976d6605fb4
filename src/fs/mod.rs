use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Discovers source files under `path`, honoring gitignore-style filters and
/// the configured ignore globs, keeping only files with `extension`. Results
/// are sorted so discovery order is stable across runs.
pub fn walk_source_files(
    path: &Path,
    ignore_patterns: &[String],
    extension: &str,
) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(path);

    // In the override builder "!glob" means ignore; plain globs whitelist.
    let mut override_builder = ignore::overrides::OverrideBuilder::new(path);
    for pattern in ignore_patterns {
        override_builder.add(&format!("!{}", pattern))?;
    }
    builder.overrides(override_builder.build()?);
    builder.standard_filters(true);

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file())
                    && entry
                        .path()
                        .extension()
                        .is_some_and(|ext| ext == extension)
                {
                    files.push(entry.into_path());
                }
            }
            Err(err) => eprintln!("Error walking directory: {}", err),
        }
    }

    files.sort();
    Ok(files)
}
