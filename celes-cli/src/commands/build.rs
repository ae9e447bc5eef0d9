//! Build command implementation.
//!
//! Reads the project manifest, validates the required metadata, and runs
//! the source tokenizer over the project's entry file when one exists.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use celes_toml::{TomlError, TomlTable};

use crate::error::{CelesError, Result};

/// Arguments for the build command.
#[derive(Debug, Clone)]
pub struct BuildArgs {
    /// Path to the project manifest.
    pub manifest: PathBuf,
}

/// Run the build command.
pub fn run_build(args: BuildArgs) -> Result<()> {
    let config = open_manifest(&args.manifest)?;

    let Some(name) = config.section_string("Build", "Name") else {
        return Err(CelesError::MissingName(args.manifest));
    };
    info!("building {name}");

    let source = args.manifest.with_file_name(format!("{name}.celes"));
    if source.exists() {
        tokenize_source(&source)?;
    } else {
        debug!("no source file at {}", source.display());
    }

    Ok(())
}

/// Open the manifest, mapping TOML failures onto CLI errors.
fn open_manifest(path: &Path) -> Result<TomlTable> {
    match celes_toml::open(path) {
        Ok(table) => Ok(table),
        Err(TomlError::FileNotFound { path }) => Err(CelesError::ManifestNotFound(path)),
        Err(TomlError::Parse(diagnostics)) => Err(CelesError::ManifestParse {
            path: path.to_path_buf(),
            diagnostics: diagnostics.to_string(),
        }),
        Err(err) => Err(CelesError::Toml(err)),
    }
}

/// Tokenize the project's entry file.
fn tokenize_source(path: &Path) -> Result<()> {
    let text = celes_util::read_utf8_file(path)?;
    let tokens = celes_syntax::tokenize(&text);
    debug!("{}: {} top-level tokens", path.display(), tokens.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifest_in(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("Project.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_build_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let args = BuildArgs {
            manifest: dir.path().join("Project.toml"),
        };

        let result = run_build(args);
        assert!(matches!(result, Err(CelesError::ManifestNotFound(_))));
    }

    #[test]
    fn test_build_valid_manifest() {
        let dir = TempDir::new().unwrap();
        let manifest = manifest_in(&dir, "[Build]\nName = \"demo\"\n");

        assert!(run_build(BuildArgs { manifest }).is_ok());
    }

    #[test]
    fn test_build_broken_manifest() {
        let dir = TempDir::new().unwrap();
        let manifest = manifest_in(&dir, "[Build\nName = \"demo\"\n");

        let result = run_build(BuildArgs { manifest });
        match result {
            Err(CelesError::ManifestParse { diagnostics, .. }) => {
                assert!(diagnostics.contains("Unexpected end of line"));
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_build_missing_name() {
        let dir = TempDir::new().unwrap();
        let manifest = manifest_in(&dir, "[Build]\nJobs = 4\n");

        let result = run_build(BuildArgs { manifest });
        assert!(matches!(result, Err(CelesError::MissingName(_))));
    }

    #[test]
    fn test_build_tokenizes_source_file() {
        let dir = TempDir::new().unwrap();
        let manifest = manifest_in(&dir, "[Build]\nName = \"demo\"\n");
        std::fs::write(
            dir.path().join("demo.celes"),
            "main() { print(\"hello\") }\n",
        )
        .unwrap();

        assert!(run_build(BuildArgs { manifest }).is_ok());
    }
}
