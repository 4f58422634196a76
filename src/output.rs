//! Output sink for rendered manifests.
//!
//! Documents are joined with a `---` separator line. They go either to
//! standard output or to `<name>.yaml`, which is truncated if it exists.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ResolvedConfig;
use crate::error::{Result, StressGenError};
use crate::manifest::ManifestDocument;

pub const DOCUMENT_SEPARATOR: &str = "\n---\n";

/// Join documents into one multi-document YAML stream ending in a newline.
pub fn join_documents(documents: &[ManifestDocument]) -> String {
    let mut joined = documents.join(DOCUMENT_SEPARATOR);
    joined.push('\n');
    joined
}

/// Directory the output file is written to when none is configured: the
/// one containing the running executable.
pub fn default_output_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let exe = fs::canonicalize(&exe).unwrap_or(exe);
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Path of the output file for this configuration
pub fn output_path(config: &ResolvedConfig) -> Result<PathBuf> {
    let dir = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => default_output_dir()?,
    };
    Ok(dir.join(format!("{}.yaml", config.name)))
}

/// Write the documents to their configured destination.
///
/// Returns the file path when a file was written, `None` for stdout.
pub fn emit(documents: &[ManifestDocument], config: &ResolvedConfig) -> Result<Option<PathBuf>> {
    let stream = join_documents(documents);

    if config.print_to_stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(stream.as_bytes())?;
        stdout.flush()?;
        return Ok(None);
    }

    let path = output_path(config)?;
    write_file(&path, &stream)?;
    tracing::info!(path = %path.display(), documents = documents.len(), "wrote manifests");
    Ok(Some(path))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| StressGenError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, RawParams};

    fn config_in(dir: &Path, print_to_stdout: bool) -> ResolvedConfig {
        resolve(RawParams {
            hosts: Some("a".to_string()),
            password: Some("pw".to_string()),
            name: Some("bench".to_string()),
            output_dir: Some(dir.to_path_buf()),
            print_to_stdout,
            ..Default::default()
        })
        .expect("known-good input")
    }

    #[test]
    fn test_join_documents() {
        let docs = vec!["a: 1".to_string(), "b: 2".to_string()];
        assert_eq!(join_documents(&docs), "a: 1\n---\nb: 2\n");
        assert_eq!(join_documents(&docs[..1]), "a: 1\n");
    }

    #[test]
    fn test_emit_writes_named_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_in(dir.path(), false);
        let docs = vec!["a: 1".to_string(), "b: 2".to_string()];

        let path = emit(&docs, &config).expect("emit").expect("file path");
        assert_eq!(path, dir.path().join("bench.yaml"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1\n---\nb: 2\n");
    }

    #[test]
    fn test_emit_overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_in(dir.path(), false);
        fs::write(dir.path().join("bench.yaml"), "stale content that is longer").unwrap();

        emit(&["x: 1".to_string()], &config).expect("emit");
        assert_eq!(
            fs::read_to_string(dir.path().join("bench.yaml")).unwrap(),
            "x: 1\n"
        );
    }

    #[test]
    fn test_emit_stdout_writes_no_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_in(dir.path(), true);

        let result = emit(&["x: 1".to_string()], &config).expect("emit");
        assert!(result.is_none());
        assert!(!dir.path().join("bench.yaml").exists());
    }

    #[test]
    fn test_emit_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config_in(&dir.path().join("missing"), false);

        let err = emit(&["x: 1".to_string()], &config).unwrap_err();
        assert!(matches!(err, StressGenError::FileWrite { .. }));
    }

    #[test]
    fn test_default_output_dir_exists() {
        let dir = default_output_dir().expect("current exe");
        assert!(dir.is_dir());
    }
}
