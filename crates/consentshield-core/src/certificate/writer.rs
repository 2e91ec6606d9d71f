//! Persisted certificate artifacts.
//!
//! # File naming
//!
//! ```text
//! {dir}/certificate-{session_id}.html
//! {dir}/evidence-{session_id}.html
//! ```
//!
//! The name is derived only from the sanitized session id, so no input can
//! escape `dir`. Writes go through a temp file in the same directory and are
//! renamed into place. Staging and committing are separate steps so a caller
//! can find out the directory is unusable before it changes any other state.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Certificate,
    Evidence,
}

impl ArtifactKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Certificate => "certificate",
            ArtifactKind::Evidence => "evidence",
        }
    }
}

fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn artifact_file_name(kind: ArtifactKind, session_id: &str) -> String {
    format!("{}-{}.html", kind.prefix(), sanitize_id(session_id))
}

/// An artifact fully written to a temp file next to its final path, waiting
/// for [`commit`](StagedArtifact::commit). Dropping it removes the temp file.
#[derive(Debug)]
pub struct StagedArtifact {
    tmp: NamedTempFile,
    path: PathBuf,
    kind: ArtifactKind,
}

impl StagedArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename the temp file into place.
    pub fn commit(self) -> io::Result<PathBuf> {
        let Self { tmp, path, kind } = self;
        tmp.persist(&path).map_err(|e| e.error)?;
        tracing::info!(
            kind = kind.prefix(),
            path = %path.display(),
            "wrote certificate artifact"
        );
        Ok(path)
    }
}

/// Write `html` to a temp file in `dir` without touching the final path.
/// Failures caused by `dir` itself surface here rather than at commit.
pub fn stage_artifact(
    dir: &Path,
    kind: ArtifactKind,
    session_id: &str,
    html: &str,
) -> io::Result<StagedArtifact> {
    fs::create_dir_all(dir)?;
    let path = dir.join(artifact_file_name(kind, session_id));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(html.as_bytes())?;
    tmp.as_file().sync_all()?;
    Ok(StagedArtifact { tmp, path, kind })
}

/// Atomically write an artifact and return its path.
pub fn write_certificate(
    dir: &Path,
    kind: ArtifactKind,
    session_id: &str,
    html: &str,
) -> io::Result<PathBuf> {
    stage_artifact(dir, kind, session_id, html)?.commit()
}

pub fn read_artifact(dir: &Path, kind: ArtifactKind, session_id: &str) -> io::Result<String> {
    fs::read_to_string(dir.join(artifact_file_name(kind, session_id)))
}
