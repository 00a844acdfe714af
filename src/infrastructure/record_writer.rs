//! Output file rendering and writing
//!
//! Records become blocks of `Key: value` lines in their declared field
//! order. Blocks are separated by [`defaults::RECORD_SEPARATOR`], with no
//! separator after the last block. The file is written to a temporary
//! sibling first and renamed into place, so readers never see a partial file.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::record::Record;
use crate::infrastructure::config::defaults;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write temporary output file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {from:?} into place at {to:?}: {source}")]
    Replace {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// One record as `Key: value` lines
pub fn render_block<R: Record>(record: &R) -> String {
    record
        .rendered_fields()
        .into_iter()
        .map(|(key, value)| format!("{key}: {value}\n"))
        .collect()
}

/// Full file contents for `records`
///
/// An empty slice renders as the placeholder line when one is given,
/// otherwise as an empty string.
pub fn render_records<R: Record>(records: &[R], placeholder: Option<&str>) -> String {
    if records.is_empty() {
        return placeholder.map(|line| format!("{line}\n")).unwrap_or_default();
    }

    records
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join(defaults::RECORD_SEPARATOR)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!("{}.{}.tmp", file_name, std::process::id()))
}

/// Replace `path` with the rendered records, returning the bytes written
///
/// The parent directory must already exist.
pub async fn write_records<R: Record>(
    path: &Path,
    records: &[R],
    placeholder: Option<&str>,
) -> OutputResult<usize> {
    let contents = render_records(records, placeholder);
    let temp_path = temp_sibling(path);

    debug!("Writing {} records to {:?}", records.len(), temp_path);
    tokio::fs::write(&temp_path, contents.as_bytes())
        .await
        .map_err(|source| OutputError::Write {
            path: temp_path.clone(),
            source,
        })?;

    if let Err(source) = tokio::fs::rename(&temp_path, path).await {
        if let Err(e) = tokio::fs::remove_file(&temp_path).await {
            warn!("Could not remove temporary file {:?}: {}", temp_path, e);
        }
        return Err(OutputError::Replace {
            from: temp_path,
            to: path.to_path_buf(),
            source,
        });
    }

    info!("Wrote {} records ({} bytes) to {:?}", records.len(), contents.len(), path);
    Ok(contents.len())
}
