use crate::WriteError;
use log::debug;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `contents` to `path`, replacing any existing file.
///
/// Data goes to a temporary file in the same directory first, which is then
/// renamed over the target, so readers never observe a truncated artifact.
/// The temporary file is removed if anything fails.
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), WriteError> {
	let io_error = |source| WriteError::IoError {
		path: path.to_path_buf(),
		source,
	};

	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
	tmp.write_all(contents.as_bytes()).map_err(io_error)?;
	tmp.as_file().sync_all().map_err(io_error)?;
	debug!("Moving {} into place at {}", tmp.path().display(), path.display());
	tmp.persist(path).map_err(|err| io_error(err.error))?;

	Ok(())
}
