//! Disk persistence for generated CSS.
//!
//! One temporary directory is created lazily on first use and reused for
//! every file afterwards. The [`tempfile::TempDir`] guard is owned by the
//! store, so the directory and its contents are removed when the store is
//! dropped; nothing else in the crate cleans up cache files.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::sync::OnceCell;

use crate::error::Result;

/// Provisions and owns the process-wide CSS file directory.
pub struct CssFileStore {
	dir: OnceCell<TempDir>,
}

impl CssFileStore {
	pub fn new() -> Self {
		Self {
			dir: OnceCell::new(),
		}
	}

	/// Path of the temp directory, creating it on first call.
	///
	/// Concurrent first callers are serialized by the cell; exactly one
	/// directory is ever created.
	///
	/// # Errors
	///
	/// Returns [`Error::Io`](crate::Error::Io) if the directory cannot be
	/// created.
	pub async fn root(&self) -> Result<&Path> {
		let dir = self
			.dir
			.get_or_try_init(|| async {
				tempfile::Builder::new()
					.prefix("fontcss-")
					.tempdir()
					.map_err(crate::Error::from)
			})
			.await?;
		Ok(dir.path())
	}

	/// Write `css` under `file_name` inside the temp directory.
	///
	/// # Errors
	///
	/// Returns [`Error::Io`](crate::Error::Io) if directory creation or the
	/// write fails.
	pub async fn write(&self, file_name: &str, css: &str) -> Result<PathBuf> {
		let path = self.root().await?.join(file_name);
		tokio::fs::write(&path, css).await?;
		Ok(path)
	}
}

impl Default for CssFileStore {
	fn default() -> Self {
		Self::new()
	}
}
