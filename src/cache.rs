//! In-memory CSS cache backed by on-disk files.
//!
//! Keys are derived from (user agent, locale, font set) by plain delimited
//! concatenation: no normalization is applied, so distinct casings or font
//! orderings are distinct cache entries. On a miss the cache invokes the
//! generator, persists the CSS under a sanitized filename in the temp
//! directory, and inserts the entry. Failures are never cached.
//!
//! There is no per-key single-flight: two concurrent misses for one key may
//! both generate and both write the same destination file. Both writes carry
//! identical content and the map converges to one entry per key, so the race
//! costs duplicate work, not correctness.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::Result;
use crate::generator::GeneratorAdapter;
use crate::store::CssFileStore;

/// Derive the cache key for a (user agent, locale, font set) tuple.
///
/// Deterministic and case/whitespace sensitive by design.
///
/// # Examples
///
/// ```
/// use fontcss_middleware::derive_key;
///
/// let key = derive_key("Mozilla/5.0", "en", &["Arial".to_string(), "Roboto".to_string()]);
/// assert_eq!(key, "Mozilla/5.0:en:Arial,Roboto");
/// ```
pub fn derive_key(ua: &str, locale: &str, fonts: &[String]) -> String {
	format!("{}:{}:{}", ua, locale, fonts.join(","))
}

/// File name for a cache key: non-word characters replaced, `.css` appended.
fn cache_file_name(key: &str) -> String {
	static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").unwrap());
	format!("{}.css", NON_WORD.replace_all(key, "-"))
}

/// One cached CSS artifact: the text and where it lives on disk.
#[derive(Debug, Clone, Serialize)]
pub struct CssEntry {
	pub css: String,
	pub file_path: PathBuf,
}

/// Map from cache key to entry.
#[derive(Debug, Default)]
pub struct CssCacheStore {
	entries: RwLock<HashMap<String, CssEntry>>,
}

impl CssCacheStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<CssEntry> {
		let entries = self.entries.read().unwrap();
		entries.get(key).cloned()
	}

	pub fn insert(&self, key: String, entry: CssEntry) {
		let mut entries = self.entries.write().unwrap();
		entries.insert(key, entry);
	}

	/// Drop every entry. The on-disk files are left in place; they are
	/// reclaimed with the temp directory.
	pub fn clear(&self) {
		let mut entries = self.entries.write().unwrap();
		entries.clear();
	}

	pub fn len(&self) -> usize {
		let entries = self.entries.read().unwrap();
		entries.len()
	}

	pub fn is_empty(&self) -> bool {
		let entries = self.entries.read().unwrap();
		entries.is_empty()
	}
}

/// Orchestrates key derivation, generation, persistence, and caching.
pub(crate) struct CssCache {
	store: CssCacheStore,
	files: CssFileStore,
	generator: GeneratorAdapter,
}

impl CssCache {
	pub(crate) fn new(generator: GeneratorAdapter) -> Self {
		Self {
			store: CssCacheStore::new(),
			files: CssFileStore::new(),
			generator,
		}
	}

	pub(crate) fn store(&self) -> &CssCacheStore {
		&self.store
	}

	pub(crate) fn generator(&self) -> &GeneratorAdapter {
		&self.generator
	}

	/// Return the cached entry for the tuple, generating and persisting it
	/// first on a miss.
	///
	/// # Errors
	///
	/// Propagates generator errors unchanged and
	/// [`Error::Io`](crate::Error::Io) from persistence. Neither is cached.
	pub(crate) async fn get_css(
		&self,
		ua: &str,
		locale: &str,
		fonts: &[String],
	) -> Result<CssEntry> {
		let key = derive_key(ua, locale, fonts);

		if let Some(entry) = self.store.get(&key) {
			tracing::debug!(%key, "css cache hit");
			return Ok(entry);
		}

		tracing::debug!(%key, "css cache miss");
		let css = self.generator.generate(ua, locale, fonts).await?;
		let file_path = self.files.write(&cache_file_name(&key), &css).await?;

		let entry = CssEntry { css, file_path };
		self.store.insert(key, entry.clone());
		Ok(entry)
	}
}
