//! CSS generator collaborator boundary.
//!
//! The actual font-declaration CSS is produced by an external collaborator
//! implementing [`CssGenerator`]. The adapter normalizes its two failure
//! modes into the crate's error taxonomy: an unknown font becomes
//! [`Error::InvalidFont`] (recoverable, the middleware passes the request
//! on), anything else becomes the opaque [`Error::Generation`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{FontConfig, FontTable};
use crate::error::{Error, Result};

/// Errors a generator collaborator may report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
	/// The requested font set names a font missing from the font table.
	#[error("unknown font: {0}")]
	UnknownFont(String),

	/// Any other generation failure.
	#[error("{0}")]
	Failed(String),
}

/// Produces font-declaration CSS for a user agent, locale, and font set.
///
/// Implementations receive the font table and locale mapping through
/// [`setup`](Self::setup) before any [`generate`](Self::generate) call.
#[async_trait]
pub trait CssGenerator: Send + Sync {
	/// Receive the font table and locale-to-URL-key mapping.
	///
	/// Called once per service setup; a second call replaces the previous
	/// tables.
	///
	/// # Errors
	///
	/// Returns an error if the tables cannot be accepted.
	async fn setup(
		&self,
		fonts: FontTable,
		locale_to_url_keys: HashMap<String, String>,
	) -> std::result::Result<(), GeneratorError>;

	/// Generate CSS for the given user agent, locale, and font set.
	///
	/// # Errors
	///
	/// Returns [`GeneratorError::UnknownFont`] when the set contains a font
	/// absent from the table, or [`GeneratorError::Failed`] otherwise.
	async fn generate(
		&self,
		ua: &str,
		locale: &str,
		fonts: &[String],
	) -> std::result::Result<String, GeneratorError>;
}

/// Wraps the collaborator and classifies its errors.
pub(crate) struct GeneratorAdapter {
	inner: Arc<dyn CssGenerator>,
}

impl GeneratorAdapter {
	pub(crate) fn new(inner: Arc<dyn CssGenerator>) -> Self {
		Self { inner }
	}

	pub(crate) async fn setup(&self, config: &FontConfig) -> Result<()> {
		self.inner
			.setup(config.fonts.clone(), config.locale_to_url_keys.clone())
			.await
			.map_err(classify)
	}

	pub(crate) async fn generate(
		&self,
		ua: &str,
		locale: &str,
		fonts: &[String],
	) -> Result<String> {
		self.inner.generate(ua, locale, fonts).await.map_err(|err| {
			if let GeneratorError::Failed(reason) = &err {
				tracing::warn!(%locale, %reason, "css generation failed");
			}
			classify(err)
		})
	}
}

fn classify(err: GeneratorError) -> Error {
	match err {
		GeneratorError::UnknownFont(font) => Error::InvalidFont(font),
		GeneratorError::Failed(reason) => Error::Generation(reason),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct FailingGenerator {
		error: GeneratorError,
	}

	#[async_trait]
	impl CssGenerator for FailingGenerator {
		async fn setup(
			&self,
			_fonts: FontTable,
			_locale_to_url_keys: HashMap<String, String>,
		) -> std::result::Result<(), GeneratorError> {
			Ok(())
		}

		async fn generate(
			&self,
			_ua: &str,
			_locale: &str,
			_fonts: &[String],
		) -> std::result::Result<String, GeneratorError> {
			Err(self.error.clone())
		}
	}

	#[tokio::test]
	async fn unknown_font_maps_to_invalid_font() {
		let adapter = GeneratorAdapter::new(Arc::new(FailingGenerator {
			error: GeneratorError::UnknownFont("Comic Sans".to_string()),
		}));
		let err = adapter
			.generate("ua", "en", &["Comic Sans".to_string()])
			.await
			.unwrap_err();
		assert!(matches!(err, Error::InvalidFont(font) if font == "Comic Sans"));
	}

	#[tokio::test]
	async fn other_failures_map_to_generation() {
		let adapter = GeneratorAdapter::new(Arc::new(FailingGenerator {
			error: GeneratorError::Failed("upstream down".to_string()),
		}));
		let err = adapter
			.generate("ua", "en", &["Arial".to_string()])
			.await
			.unwrap_err();
		assert!(matches!(err, Error::Generation(reason) if reason == "upstream down"));
	}
}
