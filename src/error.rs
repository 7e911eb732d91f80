//! Error types for the font CSS pipeline.
//!
//! Only [`Error::InvalidFont`] is meaningful to the middleware layer itself:
//! it is recovered by passing the request on to the next handler. Every other
//! variant propagates out of [`Middleware::process`](crate::Middleware::process)
//! so the caller's top-level error handling can deal with it.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the font CSS service and middleware.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Setup was called without one of its required options.
	#[error("missing required option: {0}")]
	MissingRequiredOption(&'static str),

	/// A request could not be constructed from its parts.
	#[error("invalid request: {0}")]
	InvalidRequest(String),

	/// The requested font set contains a font unknown to the font table.
	///
	/// Recoverable: the middleware treats the request as unmatched.
	#[error("unknown font: {0}")]
	InvalidFont(String),

	/// The CSS generator failed for a reason other than an unknown font.
	#[error("css generation failed: {0}")]
	Generation(String),

	/// The service was used before [`setup`](crate::FontCssService::setup)
	/// was called.
	#[error("font css service not configured; call setup() first")]
	NotConfigured,

	/// Temp directory creation, file write, or file read failed.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
