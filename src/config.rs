//! Service configuration.
//!
//! [`FontOptions`] is the caller-facing setup input: `fonts` and
//! `locale_to_url_keys` are required, everything else defaults. Validation
//! happens when the options are handed to
//! [`FontCssService::setup`](crate::FontCssService::setup), which converts
//! them into the internal config.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Error, Result};

/// Font table: font name to its definition.
///
/// Definitions are opaque to this crate; they are interpreted only by the
/// [`CssGenerator`](crate::CssGenerator) collaborator.
pub type FontTable = HashMap<String, serde_json::Value>;

/// Setup options for the font CSS service.
///
/// # Examples
///
/// ```
/// use fontcss_middleware::FontOptions;
/// use std::collections::HashMap;
/// use std::time::Duration;
///
/// let options = FontOptions::new()
///     .with_fonts(HashMap::new())
///     .with_locale_to_url_keys(HashMap::from([("en".to_string(), "latin".to_string())]))
///     .with_max_age(Duration::from_secs(3600))
///     .with_compress(true);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontOptions {
	/// Required: the font table forwarded to the generator.
	pub fonts: Option<FontTable>,
	/// Required: locale to URL-key mapping forwarded to the generator.
	pub locale_to_url_keys: Option<HashMap<String, String>>,
	/// Cache lifetime advertised via `Cache-Control`. Zero (the default)
	/// suppresses the header entirely.
	#[serde(default)]
	pub max_age: Duration,
	/// Gzip responses for clients that accept it. Defaults to false.
	#[serde(default)]
	pub compress: bool,
	/// Fixed user agent used instead of the request header, mainly for
	/// pinning cache keys in tests and single-audience deployments.
	#[serde(default)]
	pub ua_override: Option<String>,
}

impl FontOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_fonts(mut self, fonts: FontTable) -> Self {
		self.fonts = Some(fonts);
		self
	}

	pub fn with_locale_to_url_keys(mut self, locale_to_url_keys: HashMap<String, String>) -> Self {
		self.locale_to_url_keys = Some(locale_to_url_keys);
		self
	}

	pub fn with_max_age(mut self, max_age: Duration) -> Self {
		self.max_age = max_age;
		self
	}

	pub fn with_compress(mut self, compress: bool) -> Self {
		self.compress = compress;
		self
	}

	pub fn with_ua_override(mut self, ua: impl Into<String>) -> Self {
		self.ua_override = Some(ua.into());
		self
	}
}

/// Validated configuration held by the service between setup calls.
#[derive(Debug, Clone)]
pub(crate) struct FontConfig {
	pub fonts: FontTable,
	pub locale_to_url_keys: HashMap<String, String>,
	pub max_age: Duration,
	pub compress: bool,
	pub ua_override: Option<String>,
}

impl FontConfig {
	/// Validate setup options.
	///
	/// # Errors
	///
	/// Returns [`Error::MissingRequiredOption`] when `fonts` or
	/// `locale_to_url_keys` is absent.
	pub(crate) fn from_options(options: FontOptions) -> Result<Self> {
		let fonts = options
			.fonts
			.ok_or(Error::MissingRequiredOption("fonts"))?;
		let locale_to_url_keys = options
			.locale_to_url_keys
			.ok_or(Error::MissingRequiredOption("locale_to_url_keys"))?;

		Ok(Self {
			fonts,
			locale_to_url_keys,
			max_age: options.max_age,
			compress: options.compress,
			ua_override: options.ua_override,
		})
	}
}
