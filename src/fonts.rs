//! Font CSS service and responder middleware.
//!
//! [`FontCssService`] owns the configuration, the CSS cache, and the
//! generator collaborator; its lifecycle is `new` → `setup` → `get_css`.
//! [`FontCssMiddleware`] matches `GET (/{locale})?/{font,font,...}/fonts.css`
//! requests against the service and streams the cached file back, passing
//! everything else (including requests for unknown fonts) to the next
//! handler.

use async_trait::async_trait;
use bytes::Bytes;
use hyper::Method;
use hyper::header::{CACHE_CONTROL, CONTENT_ENCODING, DATE, HeaderValue, VARY};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime};

use crate::cache::{CssCache, CssCacheStore, CssEntry};
use crate::compress;
use crate::config::{FontConfig, FontOptions};
use crate::error::{Error, Result};
use crate::generator::{CssGenerator, GeneratorAdapter};
use crate::middleware::{Handler, Middleware};
use crate::request::Request;
use crate::response::Response;

/// Locale used when the URL carries no locale segment.
pub const DEFAULT_LOCALE: &str = "default";

// Optional locale segment, then the comma-separated font list, then the
// fixed file name. Both segments are non-empty and slash-free.
static FONTS_URL: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^/(?:([^/]+)/)?([^/]+)/fonts\.css$").unwrap());

/// Owns configuration, cache, and the generator collaborator.
///
/// `setup` must be called before `get_css` or any request is served; it may
/// be called again at any time, which replaces the configuration and clears
/// every cached entry.
pub struct FontCssService {
	config: RwLock<Option<Arc<FontConfig>>>,
	cache: CssCache,
}

impl FontCssService {
	/// Create an unconfigured service around a generator collaborator.
	pub fn new(generator: Arc<dyn CssGenerator>) -> Self {
		Self {
			config: RwLock::new(None),
			cache: CssCache::new(GeneratorAdapter::new(generator)),
		}
	}

	/// Validate options, forward the tables to the generator, install the
	/// new configuration, and clear the cache.
	///
	/// # Errors
	///
	/// Returns [`Error::MissingRequiredOption`] when `fonts` or
	/// `locale_to_url_keys` is absent, or the generator's setup error.
	pub async fn setup(&self, options: FontOptions) -> Result<()> {
		let config = Arc::new(FontConfig::from_options(options)?);
		self.cache.generator().setup(&config).await?;

		*self.config.write().unwrap() = Some(config);
		self.cache.store().clear();
		tracing::info!("font css service configured");
		Ok(())
	}

	pub(crate) fn config(&self) -> Result<Arc<FontConfig>> {
		self.config
			.read()
			.unwrap()
			.clone()
			.ok_or(Error::NotConfigured)
	}

	/// Cached CSS for the tuple, generated and persisted on first request.
	///
	/// # Errors
	///
	/// Returns [`Error::NotConfigured`] before setup, [`Error::InvalidFont`]
	/// for fonts missing from the table, [`Error::Generation`] for other
	/// generator failures, and [`Error::Io`] when persistence fails.
	pub async fn get_css(&self, ua: &str, locale: &str, fonts: &[String]) -> Result<CssEntry> {
		self.config()?;
		self.cache.get_css(ua, locale, fonts).await
	}

	/// The in-memory cache, mainly for introspection in tests.
	pub fn cache_store(&self) -> &CssCacheStore {
		self.cache.store()
	}
}

/// Middleware serving generated font CSS.
///
/// # Examples
///
/// ```
/// use fontcss_middleware::{
///     CssGenerator, FontCssMiddleware, FontCssService, FontOptions, FontTable, GeneratorError,
///     Handler, Middleware, Request, Response,
/// };
/// use hyper::{Method, StatusCode};
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// struct OneRuleGenerator;
///
/// #[async_trait::async_trait]
/// impl CssGenerator for OneRuleGenerator {
///     async fn setup(
///         &self,
///         _fonts: FontTable,
///         _locale_to_url_keys: HashMap<String, String>,
///     ) -> Result<(), GeneratorError> {
///         Ok(())
///     }
///
///     async fn generate(
///         &self,
///         _ua: &str,
///         _locale: &str,
///         fonts: &[String],
///     ) -> Result<String, GeneratorError> {
///         Ok(format!("@font-face {{ font-family: {}; }}", fonts.join(",")))
///     }
/// }
///
/// struct NotFound;
///
/// #[async_trait::async_trait]
/// impl Handler for NotFound {
///     async fn handle(&self, _request: Request) -> fontcss_middleware::Result<Response> {
///         Ok(Response::not_found())
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let service = Arc::new(FontCssService::new(Arc::new(OneRuleGenerator)));
/// service
///     .setup(
///         FontOptions::new()
///             .with_fonts(FontTable::new())
///             .with_locale_to_url_keys(HashMap::new()),
///     )
///     .await
///     .unwrap();
///
/// let middleware = FontCssMiddleware::new(service);
/// let request = Request::builder()
///     .method(Method::GET)
///     .uri("/en/Arial/fonts.css")
///     .header("user-agent", "Mozilla/5.0")
///     .build()
///     .unwrap();
///
/// let response = middleware.process(request, Arc::new(NotFound)).await.unwrap();
/// assert_eq!(response.status, StatusCode::OK);
/// # });
/// ```
pub struct FontCssMiddleware {
	service: Arc<FontCssService>,
}

impl FontCssMiddleware {
	pub fn new(service: Arc<FontCssService>) -> Self {
		Self { service }
	}

	/// The underlying service, for setup and introspection.
	pub fn service(&self) -> &Arc<FontCssService> {
		&self.service
	}

	/// Extract (locale, font set) from a request path, if it matches.
	fn match_path(path: &str) -> Option<(String, Vec<String>)> {
		let caps = FONTS_URL.captures(path)?;
		let locale = caps
			.get(1)
			.map_or_else(|| DEFAULT_LOCALE.to_string(), |m| m.as_str().to_string());
		let fonts = caps[2].split(',').map(str::to_string).collect();
		Some((locale, fonts))
	}

	/// Serve an entry from its persisted file.
	async fn respond(
		&self,
		config: &FontConfig,
		request: &Request,
		entry: CssEntry,
	) -> Result<Response> {
		// Serve the persisted file, not the in-memory copy.
		let body = tokio::fs::read(&entry.file_path).await?;

		let mut response = Response::ok().with_content_type("text/css; charset=utf-8");

		if config.max_age > Duration::ZERO {
			if !response.headers.contains_key(DATE) {
				let now = httpdate::fmt_http_date(SystemTime::now());
				response.headers.insert(DATE, now.parse().unwrap());
			}
			if !response.headers.contains_key(CACHE_CONTROL) {
				let value = format!("public, max-age={}", config.max_age.as_secs());
				response.headers.insert(CACHE_CONTROL, value.parse().unwrap());
			}
		}

		let body = if config.compress && compress::accepts_gzip(&request.headers) {
			response
				.headers
				.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
			response
				.headers
				.insert(VARY, HeaderValue::from_static("accept-encoding"));
			compress::gzip(&body)?
		} else {
			Bytes::from(body)
		};

		Ok(response.with_body(body))
	}
}

#[async_trait]
impl Middleware for FontCssMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		if request.method != Method::GET {
			return next.handle(request).await;
		}
		let Some((locale, fonts)) = Self::match_path(request.path()) else {
			return next.handle(request).await;
		};

		let config = self.service.config()?;
		let ua = match &config.ua_override {
			Some(ua) => ua.clone(),
			None => request.user_agent().unwrap_or_default().to_string(),
		};

		match self.service.get_css(&ua, &locale, &fonts).await {
			Ok(entry) => self.respond(&config, &request, entry).await,
			Err(Error::InvalidFont(font)) => {
				// Unknown font: let a later handler decide what to answer.
				tracing::debug!(%font, "unknown font requested, passing through");
				next.handle(request).await
			}
			Err(err) => Err(err),
		}
	}

	fn should_continue(&self, request: &Request) -> bool {
		request.method == Method::GET
	}
}
