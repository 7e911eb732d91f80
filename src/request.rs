//! HTTP request representation.

use bytes::Bytes;
use hyper::header::USER_AGENT;
use hyper::{HeaderMap, Method, Uri, Version};

use crate::error::{Error, Result};

/// HTTP request as seen by handlers and middleware.
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Request {
	/// Create a request from its parts.
	///
	/// # Examples
	///
	/// ```
	/// use fontcss_middleware::Request;
	/// use hyper::{Method, Uri, Version, HeaderMap};
	/// use bytes::Bytes;
	///
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/en/Arial/fonts.css"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	/// assert_eq!(request.path(), "/en/Arial/fonts.css");
	/// ```
	pub fn new(
		method: Method,
		uri: Uri,
		version: Version,
		headers: HeaderMap,
		body: Bytes,
	) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
		}
	}

	/// Start building a request.
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	/// Path component of the request URI.
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Value of the `User-Agent` header, if present and valid UTF-8.
	///
	/// # Examples
	///
	/// ```
	/// use fontcss_middleware::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/Arial/fonts.css")
	///     .header("user-agent", "Mozilla/5.0")
	///     .build()
	///     .unwrap();
	/// assert_eq!(request.user_agent(), Some("Mozilla/5.0"));
	/// ```
	pub fn user_agent(&self) -> Option<&str> {
		self.headers.get(USER_AGENT).and_then(|v| v.to_str().ok())
	}
}

/// Builder for [`Request`].
///
/// Unset fields default to `GET /` over HTTP/1.1 with empty headers and body.
#[derive(Default)]
pub struct RequestBuilder {
	method: Option<Method>,
	uri: Option<std::result::Result<Uri, String>>,
	version: Option<Version>,
	headers: Option<HeaderMap>,
	body: Option<Bytes>,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn uri<T>(mut self, uri: T) -> Self
	where
		T: TryInto<Uri>,
		T::Error: std::fmt::Display,
	{
		self.uri = Some(uri.try_into().map_err(|e| e.to_string()));
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = Some(version);
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = Some(headers);
		self
	}

	/// Insert a single header, keeping any set previously.
	///
	/// Invalid names or values are silently dropped; use [`headers`](Self::headers)
	/// with a prebuilt map when failures must be observed.
	pub fn header(mut self, name: &str, value: &str) -> Self {
		let mut headers = self.headers.take().unwrap_or_default();
		if let (Ok(name), Ok(value)) = (
			hyper::header::HeaderName::try_from(name),
			hyper::header::HeaderValue::try_from(value),
		) {
			headers.insert(name, value);
		}
		self.headers = Some(headers);
		self
	}

	pub fn body(mut self, body: Bytes) -> Self {
		self.body = Some(body);
		self
	}

	/// Finish the builder.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidRequest`] if the URI could not be parsed.
	pub fn build(self) -> Result<Request> {
		let uri = match self.uri {
			Some(Ok(uri)) => uri,
			Some(Err(reason)) => return Err(Error::InvalidRequest(reason)),
			None => Uri::from_static("/"),
		};

		Ok(Request {
			method: self.method.unwrap_or(Method::GET),
			uri,
			version: self.version.unwrap_or(Version::HTTP_11),
			headers: self.headers.unwrap_or_default(),
			body: self.body.unwrap_or_default(),
		})
	}
}
