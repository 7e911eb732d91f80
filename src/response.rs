//! HTTP response representation.

use bytes::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use hyper::{HeaderMap, StatusCode};

/// HTTP response produced by handlers and middleware.
#[derive(Debug)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
	/// When true, no further middleware or handlers run for this request.
	stop_chain: bool,
}

impl Response {
	/// Create a response with the given status and no body.
	///
	/// # Examples
	///
	/// ```
	/// use fontcss_middleware::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
			stop_chain: false,
		}
	}

	/// 200 OK.
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// 404 Not Found.
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// 500 Internal Server Error.
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// Replace the body.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Insert a header, replacing any previous value under the same name.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	/// Set the `Content-Type` header.
	pub fn with_content_type(self, content_type: &'static str) -> Self {
		self.with_header(CONTENT_TYPE, HeaderValue::from_static(content_type))
	}

	/// Mark whether the middleware chain should stop after this response.
	pub fn with_stop_chain(mut self, stop: bool) -> Self {
		self.stop_chain = stop;
		self
	}

	/// Whether the middleware chain should stop after this response.
	pub fn should_stop_chain(&self) -> bool {
		self.stop_chain
	}
}
