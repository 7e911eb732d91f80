//! Gzip response compression.

use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;
use hyper::HeaderMap;
use hyper::header::ACCEPT_ENCODING;
use std::io::Write;

/// Whether the client's `Accept-Encoding` header allows gzip.
///
/// # Examples
///
/// ```
/// use fontcss_middleware::compress::accepts_gzip;
/// use hyper::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("accept-encoding", "gzip, deflate, br".parse().unwrap());
/// assert!(accepts_gzip(&headers));
/// assert!(!accepts_gzip(&HeaderMap::new()));
/// ```
pub fn accepts_gzip(headers: &HeaderMap) -> bool {
	headers
		.get(ACCEPT_ENCODING)
		.and_then(|value| value.to_str().ok())
		.is_some_and(|value| {
			value.split(',').any(|encoding| {
				// Strip a quality parameter like "gzip;q=0.5".
				let name = encoding.trim().split(';').next().unwrap_or("");
				name.eq_ignore_ascii_case("gzip")
			})
		})
}

/// Gzip-encode a body.
///
/// # Errors
///
/// Returns an error if the encoder fails to write or finalize.
pub fn gzip(body: &[u8]) -> std::io::Result<Bytes> {
	let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(body)?;
	Ok(Bytes::from(encoder.finish()?))
}
