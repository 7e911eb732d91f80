//! Handler and middleware traits plus chain composition.
//!
//! A [`Handler`] turns a request into a response. [`Middleware`] wraps a
//! handler to add behavior before or after it runs, or to answer the request
//! itself without ever reaching the handler. [`MiddlewareChain`] composes
//! middleware in registration order in front of a terminal handler.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::request::Request;
use crate::response::Response;

/// Processes a request into a response.
///
/// # Examples
///
/// ```
/// use fontcss_middleware::{Handler, Request, Response};
/// use async_trait::async_trait;
///
/// struct Hello;
///
/// #[async_trait]
/// impl Handler for Hello {
///     async fn handle(&self, _request: Request) -> fontcss_middleware::Result<Response> {
///         Ok(Response::ok().with_body("hello"))
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send + Sync {
	/// Handle a request.
	///
	/// # Errors
	///
	/// Returns an error if the request cannot be processed.
	async fn handle(&self, request: Request) -> Result<Response>;
}

// Lets Arc<dyn Handler> itself be used where a Handler is expected.
#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

/// Wraps the next handler in the chain.
#[async_trait]
pub trait Middleware: Send + Sync {
	/// Process a request, delegating to `next` for pass-through.
	///
	/// # Errors
	///
	/// Returns an error if this middleware or the next handler fails.
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response>;

	/// Whether this middleware should run at all for the given request.
	///
	/// Returning false skips the middleware entirely, as if it were not in
	/// the chain. Defaults to true.
	fn should_continue(&self, _request: &Request) -> bool {
		true
	}
}

/// Composes middleware in front of a terminal handler.
///
/// # Examples
///
/// ```
/// use fontcss_middleware::{Handler, MiddlewareChain, Request, Response};
/// use std::sync::Arc;
///
/// struct Fallback;
///
/// #[async_trait::async_trait]
/// impl Handler for Fallback {
///     async fn handle(&self, _request: Request) -> fontcss_middleware::Result<Response> {
///         Ok(Response::not_found())
///     }
/// }
///
/// let chain = MiddlewareChain::new(Arc::new(Fallback));
/// ```
pub struct MiddlewareChain {
	middlewares: Vec<Arc<dyn Middleware>>,
	handler: Arc<dyn Handler>,
}

impl MiddlewareChain {
	/// Create a chain around the terminal handler.
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			middlewares: Vec::new(),
			handler,
		}
	}

	/// Append a middleware, builder style.
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	/// Append a middleware.
	pub fn add_middleware(&mut self, middleware: Arc<dyn Middleware>) {
		self.middlewares.push(middleware);
	}
}

#[async_trait]
impl Handler for MiddlewareChain {
	async fn handle(&self, request: Request) -> Result<Response> {
		if self.middlewares.is_empty() {
			return self.handler.handle(request).await;
		}

		// Compose inner-to-outer so registration order is execution order.
		// Middleware whose should_continue() declines the request are left
		// out of the composed chain for this request.
		let mut current: Arc<dyn Handler> = self.handler.clone();
		for middleware in self
			.middlewares
			.iter()
			.rev()
			.filter(|mw| mw.should_continue(&request))
		{
			current = Arc::new(ComposedHandler {
				middleware: middleware.clone(),
				next: current,
			});
		}

		current.handle(request).await
	}
}

struct ComposedHandler {
	middleware: Arc<dyn Middleware>,
	next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for ComposedHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		let response = self.middleware.process(request, self.next.clone()).await?;
		if response.should_stop_chain() {
			return Ok(response);
		}
		Ok(response)
	}
}
