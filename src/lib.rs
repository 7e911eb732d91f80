//! # fontcss-middleware
//!
//! HTTP middleware that serves generated CSS for web-font declarations,
//! keyed by user agent, locale, and the requested font set.
//!
//! Matching `GET` requests of the form `(/{locale})?/{font1,font2,...}/fonts.css`
//! are answered from an in-memory cache of generated CSS artifacts, each
//! persisted to a process-wide temporary directory. On a miss the CSS is
//! produced by an external [`CssGenerator`] collaborator, written to disk,
//! cached, and served. Non-matching requests — wrong method, wrong path
//! shape, or a font set containing a font unknown to the configured font
//! table — pass through to the next handler untouched.
//!
//! The service lifecycle is explicit: build a [`FontCssService`] around a
//! generator, call [`setup`](FontCssService::setup) with a [`FontOptions`]
//! carrying the font table and locale mapping (repeating setup replaces the
//! configuration and clears the cache), then mount a [`FontCssMiddleware`]
//! in a [`MiddlewareChain`].

pub mod cache;
pub mod compress;
pub mod config;
pub mod error;
pub mod fonts;
pub mod generator;
pub mod middleware;
pub mod request;
pub mod response;
pub mod store;

pub use cache::{CssCacheStore, CssEntry, derive_key};
pub use config::{FontOptions, FontTable};
pub use error::{Error, Result};
pub use fonts::{DEFAULT_LOCALE, FontCssMiddleware, FontCssService};
pub use generator::{CssGenerator, GeneratorError};
pub use middleware::{Handler, Middleware, MiddlewareChain};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use store::CssFileStore;
