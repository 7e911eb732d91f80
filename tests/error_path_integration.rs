//! Error-path integration tests:
//! - unknown fonts fall through to the next handler
//! - opaque generator failures propagate out of the middleware
//! - setup validation and the not-configured precondition


use fixtures::*;
use fontcss_middleware::{
	Error, FontCssMiddleware, FontCssService, FontOptions, FontTable, Middleware,
};
use hyper::{Method, StatusCode};
use fontcss_middleware::Request;
use rstest::rstest;
use std::collections::HashMap;
use std::sync::Arc;

#[rstest]
#[tokio::test]
async fn unknown_font_passes_through(fallthrough: Arc<FallthroughHandler>) {
	let generator = Arc::new(StubGenerator::new(StubBehavior::UnknownFont));
	let service = configured_service(generator, minimal_options()).await;
	let middleware = FontCssMiddleware::new(service.clone());

	let response = middleware
		.process(font_request("/en/NoSuchFont/fonts.css"), fallthrough.clone())
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert_eq!(fallthrough.call_count(), 1);
	// Nothing was cached for the failed tuple.
	assert!(service.cache_store().is_empty());
}

#[rstest]
#[tokio::test]
async fn generator_failure_propagates(fallthrough: Arc<FallthroughHandler>) {
	let generator = Arc::new(StubGenerator::new(StubBehavior::Fail));
	let service = configured_service(generator, minimal_options()).await;
	let middleware = FontCssMiddleware::new(service);

	let err = middleware
		.process(font_request("/en/Arial/fonts.css"), fallthrough.clone())
		.await
		.unwrap_err();

	assert!(matches!(err, Error::Generation(_)));
	assert_eq!(fallthrough.call_count(), 0);
}

#[rstest]
#[tokio::test]
async fn non_get_request_passes_through(
	stub_generator: Arc<StubGenerator>,
	fallthrough: Arc<FallthroughHandler>,
) {
	let service = configured_service(stub_generator.clone(), minimal_options()).await;
	let middleware = FontCssMiddleware::new(service);

	let request = Request::builder()
		.method(Method::POST)
		.uri("/en/Arial/fonts.css")
		.build()
		.unwrap();
	let response = middleware.process(request, fallthrough.clone()).await.unwrap();

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert_eq!(fallthrough.call_count(), 1);
	assert_eq!(stub_generator.generate_count(), 0);
}

#[rstest]
#[tokio::test]
async fn unmatched_path_passes_through(
	stub_generator: Arc<StubGenerator>,
	fallthrough: Arc<FallthroughHandler>,
) {
	let service = configured_service(stub_generator.clone(), minimal_options()).await;
	let middleware = FontCssMiddleware::new(service);

	let response = middleware
		.process(font_request("/styles/site.css"), fallthrough.clone())
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::NOT_FOUND);
	assert_eq!(fallthrough.call_count(), 1);
	assert_eq!(stub_generator.generate_count(), 0);
}

#[tokio::test]
async fn setup_requires_fonts() {
	let service = FontCssService::new(Arc::new(StubGenerator::new(StubBehavior::Succeed)));
	let options = FontOptions::new().with_locale_to_url_keys(HashMap::new());

	let err = service.setup(options).await.unwrap_err();
	assert!(matches!(err, Error::MissingRequiredOption("fonts")));
}

#[tokio::test]
async fn setup_requires_locale_map() {
	let service = FontCssService::new(Arc::new(StubGenerator::new(StubBehavior::Succeed)));
	let options = FontOptions::new().with_fonts(FontTable::new());

	let err = service.setup(options).await.unwrap_err();
	assert!(matches!(
		err,
		Error::MissingRequiredOption("locale_to_url_keys")
	));
}

#[rstest]
#[tokio::test]
async fn requests_before_setup_are_rejected(fallthrough: Arc<FallthroughHandler>) {
	let service = Arc::new(FontCssService::new(Arc::new(StubGenerator::new(
		StubBehavior::Succeed,
	))));
	let middleware = FontCssMiddleware::new(service.clone());

	let err = middleware
		.process(font_request("/en/Arial/fonts.css"), fallthrough)
		.await
		.unwrap_err();
	assert!(matches!(err, Error::NotConfigured));

	let err = service
		.get_css("ua", "en", &["Arial".to_string()])
		.await
		.unwrap_err();
	assert!(matches!(err, Error::NotConfigured));
}
