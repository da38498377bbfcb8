use hyper::body::Incoming;
use utils::http::router::middleware::{middleware_fn, CorsMiddleware, CorsOptions, Middleware};
use utils::http::RouteError;

use super::error::ApiError;
use super::Body;

pub fn request_log() -> impl Middleware<Incoming, Body, RouteError<ApiError>> {
	middleware_fn::<Incoming, Body, RouteError<ApiError>, _, _>(|req, next| async move {
		tracing::debug!("{} -> {}", req.method(), req.uri().path());
		next(req).await
	})
}

pub fn cors() -> CorsMiddleware {
	CorsMiddleware::new(&CorsOptions {
		allow_origin: vec!["*".to_string()],
		allow_methods: ["OPTIONS", "GET", "PUT", "POST", "DELETE"].map(String::from).to_vec(),
		allow_headers: ["Origin", "X-Requested-With", "Content-Type", "Accept"]
			.map(String::from)
			.to_vec(),
		max_age_seconds: None,
	})
}
