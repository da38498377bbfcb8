use http::HeaderValue;
use hyper::http::header;

use super::{Middleware, NextFn};
use crate::http::router::builder::RouterBuilder;

#[derive(Debug, Clone, Default)]
pub struct CorsOptions {
	/// Origins allowed to read responses, `*` allows any.
	pub allow_origin: Vec<String>,
	pub allow_methods: Vec<String>,
	pub allow_headers: Vec<String>,
	pub max_age_seconds: Option<u64>,
}

impl CorsOptions {
	pub fn wildcard() -> Self {
		Self {
			allow_origin: vec!["*".to_string()],
			allow_methods: vec!["*".to_string()],
			allow_headers: vec!["*".to_string()],
			max_age_seconds: Some(3600),
		}
	}
}

/// Decorates every response with CORS headers and answers preflight
/// `OPTIONS` requests with `204 No Content`.
pub struct CorsMiddleware {
	allow_any_origin: bool,
	allow_origins: fnv::FnvHashSet<String>,
	allow_methods: Option<HeaderValue>,
	allow_headers: Option<HeaderValue>,
	max_age: Option<HeaderValue>,
}

/// Values that do not form a valid header are dropped with a warning.
fn join_header(name: &str, values: &[String]) -> Option<HeaderValue> {
	if values.is_empty() {
		return None;
	}

	match values.join(", ").parse() {
		Ok(value) => Some(value),
		Err(err) => {
			tracing::warn!(header = name, error = %err, "invalid cors header value");
			None
		}
	}
}

impl CorsMiddleware {
	pub fn new(options: &CorsOptions) -> Self {
		Self {
			allow_any_origin: options.allow_origin.iter().any(|origin| origin == "*"),
			allow_origins: options.allow_origin.iter().map(|s| s.to_lowercase()).collect(),
			allow_methods: join_header("access-control-allow-methods", &options.allow_methods),
			allow_headers: join_header("access-control-allow-headers", &options.allow_headers),
			max_age: options.max_age_seconds.map(HeaderValue::from),
		}
	}

	fn allowed_origin(&self, origin: Option<&HeaderValue>) -> Option<HeaderValue> {
		if self.allow_any_origin {
			return Some(HeaderValue::from_static("*"));
		}

		let origin = origin?;
		let origin_str = origin.to_str().ok()?.to_lowercase();
		self.allow_origins.contains(&origin_str).then(|| origin.clone())
	}
}

#[async_trait::async_trait]
impl<I: Send + 'static, O: Default + Send + 'static, E: Send + 'static> Middleware<I, O, E> for CorsMiddleware {
	async fn handle(&self, req: hyper::Request<I>, next: NextFn<I, O, E>) -> Result<hyper::Response<O>, E> {
		let origin = req.headers().get(header::ORIGIN).cloned();

		let mut resp = next(req).await?;

		let Some(allow_origin) = self.allowed_origin(origin.as_ref()) else {
			return Ok(resp);
		};

		let headers = resp.headers_mut();
		headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);

		if let Some(methods) = &self.allow_methods {
			headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, methods.clone());
		}

		if let Some(allow_headers) = &self.allow_headers {
			headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers.clone());
		}

		if let Some(max_age) = &self.max_age {
			headers.insert(header::ACCESS_CONTROL_MAX_AGE, max_age.clone());
		}

		if !self.allow_any_origin {
			headers.insert(header::VARY, HeaderValue::from_static("Origin"));
		}

		Ok(resp)
	}

	fn extend(&self, builder: RouterBuilder<I, O, E>) -> RouterBuilder<I, O, E> {
		builder.options("/*", |_| async move {
			let mut resp = hyper::Response::new(O::default());
			*resp.status_mut() = hyper::StatusCode::NO_CONTENT;
			Ok(resp)
		})
	}
}
