use std::fmt::{Debug, Display};
use std::panic::Location;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use serde_json::json;

pub mod router;

pub type Body = Full<Bytes>;

#[macro_export]
macro_rules! make_response {
	($status:expr, $body:expr) => {
		::hyper::Response::builder()
			.status($status)
			.header(::hyper::header::CONTENT_TYPE, "application/json")
			.body($crate::http::Body::from($body.to_string()))
			.expect("failed to build response")
	};
}

/// Router error handler: logs the error where it was raised and renders the
/// response it carries.
pub async fn error_handler<E: Debug>(req: hyper::Request<()>, err: RouteError<E>) -> hyper::Response<Body> {
	let location = err.location();

	err.span().in_scope(|| match err.should_log() {
		ShouldLog::Yes => {
			tracing::error!(path = %req.uri(), method = %req.method(), location = %location, error = ?err, "http error")
		}
		ShouldLog::Debug => {
			tracing::debug!(path = %req.uri(), method = %req.method(), location = %location, error = ?err, "http error")
		}
		ShouldLog::No => (),
	});

	err.response()
}

/// A failed request: the response to send back, plus where and why it failed.
pub struct RouteError<E> {
	source: Option<E>,
	location: &'static Location<'static>,
	span: tracing::Span,
	response: hyper::Response<Body>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShouldLog {
	Yes,
	Debug,
	No,
}

impl<E> RouteError<E> {
	#[track_caller]
	fn new(response: hyper::Response<Body>) -> Self {
		Self {
			source: None,
			location: Location::caller(),
			span: tracing::Span::current(),
			response,
		}
	}

	pub fn span(&self) -> &tracing::Span {
		&self.span
	}

	pub fn location(&self) -> &'static Location<'static> {
		self.location
	}

	pub fn response(self) -> hyper::Response<Body> {
		self.response
	}

	pub fn should_log(&self) -> ShouldLog {
		if self.response.status().is_server_error() {
			ShouldLog::Yes
		} else if self.source.is_some() {
			ShouldLog::Debug
		} else {
			ShouldLog::No
		}
	}

	pub fn with_source(mut self, source: Option<E>) -> Self {
		self.source = source;
		self
	}

	pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
		self.location = location;
		self
	}
}

impl<E> From<hyper::Response<Body>> for RouteError<E> {
	#[track_caller]
	fn from(response: hyper::Response<Body>) -> Self {
		Self::new(response)
	}
}

/// A status with an arbitrary JSON body, for endpoints whose error payload
/// keeps the shape of their success payload.
impl<E> From<(StatusCode, serde_json::Value)> for RouteError<E> {
	#[track_caller]
	fn from((status, body): (StatusCode, serde_json::Value)) -> Self {
		Self::new(make_response!(status, body))
	}
}

impl<E> From<(StatusCode, &'_ str)> for RouteError<E> {
	#[track_caller]
	fn from((status, message): (StatusCode, &'_ str)) -> Self {
		Self::new(make_response!(status, json!({ "msg": message, "successful": false })))
	}
}

impl<E, T: Into<E>> From<(StatusCode, &'_ str, T)> for RouteError<E> {
	#[track_caller]
	fn from((status, message, source): (StatusCode, &'_ str, T)) -> Self {
		Self::new(make_response!(status, json!({ "msg": message, "successful": false }))).with_source(Some(source.into()))
	}
}

impl<E: Debug> Debug for RouteError<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.source {
			Some(err) => write!(f, "RouteError({}): {:?}", self.response.status(), err),
			None => write!(f, "RouteError({}): Unknown Source", self.response.status()),
		}
	}
}

impl<E: Display> Display for RouteError<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.source {
			Some(err) => write!(f, "RouteError({}): {}", self.response.status(), err),
			None => write!(f, "RouteError({}): Unknown Source", self.response.status()),
		}
	}
}

impl<E: std::error::Error + 'static> std::error::Error for RouteError<E> {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source.as_ref().map(|err| err as _)
	}
}

pub mod ext {
	use std::panic::Location;

	use super::RouteError;

	pub trait ResultExt<T, E, E2>: Sized {
		/// Replaces the error with the route error built from `ctx`, keeping
		/// the original error as its source.
		fn map_err_route<C>(self, ctx: C) -> Result<T, RouteError<E2>>
		where
			RouteError<E2>: From<C>,
			E2: From<E>;
	}

	impl<T, E, E2> ResultExt<T, E, E2> for Result<T, E> {
		#[track_caller]
		fn map_err_route<C>(self, ctx: C) -> Result<T, RouteError<E2>>
		where
			RouteError<E2>: From<C>,
			E2: From<E>,
		{
			let location = Location::caller();
			self.map_err(|err| {
				RouteError::from(ctx)
					.with_source(Some(err.into()))
					.with_location(location)
			})
		}
	}
}

