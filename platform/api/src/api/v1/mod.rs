use std::sync::Arc;

use hyper::body::Incoming;
use serde_json::json;
use utils::http::router::builder::RouterBuilder;
use utils::http::router::Router;
use utils::http::RouteError;

use super::error::ApiError;
use super::Body;
use crate::global::ApiGlobal;
use crate::social::SocialError;

pub mod feed;
pub mod health;
pub mod user;

pub fn routes<G: ApiGlobal>(global: &Arc<G>) -> RouterBuilder<Incoming, Body, RouteError<ApiError>> {
	Router::builder()
		.scope("/health", health::routes(global))
		.scope("/user", user::routes(global))
		.scope("/feed", feed::routes(global))
}

/// The 400 sent for a malformed id path segment, `empty` names the list
/// the endpoint would have returned.
#[track_caller]
fn invalid_user_id(msg: &str, empty: Option<&str>) -> RouteError<ApiError> {
	let mut body = json!({ "msg": msg });
	if let Some(field) = empty {
		body[field] = json!([]);
	}

	RouteError::from((hyper::StatusCode::BAD_REQUEST, body))
}

/// A 500 that keeps the endpoint's payload shape, the cause is logged but
/// not sent.
#[track_caller]
fn internal(err: SocialError, body: serde_json::Value) -> RouteError<ApiError> {
	RouteError::from((hyper::StatusCode::INTERNAL_SERVER_ERROR, body)).with_source(Some(err.into()))
}
