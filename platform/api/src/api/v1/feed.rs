use std::sync::Arc;

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde_json::json;
use utils::http::router::builder::RouterBuilder;
use utils::http::router::Router;
use utils::http::RouteError;
use utils::make_response;

use super::{internal, invalid_user_id};
use crate::api::error::{ApiError, Result};
use crate::api::ext::RequestExt as _;
use crate::api::Body;
use crate::global::ApiGlobal;
use crate::social::Page;

async fn feed<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = req.global::<G>()?;
	let Some(user) = req.user_id("userId") else {
		return Err(invalid_user_id("Not a valid userId", Some("feed")));
	};

	let query = req.query_params();
	let page = Page::parse(
		query.get("skip").map(String::as_str),
		query.get("take").map(String::as_str),
		global.social().page_limits(),
	);

	let feed = global.social().feed.feed(user, page).await.map_err(|err| {
		internal(
			err,
			json!({
				"msg": "Failed to get feed",
				"feed": [],
				"skip": page.skip,
			}),
		)
	})?;

	Ok(make_response!(
		StatusCode::OK,
		json!({
			"feed": feed.items,
			"skip": feed.next_skip,
		})
	))
}

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<Incoming, Body, RouteError<ApiError>> {
	Router::builder().get("/:userId", feed::<G>)
}
