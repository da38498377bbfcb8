use std::collections::HashMap;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::{Request, StatusCode};
use serde::de::DeserializeOwned;
use utils::http::ext::ResultExt;
use utils::http::router::ext::RequestExt as _;

use super::error::Result;
use crate::global::ApiGlobal;
use crate::social::UserId;

pub trait RequestExt {
	fn global<G: ApiGlobal>(&self) -> Result<Arc<G>>;

	/// The path parameter `name` as a [`UserId`], `None` if it is not one.
	fn user_id(&self, name: &str) -> Option<UserId>;

	fn query_params(&self) -> HashMap<String, String>;
}

impl RequestExt for Request<Incoming> {
	#[track_caller]
	fn global<G: ApiGlobal>(&self) -> Result<Arc<G>> {
		binary_helper::global::RequestGlobalExt::get_global::<G>(self)
	}

	fn user_id(&self, name: &str) -> Option<UserId> {
		self.param(name).and_then(|raw| UserId::parse(raw).ok())
	}

	fn query_params(&self) -> HashMap<String, String> {
		url::form_urlencoded::parse(self.uri().query().unwrap_or_default().as_bytes())
			.into_owned()
			.collect()
	}
}

pub async fn json_body<T: DeserializeOwned>(req: Request<Incoming>) -> Result<T> {
	let body = req
		.into_body()
		.collect()
		.await
		.map_err_route((StatusCode::BAD_REQUEST, "failed to read request body"))?
		.to_bytes();

	serde_json::from_slice(&body).map_err_route((StatusCode::BAD_REQUEST, "invalid json body"))
}
