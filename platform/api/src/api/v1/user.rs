use std::sync::Arc;

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde_json::json;
use utils::http::router::builder::RouterBuilder;
use utils::http::router::ext::RequestExt as _;
use utils::http::router::Router;
use utils::http::RouteError;
use utils::make_response;

use super::{internal, invalid_user_id};
use crate::api::error::{ApiError, Result};
use crate::api::ext::{json_body, RequestExt as _};
use crate::api::Body;
use crate::database::ToggleOutcome;
use crate::global::ApiGlobal;
use crate::social::{parse_skip, Account, Recommendations, SocialError};

const INVALID_USER_ID: &str = "Not a valid userId";
const INVALID_FOLLOW_PAIR: &str = "Not a valid userId or followerId";

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SignupRequest {
	username: String,
	email: String,
	password: String,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct LoginRequest {
	email: String,
	password: String,
}

async fn stats<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = req.global::<G>()?;
	let Some(user) = req.user_id("userId") else {
		return Err(invalid_user_id(INVALID_USER_ID, None));
	};

	let stats = global.social().follows.stats(user).await.map_err(|err| {
		internal(
			err,
			json!({
				"msg": "Failed to get follow stats",
				"followerCount": 0,
				"followingCount": 0,
			}),
		)
	})?;

	Ok(make_response!(StatusCode::OK, json!(stats)))
}

async fn following<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = req.global::<G>()?;
	let (Some(user), Some(follower)) = (req.user_id("userId"), req.user_id("followerId")) else {
		return Err(invalid_user_id(INVALID_FOLLOW_PAIR, None));
	};

	let following = global
		.social()
		.follows
		.exists(user, follower)
		.await
		.map_err(|err| internal(err, json!({ "msg": "Failed to check follow", "following": false })))?;

	Ok(make_response!(StatusCode::OK, json!({ "following": following })))
}

async fn toggle_follow<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = req.global::<G>()?;
	let (Some(user), Some(follower)) = (req.user_id("userId"), req.user_id("followerId")) else {
		return Err(invalid_user_id(INVALID_FOLLOW_PAIR, None));
	};

	let outcome = global
		.social()
		.follows
		.toggle(user, follower)
		.await
		.map_err(|err| internal(err, json!({ "msg": "Failed to toggle follow" })))?;

	let body = match outcome {
		ToggleOutcome::Created(follow) => json!({
			"msg": "Created new follow",
			"result": follow,
		}),
		ToggleOutcome::Deleted(follow) => json!({
			"msg": "Deleted existing follow",
			"deleteResult": {
				"raw": [follow],
				"affected": 1,
			},
		}),
	};

	Ok(make_response!(StatusCode::OK, body))
}

async fn who_to_follow<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = req.global::<G>()?;
	let Some(user) = req.user_id("userId") else {
		return Err(invalid_user_id(INVALID_USER_ID, Some("users")));
	};

	match global.social().recommendations.recommend(user).await {
		Ok(Recommendations::Users(users)) => Ok(make_response!(StatusCode::OK, json!({ "users": users }))),
		Ok(Recommendations::Exhausted) => Ok(make_response!(
			StatusCode::OK,
			json!({ "msg": "User is already following everybody" })
		)),
		Err(err) => Err(internal(
			err,
			json!({ "msg": "Failed to get recommendations", "users": [] }),
		)),
	}
}

async fn liked_recipes<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = req.global::<G>()?;
	let Some(user) = req.user_id("userId") else {
		return Err(invalid_user_id(INVALID_USER_ID, Some("recipes")));
	};

	let skip = parse_skip(req.query_params().get("skip").map(String::as_str));

	let recipes = global
		.social()
		.liked
		.liked(user, skip)
		.await
		.map_err(|err| internal(err, json!({ "msg": "Failed to get liked recipes", "recipes": [] })))?;

	Ok(make_response!(StatusCode::OK, json!({ "recipes": recipes })))
}

async fn create<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = req.global::<G>()?;
	let body: SignupRequest = json_body(req).await?;

	match global
		.social()
		.directory
		.register(&body.username, &body.email, &body.password)
		.await
	{
		Ok(user) => Ok(make_response!(
			StatusCode::OK,
			json!({
				"msg": "Created new user succesfully",
				"successful": true,
				"user": Account::from(user),
			})
		)),
		Err(SocialError::MissingData) => Err(RouteError::from((StatusCode::BAD_REQUEST, "Missing data"))),
		Err(SocialError::Validation(field)) => Err(RouteError::from((
			StatusCode::BAD_REQUEST,
			format!("Not a valid {field}").as_str(),
		))),
		Err(SocialError::Taken { username, email }) => Err(RouteError::from((
			StatusCode::CONFLICT,
			json!({
				"msg": "Username or email already in use",
				"successful": false,
				"usernameTaken": username,
				"emailTaken": email,
			}),
		))),
		Err(err) => Err(RouteError::from((
			StatusCode::INTERNAL_SERVER_ERROR,
			"Failed to create user",
			err,
		))),
	}
}

async fn login<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = req.global::<G>()?;
	let body: LoginRequest = json_body(req).await?;

	match global.social().directory.login(&body.email, &body.password).await {
		Ok(user) => Ok(make_response!(
			StatusCode::OK,
			json!({
				"msg": "Logged in successful",
				"user": Account::from(user),
				"successful": true,
			})
		)),
		Err(SocialError::MissingData) => Err(RouteError::from((StatusCode::BAD_REQUEST, "Missing data"))),
		Err(SocialError::NotFound(_)) => Err(RouteError::from((StatusCode::NOT_FOUND, "User not found"))),
		Err(SocialError::WrongPassword) => Err(RouteError::from((StatusCode::BAD_REQUEST, "Wrong password"))),
		Err(err) => Err(RouteError::from((StatusCode::INTERNAL_SERVER_ERROR, "Failed to log in", err))),
	}
}

async fn profile<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	let global = req.global::<G>()?;
	let username = req.param("username").unwrap_or_default();

	match global.social().directory.profile(username).await {
		Ok(profile) => Ok(make_response!(StatusCode::OK, json!(profile))),
		Err(SocialError::NotFound(_)) => Err(RouteError::from((StatusCode::NOT_FOUND, json!({ "user": null })))),
		Err(err) => Err(internal(err, json!({ "msg": "Failed to get user", "user": null }))),
	}
}

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<Incoming, Body, RouteError<ApiError>> {
	Router::builder()
		.post("/create", create::<G>)
		.post("/login", login::<G>)
		.get("/stats/:userId", stats::<G>)
		.get("/follow/:userId/:followerId", following::<G>)
		.post("/follow/:userId/:followerId", toggle_follow::<G>)
		.get("/who-to-follow/:userId", who_to_follow::<G>)
		.get("/liked/recipes/:userId", liked_recipes::<G>)
		.get("/:username", profile::<G>)
}
