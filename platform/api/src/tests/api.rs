use std::time::Duration;

use hyper::StatusCode;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use utils::context::Handler;

use super::global::{mock_config, mock_global_state};
use super::store::MemoryStore;
use crate::api::run;

struct TestServer {
	base: String,
	client: reqwest::Client,
	handler: Handler,
	handle: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
	async fn start(store: MemoryStore) -> Self {
		let config = mock_config();
		let base = format!("http://{}/v1", config.api.bind_address);
		let (global, handler) = mock_global_state(store, config);

		let handle = tokio::spawn(run(global));

		// We need to wait for the server to start
		tokio::time::sleep(Duration::from_millis(300)).await;

		Self {
			base,
			client: reqwest::Client::new(),
			handler,
			handle,
		}
	}

	async fn get(&self, path: &str) -> (StatusCode, Value) {
		let resp = self
			.client
			.get(format!("{}{path}", self.base))
			.send()
			.await
			.expect("failed to send request");

		let status = resp.status();
		(status, resp.json().await.expect("failed to read body"))
	}

	async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
		let resp = self
			.client
			.post(format!("{}{path}", self.base))
			.json(&body)
			.send()
			.await
			.expect("failed to send request");

		let status = resp.status();
		(status, resp.json().await.expect("failed to read body"))
	}

	async fn shutdown(self) {
		// The client uses Keep-Alive, so we need to drop it to release the global context
		drop(self.client);

		tokio::time::timeout(Duration::from_secs(1), self.handler.cancel())
			.await
			.expect("failed to cancel context");
		tokio::time::timeout(Duration::from_secs(1), self.handle)
			.await
			.expect("failed to cancel api")
			.expect("api failed")
			.expect("api failed");
	}
}

fn seeded_store() -> MemoryStore {
	let store = MemoryStore::default();
	for i in 1..=5 {
		store.add_user(&format!("user{i}"), &format!("user{i}@example.com"));
	}
	store
}

#[tokio::test]
async fn test_health_and_cors() {
	let server = TestServer::start(MemoryStore::default()).await;

	let resp = server
		.client
		.get(format!("{}/health", server.base))
		.send()
		.await
		.expect("failed to get health");

	assert_eq!(resp.status(), StatusCode::OK);
	assert_eq!(resp.headers()["access-control-allow-origin"], "*");
	assert_eq!(
		resp.headers()["access-control-allow-methods"],
		"OPTIONS, GET, PUT, POST, DELETE"
	);
	assert_eq!(resp.text().await.expect("failed to read body"), "{\"status\":\"ok\"}");

	let resp = server
		.client
		.request(reqwest::Method::OPTIONS, format!("{}/user/follow/1/2", server.base))
		.header("Origin", "http://localhost:3000")
		.send()
		.await
		.expect("failed to send preflight");

	assert_eq!(resp.status(), StatusCode::NO_CONTENT);
	assert_eq!(resp.headers()["access-control-allow-origin"], "*");
	assert_eq!(
		resp.headers()["access-control-allow-headers"],
		"Origin, X-Requested-With, Content-Type, Accept"
	);

	server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_route() {
	let server = TestServer::start(MemoryStore::default()).await;

	let (status, body) = server.get("/nothing/here").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({ "error": "not_found" }));

	server.shutdown().await;
}

#[tokio::test]
async fn test_toggle_follow() {
	let server = TestServer::start(seeded_store()).await;

	let (status, body) = server.post("/user/follow/5/2", json!({})).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["msg"], "Created new follow");
	assert_eq!(body["result"]["userId"], 5);
	assert_eq!(body["result"]["followerId"], 2);

	let (_, body) = server.get("/user/follow/5/2").await;
	assert_eq!(body, json!({ "following": true }));

	let (_, body) = server.get("/user/stats/5").await;
	assert_eq!(body, json!({ "followerCount": 1, "followingCount": 0 }));

	let (status, body) = server.post("/user/follow/5/2", json!({})).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["msg"], "Deleted existing follow");
	assert_eq!(body["deleteResult"]["affected"], 1);

	let (_, body) = server.get("/user/follow/5/2").await;
	assert_eq!(body, json!({ "following": false }));

	let (status, body) = server.post("/user/follow/abc/2", json!({})).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "msg": "Not a valid userId or followerId" }));

	let (status, _) = server.get("/user/stats/0").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);

	server.shutdown().await;
}

#[tokio::test]
async fn test_feed_endpoint() {
	let store = seeded_store();
	store.add_follow(2, 1);
	store.add_recipe(2, "Lasagna");
	store.add_recipe(2, "Tiramisu");
	store.add_recipe(1, "Own bread");

	let server = TestServer::start(store.clone()).await;

	let (status, body) = server.get("/feed/1?skip=0&take=1").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["skip"], 1);
	assert_eq!(body["feed"][0]["title"], "Tiramisu");
	assert_eq!(body["feed"][0]["user"]["username"], "user2");
	assert!(body["feed"][0]["user"].get("email").is_none());

	let (_, body) = server.get("/feed/1?skip=abc&take=-3").await;
	assert_eq!(body["feed"].as_array().unwrap().len(), 2);
	assert_eq!(body["skip"], 2);

	let (_, body) = server.get("/feed/3").await;
	assert_eq!(body, json!({ "feed": [], "skip": 0 }));

	let (status, body) = server.get("/feed/nope").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "msg": "Not a valid userId", "feed": [] }));

	store.fail(true);
	let (status, body) = server.get("/feed/1").await;
	assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body["feed"], json!([]));

	server.shutdown().await;
}

#[tokio::test]
async fn test_who_to_follow_and_liked() {
	let store = seeded_store();
	let curry = store.add_recipe(2, "Curry");
	store.add_recipe(2, "Naan");
	store.add_recipe(3, "Pho");
	store.add_like(1, curry.id);

	let server = TestServer::start(store.clone()).await;

	let (status, body) = server.get("/user/who-to-follow/1").await;
	assert_eq!(status, StatusCode::OK);
	let ids = body["users"]
		.as_array()
		.unwrap()
		.iter()
		.map(|user| user["id"].as_i64().unwrap())
		.collect::<Vec<_>>();
	assert_eq!(ids, vec![2, 3]);

	store.add_follow(2, 1);
	store.add_follow(3, 1);
	let (_, body) = server.get("/user/who-to-follow/1").await;
	assert_eq!(body, json!({ "msg": "User is already following everybody" }));

	let (status, body) = server.get("/user/liked/recipes/1?skip=0").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body,
		json!({
			"recipes": [{
				"title": "Curry",
				"slug": curry.slug,
				"coverImage": null,
				"username": "user2",
			}]
		})
	);

	let (status, body) = server.get("/user/liked/recipes/x").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["recipes"], json!([]));

	server.shutdown().await;
}

#[tokio::test]
async fn test_signup_login_profile() {
	let server = TestServer::start(MemoryStore::default()).await;

	let (status, body) = server
		.post(
			"/user/create",
			json!({ "username": " Chef ", "email": "Chef@Example.com", "password": "pasta" }),
		)
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["msg"], "Created new user succesfully");
	assert_eq!(body["successful"], true);
	assert_eq!(body["user"]["username"], "chef");
	assert_eq!(body["user"]["email"], "chef@example.com");
	assert!(body["user"].get("password").is_none());

	let (status, body) = server
		.post(
			"/user/create",
			json!({ "username": "CHEF", "email": "new@example.com", "password": "pasta" }),
		)
		.await;
	assert_eq!(status, StatusCode::CONFLICT);
	assert_eq!(body["usernameTaken"], true);
	assert_eq!(body["emailTaken"], false);

	let (status, body) = server.post("/user/create", json!({ "username": "x" })).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body, json!({ "msg": "Missing data", "successful": false }));

	let (status, body) = server
		.post("/user/login", json!({ "email": "chef@example.com", "password": "pasta" }))
		.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["msg"], "Logged in successful");
	assert!(body["user"].get("password").is_none());

	let (status, body) = server
		.post("/user/login", json!({ "email": "chef@example.com", "password": "pizza" }))
		.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["msg"], "Wrong password");

	let (status, body) = server
		.post("/user/login", json!({ "email": "ghost@example.com", "password": "pizza" }))
		.await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["msg"], "User not found");

	let (status, body) = server.get("/user/Chef").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["username"], "chef");
	assert!(body.get("email").is_none());

	let (status, body) = server.get("/user/ghost").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({ "user": null }));

	server.shutdown().await;
}
