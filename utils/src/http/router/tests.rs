use hyper::{Method, Request, Response, StatusCode};

use super::error::RouterError;
use super::ext::RequestExt;
use super::middleware::{CorsMiddleware, CorsOptions, NextFn};
use super::Router;

fn request(method: Method, uri: &str) -> Request<()> {
	Request::builder().method(method).uri(uri).body(()).unwrap()
}

#[tokio::test]
async fn test_route_params_and_methods() {
	let router = Router::<(), String, String>::builder()
		.get("/users/:userId", |req| async move {
			Ok(Response::new(format!("get {}", req.param("userId").unwrap_or_default())))
		})
		.post("/users/:userId", |_| async move { Ok(Response::new("post".to_string())) })
		.build();

	let resp = router.handle(request(Method::GET, "/users/42")).await.unwrap();
	assert_eq!(resp.body(), "get 42");

	let resp = router.handle(request(Method::POST, "/users/42")).await.unwrap();
	assert_eq!(resp.body(), "post");

	assert!(matches!(
		router.handle(request(Method::PUT, "/users/42")).await,
		Err(RouterError::NotFound)
	));
	assert!(matches!(
		router.handle(request(Method::GET, "/nowhere")).await,
		Err(RouterError::NotFound)
	));
}

#[tokio::test]
async fn test_scope_and_data() {
	#[derive(Clone)]
	struct Greeting(&'static str);

	let router = Router::<(), String, String>::builder()
		.data(Greeting("hello"))
		.scope(
			"/v1",
			Router::builder().get("/greet/:name", |req| async move {
				let greeting = req.extensions().get::<Greeting>().map(|g| g.0).unwrap_or("missing");
				Ok(Response::new(format!("{greeting} {}", req.param("name").unwrap_or_default())))
			}),
		)
		.build();

	let resp = router.handle(request(Method::GET, "/v1/greet/alice")).await.unwrap();
	assert_eq!(resp.body(), "hello alice");

	assert!(matches!(
		router.handle(request(Method::GET, "/greet/alice")).await,
		Err(RouterError::NotFound)
	));
}

#[tokio::test]
async fn test_error_handler_renders_before_middleware() {
	let router = Router::<(), String, String>::builder()
		.middleware(|req: Request<()>, next: NextFn<(), String, String>| async move {
			let mut resp = next(req).await?;
			resp.headers_mut().insert("x-seen", "1".parse().unwrap());
			Ok(resp)
		})
		.error_handler(|req: Request<()>, err: String| async move {
			let mut resp = Response::new(format!("{} failed: {err}", req.uri().path()));
			*resp.status_mut() = StatusCode::BAD_REQUEST;
			resp
		})
		.get("/boom", |_| async move { Err("boom".to_string()) })
		.build();

	let resp = router.handle(request(Method::GET, "/boom")).await.unwrap();
	assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	assert_eq!(resp.body(), "/boom failed: boom");
	assert_eq!(resp.headers().get("x-seen").unwrap(), "1");
}

#[tokio::test]
async fn test_middleware_order() {
	let router = Router::<(), String, String>::builder()
		.middleware(|req: Request<()>, next: NextFn<(), String, String>| async move {
			let resp = next(req).await?;
			Ok(resp.map(|body| format!("outer({body})")))
		})
		.middleware(|req: Request<()>, next: NextFn<(), String, String>| async move {
			let resp = next(req).await?;
			Ok(resp.map(|body| format!("inner({body})")))
		})
		.get("/", |_| async move { Ok(Response::new("route".to_string())) })
		.build();

	let resp = router.handle(request(Method::GET, "/")).await.unwrap();
	assert_eq!(resp.body(), "outer(inner(route))");
}

#[tokio::test]
async fn test_cors_wildcard() {
	let options = CorsOptions {
		allow_methods: vec!["GET".into(), "PUT".into()],
		allow_headers: vec!["Content-Type".into()],
		..CorsOptions::wildcard()
	};

	let router = Router::<(), String, String>::builder()
		.middleware(CorsMiddleware::new(&options))
		.get("/v1/feed/:userId", |_| async move { Ok(Response::new("feed".to_string())) })
		.build();

	let resp = router.handle(request(Method::GET, "/v1/feed/1")).await.unwrap();
	assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
	assert_eq!(resp.headers().get("access-control-allow-methods").unwrap(), "GET, PUT");
	assert_eq!(resp.headers().get("access-control-allow-headers").unwrap(), "Content-Type");

	let resp = router.handle(request(Method::OPTIONS, "/v1/feed/1")).await.unwrap();
	assert_eq!(resp.status(), StatusCode::NO_CONTENT);
	assert!(resp.body().is_empty());
	assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
}

#[tokio::test]
async fn test_cors_origin_list() {
	let options = CorsOptions {
		allow_origin: vec!["https://Recipes.example".into()],
		..Default::default()
	};

	let router = Router::<(), String, String>::builder()
		.middleware(CorsMiddleware::new(&options))
		.get("/", |_| async move { Ok(Response::new(String::new())) })
		.build();

	let req = Request::builder()
		.uri("/")
		.header("origin", "https://recipes.example")
		.body(())
		.unwrap();
	let resp = router.handle(req).await.unwrap();
	assert_eq!(
		resp.headers().get("access-control-allow-origin").unwrap(),
		"https://recipes.example"
	);
	assert_eq!(resp.headers().get("vary").unwrap(), "Origin");

	let req = Request::builder().uri("/").header("origin", "https://other.example").body(()).unwrap();
	let resp = router.handle(req).await.unwrap();
	assert!(resp.headers().get("access-control-allow-origin").is_none());
}
