use std::convert::Infallible;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::header;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use serde_json::json;
use tokio::net::TcpSocket;
use tokio::select;
use utils::http::router::error::RouterError;
use utils::http::router::Router;
use utils::http::RouteError;
use utils::make_response;

use self::error::ApiError;
use crate::config::ApiConfig;
use crate::global::ApiGlobal;

pub mod error;
pub mod ext;
mod middleware;
pub mod v1;

pub type Body = utils::http::Body;

pub fn routes<G: ApiGlobal>(global: &Arc<G>) -> Router<Incoming, Body, RouteError<ApiError>> {
	let weak = Arc::downgrade(global);
	Router::builder()
		.data(weak)
		.middleware(middleware::request_log())
		// Answers preflight requests and decorates every response, rendered
		// errors included.
		.middleware(middleware::cors())
		.scope("/v1", v1::routes(global))
		.error_handler(utils::http::error_handler::<ApiError>)
		.build()
}

fn not_found() -> hyper::Response<Body> {
	let mut resp = make_response!(
		hyper::StatusCode::NOT_FOUND,
		json!({
			"error": "not_found",
		})
	);

	resp.headers_mut()
		.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, header::HeaderValue::from_static("*"));

	resp
}

pub async fn run<G: ApiGlobal>(global: Arc<G>) -> anyhow::Result<()> {
	let config = global.config::<ApiConfig>();

	tracing::info!("Listening on {}", config.api.bind_address);
	let socket = if config.api.bind_address.is_ipv6() {
		TcpSocket::new_v6()?
	} else {
		TcpSocket::new_v4()?
	};

	socket.set_reuseaddr(true)?;
	socket.set_reuseport(true)?;
	socket.bind(config.api.bind_address)?;
	let listener = socket.listen(1024)?;

	// The router only holds a Weak reference to the global state, so open
	// keep-alive connections do not keep it alive past shutdown.
	let router = Arc::new(routes(&global));
	let service = service_fn(move |req| {
		let router = router.clone();
		async move {
			Ok::<_, Infallible>(match router.handle(req).await {
				Ok(resp) => resp,
				Err(RouterError::NotFound) => not_found(),
				Err(RouterError::Unhandled(err)) => {
					tracing::error!(error = ?err, "unhandled route error");
					err.response()
				}
			})
		}
	});

	loop {
		select! {
			_ = global.ctx().done() => {
				return Ok(());
			},
			r = listener.accept() => {
				let (socket, addr) = r?;

				let service = service.clone();

				tracing::debug!("Accepted connection from {}", addr);

				tokio::spawn(async move {
					http1::Builder::new().serve_connection(
						TokioIo::new(socket),
						service,
					).await.ok();
				});
			},
		}
	}
}
