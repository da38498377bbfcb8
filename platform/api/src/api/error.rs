use utils::http::RouteError;

use crate::social::SocialError;

pub type Result<T, E = RouteError<ApiError>> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("failed to parse http body: {0}")]
	ParseHttpBody(#[from] hyper::Error),
	#[error("failed to parse json body: {0}")]
	ParseJson(#[from] serde_json::Error),
	#[error("social error: {0}")]
	Social(#[from] SocialError),
}
