use std::net::{Ipv6Addr, SocketAddr};

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ApiConfig {
	/// HTTP server
	pub api: ServerConfig,

	/// Feed pagination
	pub feed: FeedConfig,

	/// Who-to-follow
	pub recommendation: RecommendationConfig,

	/// Avatar fallback
	pub avatar: AvatarConfig,
}

impl binary_helper::config::ConfigExtention for ApiConfig {
	const APP_NAME: &'static str = "social-api";

	fn pre_hook(config: &mut AppConfig) -> anyhow::Result<()> {
		let feed = &config.extra.feed;
		anyhow::ensure!(feed.max_take > 0, "feed.max_take must be positive, got {}", feed.max_take);
		anyhow::ensure!(
			(1..=feed.max_take).contains(&feed.default_take),
			"feed.default_take must be between 1 and feed.max_take ({}), got {}",
			feed.max_take,
			feed.default_take
		);

		let limit = config.extra.recommendation.limit;
		anyhow::ensure!(limit > 0, "recommendation.limit must be positive, got {limit}");

		Ok(())
	}
}

pub type AppConfig = binary_helper::config::AppConfig<ApiConfig>;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ServerConfig {
	/// Bind address for the API
	pub bind_address: SocketAddr,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			bind_address: (Ipv6Addr::UNSPECIFIED, 4000).into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct FeedConfig {
	/// Page size when `take` is absent or invalid
	pub default_take: i64,

	/// Upper bound on `take`
	pub max_take: i64,
}

impl Default for FeedConfig {
	fn default() -> Self {
		Self {
			default_take: 10,
			max_take: 100,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
	/// Most users suggested at once
	pub limit: i64,
}

impl Default for RecommendationConfig {
	fn default() -> Self {
		Self { limit: 4 }
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
	/// Gravatar style service, the email hash is appended as a path segment
	pub base_url: String,

	/// Requested image size in pixels
	pub size: u32,

	/// Shown for users without an avatar or email
	pub placeholder: String,
}

impl Default for AvatarConfig {
	fn default() -> Self {
		Self {
			base_url: "https://gravatar.com/avatar".to_string(),
			size: 192,
			placeholder: "http://www.gravatar.com/avatar/?d=mp&s=192".to_string(),
		}
	}
}
