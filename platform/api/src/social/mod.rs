//! The social graph and everything read off it: follows, the feed,
//! follow recommendations and liked recipes.

mod avatar;
mod directory;
mod error;
mod feed;
mod follow_graph;
mod liked;
mod params;
mod recommendation;
mod view;

pub use avatar::AvatarResolver;
pub use directory::{fold, IdentityDirectory};
pub use error::SocialError;
pub use feed::FeedComposer;
pub use follow_graph::{FollowGraph, FollowStats};
pub use liked::{LikedRecipes, LIKED_PAGE_SIZE};
pub use params::{parse_skip, Page, PageLimits, UserId};
pub use recommendation::RecommendationEngine;
pub use view::{Account, FeedPage, FeedRecipe, PublicAuthor, PublicProfile, Recommendations, UserSummary};

use crate::config::ApiConfig;
use crate::database::Store;

/// Every component, each holding its own handle to the same store.
pub struct Social<S> {
	pub directory: IdentityDirectory<S>,
	pub follows: FollowGraph<S>,
	pub feed: FeedComposer<S>,
	pub recommendations: RecommendationEngine<S>,
	pub liked: LikedRecipes<S>,
	page_limits: PageLimits,
}

impl<S: Store> Social<S> {
	pub fn new(store: S, config: &ApiConfig) -> Self {
		let avatars = AvatarResolver::new(&config.avatar);

		Self {
			directory: IdentityDirectory::new(store.clone(), avatars.clone()),
			follows: FollowGraph::new(store.clone()),
			feed: FeedComposer::new(store.clone(), avatars.clone()),
			recommendations: RecommendationEngine::new(store.clone(), avatars, config.recommendation.limit),
			liked: LikedRecipes::new(store),
			page_limits: PageLimits {
				default_take: config.feed.default_take,
				max_take: config.feed.max_take,
			},
		}
	}

	pub fn page_limits(&self) -> PageLimits {
		self.page_limits
	}
}
