use std::collections::HashMap;

use super::{AvatarResolver, Recommendations, SocialError, UserId, UserSummary};
use crate::database::{RecipeStore, UserStore};

/// Suggests authors to follow, most prolific first.
#[derive(Clone)]
pub struct RecommendationEngine<S> {
	store: S,
	avatars: AvatarResolver,
	limit: i64,
}

impl<S: RecipeStore + UserStore> RecommendationEngine<S> {
	pub fn new(store: S, avatars: AvatarResolver, limit: i64) -> Self {
		Self { store, avatars, limit }
	}

	/// Candidates exclude `user` and everyone `user` follows. The result
	/// keeps the store's rank order: recipe count descending, then id.
	#[tracing::instrument(skip(self), fields(user_id = %user))]
	pub async fn recommend(&self, user: UserId) -> Result<Recommendations, SocialError> {
		let ranks = self
			.store
			.top_authors_excluding(user.get(), self.limit)
			.await?
			.into_iter()
			.filter(|rank| rank.user_id != user.get())
			.collect::<Vec<_>>();

		if ranks.is_empty() {
			return Ok(Recommendations::Exhausted);
		}

		let ids = ranks.iter().map(|rank| rank.user_id).collect::<Vec<_>>();
		let mut users = self
			.store
			.users_by_ids(&ids)
			.await?
			.into_iter()
			.map(|user| (user.id, user))
			.collect::<HashMap<_, _>>();

		let summaries = ranks
			.iter()
			.filter_map(|rank| users.remove(&rank.user_id))
			.map(|user| UserSummary::new(&user, &self.avatars))
			.collect::<Vec<_>>();

		if summaries.is_empty() {
			return Ok(Recommendations::Exhausted);
		}

		Ok(Recommendations::Users(summaries))
	}
}
