use super::{AvatarResolver, FeedPage, FeedRecipe, FollowGraph, Page, SocialError, UserId};
use crate::database::{FollowStore, RecipeStore};

/// Builds the personalized feed: recipes by the users someone follows,
/// newest first.
#[derive(Clone)]
pub struct FeedComposer<S> {
	store: S,
	follows: FollowGraph<S>,
	avatars: AvatarResolver,
}

impl<S: FollowStore + RecipeStore + Clone> FeedComposer<S> {
	pub fn new(store: S, avatars: AvatarResolver) -> Self {
		Self {
			follows: FollowGraph::new(store.clone()),
			store,
			avatars,
		}
	}

	/// The followee list and the recipe page are two separate reads, a
	/// follow landing in between may or may not show up.
	#[tracing::instrument(skip(self), fields(user_id = %user))]
	pub async fn feed(&self, user: UserId, page: Page) -> Result<FeedPage, SocialError> {
		let authors = self
			.follows
			.followee_ids(user)
			.await?
			.into_iter()
			.filter(|author| *author != user.get())
			.collect::<Vec<_>>();

		if authors.is_empty() {
			return Ok(FeedPage {
				items: Vec::new(),
				next_skip: page.skip,
			});
		}

		let items = self
			.store
			.recipes_by_authors(&authors, page.skip, page.take)
			.await?
			.into_iter()
			.map(|row| FeedRecipe::new(row, &self.avatars))
			.collect::<Vec<_>>();

		Ok(FeedPage {
			next_skip: page.skip + items.len() as i64,
			items,
		})
	}
}
