use super::{SocialError, UserId};
use crate::database::{LikeStore, LikedRecipe};

pub const LIKED_PAGE_SIZE: i64 = 20;

#[derive(Clone)]
pub struct LikedRecipes<S> {
	store: S,
}

impl<S: LikeStore> LikedRecipes<S> {
	pub fn new(store: S) -> Self {
		Self { store }
	}

	/// A page of up to [`LIKED_PAGE_SIZE`] recipes `user` liked, newest
	/// recipe first. A user without likes gets an empty page.
	pub async fn liked(&self, user: UserId, skip: i64) -> Result<Vec<LikedRecipe>, SocialError> {
		Ok(self.store.liked_recipes(user.get(), skip.max(0), LIKED_PAGE_SIZE).await?)
	}
}
