use std::future::Future;

use super::{AuthorRank, FeedRow, Follow, LikedRecipe, NewUser, ToggleOutcome, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	/// A uniqueness constraint rejected the write, or a concurrent writer got
	/// there first.
	#[error("conflicting write")]
	Conflict,
	#[error("database error: {0}")]
	Database(#[from] utils::database::deadpool_postgres::PoolError),
}

pub trait UserStore: Send + Sync {
	fn user_by_id(&self, id: i64) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

	fn users_by_ids(&self, ids: &[i64]) -> impl Future<Output = Result<Vec<User>, StoreError>> + Send;

	fn user_by_username(&self, username: &str) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

	fn user_by_email(&self, email: &str) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

	/// Every user holding either the handle or the email.
	fn users_by_username_or_email(
		&self,
		username: &str,
		email: &str,
	) -> impl Future<Output = Result<Vec<User>, StoreError>> + Send;

	/// Fails with [`StoreError::Conflict`] if the handle or email is taken.
	fn create_user(&self, user: NewUser) -> impl Future<Output = Result<User, StoreError>> + Send;
}

pub trait FollowStore: Send + Sync {
	/// Removes the edge if present, inserts it otherwise, as one atomic
	/// write. Reports [`StoreError::Conflict`] when a concurrent toggle
	/// inserted the same edge first.
	fn toggle_follow(
		&self,
		user_id: i64,
		follower_id: i64,
	) -> impl Future<Output = Result<ToggleOutcome, StoreError>> + Send;

	fn follow(&self, user_id: i64, follower_id: i64) -> impl Future<Output = Result<Option<Follow>, StoreError>> + Send;

	/// Users following `user_id`.
	fn count_followers(&self, user_id: i64) -> impl Future<Output = Result<i64, StoreError>> + Send;

	/// Users `follower_id` follows.
	fn count_following(&self, follower_id: i64) -> impl Future<Output = Result<i64, StoreError>> + Send;

	fn followee_ids(&self, follower_id: i64) -> impl Future<Output = Result<Vec<i64>, StoreError>> + Send;
}

pub trait RecipeStore: Send + Sync {
	/// Recipes by any of `author_ids`, newest first, ties by id descending.
	fn recipes_by_authors(
		&self,
		author_ids: &[i64],
		skip: i64,
		take: i64,
	) -> impl Future<Output = Result<Vec<FeedRow>, StoreError>> + Send;

	/// Authors `user_id` does not follow (and not `user_id` itself), ranked
	/// by recipe count descending then user id ascending.
	fn top_authors_excluding(
		&self,
		user_id: i64,
		limit: i64,
	) -> impl Future<Output = Result<Vec<AuthorRank>, StoreError>> + Send;
}

pub trait LikeStore: Send + Sync {
	/// Recipes liked by `user_id` with their author's handle, recipe id
	/// descending.
	fn liked_recipes(
		&self,
		user_id: i64,
		skip: i64,
		take: i64,
	) -> impl Future<Output = Result<Vec<LikedRecipe>, StoreError>> + Send;
}

pub trait Store: UserStore + FollowStore + RecipeStore + LikeStore + Clone + 'static {}

impl<T> Store for T where T: UserStore + FollowStore + RecipeStore + LikeStore + Clone + 'static {}
