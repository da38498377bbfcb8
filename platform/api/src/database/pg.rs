use std::sync::Arc;

use postgres_from_row::FromRow;
use utils::database::deadpool_postgres::PoolError;
use utils::database::{is_unique_violation, Pool};

use super::store::{FollowStore, LikeStore, RecipeStore, StoreError, UserStore};
use super::{AuthorRank, FeedRow, Follow, LikedRecipe, NewUser, ToggleOutcome, User};

/// [`Store`](super::Store) backed by the Postgres pool.
#[derive(Clone)]
pub struct PgStore {
	db: Arc<Pool>,
}

impl PgStore {
	pub fn new(db: Arc<Pool>) -> Self {
		Self { db }
	}

	pub fn db(&self) -> &Arc<Pool> {
		&self.db
	}
}

fn conflict_or_database(err: PoolError) -> StoreError {
	if is_unique_violation(&err) {
		StoreError::Conflict
	} else {
		StoreError::Database(err)
	}
}

fn row_error(err: utils::database::tokio_postgres::Error) -> StoreError {
	StoreError::Database(PoolError::from(err))
}

impl UserStore for PgStore {
	#[tracing::instrument(level = "debug", skip(self))]
	async fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
		Ok(utils::database::query("SELECT * FROM users WHERE id = $1")
			.bind(id)
			.build_query_as()
			.fetch_optional(&self.db)
			.await?)
	}

	#[tracing::instrument(level = "debug", skip(self))]
	async fn users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, StoreError> {
		Ok(utils::database::query("SELECT * FROM users WHERE id = ANY($1)")
			.bind(ids.to_vec())
			.build_query_as()
			.fetch_all(&self.db)
			.await?)
	}

	#[tracing::instrument(level = "debug", skip(self))]
	async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
		Ok(utils::database::query("SELECT * FROM users WHERE username = $1")
			.bind(username)
			.build_query_as()
			.fetch_optional(&self.db)
			.await?)
	}

	#[tracing::instrument(level = "debug", skip(self))]
	async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
		Ok(utils::database::query("SELECT * FROM users WHERE email = $1")
			.bind(email)
			.build_query_as()
			.fetch_optional(&self.db)
			.await?)
	}

	#[tracing::instrument(level = "debug", skip(self))]
	async fn users_by_username_or_email(&self, username: &str, email: &str) -> Result<Vec<User>, StoreError> {
		Ok(utils::database::query("SELECT * FROM users WHERE username = $1 OR email = $2")
			.bind(username)
			.bind(email)
			.build_query_as()
			.fetch_all(&self.db)
			.await?)
	}

	#[tracing::instrument(level = "debug", skip(self, user), fields(username = %user.username))]
	async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
		let mut qb = utils::database::query("INSERT INTO users (username, email, password, role_id) VALUES (");
		qb.push_bind(user.username)
			.push(", ")
			.push_bind(user.email)
			.push(", ")
			.push_bind(user.password)
			.push(", ")
			.push_bind(user.role_id)
			.push(") RETURNING *");

		qb.build_query_as().fetch_one(&self.db).await.map_err(conflict_or_database)
	}
}

impl FollowStore for PgStore {
	#[tracing::instrument(level = "debug", skip(self))]
	async fn toggle_follow(&self, user_id: i64, follower_id: i64) -> Result<ToggleOutcome, StoreError> {
		// The insert only runs when the delete removed nothing. A concurrent
		// toggle that inserted first makes the insert a no-op, so no row comes
		// back at all.
		let row = utils::database::query(
			"WITH deleted AS (
				DELETE FROM user_follows_user
				WHERE user_id = $1 AND follower_id = $2
				RETURNING user_id, follower_id, created_at
			), inserted AS (
				INSERT INTO user_follows_user (user_id, follower_id)
				SELECT $1::BIGINT, $2::BIGINT
				WHERE NOT EXISTS (SELECT 1 FROM deleted)
				ON CONFLICT (user_id, follower_id) DO NOTHING
				RETURNING user_id, follower_id, created_at
			)
			SELECT TRUE AS created, user_id, follower_id, created_at FROM inserted
			UNION ALL
			SELECT FALSE AS created, user_id, follower_id, created_at FROM deleted",
		)
		.bind(user_id)
		.bind(follower_id)
		.build()
		.fetch_optional(&self.db)
		.await
		.map_err(conflict_or_database)?
		.ok_or(StoreError::Conflict)?;

		let created: bool = row.try_get("created").map_err(row_error)?;
		let follow = Follow::try_from_row(&row).map_err(row_error)?;

		Ok(if created {
			ToggleOutcome::Created(follow)
		} else {
			ToggleOutcome::Deleted(follow)
		})
	}

	#[tracing::instrument(level = "debug", skip(self))]
	async fn follow(&self, user_id: i64, follower_id: i64) -> Result<Option<Follow>, StoreError> {
		Ok(
			utils::database::query("SELECT * FROM user_follows_user WHERE user_id = $1 AND follower_id = $2")
				.bind(user_id)
				.bind(follower_id)
				.build_query_as()
				.fetch_optional(&self.db)
				.await?,
		)
	}

	#[tracing::instrument(level = "debug", skip(self))]
	async fn count_followers(&self, user_id: i64) -> Result<i64, StoreError> {
		Ok(utils::database::query("SELECT COUNT(*) FROM user_follows_user WHERE user_id = $1")
			.bind(user_id)
			.build_query_single_scalar()
			.fetch_one(&self.db)
			.await?)
	}

	#[tracing::instrument(level = "debug", skip(self))]
	async fn count_following(&self, follower_id: i64) -> Result<i64, StoreError> {
		Ok(utils::database::query("SELECT COUNT(*) FROM user_follows_user WHERE follower_id = $1")
			.bind(follower_id)
			.build_query_single_scalar()
			.fetch_one(&self.db)
			.await?)
	}

	#[tracing::instrument(level = "debug", skip(self))]
	async fn followee_ids(&self, follower_id: i64) -> Result<Vec<i64>, StoreError> {
		Ok(utils::database::query("SELECT user_id FROM user_follows_user WHERE follower_id = $1")
			.bind(follower_id)
			.build_query_single_scalar()
			.fetch_all(&self.db)
			.await?)
	}
}

impl RecipeStore for PgStore {
	#[tracing::instrument(level = "debug", skip(self))]
	async fn recipes_by_authors(&self, author_ids: &[i64], skip: i64, take: i64) -> Result<Vec<FeedRow>, StoreError> {
		let mut qb = utils::database::query(
			"SELECT r.id, r.user_id, r.title, r.slug, r.cover_image, r.created_at,
				u.id AS author_id, u.username AS author_username, u.display_name AS author_display_name,
				u.avatar_url AS author_avatar_url, u.email AS author_email
			FROM recipes r
			INNER JOIN users u ON u.id = r.user_id
			WHERE r.user_id = ANY(",
		);
		qb.push_bind(author_ids.to_vec())
			.push(") ORDER BY r.created_at DESC, r.id DESC OFFSET ")
			.push_bind(skip)
			.push(" LIMIT ")
			.push_bind(take);

		Ok(qb.build_query_as().fetch_all(&self.db).await?)
	}

	#[tracing::instrument(level = "debug", skip(self))]
	async fn top_authors_excluding(&self, user_id: i64, limit: i64) -> Result<Vec<AuthorRank>, StoreError> {
		Ok(utils::database::query(
			"SELECT user_id, COUNT(*) AS recipe_count
			FROM recipes
			WHERE user_id <> $1 AND user_id NOT IN (SELECT user_id FROM user_follows_user WHERE follower_id = $1)
			GROUP BY user_id
			ORDER BY recipe_count DESC, user_id ASC
			LIMIT $2",
		)
		.bind(user_id)
		.bind(limit)
		.build_query_as()
		.fetch_all(&self.db)
		.await?)
	}
}

impl LikeStore for PgStore {
	#[tracing::instrument(level = "debug", skip(self))]
	async fn liked_recipes(&self, user_id: i64, skip: i64, take: i64) -> Result<Vec<LikedRecipe>, StoreError> {
		Ok(utils::database::query(
			"SELECT r.title, r.slug, r.cover_image, u.username
			FROM recipes r
			INNER JOIN user_likes_recipe ulr ON ulr.recipe_id = r.id
			INNER JOIN users u ON u.id = r.user_id
			WHERE ulr.user_id = $1
			ORDER BY r.id DESC
			OFFSET $2
			LIMIT $3",
		)
		.bind(user_id)
		.bind(skip)
		.bind(take)
		.build_query_as()
		.fetch_all(&self.db)
		.await?)
	}
}
