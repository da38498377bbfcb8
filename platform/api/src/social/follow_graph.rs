use super::{SocialError, UserId};
use crate::database::{FollowStore, StoreError, ToggleOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStats {
	pub follower_count: i64,
	pub following_count: i64,
}

/// The directed "follows" relation: `follower` follows `user`.
#[derive(Clone)]
pub struct FollowGraph<S> {
	store: S,
}

impl<S: FollowStore> FollowGraph<S> {
	pub fn new(store: S) -> Self {
		Self { store }
	}

	/// Deletes the edge if it exists and creates it otherwise. Losing a race
	/// against a concurrent toggle of the same pair reports the edge the
	/// other call created.
	///
	/// A conflicting statement writes nothing, so when the winning edge is
	/// already gone again the toggle is simply reapplied. Every conflict
	/// means some other toggle of the pair committed, so the loop only spins
	/// while the pair is under contention.
	#[tracing::instrument(skip(self), fields(user_id = %user, follower_id = %follower))]
	pub async fn toggle(&self, user: UserId, follower: UserId) -> Result<ToggleOutcome, SocialError> {
		let mut conflicts = 0usize;

		loop {
			match self.store.toggle_follow(user.get(), follower.get()).await {
				Ok(outcome) => return Ok(outcome),
				Err(StoreError::Conflict) => {
					if let Some(existing) = self.store.follow(user.get(), follower.get()).await? {
						tracing::debug!(conflicts, "concurrent toggle created the follow first");
						return Ok(ToggleOutcome::Created(existing));
					}

					conflicts += 1;
					tracing::debug!(conflicts, "follow removed again before read back, retrying toggle");
				}
				Err(err) => return Err(err.into()),
			}
		}
	}

	pub async fn exists(&self, user: UserId, follower: UserId) -> Result<bool, SocialError> {
		Ok(self.store.follow(user.get(), follower.get()).await?.is_some())
	}

	pub async fn count_followers(&self, user: UserId) -> Result<i64, SocialError> {
		Ok(self.store.count_followers(user.get()).await?)
	}

	pub async fn count_following(&self, user: UserId) -> Result<i64, SocialError> {
		Ok(self.store.count_following(user.get()).await?)
	}

	pub async fn stats(&self, user: UserId) -> Result<FollowStats, SocialError> {
		let (follower_count, following_count) = tokio::try_join!(self.count_followers(user), self.count_following(user))?;

		Ok(FollowStats {
			follower_count,
			following_count,
		})
	}

	pub async fn followee_ids(&self, user: UserId) -> Result<Vec<i64>, SocialError> {
		Ok(self.store.followee_ids(user.get()).await?)
	}
}
