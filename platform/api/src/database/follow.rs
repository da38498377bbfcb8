use chrono::{DateTime, Utc};

/// `follower_id` follows `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, postgres_from_row::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
	pub user_id: i64,
	pub follower_id: i64,
	pub created_at: DateTime<Utc>,
}

/// What a toggle did to the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
	Created(Follow),
	Deleted(Follow),
}

impl ToggleOutcome {
	pub fn follow(&self) -> &Follow {
		match self {
			Self::Created(follow) | Self::Deleted(follow) => follow,
		}
	}

	pub fn is_created(&self) -> bool {
		matches!(self, Self::Created(_))
	}
}
