use chrono::{DateTime, Utc};

use super::AvatarResolver;
use crate::database::{FeedRow, Recipe, User};

/// What other users may see of a user. There is no email field: the
/// resolver consumes it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
	pub id: i64,
	pub username: String,
	pub display_name: Option<String>,
	pub avatar_url: String,
}

/// The author attached to each feed item.
pub type PublicAuthor = UserSummary;

impl UserSummary {
	pub fn new(user: &User, avatars: &AvatarResolver) -> Self {
		Self {
			id: user.id,
			username: user.username.clone(),
			display_name: user.display_name.clone(),
			avatar_url: avatars.resolve(user.avatar_url.as_deref(), Some(&user.email)),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
	pub id: i64,
	pub username: String,
	pub display_name: Option<String>,
	pub avatar_url: String,
	pub role_id: i64,
	pub created_at: DateTime<Utc>,
}

impl PublicProfile {
	pub fn new(user: &User, avatars: &AvatarResolver) -> Self {
		Self {
			id: user.id,
			username: user.username.clone(),
			display_name: user.display_name.clone(),
			avatar_url: avatars.resolve(user.avatar_url.as_deref(), Some(&user.email)),
			role_id: user.role_id,
			created_at: user.created_at,
		}
	}
}

/// A user's own account as returned by signup and login. Never carries the
/// password hash or ban timestamp.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
	pub id: i64,
	pub username: String,
	pub email: String,
	pub display_name: Option<String>,
	pub avatar_url: Option<String>,
	pub role_id: i64,
	pub created_at: DateTime<Utc>,
}

impl From<User> for Account {
	fn from(user: User) -> Self {
		Self {
			id: user.id,
			username: user.username,
			email: user.email,
			display_name: user.display_name,
			avatar_url: user.avatar_url,
			role_id: user.role_id,
			created_at: user.created_at,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRecipe {
	#[serde(flatten)]
	pub recipe: Recipe,
	pub user: PublicAuthor,
}

impl FeedRecipe {
	pub fn new(row: FeedRow, avatars: &AvatarResolver) -> Self {
		let author = row.author;

		Self {
			recipe: row.recipe,
			user: PublicAuthor {
				avatar_url: avatars.resolve(author.avatar_url.as_deref(), author.email.as_deref()),
				id: author.id,
				username: author.username,
				display_name: author.display_name,
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage {
	pub items: Vec<FeedRecipe>,
	/// Offset of the next page: the requested skip plus the items returned.
	pub next_skip: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendations {
	Users(Vec<UserSummary>),
	/// No candidate is left: the user already follows every author.
	Exhausted,
}
