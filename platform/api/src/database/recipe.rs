use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, postgres_from_row::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
	pub id: i64,
	/// The author.
	pub user_id: i64,
	pub title: String,
	pub slug: String,
	pub cover_image: Option<String>,
	pub created_at: DateTime<Utc>,
}

/// Author columns joined onto a feed row. The email is only read to derive
/// an avatar and never leaves the engine.
#[derive(Debug, Clone, PartialEq, Eq, postgres_from_row::FromRow)]
pub struct RecipeAuthor {
	#[from_row(rename = "author_id")]
	pub id: i64,
	#[from_row(rename = "author_username")]
	pub username: String,
	#[from_row(rename = "author_display_name")]
	pub display_name: Option<String>,
	#[from_row(rename = "author_avatar_url")]
	pub avatar_url: Option<String>,
	#[from_row(rename = "author_email")]
	pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, postgres_from_row::FromRow)]
pub struct FeedRow {
	#[from_row(flatten)]
	pub recipe: Recipe,
	#[from_row(flatten)]
	pub author: RecipeAuthor,
}

/// A recommendation candidate and how many recipes they authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, postgres_from_row::FromRow)]
pub struct AuthorRank {
	pub user_id: i64,
	pub recipe_count: i64,
}
