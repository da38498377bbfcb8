#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, postgres_from_row::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LikedRecipe {
	pub title: String,
	pub slug: String,
	pub cover_image: Option<String>,
	/// Handle of the recipe's author.
	pub username: String,
}
