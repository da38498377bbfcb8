mod follow;
mod like;
mod pg;
mod recipe;
mod store;
mod user;

pub use follow::{Follow, ToggleOutcome};
pub use like::LikedRecipe;
pub use pg::PgStore;
pub use recipe::{AuthorRank, FeedRow, Recipe, RecipeAuthor};
pub use store::{FollowStore, LikeStore, RecipeStore, Store, StoreError, UserStore};
pub use user::{hash_password, verify_password, NewUser, User, DEFAULT_ROLE_ID};
