use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};

/// Role given to every account at signup.
pub const DEFAULT_ROLE_ID: i64 = 1;

#[derive(Debug, Clone, postgres_from_row::FromRow)]
pub struct User {
	/// The unique identifier for the user.
	pub id: i64,
	/// The handle of the user, stored lower-cased.
	pub username: String,
	/// The email of the user, stored lower-cased. Never sent to other users.
	pub email: String,
	/// The argon2 PHC string of the user's password.
	pub password: String,
	/// The name shown instead of the handle, if set.
	pub display_name: Option<String>,
	/// An avatar picked by the user, takes priority over the derived one.
	pub avatar_url: Option<String>,
	pub role_id: i64,
	/// Set once the user is banned.
	pub banned_at: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
}

/// Account data written at signup, already case-folded and hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
	pub username: String,
	pub email: String,
	pub password: String,
	pub role_id: i64,
}

impl User {
	/// Uses argon2 to verify the password hash against the provided password.
	pub fn verify_password(&self, password: &str) -> bool {
		verify_password(&self.password, password)
	}
}

/// Generates a new password hash using argon2 with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
	let salt = SaltString::generate(&mut OsRng);

	Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

pub fn verify_password(hash: &str, password: &str) -> bool {
	let hash = match PasswordHash::new(hash) {
		Ok(hash) => hash,
		Err(err) => {
			tracing::error!("failed to parse password hash: {}", err);
			return false;
		}
	};

	Argon2::default().verify_password(password.as_bytes(), &hash).is_ok()
}
