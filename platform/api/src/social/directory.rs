use email_address::EmailAddress;

use super::{AvatarResolver, PublicProfile, SocialError, UserId};
use crate::database::{hash_password, verify_password, NewUser, StoreError, User, UserStore, DEFAULT_ROLE_ID};

/// Lower-cases and trims a handle or email before it touches the store.
pub fn fold(value: &str) -> String {
	value.trim().to_lowercase()
}

fn taken(existing: &[User], username: &str, email: &str) -> SocialError {
	SocialError::Taken {
		username: existing.iter().any(|user| user.username == username),
		email: existing.iter().any(|user| user.email == email),
	}
}

#[derive(Clone)]
pub struct IdentityDirectory<S> {
	store: S,
	avatars: AvatarResolver,
}

impl<S: UserStore> IdentityDirectory<S> {
	pub fn new(store: S, avatars: AvatarResolver) -> Self {
		Self { store, avatars }
	}

	pub async fn user_by_id(&self, id: UserId) -> Result<Option<User>, SocialError> {
		Ok(self.store.user_by_id(id.get()).await?)
	}

	pub async fn users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, SocialError> {
		Ok(self.store.users_by_ids(ids).await?)
	}

	pub async fn user_by_username(&self, username: &str) -> Result<Option<User>, SocialError> {
		Ok(self.store.user_by_username(&fold(username)).await?)
	}

	pub async fn users_by_username_or_email(&self, username: &str, email: &str) -> Result<Vec<User>, SocialError> {
		Ok(self.store.users_by_username_or_email(&fold(username), &fold(email)).await?)
	}

	/// The public profile for a handle, [`SocialError::NotFound`] if nobody
	/// holds it.
	pub async fn profile(&self, username: &str) -> Result<PublicProfile, SocialError> {
		let user = self.user_by_username(username).await?.ok_or(SocialError::NotFound("user"))?;

		Ok(PublicProfile::new(&user, &self.avatars))
	}

	#[tracing::instrument(skip(self, email, password))]
	pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User, SocialError> {
		if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
			return Err(SocialError::MissingData);
		}

		let username = fold(username);
		let email = fold(email);

		if !EmailAddress::is_valid(&email) {
			return Err(SocialError::Validation("email"));
		}

		self.ensure_available(&username, &email).await?;

		let hash = hash_password(password).map_err(|err| SocialError::PasswordHash(err.to_string()))?;
		if !verify_password(&hash, password) {
			return Err(SocialError::PasswordHash("hash does not verify".to_owned()));
		}

		let new_user = NewUser {
			username: username.clone(),
			email: email.clone(),
			password: hash,
			role_id: DEFAULT_ROLE_ID,
		};

		match self.store.create_user(new_user).await {
			Ok(user) => {
				tracing::info!(user_id = user.id, "created user");
				Ok(user)
			}
			// lost a race with a concurrent signup, report whoever holds the
			// credentials now
			Err(StoreError::Conflict) => {
				let existing = self.store.users_by_username_or_email(&username, &email).await?;
				Err(taken(&existing, &username, &email))
			}
			Err(err) => Err(err.into()),
		}
	}

	async fn ensure_available(&self, username: &str, email: &str) -> Result<(), SocialError> {
		let existing = self.store.users_by_username_or_email(username, email).await?;

		if existing.is_empty() {
			return Ok(());
		}

		Err(taken(&existing, username, email))
	}

	#[tracing::instrument(skip_all)]
	pub async fn login(&self, email: &str, password: &str) -> Result<User, SocialError> {
		if email.trim().is_empty() || password.is_empty() {
			return Err(SocialError::MissingData);
		}

		let user = self
			.store
			.user_by_email(&fold(email))
			.await?
			.ok_or(SocialError::NotFound("user"))?;

		if !user.verify_password(password) {
			return Err(SocialError::WrongPassword);
		}

		Ok(user)
	}
}
