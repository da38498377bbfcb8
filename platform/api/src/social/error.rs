use crate::database::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SocialError {
	/// A required field was absent or blank.
	#[error("missing data")]
	MissingData,
	/// The named input is malformed, e.g. a non-numeric user id.
	#[error("not a valid {0}")]
	Validation(&'static str),
	#[error("{0} not found")]
	NotFound(&'static str),
	#[error("username or email already in use")]
	Taken { username: bool, email: bool },
	#[error("wrong password")]
	WrongPassword,
	#[error("failed to hash password: {0}")]
	PasswordHash(String),
	#[error("storage error: {0}")]
	Storage(#[from] StoreError),
}
