use md5::{Digest, Md5};

use crate::config::AvatarConfig;

/// Picks the avatar shown for a user: their own upload, else a gravatar
/// derived from their email, else the placeholder.
#[derive(Debug, Clone)]
pub struct AvatarResolver {
	base_url: String,
	size: u32,
	placeholder: String,
}

impl Default for AvatarResolver {
	fn default() -> Self {
		Self::new(&AvatarConfig::default())
	}
}

impl AvatarResolver {
	pub fn new(config: &AvatarConfig) -> Self {
		Self {
			base_url: config.base_url.trim_end_matches('/').to_owned(),
			size: config.size,
			placeholder: config.placeholder.clone(),
		}
	}

	/// Blank values count as unset.
	pub fn resolve(&self, avatar_url: Option<&str>, email: Option<&str>) -> String {
		if let Some(avatar_url) = avatar_url.filter(|url| !url.trim().is_empty()) {
			return avatar_url.to_owned();
		}

		match email.map(str::trim).filter(|email| !email.is_empty()) {
			Some(email) => {
				let hash = Md5::digest(email.to_lowercase().as_bytes());
				format!("{}/{:x}?s={}", self.base_url, hash, self.size)
			}
			None => self.placeholder.clone(),
		}
	}
}
