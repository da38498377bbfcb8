use std::fmt;

use super::SocialError;

/// A user id taken from a request path. Only positive base-10 integers are
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
	pub fn parse(raw: &str) -> Result<Self, SocialError> {
		match raw.parse::<i64>() {
			Ok(id) => Self::new(id).ok_or(SocialError::Validation("userId")),
			Err(_) => Err(SocialError::Validation("userId")),
		}
	}

	pub fn new(id: i64) -> Option<Self> {
		(id > 0).then_some(Self(id))
	}

	pub fn get(self) -> i64 {
		self.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
	pub default_take: i64,
	pub max_take: i64,
}

/// An offset/limit window. Bad values never fail a request, they fall back
/// to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
	pub skip: i64,
	pub take: i64,
}

impl Page {
	pub fn parse(skip: Option<&str>, take: Option<&str>, limits: PageLimits) -> Self {
		let take = positive(take).unwrap_or(limits.default_take).min(limits.max_take);

		Self {
			skip: parse_skip(skip),
			take,
		}
	}
}

/// Offset from a raw query value, `0` when absent or not a positive integer.
pub fn parse_skip(raw: Option<&str>) -> i64 {
	positive(raw).unwrap_or(0)
}

fn positive(raw: Option<&str>) -> Option<i64> {
	raw?.trim().parse::<i64>().ok().filter(|value| *value > 0)
}
