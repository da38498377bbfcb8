use binary_helper::config::ConfigExtention;

use crate::config::{ApiConfig, AppConfig};

#[test]
fn test_default_config_is_valid() {
	let mut config = AppConfig::default();
	ApiConfig::pre_hook(&mut config).unwrap();
}

#[test]
fn test_rejects_unusable_limits() {
	let mut config = AppConfig::default();
	config.extra.feed.max_take = 0;
	assert!(ApiConfig::pre_hook(&mut config).is_err());

	let mut config = AppConfig::default();
	config.extra.feed.default_take = -1;
	assert!(ApiConfig::pre_hook(&mut config).is_err());

	let mut config = AppConfig::default();
	config.extra.feed.default_take = config.extra.feed.max_take + 1;
	assert!(ApiConfig::pre_hook(&mut config).is_err());

	let mut config = AppConfig::default();
	config.extra.recommendation.limit = 0;
	assert!(ApiConfig::pre_hook(&mut config).is_err());
}
