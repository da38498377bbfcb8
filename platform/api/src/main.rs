use std::sync::Arc;

use anyhow::Context as _;
use binary_helper::global::setup_database;
use binary_helper::{bootstrap, impl_global_traits};
use social_api::config::{ApiConfig, AppConfig};
use social_api::database::PgStore;
use social_api::social::Social;
use utils::context::Context;

struct GlobalState {
	ctx: Context,
	config: AppConfig,
	db: Arc<utils::database::Pool>,
	social: Social<PgStore>,
}

impl_global_traits!(GlobalState);

impl binary_helper::global::GlobalConfigProvider<ApiConfig> for GlobalState {
	#[inline(always)]
	fn provide_config(&self) -> &ApiConfig {
		&self.config.extra
	}
}

impl social_api::global::ApiState for GlobalState {
	type Store = PgStore;

	#[inline(always)]
	fn social(&self) -> &Social<PgStore> {
		&self.social
	}
}

impl binary_helper::Global<AppConfig> for GlobalState {
	async fn new(ctx: Context, config: AppConfig) -> anyhow::Result<Self> {
		let db = setup_database(&config.database).await?;

		let social = Social::new(PgStore::new(db.clone()), &config.extra);

		Ok(Self {
			ctx,
			config,
			db,
			social,
		})
	}
}

#[tokio::main]
pub async fn main() {
	if let Err(err) = bootstrap::<AppConfig, GlobalState, _>(|global| async move {
		if global.config.database.run_migrations {
			social_api::migration::run_migrations(&global)
				.await
				.context("failed to run migrations")?;
		}

		social_api::api::run(global).await.context("api server stopped unexpectedly")?;

		Ok(())
	})
	.await
	{
		tracing::error!("{:#}", err);
		std::process::exit(1);
	}
}
