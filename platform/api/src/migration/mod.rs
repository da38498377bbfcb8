use std::sync::Arc;

use anyhow::Context;
use binary_helper::global::GlobalDb;

#[path = "0001_initial.rs"]
mod initial;

/// A forward-only schema change. Versions start at 1 and increase by one.
#[derive(Debug)]
pub struct Migration {
	pub version: i32,
	pub name: &'static str,
	pub statements: &'static [&'static str],
}

pub const MIGRATIONS: &[Migration] = &[initial::MIGRATION];

/// Reads the recorded schema version, creating the version table on a fresh
/// database.
async fn schema_version<G: GlobalDb>(global: &Arc<G>) -> anyhow::Result<i32> {
	utils::database::query("CREATE TABLE IF NOT EXISTS social_api_migrations (version INTEGER NOT NULL)")
		.build()
		.execute(global.db())
		.await
		.context("Failed to create migration table")?;

	let version = utils::database::query("SELECT MAX(version) FROM social_api_migrations")
		.build_query_single_scalar::<Option<i32>>()
		.fetch_one(global.db())
		.await
		.context("Failed to read schema version")?;

	match version {
		Some(version) => Ok(version),
		None => {
			tracing::info!("initializing migration table");
			utils::database::query("INSERT INTO social_api_migrations (version) VALUES (0)")
				.build()
				.execute(global.db())
				.await
				.context("Failed to insert initial migration version")?;

			Ok(0)
		}
	}
}

/// Migrations newer than `version`, in order.
pub fn pending(version: i32) -> anyhow::Result<&'static [Migration]> {
	let applied = usize::try_from(version).context("negative schema version")?;

	MIGRATIONS.get(applied..).with_context(|| {
		format!(
			"database is at version {version}, but only {} migrations are known",
			MIGRATIONS.len()
		)
	})
}

#[tracing::instrument(skip_all, fields(version = migration.version, name = migration.name))]
async fn apply<G: GlobalDb>(global: &Arc<G>, migration: &Migration) -> anyhow::Result<()> {
	let mut client = global.db().get().await.context("Failed to get database connection")?;
	let tx = client.transaction().await.context("Failed to start transaction")?;

	for statement in migration.statements {
		utils::database::query(statement)
			.build()
			.execute(&tx)
			.await
			.context("Failed to apply migration")?;
	}

	utils::database::query("UPDATE social_api_migrations SET version = ")
		.push_bind(migration.version)
		.build()
		.execute(&tx)
		.await
		.context("Failed to update migration version")?;

	tx.commit().await.context("Failed to commit transaction")?;

	tracing::info!("migration applied");

	Ok(())
}

/// Applies every migration newer than the recorded schema version, each in
/// its own transaction.
#[tracing::instrument(skip(global))]
pub async fn run_migrations<G: GlobalDb>(global: &Arc<G>) -> anyhow::Result<()> {
	let version = schema_version(global).await?;

	for migration in pending(version)? {
		apply(global, migration).await?;
	}

	Ok(())
}
