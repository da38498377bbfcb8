//! Runs against a real database: `DATABASE_URL` (or `.env`) must point at a
//! disposable Postgres. Ignored by default.

use std::sync::Arc;

use binary_helper::config::DatabaseConfig;
use binary_helper::global::{setup_database, GlobalDb};
use serial_test::serial;
use utils::database::Pool;

use crate::database::{
	FollowStore, NewUser, PgStore, RecipeStore, StoreError, ToggleOutcome, UserStore, DEFAULT_ROLE_ID,
};
use crate::migration::run_migrations;
use crate::social::{FollowGraph, UserId};

struct PgGlobal {
	db: Arc<Pool>,
}

impl GlobalDb for PgGlobal {
	fn db(&self) -> &Arc<Pool> {
		&self.db
	}
}

async fn setup() -> PgStore {
	dotenvy::dotenv().ok();

	let uri = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
	let db = setup_database(&DatabaseConfig {
		uri,
		run_migrations: true,
	})
	.await
	.expect("failed to connect to database");

	let global = Arc::new(PgGlobal { db: db.clone() });
	run_migrations(&global).await.expect("failed to run migrations");

	utils::database::query("TRUNCATE users, recipes, user_follows_user, user_likes_recipe RESTART IDENTITY CASCADE")
		.build()
		.execute(&db)
		.await
		.expect("failed to truncate tables");

	PgStore::new(db)
}

async fn create_user(store: &PgStore, username: &str) -> i64 {
	store
		.create_user(NewUser {
			username: username.to_owned(),
			email: format!("{username}@example.com"),
			password: "not-a-hash".to_owned(),
			role_id: DEFAULT_ROLE_ID,
		})
		.await
		.expect("failed to create user")
		.id
}

async fn create_recipe(store: &PgStore, user_id: i64, slug: &str, minutes_ago: i64) {
	utils::database::query("INSERT INTO recipes (user_id, title, slug, created_at) VALUES ($1, $2, $3, NOW() - make_interval(mins => $4::INT))")
		.bind(user_id)
		.bind(slug)
		.bind(slug)
		.bind(minutes_ago as i32)
		.build()
		.execute(store.db())
		.await
		.expect("failed to create recipe");
}

#[serial]
#[ignore]
#[tokio::test]
async fn test_serial_pg_toggle_oscillates() {
	let store = setup().await;
	let followee = create_user(&store, "followee").await;
	let follower = create_user(&store, "follower").await;

	let graph = FollowGraph::new(store.clone());
	let (user, follower) = (UserId::new(followee).unwrap(), UserId::new(follower).unwrap());

	assert!(graph.toggle(user, follower).await.unwrap().is_created());
	assert!(graph.exists(user, follower).await.unwrap());
	assert!(!graph.toggle(user, follower).await.unwrap().is_created());
	assert!(!graph.exists(user, follower).await.unwrap());
	assert!(graph.toggle(user, follower).await.unwrap().is_created());
	assert_eq!(graph.count_followers(user).await.unwrap(), 1);
}

#[serial]
#[ignore]
#[tokio::test]
async fn test_serial_pg_concurrent_toggles() {
	let store = setup().await;
	let followee = create_user(&store, "popular").await;
	let follower = create_user(&store, "fan").await;

	let (user, follower) = (UserId::new(followee).unwrap(), UserId::new(follower).unwrap());

	let tasks = (0..2)
		.map(|_| {
			let graph = FollowGraph::new(store.clone());
			tokio::spawn(async move { graph.toggle(user, follower).await })
		})
		.collect::<Vec<_>>();

	let mut created = 0;
	for task in tasks {
		if task.await.unwrap().unwrap().is_created() {
			created += 1;
		}
	}

	// either both saw the pair absent, or the second one removed the first's edge
	let edges = store.count_followers(followee).await.unwrap();
	assert!(created >= 1);
	assert_eq!(edges, if created == 2 { 1 } else { 0 });
}

#[serial]
#[ignore]
#[tokio::test]
async fn test_serial_pg_contended_toggles_never_fail() {
	let store = setup().await;
	let followee = create_user(&store, "contended").await;
	let follower = create_user(&store, "crowd").await;

	let (user, follower) = (UserId::new(followee).unwrap(), UserId::new(follower).unwrap());

	for round in 0..30 {
		let tasks = (0..16)
			.map(|_| {
				let graph = FollowGraph::new(store.clone());
				tokio::spawn(async move { graph.toggle(user, follower).await })
			})
			.collect::<Vec<_>>();

		for task in tasks {
			if let Err(err) = task.await.unwrap() {
				panic!("round {round}: toggle failed: {err}");
			}
		}

		let edges = store.count_followers(followee).await.unwrap();
		assert!(edges <= 1, "round {round}: {edges} edges");
	}
}

#[serial]
#[ignore]
#[tokio::test]
async fn test_serial_pg_concurrent_toggles_of_existing_follow() {
	let store = setup().await;
	let followee = create_user(&store, "host").await;
	let follower = create_user(&store, "guest").await;

	store.toggle_follow(followee, follower).await.unwrap();

	let (user, follower) = (UserId::new(followee).unwrap(), UserId::new(follower).unwrap());

	let tasks = (0..2)
		.map(|_| {
			let graph = FollowGraph::new(store.clone());
			tokio::spawn(async move { graph.toggle(user, follower).await })
		})
		.collect::<Vec<_>>();

	let mut deleted = 0;
	for task in tasks {
		if matches!(task.await.unwrap().unwrap(), ToggleOutcome::Deleted(_)) {
			deleted += 1;
		}
	}

	// the second delete waits on the first, finds nothing and inserts
	assert_eq!(deleted, 1);
	assert_eq!(store.count_followers(followee).await.unwrap(), 1);
}

#[serial]
#[ignore]
#[tokio::test]
async fn test_serial_pg_duplicate_user_conflicts() {
	let store = setup().await;
	create_user(&store, "taken").await;

	let result = store
		.create_user(NewUser {
			username: "taken".to_owned(),
			email: "other@example.com".to_owned(),
			password: "not-a-hash".to_owned(),
			role_id: DEFAULT_ROLE_ID,
		})
		.await;

	assert!(matches!(result, Err(StoreError::Conflict)));
}

#[serial]
#[ignore]
#[tokio::test]
async fn test_serial_pg_feed_and_rankings() {
	let store = setup().await;
	let reader = create_user(&store, "reader").await;
	let prolific = create_user(&store, "prolific").await;
	let casual = create_user(&store, "casual").await;
	let followed = create_user(&store, "followed").await;

	create_recipe(&store, prolific, "a", 50).await;
	create_recipe(&store, prolific, "b", 40).await;
	create_recipe(&store, casual, "c", 30).await;
	create_recipe(&store, followed, "d", 20).await;
	create_recipe(&store, followed, "e", 10).await;
	create_recipe(&store, followed, "f", 5).await;

	store.toggle_follow(followed, reader).await.unwrap();

	let feed = store.recipes_by_authors(&[followed], 0, 2).await.unwrap();
	assert_eq!(
		feed.iter().map(|row| row.recipe.slug.as_str()).collect::<Vec<_>>(),
		vec!["f", "e"]
	);
	assert_eq!(feed[0].author.username, "followed");
	assert_eq!(feed[0].author.email.as_deref(), Some("followed@example.com"));

	let ranks = store.top_authors_excluding(reader, 4).await.unwrap();
	assert_eq!(
		ranks.iter().map(|rank| (rank.user_id, rank.recipe_count)).collect::<Vec<_>>(),
		vec![(prolific, 2), (casual, 1)]
	);
}
