use super::Migration;

pub const MIGRATION: Migration = Migration {
	version: 1,
	name: "initial",
	statements: &[
		"CREATE TABLE user_roles (
			id BIGSERIAL PRIMARY KEY,
			name VARCHAR(64) NOT NULL UNIQUE
		);",
		"INSERT INTO user_roles (id, name) VALUES (1, 'user') ON CONFLICT DO NOTHING;",
		"SELECT setval('user_roles_id_seq', (SELECT MAX(id) FROM user_roles));",
		"CREATE TABLE users (
			id BIGSERIAL PRIMARY KEY,
			username VARCHAR(64) NOT NULL UNIQUE,
			email VARCHAR(256) NOT NULL UNIQUE,
			password TEXT NOT NULL,
			display_name VARCHAR(128),
			avatar_url TEXT,
			role_id BIGINT NOT NULL REFERENCES user_roles (id),
			banned_at TIMESTAMP WITH TIME ZONE,
			created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
		);",
		"CREATE TABLE recipes (
			id BIGSERIAL PRIMARY KEY,
			user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
			title VARCHAR(256) NOT NULL,
			slug VARCHAR(320) NOT NULL UNIQUE,
			cover_image TEXT,
			created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
		);",
		"CREATE INDEX recipes_user_id_created_at_index ON recipes (user_id, created_at DESC, id DESC);",
		"CREATE TABLE user_follows_user (
			user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
			follower_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
			created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
			UNIQUE (user_id, follower_id)
		);",
		"CREATE INDEX user_follows_user_follower_id_index ON user_follows_user (follower_id);",
		"CREATE TABLE user_likes_recipe (
			user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
			recipe_id BIGINT NOT NULL REFERENCES recipes (id) ON DELETE CASCADE,
			created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
			UNIQUE (user_id, recipe_id)
		);",
	],
};
