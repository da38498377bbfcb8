use super::query;

#[test]
fn test_push_bind_numbers_placeholders() {
	let mut qb = query("SELECT * FROM recipes WHERE user_id = ANY(");
	qb.push_bind(vec![1_i64, 2, 3]).push(") ORDER BY created_at DESC OFFSET ");
	qb.push_bind(10_i64).push(" LIMIT ").push_bind(5_i64);

	assert_eq!(
		qb.sql(),
		"SELECT * FROM recipes WHERE user_id = ANY($1) ORDER BY created_at DESC OFFSET $2 LIMIT $3"
	);
	assert_eq!(qb.param_count(), 3);
}

#[test]
fn test_bind_reuses_placeholder() {
	let mut qb = query("SELECT id FROM users WHERE id <> $1 AND id NOT IN (SELECT following_id FROM user_follows_user WHERE follower_id = $1)");
	qb.bind(7_i64);

	assert_eq!(qb.param_count(), 1);
	assert!(qb.sql().ends_with("follower_id = $1)"));
}
