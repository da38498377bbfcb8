use crate::migration::{pending, MIGRATIONS};

#[test]
fn test_migration_versions_are_sequential() {
	for (i, migration) in MIGRATIONS.iter().enumerate() {
		assert_eq!(migration.version, i as i32 + 1, "{}", migration.name);
		assert!(!migration.statements.is_empty(), "{}", migration.name);
	}
}

#[test]
fn test_pending_migrations() {
	assert_eq!(pending(0).unwrap().len(), MIGRATIONS.len());
	assert!(pending(MIGRATIONS.len() as i32).unwrap().is_empty());
	assert!(pending(MIGRATIONS.len() as i32 + 1).is_err());
	assert!(pending(-1).is_err());
}
