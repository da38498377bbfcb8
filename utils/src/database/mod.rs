mod query_builder;

pub use deadpool_postgres::Pool;
pub use postgres_from_row::FromRow;
pub use query_builder::*;
pub use {deadpool_postgres, postgres_from_row, postgres_types, tokio_postgres};

/// Whether the statement failed on a `UNIQUE` or primary key constraint.
pub fn is_unique_violation(err: &deadpool_postgres::PoolError) -> bool {
	match err {
		deadpool_postgres::PoolError::Backend(err) => err.code() == Some(&tokio_postgres::error::SqlState::UNIQUE_VIOLATION),
		_ => false,
	}
}

#[cfg(test)]
mod tests;
