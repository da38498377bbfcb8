#[derive(Debug, thiserror::Error)]
pub enum RouterError<E> {
	#[error("unhandled error: {0:?}")]
	Unhandled(E),
	#[error("not found")]
	NotFound,
}
