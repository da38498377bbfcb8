use std::sync::Arc;

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

struct RawContext {
	// Dropped together with the last clone of the context, which wakes the handler.
	_alive: oneshot::Sender<()>,
	token: CancellationToken,
}

/// A cloneable cancellation scope shared by everything that runs on behalf of
/// the process: the http accept loop, spawned connections, background tasks.
#[derive(Clone)]
pub struct Context(Arc<RawContext>);

/// The owning side of a [`Context`]. Cancelling the handler signals every
/// clone and then waits until all of them have been dropped.
pub struct Handler {
	alive: oneshot::Receiver<()>,
	token: CancellationToken,
}

impl Context {
	#[must_use]
	pub fn new() -> (Self, Handler) {
		let (sender, alive) = oneshot::channel();
		let token = CancellationToken::new();

		(
			Self(Arc::new(RawContext {
				_alive: sender,
				token: token.clone(),
			})),
			Handler { alive, token },
		)
	}

	/// Resolves once the owning handler has been cancelled.
	pub async fn done(&self) {
		self.0.token.cancelled().await
	}

	pub fn is_done(&self) -> bool {
		self.0.token.is_cancelled()
	}
}

impl Handler {
	/// Resolves once every clone of the context has been dropped.
	pub async fn done(&mut self) {
		let _ = (&mut self.alive).await;
	}

	pub async fn cancel(mut self) {
		self.token.cancel();
		self.done().await;
	}
}
