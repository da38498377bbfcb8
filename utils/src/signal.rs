use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

/// Fans several unix signals into a single receiver.
pub struct SignalHandler {
	sender: mpsc::Sender<SignalKind>,
	receiver: mpsc::Receiver<SignalKind>,
}

impl Default for SignalHandler {
	fn default() -> Self {
		let (sender, receiver) = mpsc::channel(1);
		Self { sender, receiver }
	}
}

impl SignalHandler {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_signal(self, kind: SignalKind) -> Self {
		let mut stream = signal(kind).expect("failed to register signal handler");
		let sender = self.sender.clone();

		tokio::spawn(async move {
			while stream.recv().await.is_some() {
				if sender.send(kind).await.is_err() {
					break;
				}
			}
		});

		self
	}

	pub async fn recv(&mut self) -> SignalKind {
		self.receiver.recv().await.expect("signal channel closed")
	}
}

#[cfg(test)]
mod tests;
