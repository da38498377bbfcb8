use std::time::Duration;

use super::*;

fn raise(name: &str) {
	let status = std::process::Command::new("kill")
		.arg("-s")
		.arg(name)
		.arg(std::process::id().to_string())
		.status()
		.expect("failed to run kill");
	assert!(status.success());
}

#[tokio::test]
async fn test_signal() {
	let mut handler = SignalHandler::new()
		.with_signal(SignalKind::interrupt())
		.with_signal(SignalKind::terminate());

	raise("SIGINT");
	let kind = tokio::time::timeout(Duration::from_secs(1), handler.recv())
		.await
		.expect("failed to receive SIGINT");
	assert_eq!(kind, SignalKind::interrupt());

	raise("SIGTERM");
	let kind = tokio::time::timeout(Duration::from_secs(1), handler.recv())
		.await
		.expect("failed to receive SIGTERM");
	assert_eq!(kind, SignalKind::terminate());
}
