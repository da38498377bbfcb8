use super::types::RouteParams;

pub trait RequestExt {
	/// A path parameter captured by the route, e.g. `userId` for `/:userId`.
	fn param(&self, name: &str) -> Option<&str>;
}

impl<B> RequestExt for hyper::Request<B> {
	fn param(&self, name: &str) -> Option<&str> {
		self.extensions()
			.get::<RouteParams>()?
			.0
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}
}
