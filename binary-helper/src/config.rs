use std::path::Path;

use anyhow::Context as _;
use serde::de::DeserializeOwned;

use super::Config;
use crate::logging;

/// Prefix of the environment variables read into the config.
pub const ENV_PREFIX: &str = "SOCIAL_";

/// Separates nested keys in environment variable names:
/// `SOCIAL_DATABASE__URI` sets `database.uri`.
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// The log level to use, this is a tracing env filter
	pub level: String,

	/// What logging mode we should use
	pub mode: logging::Mode,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			mode: logging::Mode::Default,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
	/// The database URL to use
	pub uri: String,

	/// Apply pending migrations on startup
	pub run_migrations: bool,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			uri: "postgres://localhost:5432".to_string(),
			run_migrations: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, bound(deserialize = "T: ConfigExtention"))]
pub struct AppConfig<T: ConfigExtention> {
	/// The name of the application
	pub name: String,

	/// The path to the config file
	pub config_file: Option<String>,

	/// The logging configuration
	pub logging: LoggingConfig,

	/// The database configuration
	pub database: DatabaseConfig,

	#[serde(flatten)]
	pub extra: T,
}

pub trait ConfigExtention: DeserializeOwned + Default {
	const APP_NAME: &'static str;

	fn config_default() -> AppConfig<Self> {
		AppConfig {
			name: Self::APP_NAME.to_owned(),
			config_file: Some("config.toml".to_owned()),
			logging: Default::default(),
			database: Default::default(),
			extra: Self::default(),
		}
	}

	fn pre_hook(_config: &mut AppConfig<Self>) -> anyhow::Result<()> {
		Ok(())
	}
}

impl<T: ConfigExtention> Default for AppConfig<T> {
	fn default() -> Self {
		T::config_default()
	}
}

impl<T: ConfigExtention> Config for AppConfig<T> {
	fn logging(&self) -> &LoggingConfig {
		&self.logging
	}

	fn parse() -> anyhow::Result<Self>
	where
		Self: Sized,
	{
		let cli_file = if cfg!(test) { None } else { Cli::parse_args().config_file };

		let (mut config, config_file) = parse::<Self>(cli_file, std::env::vars(), Self::default().config_file)?;

		config.config_file = config_file;

		Ok(config)
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn pre_hook(&mut self) -> anyhow::Result<()> {
		T::pre_hook(self)
	}
}

#[derive(Debug, clap::Parser)]
struct Cli {
	/// Path to a TOML config file
	#[arg(long)]
	config_file: Option<String>,
}

impl Cli {
	fn parse_args() -> Self {
		<Self as clap::Parser>::parse()
	}
}

/// Layers the config sources, highest priority first: the CLI config file
/// flag, `SOCIAL_` environment variables, then the TOML file. Returns the
/// config and the file it was read from, if any.
pub fn parse<C: DeserializeOwned>(
	cli_file: Option<String>,
	env: impl IntoIterator<Item = (String, String)>,
	default_file: Option<String>,
) -> anyhow::Result<(C, Option<String>)> {
	let env = env_table(env);

	let explicit_file = cli_file.or_else(|| {
		env.get("config_file")
			.and_then(|value| value.as_str())
			.map(ToOwned::to_owned)
	});
	let explicit = explicit_file.is_some();

	let mut table = toml::Table::new();
	let mut config_path = None;

	if let Some(path) = explicit_file.or(default_file) {
		match std::fs::read_to_string(&path) {
			Ok(contents) => {
				table = contents
					.parse::<toml::Table>()
					.with_context(|| format!("failed to parse config file: {path}"))?;
				config_path = Some(canonical(&path));
			}
			Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!(path = %path, "config file not found, skipping");
			}
			Err(err) => return Err(err).with_context(|| format!("failed to read config file: {path}")),
		}
	}

	merge(&mut table, env);

	let config = toml::Value::Table(table).try_into().context("invalid config")?;

	Ok((config, config_path))
}

fn canonical(path: &str) -> String {
	std::fs::canonicalize(Path::new(path))
		.map(|p| p.display().to_string())
		.unwrap_or_else(|_| path.to_owned())
}

/// Collects `SOCIAL_` variables into a nested table. Values are read as TOML
/// literals so numbers and booleans keep their type, anything else is a
/// string.
fn env_table(env: impl IntoIterator<Item = (String, String)>) -> toml::Table {
	let mut table = toml::Table::new();

	for (key, raw) in env {
		let Some(key) = key.strip_prefix(ENV_PREFIX) else {
			continue;
		};

		let path = key
			.split(ENV_SEPARATOR)
			.map(|segment| segment.to_lowercase())
			.collect::<Vec<_>>();

		if path.iter().any(|segment| segment.is_empty()) {
			continue;
		}

		insert(&mut table, &path, env_value(&raw));
	}

	table
}

fn env_value(raw: &str) -> toml::Value {
	format!("value = {raw}")
		.parse::<toml::Table>()
		.ok()
		.and_then(|mut table| table.remove("value"))
		.unwrap_or_else(|| toml::Value::String(raw.to_owned()))
}

fn insert(table: &mut toml::Table, path: &[String], value: toml::Value) {
	match path {
		[] => {}
		[key] => {
			table.insert(key.clone(), value);
		}
		[key, rest @ ..] => {
			let entry = table
				.entry(key.clone())
				.or_insert_with(|| toml::Value::Table(toml::Table::new()));

			if !entry.is_table() {
				*entry = toml::Value::Table(toml::Table::new());
			}

			if let toml::Value::Table(inner) = entry {
				insert(inner, rest, value);
			}
		}
	}
}

/// Deep-merges `overlay` into `base`, overlay wins on conflicts.
fn merge(base: &mut toml::Table, overlay: toml::Table) {
	for (key, value) in overlay {
		match (base.get_mut(&key), value) {
			(Some(toml::Value::Table(base)), toml::Value::Table(overlay)) => merge(base, overlay),
			(_, value) => {
				base.insert(key, value);
			}
		}
	}
}
