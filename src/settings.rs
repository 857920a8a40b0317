use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use config::{Config, ConfigError, File, Map};
use serde::Deserialize;

use typeahead::{CoordinatorOptions, EmptyQueryPolicy, app_dirs};

use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	catalog: CatalogSection,
	lookup: LookupSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogSection {
	path: Option<PathBuf>,
	case_sensitive: Option<bool>,
	limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LookupSection {
	latency_ms: Option<u64>,
	empty_queries: Option<String>,
}

pub struct ResolvedConfig {
	pub catalog: Option<PathBuf>,
	pub case_sensitive: bool,
	pub limit: Option<usize>,
	pub latency: Duration,
	pub empty_queries: EmptyQueryPolicy,
}

impl ResolvedConfig {
	pub fn coordinator_options(&self) -> CoordinatorOptions {
		CoordinatorOptions::default().with_empty_queries(self.empty_queries)
	}

	pub fn print_summary(&self) {
		println!("Effective configuration:");
		match &self.catalog {
			Some(path) => println!("  Catalog: {}", path.display()),
			None => println!("  Catalog: (built-in countries)"),
		}
		println!("  Case sensitive: {}", bool_to_word(self.case_sensitive));
		match self.limit {
			Some(limit) => println!("  Limit: {limit}"),
			None => println!("  Limit: unlimited"),
		}
		println!("  Latency: {}ms", self.latency.as_millis());
		println!("  Empty queries: {}", self.empty_queries.as_str());
	}
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	load_with_env(cli, None)
}

/// Load configuration, reading `TYPEAHEAD_*` variables from `env` instead of
/// the process environment when given.
fn load_with_env(cli: &CliArgs, env: Option<Map<String, String>>) -> Result<ResolvedConfig> {
	let builder = build_config(cli, env)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

fn build_config(cli: &CliArgs, env: Option<Map<String, String>>) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("typeahead")
			.prefix_separator("_")
			.separator("__")
			.try_parsing(true)
			.source(env),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".typeahead.toml"));
		files.push(current_dir.join("typeahead.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(path) = cli.catalog.clone() {
			self.catalog.path = Some(path);
		}
		if let Some(value) = cli.case_sensitive {
			self.catalog.case_sensitive = Some(value);
		}
		if let Some(value) = cli.limit {
			self.catalog.limit = Some(value);
		}
		if let Some(value) = cli.latency_ms {
			self.lookup.latency_ms = Some(value);
		}
		if let Some(policy) = cli.empty_queries {
			self.lookup.empty_queries = Some(EmptyQueryPolicy::from(policy).as_str().to_string());
		}
	}

	fn resolve(self) -> Result<ResolvedConfig> {
		if self.catalog.limit == Some(0) {
			bail!("catalog limit must be at least 1");
		}

		let empty_queries = match self.lookup.empty_queries {
			Some(value) => EmptyQueryPolicy::parse(&value)
				.ok_or_else(|| anyhow!("unknown empty query policy '{value}'"))?,
			None => EmptyQueryPolicy::default(),
		};

		Ok(ResolvedConfig {
			catalog: self.catalog.path,
			case_sensitive: self.catalog.case_sensitive.unwrap_or(false),
			limit: self.catalog.limit,
			latency: Duration::from_millis(self.lookup.latency_ms.unwrap_or(0)),
			empty_queries,
		})
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::Parser;
	use tempfile::tempdir;

	use super::*;

	fn cli(args: &[&str]) -> CliArgs {
		let mut argv = vec!["typeahead", "--no-config"];
		argv.extend_from_slice(args);
		CliArgs::parse_from(argv)
	}

	fn load_with(args: &[&str], vars: &[(&str, &str)]) -> Result<ResolvedConfig> {
		let env = vars
			.iter()
			.map(|(key, value)| (key.to_string(), value.to_string()))
			.collect();
		load_with_env(&cli(args), Some(env))
	}

	fn load_isolated(args: &[&str]) -> Result<ResolvedConfig> {
		load_with(args, &[])
	}

	#[test]
	fn defaults_without_sources() {
		let resolved = load_isolated(&[]).unwrap();
		assert!(resolved.catalog.is_none());
		assert!(!resolved.case_sensitive);
		assert_eq!(resolved.limit, None);
		assert_eq!(resolved.latency, Duration::ZERO);
		assert_eq!(resolved.empty_queries, EmptyQueryPolicy::Skip);
	}

	#[test]
	fn config_file_is_overridden_by_flags() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("typeahead.toml");
		fs::write(
			&path,
			"[catalog]\npath = \"fruit.txt\"\ncase_sensitive = true\nlimit = 5\n\n[lookup]\nlatency_ms = 30\nempty_queries = \"lookup\"\n",
		)
		.unwrap();
		let config = path.to_str().unwrap();

		let from_file = load_isolated(&["--config", config]).unwrap();
		assert_eq!(from_file.catalog, Some(PathBuf::from("fruit.txt")));
		assert!(from_file.case_sensitive);
		assert_eq!(from_file.limit, Some(5));
		assert_eq!(from_file.latency, Duration::from_millis(30));
		assert_eq!(from_file.empty_queries, EmptyQueryPolicy::Lookup);

		let overridden = load_isolated(&[
			"--config",
			config,
			"--limit",
			"2",
			"--case-sensitive",
			"false",
			"--empty-queries",
			"skip",
		])
		.unwrap();
		assert_eq!(overridden.limit, Some(2));
		assert!(!overridden.case_sensitive);
		assert_eq!(overridden.empty_queries, EmptyQueryPolicy::Skip);
		assert_eq!(overridden.latency, Duration::from_millis(30));
	}

	#[test]
	fn later_config_files_win() {
		let dir = tempdir().unwrap();
		let first = dir.path().join("first.toml");
		let second = dir.path().join("second.toml");
		fs::write(&first, "[catalog]\nlimit = 4\ncase_sensitive = true\n").unwrap();
		fs::write(&second, "[catalog]\nlimit = 9\n").unwrap();

		let resolved = load_isolated(&[
			"-c",
			first.to_str().unwrap(),
			"-c",
			second.to_str().unwrap(),
		])
		.unwrap();
		assert_eq!(resolved.limit, Some(9));
		assert!(resolved.case_sensitive);
	}

	#[test]
	fn invalid_values_are_rejected() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("bad.toml");
		fs::write(&path, "[lookup]\nempty_queries = \"sometimes\"\n").unwrap();
		let err = load_isolated(&["--config", path.to_str().unwrap()]).err().unwrap();
		assert!(err.to_string().contains("sometimes"));

		let err = load_isolated(&["--limit", "0"]).err().unwrap();
		assert!(err.to_string().contains("limit"));
	}

	#[test]
	fn missing_explicit_config_is_an_error() {
		let dir = tempdir().unwrap();
		let missing = dir.path().join("absent.toml");
		assert!(load_isolated(&["--config", missing.to_str().unwrap()]).is_err());
	}

	#[test]
	fn environment_sits_between_files_and_flags() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("typeahead.toml");
		fs::write(&path, "[catalog]\nlimit = 5\n\n[lookup]\nempty_queries = \"skip\"\n").unwrap();
		let config = path.to_str().unwrap();
		let vars = [
			("TYPEAHEAD_CATALOG__LIMIT", "7"),
			("TYPEAHEAD_LOOKUP__EMPTY_QUERIES", "lookup"),
			("TYPEAHEAD_LOOKUP__LATENCY_MS", "15"),
		];

		let from_env = load_with(&["--config", config], &vars).unwrap();
		assert_eq!(from_env.limit, Some(7));
		assert_eq!(from_env.empty_queries, EmptyQueryPolicy::Lookup);
		assert_eq!(from_env.latency, Duration::from_millis(15));

		let from_flags = load_with(&["--config", config, "--limit", "2"], &vars).unwrap();
		assert_eq!(from_flags.limit, Some(2));
		assert_eq!(from_flags.empty_queries, EmptyQueryPolicy::Lookup);
	}
}
