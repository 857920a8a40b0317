//! Logger setup shared by the binary and by embedders that want the same
//! output format.

use std::io::Write;

use env_logger::{Builder, Env, Target};

/// Environment variable holding an `env_logger` filter, e.g. `typeahead=debug`.
pub const LOG_ENV: &str = "TYPEAHEAD_LOG";
const LOG_STYLE_ENV: &str = "TYPEAHEAD_LOG_STYLE";

/// Install the stderr logger.
///
/// `verbosity` is the number of `-v` flags and only picks the default filter;
/// [`LOG_ENV`] always takes precedence. Calling this more than once is
/// harmless, the first installed logger stays in place.
pub fn initialize(verbosity: u8) {
	let env = Env::new()
		.filter_or(LOG_ENV, default_filter(verbosity))
		.write_style(LOG_STYLE_ENV);
	let mut builder = Builder::from_env(env);
	builder
		.format(|buf, record| {
			writeln!(
				buf,
				"[{}] [{}] {}",
				record.level(),
				record.module_path().unwrap_or("unknown"),
				record.args()
			)
		})
		.target(Target::Stderr);

	if builder.try_init().is_err() {
		log::debug!("logger already initialized");
	}
}

fn default_filter(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	}
}
