use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser, ValueEnum,
	builder::{
		BoolishValueParser, Styles,
		styling::{AnsiColor, Effects},
	},
};
use typeahead::{EmptyQueryPolicy, app_dirs};

/// Produce the full version banner including the config directory.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("typeahead {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = CliArgs::command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

#[derive(Parser, Debug)]
#[command(
	name = "typeahead",
	version,
	long_version = long_version(),
	about = "Latest-wins autocomplete over queries read from stdin, one per line",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `typeahead` binary.
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "TYPEAHEAD_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long,
		value_name = "PATH",
		help = "Catalog file with one candidate per line (default: built-in country list)"
	)]
	pub(crate) catalog: Option<PathBuf>,
	#[arg(
		long = "case-sensitive",
		value_parser = BoolishValueParser::new(),
		help = "Compare prefixes case sensitively (default: disabled)"
	)]
	pub(crate) case_sensitive: Option<bool>,
	#[arg(
		long,
		value_name = "NUM",
		help = "Maximum matches per query (default: unlimited)"
	)]
	pub(crate) limit: Option<usize>,
	#[arg(
		long = "latency-ms",
		value_name = "MS",
		help = "Simulated provider latency in milliseconds (default: 0)"
	)]
	pub(crate) latency_ms: Option<u64>,
	#[arg(
		long = "empty-queries",
		value_enum,
		help = "How to treat empty input lines (default: skip)"
	)]
	pub(crate) empty_queries: Option<EmptyQueriesArg>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		long = "show-busy",
		help = "Report busy transitions on stderr (default: disabled)"
	)]
	pub(crate) show_busy: bool,
	#[arg(
		short,
		long,
		action = ArgAction::Count,
		help = "Increase log verbosity, repeatable (default: warnings only)"
	)]
	pub(crate) verbose: u8,
	#[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print outcomes")]
	pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
/// Empty-query policies accepted via the command line.
pub(crate) enum EmptyQueriesArg {
	Skip,
	Lookup,
}

impl From<EmptyQueriesArg> for EmptyQueryPolicy {
	fn from(value: EmptyQueriesArg) -> Self {
		match value {
			EmptyQueriesArg::Skip => EmptyQueryPolicy::Skip,
			EmptyQueriesArg::Lookup => EmptyQueryPolicy::Lookup,
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the binary.
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
