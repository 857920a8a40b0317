mod cli;
mod settings;
mod workflow;

use std::io::{self, BufReader};

use anyhow::Result;
use cli::{OutcomePrinter, parse_cli};
use workflow::SessionWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	typeahead::logging::initialize(cli.verbose);

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let workflow = SessionWorkflow::from_config(&resolved, cli.show_busy)?;
	let mut printer = OutcomePrinter::new(cli.output, io::stdout().lock());
	workflow.run(BufReader::new(io::stdin()), &mut printer)?;

	Ok(())
}
