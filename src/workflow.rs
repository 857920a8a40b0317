use std::io::{BufRead, Write};
use std::thread;

use anyhow::{Context, Result};
use log::{debug, info};
use typeahead::providers::PrefixProvider;
use typeahead::{CoordinatorOptions, InputFault, QueryCoordinator};

use crate::cli::{OutcomePrinter, print_busy};
use crate::settings::ResolvedConfig;

/// Runs one typeahead session over a line-oriented input source.
pub(crate) struct SessionWorkflow {
	provider: PrefixProvider,
	options: CoordinatorOptions,
	show_busy: bool,
}

impl SessionWorkflow {
	pub(crate) fn from_config(config: &ResolvedConfig, show_busy: bool) -> Result<Self> {
		let provider = match &config.catalog {
			Some(path) => PrefixProvider::from_file(path)
				.with_context(|| format!("failed to load catalog {}", path.display()))?,
			None => PrefixProvider::countries(),
		};
		debug!("catalog holds {} entries", provider.len());

		let provider = provider
			.case_sensitive(config.case_sensitive)
			.limit(config.limit)
			.latency(config.latency);

		Ok(Self {
			provider,
			options: config.coordinator_options(),
			show_busy,
		})
	}

	/// Feed every line of `input` to the coordinator and print outcomes until
	/// the session closes. Returns the number of outcomes printed.
	pub(crate) fn run<R, W>(self, input: R, printer: &mut OutcomePrinter<W>) -> Result<usize>
	where
		R: BufRead + Send + 'static,
		W: Write,
	{
		let inputs = input
			.lines()
			.map(|line| line.map(Some).map_err(InputFault::from));
		let (results, busy) = QueryCoordinator::new(self.provider)
			.with_options(self.options)
			.coordinate(inputs);

		let busy_printer = self.show_busy.then(|| {
			let transitions = busy.subscribe();
			thread::Builder::new()
				.name("typeahead-busy".into())
				.spawn(move || transitions.into_iter().for_each(print_busy))
		});
		let busy_printer = busy_printer
			.transpose()
			.context("failed to spawn busy reporter")?;

		for outcome in results.subscribe() {
			printer.print(&outcome)?;
		}

		if let Some(handle) = busy_printer {
			let _ = handle.join();
		}
		info!("session finished after {} outcomes", printer.printed());
		Ok(printer.printed())
	}
}
