//! Tracing subscriber setup. Only the binary installs a subscriber;
//! `outlet_core` just emits events.
//!
//! | Flag(s)     | Filter level |
//! |-------------|--------------|
//! | (none)      | WARN         |
//! | `--verbose` | DEBUG        |
//! | `--quiet`   | ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::OutletCli;

/// Install the global tracing subscriber, writing to stderr so stdout stays
/// reserved for the composed document. Calling it twice is harmless.
pub fn init_logging(args: &OutletCli, use_color: bool) {
	let level = derive_level(args.verbose, args.quiet);
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("outlet={level},outlet_cli={level},outlet_core={level}")));

	let fmt_layer = tracing_subscriber::fmt::layer()
		.with_target(false)
		.with_ansi(use_color)
		.with_writer(std::io::stderr);

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(fmt_layer)
		.try_init();
}

/// Translate the verbosity flags to a level string. `quiet` wins.
pub fn derive_level(verbose: bool, quiet: bool) -> &'static str {
	if quiet {
		"error"
	} else if verbose {
		"debug"
	} else {
		"warn"
	}
}
