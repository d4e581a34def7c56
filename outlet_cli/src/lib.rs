use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use outlet_core::SlotAssignment;

pub mod logging;

/// Keyword accepted (and ignored) as the first argument, e.g.
/// `outlet compose readme.t.md`.
pub const COMPOSE_KEYWORD: &str = "compose";

#[derive(Debug, Parser)]
#[command(
	name = "outlet",
	author,
	version,
	about = "Compose a document by filling the outlets of a template.",
	long_about = "outlet fills `<!-- outlet: NAME -->` markers in a template with values supplied on \
	              the command line or loaded from files.\n\nA value starting with `@` is a file \
	              reference, resolved against the working directory:\n  outlet readme.t.md -s \
	              title=Demo -s body=@content/body.md -o readme.md\n\nMarkers without a value are \
	              left untouched. A missing file only produces a warning; the marker is kept and \
	              the run still succeeds.",
	override_usage = "outlet [compose] <TEMPLATE> [OPTIONS]"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct OutletCli {
	/// Path to the template file, or `-` to read it from stdin.
	#[arg(value_name = "TEMPLATE")]
	pub template: PathBuf,

	/// Assign a slot value as `NAME=VALUE`. Prefix the value with `@` to load
	/// it from a file. Repeat for more slots; the last assignment of a name
	/// wins.
	#[arg(
		long = "slot",
		short = 's',
		visible_alias = "set",
		value_name = "NAME=VALUE",
		value_parser = parse_slot
	)]
	pub slots: Vec<SlotAssignment>,

	/// Write the composed document to this file instead of stdout. A relative
	/// path is taken from the directory the command runs in, not from
	/// `--cwd`; only `[output].path` in the config follows `--cwd`.
	#[arg(long, short, value_name = "PATH")]
	pub output: Option<PathBuf>,

	/// Working directory for relative `@path` references and config
	/// discovery. Defaults to the current directory.
	#[arg(long, short = 'C', value_name = "DIR")]
	pub cwd: Option<PathBuf>,

	/// Load slot defaults from this config file instead of discovering
	/// `outlet.toml`.
	#[arg(long, value_name = "PATH", conflicts_with = "no_config")]
	pub config: Option<PathBuf>,

	/// Don't load any config file.
	#[arg(long, default_value_t = false)]
	pub no_config: bool,

	/// List the outlet markers in the template instead of composing it.
	#[arg(long, default_value_t = false)]
	pub list: bool,

	/// Output format for `--list`.
	#[arg(long, value_enum, default_value_t = ListFormat::Text)]
	pub format: ListFormat,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false, conflicts_with = "quiet")]
	pub verbose: bool,

	/// Only print errors.
	#[arg(long, short, default_value_t = false)]
	pub quiet: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
	/// Human-readable text, one marker per line.
	Text,
	/// JSON for programmatic consumption.
	Json,
}

impl OutletCli {
	/// Parse the process arguments after normalization.
	pub fn parse_normalized() -> Self {
		Self::parse_from(normalize_args(std::env::args_os()))
	}

	/// Like [`OutletCli::parse_normalized`] but for an explicit argument list
	/// (the first item is the binary name).
	pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
	where
		I: IntoIterator<Item = T>,
		T: Into<OsString>,
	{
		Self::try_parse_from(normalize_args(args))
	}

	/// Returns true when the template is read from stdin.
	pub fn reads_stdin(&self) -> bool {
		self.template.as_os_str() == "-"
	}
}

/// Drop the optional leading `compose` keyword so the rest can be parsed as
/// flags and a template path. Only the first argument after the binary name
/// is considered.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
	I: IntoIterator<Item = T>,
	T: Into<OsString>,
{
	let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();

	if args.get(1).is_some_and(|arg| arg == COMPOSE_KEYWORD) {
		args.remove(1);
	}

	args
}

/// clap value parser for `NAME=VALUE` slot assignments.
pub fn parse_slot(input: &str) -> Result<SlotAssignment, String> {
	SlotAssignment::parse(input).map_err(|_| {
		format!("expected `NAME=VALUE` with a non-empty name, got `{input}`")
	})
}
