use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use outlet_cli::ListFormat;
use outlet_cli::OutletCli;
use outlet_cli::logging::init_logging;
use outlet_core::AnyEmptyResult;
use outlet_core::AnyResult;
use outlet_core::Composition;
use outlet_core::Marker;
use outlet_core::OsFileReader;
use outlet_core::OutletConfig;
use outlet_core::OutletError;
use outlet_core::OutputTarget;
use outlet_core::ResolveContext;
use outlet_core::SlotAssignment;
use outlet_core::compose_document;
use outlet_core::deliver;
use outlet_core::effective_assignments;
use outlet_core::resolve_path;
use outlet_core::scan;
use owo_colors::OwoColorize;
use serde::Serialize;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = OutletCli::parse_normalized();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_logging(&args, use_color);

	if let Err(e) = run(&args) {
		match e.downcast::<OutletError>() {
			Ok(outlet_err) => {
				let report: miette::Report = (*outlet_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn run(args: &OutletCli) -> AnyEmptyResult {
	let working_dir = resolve_working_dir(args)?;
	let config = load_config(args, &working_dir)?;
	let template = read_template(args)?;

	let mut assignments = match &config {
		Some(config) => config.assignments()?,
		None => Vec::new(),
	};
	assignments.extend(args.slots.iter().cloned());

	if args.list {
		return run_list(&template, &assignments, args.format);
	}

	let reader = OsFileReader;
	let ctx = ResolveContext::new(&working_dir, &reader);
	let composition = compose_document(&template, &assignments, &ctx);

	if !args.quiet && composition.has_warnings() {
		print_slot_warnings(&composition);
	}

	if args.verbose {
		print_summary(&composition);
	}

	let target = output_target(args, config.as_ref(), &working_dir);
	let mut stdout = std::io::stdout().lock();
	deliver(&composition, &target, &mut stdout)?;

	if args.verbose {
		if let OutputTarget::File(path) = &target {
			eprintln!("Wrote {}", path.display());
		}
	}

	Ok(())
}

fn resolve_working_dir(args: &OutletCli) -> AnyResult<PathBuf> {
	let current = std::env::current_dir()?;
	Ok(match &args.cwd {
		Some(dir) => resolve_path(&current, dir),
		None => current,
	})
}

fn load_config(
	args: &OutletCli,
	working_dir: &Path,
) -> AnyResult<Option<OutletConfig>> {
	if args.no_config {
		return Ok(None);
	}

	if let Some(path) = &args.config {
		tracing::debug!(path = %path.display(), "loading config file");
		return Ok(Some(OutletConfig::load_file(path)?));
	}

	let Some((path, config)) = OutletConfig::load(working_dir)? else {
		return Ok(None);
	};
	tracing::debug!(path = %path.display(), slots = config.slots.len(), "discovered config file");

	Ok(Some(config))
}

fn read_template(args: &OutletCli) -> AnyResult<String> {
	let content = if args.reads_stdin() {
		let mut buffer = String::new();
		std::io::stdin()
			.read_to_string(&mut buffer)
			.map_err(|source| {
				OutletError::ReadTemplate {
					path: args.template.clone(),
					source,
				}
			})?;
		buffer
	} else {
		std::fs::read_to_string(&args.template).map_err(|source| {
			OutletError::ReadTemplate {
				path: args.template.clone(),
				source,
			}
		})?
	};

	Ok(content)
}

/// `--output` wins, then `[output].path` from the config, then stdout.
fn output_target(
	args: &OutletCli,
	config: Option<&OutletConfig>,
	working_dir: &Path,
) -> OutputTarget {
	if let Some(path) = &args.output {
		return OutputTarget::File(path.clone());
	}

	match config.and_then(|config| config.output.path.as_deref()) {
		Some(path) => OutputTarget::File(resolve_path(working_dir, path)),
		None => OutputTarget::Stdout,
	}
}

fn print_slot_warnings(composition: &Composition) {
	for diagnostic in &composition.diagnostics {
		let usage = match diagnostic.occurrences {
			0 => "not used by the template".to_string(),
			1 => "1 outlet left untouched".to_string(),
			n => format!("{n} outlets left untouched"),
		};
		eprintln!(
			"{} {} ({usage})",
			colored!("warning:", yellow),
			diagnostic.to_error()
		);
	}
}

fn print_summary(composition: &Composition) {
	eprintln!("{}", colored!("Composition summary", bold));
	eprintln!("{:<24} {}", "Outlets found", composition.markers.len());
	eprintln!("{:<24} {}", "Substituted", composition.substituted_count());
	eprintln!("{:<24} {}", "Unmatched", composition.unmatched_count());
	eprintln!("{:<24} {}", "Failed", composition.failed_count());

	let unmatched = composition.unmatched_names();
	if !unmatched.is_empty() {
		eprintln!("{:<24} {}", "Unmatched slots", unmatched.join(", "));
	}
}

#[derive(Serialize)]
struct ListedMarker<'a> {
	name: &'a str,
	line: usize,
	column: usize,
	assigned: bool,
}

fn run_list(
	template: &str,
	assignments: &[SlotAssignment],
	format: ListFormat,
) -> AnyEmptyResult {
	let markers = scan(template);
	let effective = effective_assignments(assignments);
	let listed: Vec<ListedMarker<'_>> = markers
		.iter()
		.map(|marker: &Marker| {
			ListedMarker {
				name: &marker.name,
				line: marker.position.start.line,
				column: marker.position.start.column,
				assigned: effective.contains_key(marker.name.as_str()),
			}
		})
		.collect();

	match format {
		ListFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&listed)?);
		}
		ListFormat::Text => {
			if listed.is_empty() {
				println!("No outlets found.");
				return Ok(());
			}

			for entry in &listed {
				let status = if entry.assigned {
					"assigned"
				} else {
					"unassigned"
				};
				println!("{}:{}\t{}\t{status}", entry.line, entry.column, entry.name);
			}
		}
	}

	Ok(())
}
