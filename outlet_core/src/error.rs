use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum OutletError {
	#[error(transparent)]
	#[diagnostic(code(outlet::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read template `{}`", .path.display())]
	#[diagnostic(
		code(outlet::read_template),
		help("check that the template path exists and is readable")
	)]
	ReadTemplate {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write output `{}`", .path.display())]
	#[diagnostic(
		code(outlet::write_output),
		help("check that the destination directory exists and is writable")
	)]
	WriteOutput {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid slot assignment: `{0}`")]
	#[diagnostic(
		code(outlet::invalid_assignment),
		help("slot assignments use the form `NAME=VALUE`, e.g. `title=Demo` or `body=@body.md`")
	)]
	InvalidAssignment(String),

	#[error("failed to read config file `{}`", .path.display())]
	#[diagnostic(code(outlet::config_read))]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(outlet::config_parse),
		help("check that outlet.toml is valid TOML with [slots] and/or [output] sections")
	)]
	ConfigParse(String),

	#[error("slot `{slot}` references `{}` which could not be read: {reason}", .path.display())]
	#[diagnostic(
		code(outlet::slot_file),
		severity(Warning),
		help("the outlet was left untouched; create the file or pass an inline value")
	)]
	SlotFile {
		slot: String,
		path: PathBuf,
		reason: String,
	},
}

pub type OutletResult<T> = Result<T, OutletError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
