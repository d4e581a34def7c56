//! `outlet_core` is the core library for the [outlet](https://github.com/ifiokjr/outlet) document composer. It finds named outlet markers in a template and fills each one with a value supplied inline or loaded from a file.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Template text
//!   → Scanner (finds `<!-- outlet: NAME -->` markers in document order)
//!   → Resolver (collapses duplicate assignments, loads `@path` references)
//!   → Composer (replaces each marker span with its resolved value)
//!   → Assembler (composed text + per-slot diagnostics → stdout or file)
//! ```
//!
//! ## Marker Syntax
//!
//! ```markdown
//! # <!-- outlet: title -->
//!
//! <!-- outlet: body -->
//! ```
//!
//! Markers without an assignment are left in place. Malformed markers are
//! ordinary text.
//!
//! ## Slot Values
//!
//! - `title=Demo`: the value is inserted verbatim.
//! - `body=@content/body.md`: the file's content is inserted verbatim.
//!   Relative paths resolve against the working directory given to the
//!   resolver, not the template's directory.
//!
//! When a slot is assigned more than once, the last assignment wins. When a
//! referenced file can't be read, its markers are left in place and a
//! [`SlotDiagnostic`] is reported; composition always completes.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::path::Path;
//!
//! use outlet_core::MemoryFileReader;
//! use outlet_core::ResolveContext;
//! use outlet_core::SlotAssignment;
//! use outlet_core::compose_document;
//!
//! let reader = MemoryFileReader::new().with_file("/work/world.md", "World");
//! let ctx = ResolveContext::new(Path::new("/work"), &reader);
//! let assignments = vec![
//! 	SlotAssignment::new("title", "Demo"),
//! 	SlotAssignment::new("name", "@world.md"),
//! ];
//!
//! let composition = compose_document(
//! 	"# <!-- outlet: title -->\nHello <!-- outlet: name -->.",
//! 	&assignments,
//! 	&ctx,
//! );
//!
//! assert_eq!(composition.output, "# Demo\nHello World.");
//! ```

pub use assembler::*;
pub use assignment::*;
pub use composer::*;
pub use config::*;
pub use error::*;
pub use position::*;
pub use resolver::*;
pub use scanner::*;

mod assembler;
mod assignment;
mod composer;
pub mod config;
#[allow(unused_assignments)]
mod error;
pub(crate) mod lexer;
mod position;
mod resolver;
mod scanner;
