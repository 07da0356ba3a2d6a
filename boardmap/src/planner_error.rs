use portparse::core::{DiagnosticBuilder, PlannerDiagnostic, ProvidesDiagnostic};
use portparse::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Represents an error that can occur while turning selections into a mapping
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MappingError {
	#[error("No module loaded")]
	NoModuleLoaded,

	#[error("Unknown board signal '{0}'")]
	UnknownBoardSignal(String),

	#[error("Module has no port named '{0}'")]
	UnknownPort(String),

	#[error("Expected {expected} selections, got {actual}")]
	SelectionCountMismatch { expected: usize, actual: usize },

	#[error("Board signal '{board_signal}' selects port #{port_index}, but the module has {port_count} ports")]
	InvalidSelection {
		board_signal: String,
		port_index: usize,
		port_count: usize,
	},

	#[error("Duplicate signal mapping: port '{port}' is selected by both '{first}' and '{second}'")]
	DuplicateMapping {
		port: String,
		first: String,
		second: String,
	},

	#[error("Incomplete signal mapping ({mapped} connected, {} unmapped)", .unmapped.len())]
	IncompleteMapping { mapped: usize, unmapped: Vec<String> },
}

/// Failure to store the generated wrapper
#[derive(Debug, Error)]
pub enum WriteError {
	#[error("Failed to write '{}'", .path.display())]
	IoError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Any failure of a session operation
#[derive(Debug, Error)]
pub enum PlannerError {
	#[error(transparent)]
	Parse(#[from] ParseError),

	#[error(transparent)]
	Mapping(#[from] MappingError),

	#[error(transparent)]
	Write(#[from] WriteError),
}

impl ProvidesDiagnostic for MappingError {
	fn to_diagnostic(&self) -> PlannerDiagnostic {
		use MappingError::*;
		let builder = DiagnosticBuilder::from_error(self).code("boardmap::mapping");
		match self {
			NoModuleLoaded => builder.help("Load a module before selecting ports or generating the wrapper"),

			UnknownBoardSignal(_) => builder.help("Run `pinplanner signals` to list the board signals"),

			UnknownPort(_) => builder.help("Run `pinplanner ports <SOURCE>` to list the module ports"),

			SelectionCountMismatch { .. } => builder.help("Provide one selection per board signal"),

			InvalidSelection { .. } => builder.help("Port numbers start at 1; 0 leaves the board signal unconnected"),

			DuplicateMapping { port, .. } => {
				builder.help(&format!("Each module port may be connected to only one board pin; pick another port than '{}'", port))
			},

			IncompleteMapping { mapped: 0, .. } => builder.help("No mappings defined; connect at least one board signal"),

			IncompleteMapping { unmapped, .. } => builder.help(&format!("Every port must be connected; unmapped: {}", unmapped.join(", "))),
		}
		.build()
	}
}

impl ProvidesDiagnostic for WriteError {
	fn to_diagnostic(&self) -> PlannerDiagnostic {
		match self {
			WriteError::IoError { source, .. } => DiagnosticBuilder::from_error(self)
				.code("boardmap::write")
				.help(&source.to_string())
				.build(),
		}
	}
}

impl ProvidesDiagnostic for PlannerError {
	fn to_diagnostic(&self) -> PlannerDiagnostic {
		match self {
			PlannerError::Parse(err) => err.to_diagnostic(),
			PlannerError::Mapping(err) => err.to_diagnostic(),
			PlannerError::Write(err) => err.to_diagnostic(),
		}
	}
}
