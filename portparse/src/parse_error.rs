use crate::core::{DiagnosticBuilder, PlannerDiagnostic, ProvidesDiagnostic};
use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a module declaration from source text
#[derive(Debug, Error)]
pub enum ParseError {
	#[error("Could not find module declaration")]
	NoModuleFound,

	#[error("Failed to read '{}'", .path.display())]
	IoError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl ProvidesDiagnostic for ParseError {
	fn to_diagnostic(&self) -> PlannerDiagnostic {
		use ParseError::*;
		match self {
			NoModuleFound => DiagnosticBuilder::from_error(self)
				.code("portparse::no_module")
				.help("Expected a header such as `module name(input clk, output [7:0] q);`")
				.build(),

			IoError { source, .. } => DiagnosticBuilder::from_error(self)
				.code("portparse::io")
				.help(&source.to_string())
				.build(),
		}
	}
}
