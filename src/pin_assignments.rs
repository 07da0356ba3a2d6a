use boardmap::{board_signal_index, selection_from_choice, MappingError, PlannerSession};
use miette::Diagnostic;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum PinFileError {
	#[error("Failed to read pin file '{}'", .path.display())]
	#[diagnostic(code(pinplanner::pins::io))]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Malformed pin file '{}'", .path.display())]
	#[diagnostic(
		code(pinplanner::pins::format),
		help("The file must hold a \"pins\" object mapping board signals to port names (or null)")
	)]
	Format {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("Pin file was written for module '{expected}', but '{found}' is loaded")]
	#[diagnostic(code(pinplanner::pins::module))]
	ModuleMismatch { expected: String, found: String },
}

/// Port chosen on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortChoice {
	/// Port name
	Name(String),

	/// Position in the port listing; 0 leaves the board signal unconnected
	Choice(usize),
}

/// A single `BOARD=PORT` assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinAssignment {
	pub board_signal: String,
	pub port: PortChoice,
}

/// Parses `BOARD=PORT`, `BOARD=<number>` or `BOARD=` (unconnected)
pub fn parse_assignment(text: &str) -> Result<PinAssignment, String> {
	let (board, port) = text
		.split_once('=')
		.ok_or_else(|| format!("expected BOARD=PORT, got '{}'", text))?;

	let board = board.trim();
	if board.is_empty() {
		return Err(format!("missing board signal in '{}'", text));
	}

	let port = port.trim();
	let port = if port.is_empty() {
		PortChoice::Choice(0)
	}
	else if let Ok(choice) = port.parse::<usize>() {
		PortChoice::Choice(choice)
	}
	else {
		PortChoice::Name(port.into())
	};

	Ok(PinAssignment {
		board_signal: board.into(),
		port,
	})
}

impl PinAssignment {
	/// Records the assignment in the session
	pub fn apply(&self, session: &mut PlannerSession) -> Result<(), MappingError> {
		match &self.port {
			PortChoice::Name(name) => session.select(&self.board_signal, Some(name)),
			PortChoice::Choice(choice) => {
				let index = board_signal_index(&self.board_signal)
					.ok_or_else(|| MappingError::UnknownBoardSignal(self.board_signal.clone()))?;
				session.set_selection(index, selection_from_choice(*choice))
			},
		}
	}
}

/// Pin assignments stored as JSON:
/// `{"module": "vga_core", "pins": {"h_sync": "hsync", "led1": null}}`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinFile {
	/// Module the assignments were made for
	#[serde(default)]
	pub module: Option<String>,

	/// Board signal to port name; `null` leaves the signal unconnected
	pub pins: BTreeMap<String, Option<String>>,
}

impl PinFile {
	pub fn read(path: &Path) -> Result<Self, PinFileError> {
		let text = fs::read_to_string(path).map_err(|source| PinFileError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::parse(&text).map_err(|source| PinFileError::Format {
			path: path.to_path_buf(),
			source,
		})
	}

	pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Turns the file into assignments, after checking it matches the loaded module
	pub fn assignments(&self, module_name: &str) -> Result<Vec<PinAssignment>, PinFileError> {
		if let Some(expected) = &self.module {
			if expected != module_name {
				return Err(PinFileError::ModuleMismatch {
					expected: expected.clone(),
					found: module_name.into(),
				});
			}
		}

		Ok(self
			.pins
			.iter()
			.map(|(board, port)| PinAssignment {
				board_signal: board.clone(),
				port: match port {
					Some(name) => PortChoice::Name(name.clone()),
					None => PortChoice::Choice(0),
				},
			})
			.collect())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn assignment_forms() {
		assert_eq!(
			parse_assignment("clk=sys_clk"),
			Ok(PinAssignment {
				board_signal: "clk".into(),
				port: PortChoice::Name("sys_clk".into())
			})
		);
		assert_eq!(parse_assignment("led1=3").unwrap().port, PortChoice::Choice(3));
		assert_eq!(parse_assignment("led1=").unwrap().port, PortChoice::Choice(0));
		assert!(parse_assignment("clk").is_err());
		assert!(parse_assignment("=x").is_err());
	}

	#[test]
	fn pin_file_checks_module() {
		let file = PinFile::parse(r#"{"module": "vga_core", "pins": {"h_sync": "hsync", "led1": null}}"#).unwrap();
		assert!(matches!(file.assignments("other"), Err(PinFileError::ModuleMismatch { .. })));

		let assignments = file.assignments("vga_core").unwrap();
		assert_eq!(assignments.len(), 2);
		assert_eq!(assignments[0].board_signal, "h_sync");
		assert_eq!(assignments[1].port, PortChoice::Choice(0));
	}

	#[test]
	fn pin_file_rejects_unknown_fields() {
		assert!(PinFile::parse(r#"{"pins": {}, "extra": 1}"#).is_err());
	}

	#[test]
	fn apply_by_choice() {
		let mut session = PlannerSession::default();
		session.load_module_source("module m(input a, output b);").unwrap();
		parse_assignment("led2=2").unwrap().apply(&mut session).unwrap();
		assert_eq!(session.selections()[10], Some(1));

		parse_assignment("led2=0").unwrap().apply(&mut session).unwrap();
		assert_eq!(session.selections()[10], None);
	}
}
