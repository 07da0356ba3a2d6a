use crate::codegen::{render, WRAPPER_FILE_NAME};
use crate::writer::write_artifact;
use crate::{board_signal_index, board_signals, build_mapping, BoardSignal, CompletenessPolicy, MappingError, PlannerError, Selection, SignalMapping, BOARD_SIGNALS};
use log::{debug, info};
use portparse::{ModuleDeclaration, ParseError, PortOrder};
use std::path::{Path, PathBuf};

/// Runtime options of a planning session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
	pub completeness: CompletenessPolicy,
	pub port_order: PortOrder,
	pub output_file_name: String,
}

impl Default for PlannerConfig {
	fn default() -> Self {
		Self {
			completeness: CompletenessPolicy::default(),
			port_order: PortOrder::default(),
			output_file_name: WRAPPER_FILE_NAME.into(),
		}
	}
}

/// State of one pin planning session.
///
/// Holds at most one loaded module and one selection per board signal.
/// Loading a module replaces both wholesale; a failed operation leaves
/// the session as it was.
#[derive(Debug)]
pub struct PlannerSession {
	config: PlannerConfig,
	module: Option<ModuleDeclaration>,
	selections: Vec<Selection>,
	committed: Option<SignalMapping>,
}

impl Default for PlannerSession {
	fn default() -> Self {
		Self::new(PlannerConfig::default())
	}
}

impl PlannerSession {
	pub fn new(config: PlannerConfig) -> Self {
		Self {
			config,
			module: None,
			selections: vec![None; BOARD_SIGNALS.len()],
			committed: None,
		}
	}

	pub fn config(&self) -> &PlannerConfig {
		&self.config
	}

	/// Parses the module from a file
	pub fn load_module(&mut self, path: impl AsRef<Path>) -> Result<&ModuleDeclaration, ParseError> {
		let module = portparse::extract_file(path)?;
		Ok(self.load_declaration(module))
	}

	/// Parses the module from source text
	pub fn load_module_source(&mut self, source: &str) -> Result<&ModuleDeclaration, ParseError> {
		let module = portparse::extract(source)?;
		Ok(self.load_declaration(module))
	}

	/// Installs an already extracted module, clearing all selections
	pub fn load_declaration(&mut self, module: ModuleDeclaration) -> &ModuleDeclaration {
		self.clear_selections();
		self.committed = None;
		self.module.insert(module.ordered(self.config.port_order))
	}

	/// Currently loaded module
	pub fn module(&self) -> Option<&ModuleDeclaration> {
		self.module.as_ref()
	}

	/// The board signal catalog
	pub fn board_signals(&self) -> &'static [BoardSignal] {
		&BOARD_SIGNALS
	}

	pub fn selections(&self) -> &[Selection] {
		&self.selections
	}

	/// Chooses the port for the board signal at `board_index`.
	/// Duplicates are only reported when the mapping is built.
	pub fn set_selection(&mut self, board_index: usize, selection: Selection) -> Result<(), MappingError> {
		let board_signal = BOARD_SIGNALS
			.get(board_index)
			.ok_or_else(|| MappingError::UnknownBoardSignal(format!("#{}", board_index)))?;

		if let Some(port_index) = selection {
			let module = self.module.as_ref().ok_or(MappingError::NoModuleLoaded)?;
			if port_index >= module.ports().len() {
				return Err(MappingError::InvalidSelection {
					board_signal: board_signal.name.into(),
					port_index,
					port_count: module.ports().len(),
				});
			}
		}

		debug!("Board signal '{}' now selects {:?}", board_signal.name, selection);
		self.selections[board_index] = selection;
		Ok(())
	}

	/// Name-based variant of `set_selection`; `None` clears the selection
	pub fn select(&mut self, board_signal: &str, port: Option<&str>) -> Result<(), MappingError> {
		let board_index =
			board_signal_index(board_signal).ok_or_else(|| MappingError::UnknownBoardSignal(board_signal.into()))?;

		let selection = match port {
			None => None,
			Some(port) => {
				let module = self.module.as_ref().ok_or(MappingError::NoModuleLoaded)?;
				let index = module.port_index(port).ok_or_else(|| MappingError::UnknownPort(port.into()))?;
				Some(index)
			},
		};

		self.set_selection(board_index, selection)
	}

	pub fn clear_selections(&mut self) {
		self.selections.iter_mut().for_each(|s| *s = None);
	}

	/// Builds a fresh mapping from the current selections
	pub fn build_mapping(&self) -> Result<SignalMapping, MappingError> {
		let module = self.module.as_ref().ok_or(MappingError::NoModuleLoaded)?;
		build_mapping(&board_signals(), module, &self.selections, self.config.completeness)
	}

	/// Renders the wrapper for the current selections without writing anything
	pub fn preview(&self) -> Result<String, MappingError> {
		let mapping = self.build_mapping()?;
		Ok(render(mapping.module_name(), &mapping))
	}

	/// Validates the selections and writes the wrapper into `dir`.
	/// Returns path of the written file.
	pub fn commit(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf, PlannerError> {
		let mapping = self.build_mapping()?;
		let text = render(mapping.module_name(), &mapping);
		let path = dir.as_ref().join(&self.config.output_file_name);

		write_artifact(&path, &text)?;
		info!(
			"Wrote wrapper for '{}' ({} connections) to {}",
			mapping.module_name(),
			mapping.len(),
			path.display()
		);

		self.committed = Some(mapping);
		Ok(path)
	}

	/// Mapping used by the last successful commit
	pub fn committed_mapping(&self) -> Option<&SignalMapping> {
		self.committed.as_ref()
	}

	/// Forgets the module, the selections and the committed mapping
	pub fn reset(&mut self) {
		self.module = None;
		self.committed = None;
		self.clear_selections();
	}
}
