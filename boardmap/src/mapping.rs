use crate::MappingError;
use log::debug;
use portparse::ModuleDeclaration;
use std::collections::HashMap;

/// Zero-based index into `ModuleDeclaration::ports()`
pub type PortIndex = usize;

/// Port chosen for one board signal; `None` leaves the signal unconnected
pub type Selection = Option<PortIndex>;

/// Converts a choice-list index into a selection.
///
/// Choice lists show a blank entry first, so choice 0 means "no selection"
/// and choice `n` is the port with index `n - 1`.
pub fn selection_from_choice(choice: usize) -> Selection {
	choice.checked_sub(1)
}

/// How many ports have to be connected before a wrapper may be generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletenessPolicy {
	/// At least one board signal must be connected
	#[default]
	Partial,

	/// Every module port must be connected to exactly one board signal
	Complete,
}

/// A single `.port(board_signal)` connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
	pub port: String,
	pub board_signal: String,
}

/// Validated, injective assignment of module ports to board signals.
///
/// Connections are kept in board catalog order, which is also the order
/// in which they are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalMapping {
	module_name: String,
	connections: Vec<Connection>,
}

impl SignalMapping {
	/// Name of the module the mapping was built for
	pub fn module_name(&self) -> &str {
		&self.module_name
	}

	/// Returns the board signal connected to the port
	pub fn get(&self, port: &str) -> Option<&str> {
		self.connections
			.iter()
			.find(|c| c.port == port)
			.map(|c| c.board_signal.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = &Connection> {
		self.connections.iter()
	}

	pub fn len(&self) -> usize {
		self.connections.len()
	}

	pub fn is_empty(&self) -> bool {
		self.connections.is_empty()
	}
}

impl<'a> IntoIterator for &'a SignalMapping {
	type Item = &'a Connection;
	type IntoIter = std::slice::Iter<'a, Connection>;

	fn into_iter(self) -> Self::IntoIter {
		self.connections.iter()
	}
}

/// Builds a mapping from per-board-signal selections.
///
/// `selections[i]` is the choice for `board_signals[i]`. The result is
/// either a fully valid mapping or an error; nothing in between.
pub fn build_mapping(
	board_signals: &[&str],
	module: &ModuleDeclaration,
	selections: &[Selection],
	policy: CompletenessPolicy,
) -> Result<SignalMapping, MappingError> {
	if selections.len() != board_signals.len() {
		return Err(MappingError::SelectionCountMismatch {
			expected: board_signals.len(),
			actual: selections.len(),
		});
	}

	let port_count = module.ports().len();
	let mut claimed: HashMap<PortIndex, usize> = HashMap::new();
	let mut connections = Vec::new();

	for (board_index, (board_signal, selection)) in board_signals.iter().zip(selections).enumerate() {
		let Some(port_index) = *selection else {
			continue;
		};

		let Some(port) = module.port(port_index) else {
			return Err(MappingError::InvalidSelection {
				board_signal: board_signal.to_string(),
				port_index,
				port_count,
			});
		};

		if let Some(first) = claimed.insert(port_index, board_index) {
			return Err(MappingError::DuplicateMapping {
				port: port.to_string(),
				first: board_signals[first].to_string(),
				second: board_signal.to_string(),
			});
		}

		debug!("Connecting port '{}' to board signal '{}'", port, board_signal);
		connections.push(Connection {
			port: port.to_string(),
			board_signal: board_signal.to_string(),
		});
	}

	let unmapped: Vec<String> = module
		.ports()
		.iter()
		.enumerate()
		.filter(|(index, _)| !claimed.contains_key(index))
		.map(|(_, port)| port.clone())
		.collect();

	let incomplete = match policy {
		CompletenessPolicy::Partial => connections.is_empty(),
		CompletenessPolicy::Complete => connections.is_empty() || !unmapped.is_empty(),
	};

	if incomplete {
		return Err(MappingError::IncompleteMapping {
			mapped: connections.len(),
			unmapped,
		});
	}

	Ok(SignalMapping {
		module_name: module.name().to_string(),
		connections,
	})
}
