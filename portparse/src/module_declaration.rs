use itertools::Itertools;
use serde::Serialize;

/// Ordering contract for port lists presented to the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PortOrder {
	/// First-seen order in the module header
	#[default]
	Declaration,

	/// Lexicographic by port name
	Alphabetical,
}

/// Name and ports of a parsed module header.
///
/// Ports are unique and kept in the order requested at construction time.
/// A declaration is never modified after creation; loading another
/// module produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDeclaration {
	name: String,
	ports: Vec<String>,
}

impl ModuleDeclaration {
	/// Creates a declaration, dropping repeated port names (first one wins)
	pub fn new<S, I>(name: impl Into<String>, ports: I) -> Self
	where
		S: Into<String>,
		I: IntoIterator<Item = S>,
	{
		Self {
			name: name.into(),
			ports: ports.into_iter().map(Into::<String>::into).unique().collect(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn ports(&self) -> &[String] {
		&self.ports
	}

	/// Returns the port with given index
	pub fn port(&self, index: usize) -> Option<&str> {
		self.ports.get(index).map(String::as_str)
	}

	/// Finds index of the port with given name
	pub fn port_index(&self, name: &str) -> Option<usize> {
		self.ports.iter().position(|p| p == name)
	}

	pub fn has_ports(&self) -> bool {
		!self.ports.is_empty()
	}

	/// Returns a copy with ports arranged according to `order`
	pub fn ordered(&self, order: PortOrder) -> Self {
		match order {
			PortOrder::Declaration => self.clone(),
			PortOrder::Alphabetical => Self {
				name: self.name.clone(),
				ports: self.ports.iter().cloned().sorted().collect(),
			},
		}
	}
}
