use std::fmt;

/// Which side drives a board signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardDirection {
	/// Driven by the board (clock, buttons), read by the user's module
	ToModule,

	/// Driven by the user's module (display, LEDs)
	FromModule,
}

impl fmt::Display for BoardDirection {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			BoardDirection::ToModule => f.pad("input"),
			BoardDirection::FromModule => f.pad("output"),
		}
	}
}

/// One entry of the development board interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSignal {
	pub name: &'static str,
	pub direction: BoardDirection,
	pub width: u32,
	pub description: &'static str,
}

const fn signal(name: &'static str, direction: BoardDirection, width: u32, description: &'static str) -> BoardSignal {
	BoardSignal {
		name,
		direction,
		width,
		description,
	}
}

use BoardDirection::*;

/// Board signals in presentation order
pub static BOARD_SIGNALS: [BoardSignal; 14] = [
	signal("clk", ToModule, 1, "50 MHz clock"),
	signal("reset", ToModule, 1, "key \"a\""),
	signal("B2", ToModule, 1, "key \"s\""),
	signal("B3", ToModule, 1, "key \"d\""),
	signal("B4", ToModule, 1, "key \"f\""),
	signal("B5", ToModule, 1, "key \"g\""),
	signal("h_sync", FromModule, 1, "VGA horizontal sync"),
	signal("v_sync", FromModule, 1, "VGA vertical sync"),
	signal("rgb", FromModule, 16, "VGA colour (RGB565)"),
	signal("led1", FromModule, 1, "LED 1"),
	signal("led2", FromModule, 1, "LED 2"),
	signal("led3", FromModule, 1, "LED 3"),
	signal("led4", FromModule, 1, "LED 4"),
	signal("led5", FromModule, 1, "LED 5"),
];

/// Names of all board signals, in catalog order
pub fn board_signals() -> Vec<&'static str> {
	BOARD_SIGNALS.iter().map(|s| s.name).collect()
}

/// Finds the catalog index of a board signal
pub fn board_signal_index(name: &str) -> Option<usize> {
	BOARD_SIGNALS.iter().position(|s| s.name == name)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn catalog_order() {
		let names = board_signals();
		assert_eq!(names.first(), Some(&"clk"));
		assert_eq!(names.last(), Some(&"led5"));
		assert_eq!(board_signal_index("rgb"), Some(8));
		assert_eq!(board_signal_index("RGB"), None);
	}

	#[test]
	fn names_are_unique() {
		let names = board_signals();
		for (i, name) in names.iter().enumerate() {
			assert_eq!(board_signal_index(name), Some(i));
		}
	}
}
