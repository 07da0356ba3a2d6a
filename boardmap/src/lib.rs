//! Connects the ports of a parsed module to the development board
//! and generates the `DevelopmentBoard` wrapper module.

pub mod catalog;
pub mod codegen;
pub mod mapping;
mod planner_error;
pub mod session;
pub mod writer;

pub use catalog::{board_signal_index, board_signals, BoardDirection, BoardSignal, BOARD_SIGNALS};
pub use codegen::render;
pub use mapping::{build_mapping, selection_from_choice, CompletenessPolicy, Connection, PortIndex, Selection, SignalMapping};
pub use planner_error::{MappingError, PlannerError, WriteError};
pub use session::{PlannerConfig, PlannerSession};
