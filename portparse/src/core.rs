pub mod diagnostic;
pub mod source_span;
mod utils;

pub use diagnostic::{DiagnosticBuilder, PlannerDiagnostic, ProvidesDiagnostic};
pub use source_span::SourceSpan;
pub use utils::{is_reserved_word, is_valid_identifier, is_valid_port_name};
pub(crate) use utils::{DIRECTIONS, NET_TYPES, SIGNEDNESS, VARIABLE_TYPES};
