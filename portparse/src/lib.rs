//! Reads the port list of a single hardware module header.
//!
//! ```
//! let decl = portparse::extract("module blink(input clk, output led);").unwrap();
//! assert_eq!(decl.name(), "blink");
//! assert_eq!(decl.ports(), ["clk", "led"]);
//! ```

pub mod core;
pub mod extractor;
pub mod lexer;
mod module_declaration;
mod parse_error;

pub use crate::core::{PlannerDiagnostic, ProvidesDiagnostic, SourceSpan};
pub use extractor::{declares_timescale, extract, extract_file, SourceFile};
pub use module_declaration::{ModuleDeclaration, PortOrder};
pub use parse_error::ParseError;
