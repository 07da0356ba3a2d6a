mod logos_lexer;

use crate::core::SourceSpan;

/// Lexer token type
/// In this case, it's defined by the Logos-based lexer implementation.
pub use logos_lexer::TokenKind;
pub use logos_lexer::{LexerContext, LogosLexer};

/// Port direction keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	Input,
	Output,
	Inout,
}

/// Type keywords that may sit between a direction keyword and the port name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualifierKind {
	/// `wire`, `tri`, `wand`, `supply0`...
	NetType,

	/// `reg`, `logic`, `integer`, `time`, `bit`...
	VariableType,

	/// `signed` or `unsigned`
	Signedness,
}

/// Classification of identifier-shaped words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
	/// `module` (case-sensitive)
	Module,
	Direction(Direction),
	Qualifier(QualifierKind),
	Identifier,
}

/// Punctuators relevant to module headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunctuatorKind {
	LPar,      // (
	RPar,      // )
	LBracket,  // [
	RBracket,  // ]
	Comma,     // ,
	Semicolon, // ;
	Hash,      // #
}

/// Token as produced by the lexer (token kind + source location)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token {
	/// Type of the token
	pub kind: TokenKind,

	/// Source code location
	pub range: SourceSpan,
}

/// Abstract lexer
pub trait Lexer<'source> {
	/// Creates a lexer for provided source code
	fn new(source: &'source str) -> Self;

	/// Processes the text and returns a vector of tokens.
	/// Comments are dropped, anything unrecognized becomes a stray token.
	fn process(&mut self) -> Vec<Token>;

	/// Location of a block comment that was never closed, if any
	fn unterminated_comment(&self) -> Option<SourceSpan>;
}
