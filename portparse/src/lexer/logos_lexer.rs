use super::{Direction, Lexer, PunctuatorKind, QualifierKind, Token, WordKind};
use crate::core::{SourceSpan, DIRECTIONS, NET_TYPES, SIGNEDNESS, VARIABLE_TYPES};
use logos::{Logos, Skip};

/// Sorts identifier-shaped words into keywords and plain identifiers
fn classify_word(lex: &mut logos::Lexer<TokenKind>) -> WordKind {
	let word = lex.slice();
	if word == "module" {
		return WordKind::Module;
	}

	let lower = word.to_ascii_lowercase();
	let is = |table: &[&str]| table.iter().any(|w| *w == lower);

	if is(DIRECTIONS) {
		WordKind::Direction(match lower.as_str() {
			"input" => Direction::Input,
			"output" => Direction::Output,
			_ => Direction::Inout,
		})
	}
	else if is(NET_TYPES) {
		WordKind::Qualifier(QualifierKind::NetType)
	}
	else if is(VARIABLE_TYPES) {
		WordKind::Qualifier(QualifierKind::VariableType)
	}
	else if is(SIGNEDNESS) {
		WordKind::Qualifier(QualifierKind::Signedness)
	}
	else {
		WordKind::Identifier
	}
}

/// Causes lexer to consume and ignore multi-line comments (/* */).
/// An unterminated comment runs to the end of input.
fn consume_block_comment(lex: &mut logos::Lexer<TokenKind>) -> Skip {
	match lex.remainder().find("*/") {
		Some(offset) => lex.bump(offset + 2),
		None => {
			let span = lex.span();
			let rest = lex.remainder().len();
			lex.extras.unterminated_comment = Some(SourceSpan::new(span.start, span.len() + rest));
			lex.bump(rest);
		},
	}
	Skip
}

/// Causes lexer to consume and ignore single-line comments (//).
/// The terminating newline is left in place.
fn consume_line_comment(lex: &mut logos::Lexer<TokenKind>) -> Skip {
	match lex.remainder().find('\n') {
		Some(offset) => lex.bump(offset),
		None => lex.bump(lex.remainder().len()),
	}
	Skip
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexerContext)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
	#[token("/*", consume_block_comment)]
	#[token("//", consume_line_comment)]
	Ignored,

	#[token("\n")]
	Newline,

	#[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", classify_word)]
	Word(WordKind),

	#[token("(", |_| PunctuatorKind::LPar)]
	#[token(")", |_| PunctuatorKind::RPar)]
	#[token("[", |_| PunctuatorKind::LBracket)]
	#[token("]", |_| PunctuatorKind::RBracket)]
	#[token(",", |_| PunctuatorKind::Comma)]
	#[token(";", |_| PunctuatorKind::Semicolon)]
	#[token("#", |_| PunctuatorKind::Hash)]
	Punctuator(PunctuatorKind),

	/// Any other single character (digits, operators, `$`, backticks...)
	#[token("/")]
	#[regex(r"[^ \t\r\n\f()\[\],;#a-zA-Z_/]")]
	Stray,
}

/// Additional state collected while lexing, owned by logos::Lexer
#[derive(Default, Debug)]
pub struct LexerContext {
	/// Set when a block comment is never closed
	unterminated_comment: Option<SourceSpan>,
}

/// Logos-based lexer implementation
pub struct LogosLexer<'source> {
	lexer: logos::Lexer<'source, TokenKind>,
}

impl<'source> Lexer<'source> for LogosLexer<'source> {
	fn new(source: &'source str) -> Self {
		LogosLexer {
			lexer: TokenKind::lexer(source),
		}
	}

	fn process(&mut self) -> Vec<Token> {
		let mut tokens = Vec::new();

		while let Some(token_result) = self.lexer.next() {
			tokens.push(Token {
				// Every character is covered by some rule, but an unmatched
				// sequence would still be noise as far as headers go
				kind: token_result.unwrap_or(TokenKind::Stray),
				range: SourceSpan::new_from_range(&self.lexer.span()),
			});
		}

		tokens
	}

	fn unterminated_comment(&self) -> Option<SourceSpan> {
		self.lexer.extras.unterminated_comment
	}
}
