use crate::core::{is_valid_port_name, DiagnosticBuilder, PlannerDiagnostic, SourceSpan};
use crate::lexer::{Direction, Lexer, LogosLexer, PunctuatorKind, Token, TokenKind, WordKind};
use crate::{ModuleDeclaration, ParseError};
use itertools::Itertools;
use log::{debug, info, warn};
use std::ops::Range;
use std::path::Path;

/// Location of the first module header in a token stream
#[derive(Debug, Clone)]
struct ModuleHeader {
	/// Module name
	name: SourceSpan,

	/// Token indices between the port list parentheses
	port_list: Range<usize>,
}

/// Source text lexed once, shared by every query made on it
pub struct SourceFile<'source> {
	source: &'source str,
	tokens: Vec<Token>,
	unterminated_comment: Option<SourceSpan>,
}

impl<'source> SourceFile<'source> {
	pub fn lex(source: &'source str) -> Self {
		let mut lexer = LogosLexer::new(source);
		let tokens = lexer.process();
		Self {
			source,
			tokens,
			unterminated_comment: lexer.unterminated_comment(),
		}
	}

	pub fn source(&self) -> &'source str {
		self.source
	}

	/// Extracts the name and ports of the first module declared in the file.
	///
	/// Comments never take part in matching. Only the first well-formed header
	/// (`module name (...)`, optionally with a `#(...)` parameter block) is read.
	pub fn extract(&self) -> Result<ModuleDeclaration, ParseError> {
		let header = locate_header(&self.tokens).ok_or(ParseError::NoModuleFound)?;

		let mut parser = PortListParser::new(self.source);
		for token in &self.tokens[header.port_list.clone()] {
			parser.feed(token);
		}

		let name = header.name.slice(self.source);
		let ports = parser.finish();
		info!("Parsed module '{}' with {} ports", name, ports.len());
		Ok(ModuleDeclaration::new(name, ports))
	}

	/// Checks whether the file carries a `` `timescale `` directive outside comments
	pub fn declares_timescale(&self) -> bool {
		self.tokens.iter().tuple_windows().any(|(tick, word)| {
			tick.kind == TokenKind::Stray
				&& tick.range.slice(self.source) == "`"
				&& tick.range.end() == word.range.start()
				&& word.range.slice(self.source) == "timescale"
		})
	}

	/// Problems that do not prevent extraction
	pub fn warnings(&self) -> Vec<PlannerDiagnostic> {
		self.unterminated_comment
			.map(|span| {
				DiagnosticBuilder::new_warning("Block comment is never closed")
					.label(SourceSpan::new(span.start(), 2), "comment runs from here to the end of the file")
					.code("portparse::unterminated_comment")
					.help("Everything after `/*` is ignored; add the missing `*/`")
					.build()
			})
			.into_iter()
			.collect()
	}
}

/// Extracts the name and ports of the first module declared in `source`.
/// Warnings are logged.
pub fn extract(source: &str) -> Result<ModuleDeclaration, ParseError> {
	let file = SourceFile::lex(source);
	for warning in file.warnings() {
		warn!("{}", warning);
	}
	file.extract()
}

/// Reads the file and extracts the module declaration from it
pub fn extract_file(path: impl AsRef<Path>) -> Result<ModuleDeclaration, ParseError> {
	let path = path.as_ref();
	let source = std::fs::read_to_string(path).map_err(|source| ParseError::IoError {
		path: path.to_path_buf(),
		source,
	})?;
	extract(&source)
}

/// Checks whether the source carries a `` `timescale `` directive outside comments
pub fn declares_timescale(source: &str) -> bool {
	SourceFile::lex(source).declares_timescale()
}

/// Returns index of the first token at or after `pos` that is not a newline
fn skip_newlines(tokens: &[Token], mut pos: usize) -> usize {
	while pos < tokens.len() && tokens[pos].kind == TokenKind::Newline {
		pos += 1;
	}
	pos
}

fn is_punctuator(token: &Token, kind: PunctuatorKind) -> bool {
	token.kind == TokenKind::Punctuator(kind)
}

/// Finds the first `module` keyword followed by a complete header
fn locate_header(tokens: &[Token]) -> Option<ModuleHeader> {
	tokens
		.iter()
		.enumerate()
		.filter(|(_, t)| t.kind == TokenKind::Word(WordKind::Module))
		.find_map(|(pos, _)| match_header(tokens, pos + 1))
}

/// Tries to match `<name> [#( ... )] ( ... )` starting at `pos`
fn match_header(tokens: &[Token], pos: usize) -> Option<ModuleHeader> {
	let mut pos = skip_newlines(tokens, pos);
	let name = tokens.get(pos)?;
	if name.kind != TokenKind::Word(WordKind::Identifier) {
		return None;
	}

	pos = skip_newlines(tokens, pos + 1);
	if is_punctuator(tokens.get(pos)?, PunctuatorKind::Hash) {
		pos = skip_parameter_block(tokens, skip_newlines(tokens, pos + 1))?;
		pos = skip_newlines(tokens, pos);
	}

	if !is_punctuator(tokens.get(pos)?, PunctuatorKind::LPar) {
		return None;
	}

	// The port list ends at the first closing parenthesis
	let open = pos + 1;
	let close = open + tokens[open..].iter().position(|t| is_punctuator(t, PunctuatorKind::RPar))?;

	Some(ModuleHeader {
		name: name.range,
		port_list: open..close,
	})
}

/// Skips a balanced parenthesized group starting at `pos`.
/// Returns index of the token following the group.
fn skip_parameter_block(tokens: &[Token], pos: usize) -> Option<usize> {
	if !is_punctuator(tokens.get(pos)?, PunctuatorKind::LPar) {
		return None;
	}

	let mut depth = 0usize;
	for (offset, token) in tokens[pos..].iter().enumerate() {
		match token.kind {
			TokenKind::Punctuator(PunctuatorKind::LPar) => depth += 1,
			TokenKind::Punctuator(PunctuatorKind::RPar) => {
				depth -= 1;
				if depth == 0 {
					return Some(pos + offset + 1);
				}
			},
			_ => {},
		}
	}

	None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	/// At the start of a declaration, a direction keyword may follow
	SeekingDirection,

	/// Collecting port names
	SeekingIdentifier,

	/// Hit something that is not a name; ignore the rest of the declaration
	Skipping,
}

/// A single declaration between separators
#[derive(Debug, Default)]
struct Declaration {
	direction: Option<Direction>,
	names: Vec<SourceSpan>,
	has_stray: bool,
	extent: Option<SourceSpan>,
}

impl Declaration {
	fn extend(&mut self, span: SourceSpan) {
		self.extent = Some(match self.extent {
			Some(e) => SourceSpan::new_between(e.start(), span.end()),
			None => span,
		});
	}
}

/// Port list state machine.
///
/// Commas and newlines separate declarations, and so does every direction
/// keyword, which makes both comma-delimited and line-delimited headers
/// work. Bit-width brackets and net qualifiers are consumed without
/// evaluation.
struct PortListParser<'source> {
	source: &'source str,
	state: State,
	bracket_depth: usize,
	current: Declaration,
	candidates: Vec<SourceSpan>,
}

impl<'source> PortListParser<'source> {
	fn new(source: &'source str) -> Self {
		Self {
			source,
			state: State::SeekingDirection,
			bracket_depth: 0,
			current: Declaration::default(),
			candidates: Vec::new(),
		}
	}

	fn feed(&mut self, token: &Token) {
		use PunctuatorKind::*;
		use TokenKind::*;

		if token.kind != Newline {
			self.current.extend(token.range);
		}

		if self.bracket_depth > 0 {
			match token.kind {
				Punctuator(LBracket) => self.bracket_depth += 1,
				Punctuator(RBracket) => self.bracket_depth -= 1,
				Punctuator(Comma) => {
					self.bracket_depth = 0;
					self.finish_declaration();
				},
				_ => {},
			}
			return;
		}

		match token.kind {
			Punctuator(Comma) | Newline => self.finish_declaration(),

			Word(WordKind::Direction(direction)) => {
				self.finish_declaration();
				self.current.direction = Some(direction);
				self.current.extend(token.range);
				self.state = State::SeekingIdentifier;
			},

			Word(WordKind::Qualifier(_)) if self.current.names.is_empty() => {
				if self.state == State::SeekingDirection {
					self.state = State::SeekingIdentifier;
				}
			},

			Punctuator(LBracket) => self.bracket_depth = 1,

			Word(WordKind::Identifier) if self.state != State::Skipping => {
				self.current.names.push(token.range);
				self.state = State::SeekingIdentifier;
			},

			Word(WordKind::Identifier) | Ignored => {},

			_ => {
				self.current.has_stray = true;
				self.state = State::Skipping;
			},
		}
	}

	/// Closes the current declaration and keeps the names it yields
	fn finish_declaration(&mut self) {
		let decl = std::mem::take(&mut self.current);
		self.state = State::SeekingDirection;

		match decl.direction {
			// A direction keyword may introduce several names
			Some(_) => self.candidates.extend(decl.names),

			// Continuation of a previous direction: must be a lone name
			None if decl.names.len() == 1 && !decl.has_stray => self.candidates.extend(decl.names),

			None => {
				if let Some(extent) = decl.extent {
					debug!("Ignoring port list fragment '{}'", extent.slice(self.source));
				}
			},
		}
	}

	/// Returns the unique, valid port names in first-seen order
	fn finish(mut self) -> Vec<String> {
		self.finish_declaration();
		let source = self.source;
		self.candidates
			.iter()
			.map(|span| span.slice(source))
			.filter(|name| is_valid_port_name(name))
			.unique()
			.map(String::from)
			.collect()
	}
}
