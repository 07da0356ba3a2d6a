use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
	static ref VALID_ID_REGEX: Regex = Regex::new(r"^[a-zA-Z_][0-9a-zA-Z_]*$").unwrap();
}

pub(crate) const DIRECTIONS: &[&str] = &["input", "output", "inout"];

pub(crate) const NET_TYPES: &[&str] = &[
	"wire", "tri", "tri0", "tri1", "wand", "wor", "triand", "trior", "trireg", "uwire", "supply0", "supply1",
];

pub(crate) const VARIABLE_TYPES: &[&str] = &[
	"reg", "logic", "integer", "time", "real", "realtime", "var", "bit", "int", "byte", "shortint", "longint",
];

pub(crate) const SIGNEDNESS: &[&str] = &["signed", "unsigned"];

/// Checks if given text is a plain identifier
pub fn is_valid_identifier(name: &str) -> bool {
	VALID_ID_REGEX.is_match(name)
}

/// Checks (case-insensitively) whether the word is a direction or a type keyword.
/// Such words may precede a port name but never are one.
pub fn is_reserved_word(name: &str) -> bool {
	[DIRECTIONS, NET_TYPES, VARIABLE_TYPES, SIGNEDNESS]
		.iter()
		.flat_map(|words| words.iter())
		.any(|w| w.eq_ignore_ascii_case(name))
}

/// A port name is a plain identifier that is not a reserved word
pub fn is_valid_port_name(name: &str) -> bool {
	is_valid_identifier(name) && !is_reserved_word(name)
}
