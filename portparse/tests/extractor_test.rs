use portparse::{declares_timescale, extract, extract_file, ModuleDeclaration, ParseError, PortOrder};
use rstest::rstest;
use std::path::PathBuf;

fn read_fixture(name: &str) -> String {
	let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/input").join(name);
	std::fs::read_to_string(path).expect("fixture should be readable")
}

#[test]
fn comma_delimited_multi_signal_keyword() {
	let decl = extract("module m(input clk, reset, input [7:0] data_in, output data_out);").unwrap();
	assert_eq!(decl.name(), "m");
	assert_eq!(decl.ports(), ["clk", "reset", "data_in", "data_out"]);
}

#[test]
fn line_delimited_matches_comma_delimited() {
	let comma = extract_file(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/input/comma_style.v")).unwrap();
	let lines = extract(&read_fixture("line_style.v")).unwrap();
	assert_eq!(comma, lines);
	assert_eq!(lines.ports(), ["clk", "reset", "data_in", "data_out"]);
}

#[rstest]
#[case("vga_core.v", "vga_core", &["clk", "rst", "hsync", "vsync", "rgb"])]
#[case("legacy_ports.v", "counter", &["clk", "rst", "count"])]
#[case("led_blink.v", "led_blink", &["clk", "reset", "B2", "B3", "led1", "led2"])]
fn fixture_ports(#[case] file: &str, #[case] name: &str, #[case] expected: &[&str]) {
	let decl = extract(&read_fixture(file)).unwrap();
	assert_eq!(decl.name(), name);
	assert_eq!(decl.ports(), expected);
}

#[rstest]
fn extraction_is_idempotent(#[files("tests/input/*.v")] path: PathBuf) {
	let source = std::fs::read_to_string(&path).unwrap();
	let first = extract(&source).unwrap();
	let second = extract(&source).unwrap();
	assert_eq!(first, second);

	let mut seen = std::collections::HashSet::new();
	assert!(first.ports().iter().all(|p| seen.insert(p.clone())), "duplicate port in {:?}", path);
}

#[rstest]
#[case("")]
#[case("// module commented(a, b);")]
#[case("module broken(input a, output b")]
#[case("Module wrong_case(a);")]
fn no_module_found(#[case] source: &str) {
	assert!(matches!(extract(source), Err(ParseError::NoModuleFound)));
}

#[test]
fn unreadable_file() {
	let err = extract_file("tests/input/does_not_exist.v").unwrap_err();
	match err {
		ParseError::IoError { path, .. } => assert!(path.ends_with("does_not_exist.v")),
		other => panic!("unexpected error {:?}", other),
	}
}

#[rstest]
#[case("comma_style.v", true)]
#[case("led_blink.v", false)]
fn timescale(#[case] file: &str, #[case] expected: bool) {
	assert_eq!(declares_timescale(&read_fixture(file)), expected);
}

#[test]
fn alphabetical_ordering() {
	let decl = extract(&read_fixture("vga_core.v")).unwrap();
	let sorted = decl.ordered(PortOrder::Alphabetical);
	assert_eq!(sorted.ports(), ["clk", "hsync", "rgb", "rst", "vsync"]);
}

#[test]
fn declaration_serializes_to_json() {
	let decl = ModuleDeclaration::new("vga_core", ["hsync", "vsync"]);
	let json = serde_json::to_string(&decl).unwrap();
	assert_eq!(json, r#"{"name":"vga_core","ports":["hsync","vsync"]}"#);
}
