use boardmap::{CompletenessPolicy, MappingError, PlannerConfig, PlannerError, PlannerSession};
use rstest::*;
use std::path::{Path, PathBuf};
use subprocess::{Exec, ExitStatus, Popen, PopenConfig, PopenError, Redirection};
use tempfile::TempDir;

fn manifest_path(relative: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Reads `<fixture>.pins.json` next to the Verilog fixture
fn read_pins(source_path: &Path) -> Vec<(String, Option<String>)> {
	let pins_path = source_path.with_extension("pins.json");
	let text = std::fs::read_to_string(&pins_path).expect("every fixture needs a pin file");
	let json: serde_json::Value = serde_json::from_str(&text).unwrap();
	json["pins"]
		.as_object()
		.expect("pins object")
		.iter()
		.map(|(board, port)| (board.clone(), port.as_str().map(String::from)))
		.collect()
}

/// Loads the fixture, applies its pin file and commits the wrapper
fn plan(source_path: &Path, out_dir: &Path) -> Result<PathBuf, PlannerError> {
	let mut session = PlannerSession::new(PlannerConfig {
		completeness: CompletenessPolicy::Complete,
		..Default::default()
	});
	session.load_module(source_path)?;
	for (board, port) in read_pins(source_path) {
		session.select(&board, port.as_deref())?;
	}
	session.commit(out_dir)
}

/// Returns Ok(false) when iverilog is not installed
fn run_iverilog(iverilog_path: &str, input_paths: &[PathBuf], out_dir: &Path) -> Result<bool, String> {
	let bin_file = out_dir.join("sim.vvp");
	let mut args = vec![
		iverilog_path.to_string(),
		"-Wall".into(),
		"-o".into(),
		bin_file.to_string_lossy().into_owned(),
	];
	args.extend(input_paths.iter().map(|p| p.to_string_lossy().into_owned()));

	let mut p = match Popen::create(&args, PopenConfig::default()) {
		Ok(p) => p,
		Err(PopenError::IoError(err)) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
		Err(err) => return Err(format!("failed to spawn iverilog: {}", err)),
	};

	use ExitStatus::*;
	match p.wait().map_err(|e| e.to_string())? {
		Exited(0) => Ok(true),
		Exited(err) => Err(format!("Exit code: {}", err)),
		Signaled(signum) => Err(format!("Signaled: {}", signum)),
		Other(err) => Err(format!("Other: {}", err)),
		Undetermined => panic!("cannot determine exit code"),
	}
}

#[fixture]
fn out_dir() -> TempDir {
	tempfile::tempdir().unwrap()
}

#[rstest]
fn test_plan_and_compile(#[files("tests/input/*.v")] path: PathBuf, out_dir: TempDir) {
	let wrapper = plan(&path, out_dir.path()).expect("planning failed");
	let text = std::fs::read_to_string(&wrapper).unwrap();
	assert!(text.contains("module DevelopmentBoard("));
	assert!(text.trim_end().ends_with("endmodule"));

	if std::env::var("NO_IVERILOG").is_ok() {
		return;
	}

	let iverilog_path = std::env::var("IVERILOG_PATH").unwrap_or("iverilog".into());
	match run_iverilog(&iverilog_path, &[wrapper.clone(), path.clone()], out_dir.path()) {
		Ok(true) => {},
		Ok(false) => eprintln!("iverilog not found, skipping compilation of {:?}", path),
		Err(e) => {
			eprintln!("iverilog failed: {}", e);
			eprintln!("Faulty wrapper follows:");
			eprintln!("============================");
			eprintln!("{}", text);
			eprintln!("============================");
			panic!("iverilog failed");
		},
	}
}

#[rstest]
fn test_partial_pins_rejected_when_complete_required(out_dir: TempDir) {
	let mut session = PlannerSession::new(PlannerConfig {
		completeness: CompletenessPolicy::Complete,
		..Default::default()
	});
	session.load_module(manifest_path("tests/input/vga_core.v")).unwrap();
	session.select("clk", Some("clk")).unwrap();

	let err = session.commit(out_dir.path()).unwrap_err();
	match err {
		PlannerError::Mapping(MappingError::IncompleteMapping { mapped, unmapped }) => {
			assert_eq!(mapped, 1);
			assert_eq!(unmapped, ["rst", "hsync", "vsync", "rgb"]);
		},
		other => panic!("unexpected error {:?}", other),
	}
}

fn pinplanner(args: &[&str]) -> subprocess::CaptureData {
	Exec::cmd(env!("CARGO_BIN_EXE_pinplanner"))
		.args(args)
		.cwd(env!("CARGO_MANIFEST_DIR"))
		.env("NO_COLOR", "1")
		.stdout(Redirection::Pipe)
		.stderr(Redirection::Pipe)
		.capture()
		.expect("failed to run pinplanner")
}

#[rstest]
fn test_cli_generate_with_pin_file(out_dir: TempDir) {
	let dir = out_dir.path().to_str().unwrap();
	let result = pinplanner(&[
		"generate",
		"tests/input/vga_core.v",
		"--pins",
		"tests/input/vga_core.pins.json",
		"--map",
		"led1=rgb",
		"--map",
		"rgb=",
		"-o",
		dir,
	]);
	assert!(result.success(), "stderr: {}", result.stderr_str());

	let text = std::fs::read_to_string(out_dir.path().join("DevelopmentBoard.v")).unwrap();
	assert!(text.contains("    .rgb(led1)"));
	assert!(!text.contains("(rgb)"));
}

#[rstest]
fn test_cli_duplicate_writes_nothing(out_dir: TempDir) {
	let dir = out_dir.path().to_str().unwrap();
	let result = pinplanner(&[
		"generate",
		"tests/input/led_blink.v",
		"-m",
		"clk=clk",
		"-m",
		"reset=clk",
		"-o",
		dir,
	]);
	assert!(!result.success());
	assert!(result.stderr_str().contains("Duplicate signal mapping"));
	assert!(!out_dir.path().join("DevelopmentBoard.v").exists());
}

#[test]
fn test_cli_ports_json() {
	let result = pinplanner(&["ports", "tests/input/led_blink.v", "--json", "--sort-ports"]);
	assert!(result.success(), "stderr: {}", result.stderr_str());

	let json: serde_json::Value = serde_json::from_str(&result.stdout_str()).unwrap();
	assert_eq!(json["name"], "led_blink");
	assert_eq!(json["ports"], serde_json::json!(["B2", "B3", "clk", "led1", "led2", "reset"]));
}

#[test]
fn test_cli_stdout_preview() {
	let result = pinplanner(&["generate", "tests/input/led_blink.v", "--stdout", "-m", "led1=5"]);
	assert!(result.success(), "stderr: {}", result.stderr_str());
	assert!(result.stdout_str().contains("led_blink led_blink_inst(\n    .led1(led1)\n);"));
}

#[test]
fn test_cli_missing_module() {
	let result = pinplanner(&["ports", "tests/input/vga_core.pins.json"]);
	assert!(!result.success());
	assert!(result.stderr_str().contains("Could not find module declaration"));
}

#[rstest]
fn test_cli_unterminated_comment_warns_once(out_dir: TempDir) {
	let source = out_dir.path().join("open_comment.v");
	std::fs::write(&source, "`timescale 1ns / 1ns\nmodule open_comment(input clk, output led1);\n/* forgot to close\n").unwrap();

	let result = pinplanner(&["ports", source.to_str().unwrap()]);
	assert!(result.success(), "stderr: {}", result.stderr_str());
	assert_eq!(result.stderr_str().matches("Block comment is never closed").count(), 1);
	assert!(result.stdout_str().contains("found 2 inputs and outputs"));
}
