mod pin_assignments;

use boardmap::codegen::WRAPPER_FILE_NAME;
use boardmap::{CompletenessPolicy, PlannerConfig, PlannerSession, BOARD_SIGNALS};
use clap::{command, Arg, ArgAction, ArgMatches, Command};
use log::{info, warn};
use miette::{IntoDiagnostic, NamedSource};
use pin_assignments::{parse_assignment, PinAssignment, PinFile};
use portparse::{ModuleDeclaration, ParseError, PortOrder, ProvidesDiagnostic, SourceFile};
use std::fs;
use std::path::{Path, PathBuf};

fn cli() -> Command {
	let source_arg = Arg::new("source")
		.required(true)
		.value_name("SOURCE")
		.value_parser(clap::value_parser!(PathBuf))
		.help("Verilog file declaring the module");

	let sort_arg = Arg::new("sort-ports")
		.long("sort-ports")
		.action(ArgAction::SetTrue)
		.help("Order ports alphabetically instead of by declaration");

	command!()
		.subcommand_required(true)
		.arg(
			Arg::new("verbose")
				.short('v')
				.long("verbose")
				.action(ArgAction::Count)
				.global(true)
				.help("Log more (repeat for debug output); RUST_LOG overrides"),
		)
		.subcommand(
			Command::new("ports")
				.about("Lists the ports of the module declared in SOURCE")
				.arg(source_arg.clone())
				.arg(sort_arg.clone())
				.arg(
					Arg::new("json")
						.long("json")
						.action(ArgAction::SetTrue)
						.help("Print the module declaration as JSON"),
				),
		)
		.subcommand(Command::new("signals").about("Lists the development board signals"))
		.subcommand(
			Command::new("generate")
				.about("Connects module ports to board signals and writes the wrapper")
				.arg(source_arg)
				.arg(sort_arg)
				.arg(
					Arg::new("map")
						.short('m')
						.long("map")
						.value_name("BOARD=PORT")
						.action(ArgAction::Append)
						.value_parser(parse_assignment)
						.help("Connect a board signal to a port (name, or number from `ports`; empty or 0 disconnects)"),
				)
				.arg(
					Arg::new("pins")
						.long("pins")
						.value_name("FILE")
						.value_parser(clap::value_parser!(PathBuf))
						.help("JSON file with pin assignments, applied before --map"),
				)
				.arg(
					Arg::new("output")
						.short('o')
						.long("output")
						.value_name("DIR")
						.value_parser(clap::value_parser!(PathBuf))
						.default_value(".")
						.help("Directory receiving the wrapper"),
				)
				.arg(
					Arg::new("output-name")
						.long("output-name")
						.value_name("NAME")
						.default_value(WRAPPER_FILE_NAME)
						.help("File name of the wrapper"),
				)
				.arg(
					Arg::new("require-complete")
						.long("require-complete")
						.action(ArgAction::SetTrue)
						.help("Refuse to generate unless every module port is connected"),
				)
				.arg(
					Arg::new("stdout")
						.long("stdout")
						.action(ArgAction::SetTrue)
						.help("Print the wrapper instead of writing it"),
				),
		)
}

fn init_logging(verbosity: u8) {
	let default_filter = match verbosity {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
		.format_timestamp(None)
		.init();
}

fn path_arg<'a>(matches: &'a ArgMatches, id: &str) -> miette::Result<&'a PathBuf> {
	matches
		.get_one::<PathBuf>(id)
		.ok_or_else(|| miette::miette!("Missing argument '{}'", id))
}

fn port_order(matches: &ArgMatches) -> PortOrder {
	if matches.get_flag("sort-ports") {
		PortOrder::Alphabetical
	}
	else {
		PortOrder::Declaration
	}
}

/// Reads SOURCE and loads its module into the session
fn load_module<'s>(session: &'s mut PlannerSession, path: &Path) -> miette::Result<&'s ModuleDeclaration> {
	let source = fs::read_to_string(path).map_err(|source| {
		ParseError::IoError {
			path: path.to_path_buf(),
			source,
		}
		.to_miette_report()
	})?;

	let file = SourceFile::lex(&source);
	for warning in file.warnings() {
		let report = miette::Report::new(warning)
			.with_source_code(NamedSource::new(path.display().to_string(), source.clone()));
		eprintln!("{:?}", report);
	}

	if !file.declares_timescale() {
		warn!(
			"'{}' has no `timescale directive; the wrapper uses `timescale 1ns / 1ns",
			path.display()
		);
	}

	let module = file.extract().map_err(|e| e.to_miette_report())?;
	Ok(session.load_declaration(module))
}

fn list_ports(matches: &ArgMatches) -> miette::Result<()> {
	let config = PlannerConfig {
		port_order: port_order(matches),
		..Default::default()
	};
	let mut session = PlannerSession::new(config);
	let path = path_arg(matches, "source")?;
	let module = load_module(&mut session, path)?;

	if matches.get_flag("json") {
		println!("{}", serde_json::to_string_pretty(module).into_diagnostic()?);
		return Ok(());
	}

	println!("Module '{}': found {} inputs and outputs", module.name(), module.ports().len());
	for (index, port) in module.ports().iter().enumerate() {
		println!("{:>4}  {}", index + 1, port);
	}
	Ok(())
}

fn list_signals() {
	for (index, signal) in BOARD_SIGNALS.iter().enumerate() {
		println!(
			"{:>4}  {:<8} {:<6} {:>2} bit  {}",
			index, signal.name, signal.direction, signal.width, signal.description
		);
	}
}

fn generate(matches: &ArgMatches) -> miette::Result<()> {
	let completeness = if matches.get_flag("require-complete") {
		CompletenessPolicy::Complete
	}
	else {
		CompletenessPolicy::Partial
	};

	let config = PlannerConfig {
		completeness,
		port_order: port_order(matches),
		output_file_name: matches
			.get_one::<String>("output-name")
			.cloned()
			.unwrap_or_else(|| WRAPPER_FILE_NAME.into()),
	};
	let mut session = PlannerSession::new(config);

	let path = path_arg(matches, "source")?;
	let module_name = load_module(&mut session, path)?.name().to_string();

	let mut assignments: Vec<PinAssignment> = Vec::new();
	if let Some(pin_file) = matches.get_one::<PathBuf>("pins") {
		assignments.extend(PinFile::read(pin_file)?.assignments(&module_name)?);
	}
	assignments.extend(matches.get_many::<PinAssignment>("map").into_iter().flatten().cloned());

	for assignment in &assignments {
		assignment.apply(&mut session).map_err(|e| e.to_miette_report())?;
	}

	if matches.get_flag("stdout") {
		print!("{}", session.preview().map_err(|e| e.to_miette_report())?);
		return Ok(());
	}

	let dir = path_arg(matches, "output")?;
	let written = session.commit(dir).map_err(|e| e.to_miette_report())?;
	info!("Committed {} selections", assignments.len());
	println!("Pin plan written to {}", written.display());
	println!("Remember to insert `timescale 1ns / 1ns into all your own modules");
	Ok(())
}

fn main() -> miette::Result<()> {
	let matches = cli().get_matches();
	init_logging(matches.get_count("verbose"));

	match matches.subcommand() {
		Some(("ports", sub)) => list_ports(sub),
		Some(("signals", _)) => {
			list_signals();
			Ok(())
		},
		Some(("generate", sub)) => generate(sub),
		_ => unreachable!("subcommand is required"),
	}
}
