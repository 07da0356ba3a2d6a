use crate::SignalMapping;
use itertools::Itertools;

/// Name of the generated top-level module
pub const WRAPPER_MODULE_NAME: &str = "DevelopmentBoard";

/// Default file name of the generated artifact
pub const WRAPPER_FILE_NAME: &str = "DevelopmentBoard.v";

/// Board-level header, emitted verbatim
const WRAPPER_HEADER: &str = r#"`timescale 1ns / 1ns

module DevelopmentBoard(
    input wire clk,  // 50MHz
    input wire reset, B2, B3, B4, B5,
    // reset is "a"
    // B2 is "s"
    // B3 is "d"
    // B4 is "f"
    // B5 is "g"
    output wire h_sync, v_sync,
    output wire [15:0] rgb,
    output wire led1,
    output wire led2,
    output wire led3,
    output wire led4,
    output wire led5
);
"#;

const WRAPPER_FOOTER: &str = "endmodule\n";

/// Name given to the instance of the user's module
pub fn instance_name(module_name: &str) -> String {
	format!("{}_inst", module_name)
}

/// Formats one port connection
fn connection_line(port: &str, board_signal: &str) -> String {
	format!("    .{}({})", port, board_signal)
}

/// Renders the complete wrapper module instantiating `module_name`.
/// Connections appear in mapping order.
pub fn render(module_name: &str, mapping: &SignalMapping) -> String {
	let connections = mapping
		.iter()
		.map(|c| connection_line(&c.port, &c.board_signal))
		.join(",\n");

	format!(
		"{header}\n{module} {instance}(\n{connections}\n);\n\n{footer}",
		header = WRAPPER_HEADER,
		module = module_name,
		instance = instance_name(module_name),
		connections = connections,
		footer = WRAPPER_FOOTER,
	)
}
