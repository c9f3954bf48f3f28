//! Print the templates of a wikitext document as JSON.
//!
//! Reads the file given as first argument, or standard input if there is none.
//! Set `RUST_LOG=trace` to see which template candidates are dropped.
use std::io::Read;
use std::process::ExitCode;

use wikitemplate::Parser;

fn read_source() -> std::io::Result<String> {
	match std::env::args_os().nth(1) {
		Some(path) => std::fs::read_to_string(path),
		None => {
			let mut source = String::new();
			std::io::stdin().read_to_string(&mut source)?;
			Ok(source)
		},
	}
}

pub fn main() -> ExitCode {
	env_logger::init();

	let source = match read_source() {
		Ok(x) => x,
		Err(e) => {
			eprintln!("Failed to read input: {e}");
			return ExitCode::FAILURE;
		},
	};

	let tree = match Parser::new().parse(&source) {
		Ok(x) => x,
		Err(e) => {
			eprintln!("{e}");
			eprint!("{}", e.source_highlighting(&source));
			return ExitCode::FAILURE;
		},
	};

	let json = wikitemplate::json::to_value(&tree).and_then(|value| serde_json::to_string_pretty(&value));
	match json {
		Ok(json) => {
			println!("{json}");
			ExitCode::SUCCESS
		},
		Err(e) => {
			eprintln!("Failed to serialize parse tree: {e}");
			ExitCode::FAILURE
		},
	}
}
