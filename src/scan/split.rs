use std::ops::Range;

use super::{match_run, Delimiter, Depth};
use crate::cursor::Cursor;
use crate::error::Error;

/// Split the body of a template on top-level pipes.
///
/// `body` is the range of the template without its outer braces.
/// `depth` is the depth of the template body, so runs inside it are one level deeper.
///
/// The first range is the name slot, the others are the argument slots in source order.
/// The result always contains at least one (possibly empty) range.
///
/// Pipes inside nested templates and parameters do not split anything:
/// nested runs are skipped as a whole.
pub(crate) fn split_arguments(source: &str, body: Range<usize>, depth: Depth) -> Result<Vec<Range<usize>>, Error> {
	let mut slots = Vec::with_capacity(4);
	let mut cursor = Cursor::new(source, body.start, body.end);
	let mut slot_start = body.start;

	while cursor.skip_to2(b'{', b'|') {
		if cursor.peek(0) == b'|' {
			slots.push(slot_start..cursor.position());
			cursor.advance(1);
			slot_start = cursor.position();
		} else if let Some(delimiter) = Delimiter::open_at(&cursor) {
			let nested = match_run(&cursor, delimiter, depth)?;
			cursor.seek(nested.range.end);
		} else {
			cursor.advance(1);
		}
	}
	slots.push(slot_start..body.end);

	Ok(slots)
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{check, let_assert};

	/// Split the body of a complete template.
	fn split(template: &str) -> Vec<&str> {
		let depth = Depth { current: 1, limit: 100 };
		let body = 2..template.len() - 2;
		let_assert!(Ok(slots) = split_arguments(template, body, depth));
		slots.into_iter().map(|range| &template[range]).collect()
	}

	#[test]
	fn test_no_arguments() {
		check!(split("{{}}") == [""]);
		check!(split("{{Example}}") == ["Example"]);
	}

	#[test]
	fn test_arguments() {
		check!(split("{{Example|Arg1|Name1=Arg2}}") == ["Example", "Arg1", "Name1=Arg2"]);
		check!(split("{{Example||}}") == ["Example", "", ""]);
		check!(split("{{|}}") == ["", ""]);
	}

	#[test]
	fn test_nested_runs_are_opaque() {
		check!(split("{{Example|{{Example2|a|b}}|c}}") == ["Example", "{{Example2|a|b}}", "c"]);
		check!(split("{{Example|{{{Param|default}}}|c}}") == ["Example", "{{{Param|default}}}", "c"]);
		check!(split("{{Example|x={{a|{{{b|c}}}}}}}") == ["Example", "x={{a|{{{b|c}}}}}"]);
	}

	#[test]
	fn test_lone_braces_are_text() {
		check!(split("{{Example|{a|b}}}") == ["Example", "{a", "b}"]);
	}

	#[test]
	fn test_multiline() {
		check!(split("{{Example\n|Arg1\n|Name1=Arg2\n}}") == ["Example\n", "Arg1\n", "Name1=Arg2\n"]);
	}

	#[test]
	fn test_depth_limit() {
		let template = "{{a|{{b}}}}";
		check!(split_arguments(template, 2..9, Depth { current: 1, limit: 1 }).is_err());
		check!(split_arguments(template, 2..9, Depth { current: 1, limit: 2 }).is_ok());
	}
}
