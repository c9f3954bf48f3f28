use super::{Delimiter, Depth, Match};
use crate::cursor::Cursor;
use crate::error::{self, Error};

/// Find the closing run for the opening run at the cursor position.
///
/// The cursor must be positioned on the first brace of an opening run of the given `delimiter`.
/// Nested runs of either width are skipped as a whole.
/// A parameter opening (`{{{`) is always preferred over a template opening (`{{`) at the same position.
///
/// Open runs are tracked on an explicit stack instead of through recursion,
/// so the native stack does not grow with the nesting depth of the input.
/// Opening a run deeper than `depth.limit` is an error.
///
/// If the scanned range ends before the run is closed,
/// the returned match extends to the end of the range and is marked as unterminated.
pub(crate) fn match_run(cursor: &Cursor, delimiter: Delimiter, depth: Depth) -> Result<Match, Error> {
	let start = cursor.position();
	let mut cursor = cursor.clone();
	let mut open = Vec::with_capacity(4);

	push(&mut open, delimiter, &cursor, depth)?;
	cursor.advance(delimiter.width());

	while let Some(&innermost) = open.last() {
		if !cursor.skip_to2(b'{', b'}') {
			return Ok(Match {
				range: start..cursor.end(),
				terminated: false,
			});
		}

		if let Some(nested) = Delimiter::open_at(&cursor) {
			push(&mut open, nested, &cursor, depth)?;
			cursor.advance(nested.width());
		} else if cursor.starts_with(innermost.close()) {
			open.pop();
			cursor.advance(innermost.width());
		} else {
			// A lone brace, or a closing run of the wrong width.
			cursor.advance(1);
		}
	}

	Ok(Match {
		range: start..cursor.position(),
		terminated: true,
	})
}

/// Push a newly opened run on the stack, checking the depth limit.
fn push(open: &mut Vec<Delimiter>, delimiter: Delimiter, cursor: &Cursor, depth: Depth) -> Result<(), Error> {
	if depth.current + open.len() >= depth.limit {
		log::debug!(
			"brace nesting depth limit of {} exceeded at byte {}",
			depth.limit,
			cursor.position()
		);
		return Err(error::DepthLimitExceeded {
			position: cursor.position(),
			len: delimiter.width(),
			limit: depth.limit,
		}
		.into());
	}
	open.push(delimiter);
	Ok(())
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{assert, check, let_assert};

	fn find(source: &str, limit: usize) -> Result<Match, Error> {
		let cursor = Cursor::new(source, 0, source.len());
		let_assert!(Some(delimiter) = Delimiter::open_at(&cursor));
		match_run(&cursor, delimiter, Depth { current: 0, limit })
	}

	fn terminated(range: std::ops::Range<usize>) -> Match {
		Match { range, terminated: true }
	}

	fn unterminated(range: std::ops::Range<usize>) -> Match {
		Match { range, terminated: false }
	}

	#[test]
	fn test_simple_runs() {
		check!(find("{{a}}", 10) == Ok(terminated(0..5)));
		check!(find("{{{a}}}", 10) == Ok(terminated(0..7)));
		check!(find("{{a}} trailing", 10) == Ok(terminated(0..5)));
		check!(find("{{}}", 10) == Ok(terminated(0..4)));
	}

	#[test]
	fn test_nested_runs() {
		check!(find("{{a{{{b}}}c}}", 10) == Ok(terminated(0..13)));
		check!(find("{{a|{{b|{{c}}}}}}", 10) == Ok(terminated(0..17)));
		check!(find("{{{a|{{b}}}}}", 10) == Ok(terminated(0..13)));
		check!(find("{{Example2|{{{Param3}}}{{{Param4}}}}}", 10) == Ok(terminated(0..37)));
	}

	#[test]
	fn test_parameter_takes_priority() {
		// The first three braces open a parameter, so the run ends at the first `}}}`.
		check!(find("{{{{a}}}}", 10) == Ok(terminated(0..8)));
		// A template only closes on `}}`, the third brace is left over.
		check!(find("{{a}}}", 10) == Ok(terminated(0..5)));
	}

	#[test]
	fn test_lone_braces_are_text() {
		check!(find("{{a}b{c}}", 10) == Ok(terminated(0..9)));
		check!(find("{{{a}}b}}}", 10) == Ok(terminated(0..10)));
	}

	#[test]
	fn test_unterminated() {
		check!(find("{{", 10) == Ok(unterminated(0..2)));
		check!(find("{{a}", 10) == Ok(unterminated(0..4)));
		check!(find("{{{a}}", 10) == Ok(unterminated(0..6)));
		check!(find("{{a{{b}}", 10) == Ok(unterminated(0..8)));
	}

	#[test]
	fn test_scan_stops_at_range_end() {
		let source = "{{a}}";
		let cursor = Cursor::new(source, 0, 3);
		check!(match_run(&cursor, Delimiter::Template, Depth { current: 0, limit: 10 }) == Ok(unterminated(0..3)));
	}

	#[test]
	fn test_multibyte_text() {
		check!(find("{{héllo|wörld}}", 10) == Ok(terminated(0..17)));
	}

	#[test]
	fn test_depth_limit() {
		check!(find("{{a{{b}}}}", 2) == Ok(terminated(0..10)));

		let_assert!(Err(Error::DepthLimitExceeded(e)) = find("{{a{{b}}}}", 1));
		assert!(e.position == 3);
		assert!(e.len == 2);
		assert!(e.limit == 1);

		let_assert!(Err(Error::DepthLimitExceeded(e)) = find("{{{a}}}", 0));
		assert!(e.position == 0);
		assert!(e.len == 3);
	}

	#[test]
	fn test_depth_limit_counts_enclosing_runs() {
		let source = "{{a}}";
		let cursor = Cursor::new(source, 0, source.len());
		check!(match_run(&cursor, Delimiter::Template, Depth { current: 1, limit: 2 }).is_ok());
		check!(match_run(&cursor, Delimiter::Template, Depth { current: 2, limit: 2 }).is_err());
	}

	#[test]
	fn test_deep_unterminated_input_fails_closed() {
		// Every three braces open a parameter.
		let source = "{{".repeat(10_000);
		let_assert!(Err(Error::DepthLimitExceeded(e)) = find(&source, 100));
		check!(e.position == 300);
		check!(e.len == 3);

		let source = "{{a".repeat(10_000);
		let_assert!(Err(Error::DepthLimitExceeded(e)) = find(&source, 100));
		check!(e.position == 300);
		check!(e.len == 2);
	}
}
