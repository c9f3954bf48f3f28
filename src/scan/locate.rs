use std::ops::Range;

use super::{match_run, Delimiter, Depth};
use crate::cursor::Cursor;
use crate::error::Error;

/// Find all top-level templates in `source[range]`.
///
/// Returns the ranges of the templates including their braces, in order of appearance.
///
/// Parameters at the top level are skipped entirely.
/// Templates nested inside them are not reported here:
/// they are found when the parameter text is parsed as part of an argument value.
///
/// Unterminated runs, runs shorter than five characters and parser functions (`{{#...}}`) are dropped.
/// Their contents are not scanned again.
pub(crate) fn locate_templates(source: &str, range: Range<usize>, depth: Depth) -> Result<Vec<Range<usize>>, Error> {
	let mut templates = Vec::new();
	let mut cursor = Cursor::new(source, range.start, range.end);

	while cursor.skip_to(b'{') {
		let delimiter = match Delimiter::open_at(&cursor) {
			Some(x) => x,
			None => {
				cursor.advance(1);
				continue;
			},
		};

		let found = match_run(&cursor, delimiter, depth)?;
		cursor.seek(found.range.end);

		if delimiter == Delimiter::Parameter {
			continue;
		}
		if !found.terminated {
			log::trace!("dropping unterminated template at byte {}", found.range.start);
			continue;
		}
		if !is_valid_template(&source.as_bytes()[found.range.clone()]) {
			log::trace!("dropping template candidate {:?}", &source[found.range.clone()]);
			continue;
		}
		templates.push(found.range);
	}

	Ok(templates)
}

/// Check if a terminated template run is reported as a template.
///
/// It must have at least one character between the braces,
/// and it must not be a parser function.
fn is_valid_template(span: &[u8]) -> bool {
	span.len() >= 5
		&& span.starts_with(b"{{")
		&& span.ends_with(b"}}")
		&& span[2] != b'#'
}
