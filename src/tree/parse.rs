use std::borrow::Cow;
use std::ops::Range;

use indexmap::IndexMap;

use super::{Arguments, Tree, TEXT_KEY};
use crate::error::Error;
use crate::scan::{locate_templates, split_arguments, Depth};

/// Characters removed from both ends of names, keys and text.
const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Parse `source[range]` into a tree.
///
/// `depth` is the number of runs enclosing the range.
/// Every argument value is parsed again with this function, one level deeper.
pub(crate) fn parse_tree<'a>(source: &'a str, range: Range<usize>, depth: Depth) -> Result<Tree<'a>, Error> {
	let mut templates: IndexMap<Cow<'a, str>, Vec<Arguments<'a>>> = IndexMap::new();
	for template in locate_templates(source, range.clone(), depth)? {
		let (name, arguments) = parse_template(source, template, depth)?;
		templates.entry(Cow::Borrowed(name)).or_default().push(arguments);
	}

	// The text takes the place of a template that has the reserved name.
	let text_index = templates.get_index_of(TEXT_KEY);
	if let Some(index) = text_index {
		log::trace!("template named {TEXT_KEY:?} is replaced by the text");
		templates.shift_remove_index(index);
	}

	let mut tree = Tree::new(trim(&source[range]), templates);
	tree.text_index = text_index;
	Ok(tree)
}

/// Parse a single template occurrence into its name and arguments.
///
/// `range` must be the range of a template found by [`locate_templates()`], including the braces.
fn parse_template<'a>(source: &'a str, range: Range<usize>, depth: Depth) -> Result<(&'a str, Arguments<'a>), Error> {
	let depth = depth.nested();
	let body = range.start + 2..range.end - 2;

	let mut slots = split_arguments(source, body, depth)?.into_iter();
	let name = slots.next().map_or("", |slot| trim(&source[slot]));

	let mut arguments = Arguments::default();
	let mut position = 0usize;
	for slot in slots {
		// The first `=` splits the key from the value, even if it is inside a nested run.
		match memchr::memchr(b'=', &source.as_bytes()[slot.clone()]) {
			Some(offset) => {
				let separator = slot.start + offset;
				let key = trim(&source[slot.start..separator]);
				let value = parse_tree(source, separator + 1..slot.end, depth)?;
				arguments.insert(Cow::Borrowed(key), value);
			},
			None => {
				position += 1;
				let value = parse_tree(source, slot, depth)?;
				arguments.insert(Cow::Owned(position.to_string()), value);
			},
		}
	}

	Ok((name, arguments))
}

fn trim(text: &str) -> &str {
	text.trim_matches(TRIM_CHARS)
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{assert, check, let_assert};

	const DEPTH: Depth = Depth { current: 0, limit: 100 };

	fn parse(source: &str) -> Tree<'_> {
		let_assert!(Ok(tree) = parse_tree(source, 0..source.len(), DEPTH));
		tree
	}

	#[test]
	fn test_trim() {
		check!(trim(" \t\n\r\0\x0Bx \t\n\r\0\x0B") == "x");
		check!(trim("  a b  ") == "a b");
		// Only ASCII whitespace and NUL are trimmed.
		check!(trim("\u{a0}x\u{a0}") == "\u{a0}x\u{a0}");
	}

	#[test]
	fn test_parse_template() {
		let source = "{{ Example | Arg1 | Name1 = Arg2 }}";
		let_assert!(Ok((name, arguments)) = parse_template(source, 0..source.len(), DEPTH));
		check!(name == "Example");
		check!(arguments.iter().map(|(key, _)| key).collect::<Vec<_>>() == ["1", "Name1"]);
		check!(arguments.positional(1).map(Tree::text) == Some("Arg1"));
		check!(arguments.get("Name1").map(Tree::text) == Some("Arg2"));
	}

	#[test]
	fn test_empty_named_value() {
		let tree = parse("{{Foo|Bar=}}");
		let_assert!(Some(arguments) = tree.first("Foo"));
		check!(arguments.get("Bar").map(Tree::text) == Some(""));
	}

	#[test]
	fn test_equals_in_name_slot() {
		let tree = parse("{{Foo=Bar}}");
		let_assert!(Some(arguments) = tree.first("Foo=Bar"));
		check!(arguments.is_empty());
	}

	#[test]
	fn test_first_equals_splits_even_when_nested() {
		// The `=` inside the nested template is found first.
		let tree = parse("{{Foo|{{Bar|x=1}}}}");
		let_assert!(Some(arguments) = tree.first("Foo"));
		check!(arguments.iter().map(|(key, _)| key).collect::<Vec<_>>() == ["{{Bar|x"]);
		check!(arguments.get("{{Bar|x").map(Tree::text) == Some("1}}"));
	}

	#[test]
	fn test_numeric_name_overwrites_positional() {
		let tree = parse("{{Foo|a|1=b|c}}");
		let_assert!(Some(arguments) = tree.first("Foo"));
		check!(arguments.iter().map(|(k, v)| (k, v.text())).collect::<Vec<_>>() == [("1", "b"), ("2", "c")]);
	}

	#[test]
	fn test_reserved_name_is_replaced_by_text() {
		let tree = parse("{{_text|a}}{{Other}}");
		assert!(!tree.contains(TEXT_KEY));
		check!(tree.contains("Other"));
		check!(tree.text() == "{{_text|a}}{{Other}}");
		check!(tree.text_index() == Some(0));
	}

	#[test]
	fn test_reserved_name_keeps_its_position() {
		check!(parse("{{A}}{{_text}}{{B}}{{_text}}").text_index() == Some(1));
		check!(parse("{{A}}{{B}}").text_index() == None);
	}

	#[test]
	fn test_multibyte_names_and_values() {
		let tree = parse("{{Ünïcode|naïve=café|日本語}}");
		let_assert!(Some(arguments) = tree.first("Ünïcode"));
		check!(arguments.get("naïve").map(Tree::text) == Some("café"));
		check!(arguments.positional(1).map(Tree::text) == Some("日本語"));
	}
}
