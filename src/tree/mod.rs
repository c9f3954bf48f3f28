use std::borrow::Cow;

use indexmap::IndexMap;

mod parse;

pub(crate) use parse::parse_tree;

/// The reserved key under which the trimmed text of a value is stored.
///
/// This is the key used for the text when a [`Tree`] is serialized.
/// A template with this exact name can not be represented: it is overwritten by the text.
pub const TEXT_KEY: &str = "_text";

/// The parsed form of a piece of wikitext.
///
/// A tree holds the trimmed source text and all templates found at the top level of that text,
/// grouped by name.
/// Both the whole input and every argument value are represented as a tree.
///
/// Templates are kept in order of first appearance,
/// and every occurrence of a name is kept in source order.
///
/// The tree borrows from the source text where possible.
/// Use [`Self::into_owned()`] to get a tree that does not borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<'a> {
	text: Cow<'a, str>,
	templates: IndexMap<Cow<'a, str>, Vec<Arguments<'a>>>,

	/// Index of the template entry that was replaced by the text, if any.
	text_index: Option<usize>,
}

/// The arguments of one template occurrence.
///
/// Anonymous arguments get the keys `"1"`, `"2"`, ... in order of appearance,
/// named arguments use their trimmed name as key.
/// If a key appears more than once, the last value wins but the key keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments<'a> {
	values: IndexMap<Cow<'a, str>, Tree<'a>>,
}

impl<'a> Tree<'a> {
	pub(crate) fn new(text: &'a str, templates: IndexMap<Cow<'a, str>, Vec<Arguments<'a>>>) -> Self {
		Self {
			text: Cow::Borrowed(text),
			templates,
			text_index: None,
		}
	}

	/// Get the position of the text among the templates when serialized.
	///
	/// This is the position of a template that had the reserved name [`TEXT_KEY`],
	/// or `None` if the text goes after all templates.
	#[cfg_attr(not(feature = "serde"), allow(dead_code))]
	pub(crate) fn text_index(&self) -> Option<usize> {
		self.text_index
	}

	/// Get the trimmed source text.
	#[inline]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Get all occurrences of the template with the given name.
	///
	/// Names are compared exactly: they are case and whitespace sensitive (after trimming).
	pub fn get(&self, name: &str) -> Option<&[Arguments<'a>]> {
		self.templates.get(name).map(Vec::as_slice)
	}

	/// Get the first occurrence of the template with the given name.
	pub fn first(&self, name: &str) -> Option<&Arguments<'a>> {
		self.get(name)?.first()
	}

	/// Check if a template with the given name occurs.
	pub fn contains(&self, name: &str) -> bool {
		self.templates.contains_key(name)
	}

	/// Iterate over the template names with all their occurrences, in order of first appearance.
	pub fn templates(&self) -> impl Iterator<Item = (&str, &[Arguments<'a>])> {
		self.templates.iter().map(|(name, occurrences)| (name.as_ref(), occurrences.as_slice()))
	}

	/// Get the number of distinct template names.
	#[inline]
	pub fn len(&self) -> usize {
		self.templates.len()
	}

	/// Check if no templates were found.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.templates.is_empty()
	}

	/// Convert the tree into one that owns all its data.
	pub fn into_owned(self) -> Tree<'static> {
		let templates = self
			.templates
			.into_iter()
			.map(|(name, occurrences)| {
				let occurrences = occurrences.into_iter().map(Arguments::into_owned).collect();
				(Cow::Owned(name.into_owned()), occurrences)
			})
			.collect();
		Tree {
			text: Cow::Owned(self.text.into_owned()),
			templates,
			text_index: self.text_index,
		}
	}
}

impl<'a> Arguments<'a> {
	pub(crate) fn insert(&mut self, key: Cow<'a, str>, value: Tree<'a>) {
		self.values.insert(key, value);
	}

	/// Get an argument by key.
	pub fn get(&self, key: &str) -> Option<&Tree<'a>> {
		self.values.get(key)
	}

	/// Get an anonymous argument by its 1-based position.
	///
	/// This is a shortcut for looking up the decimal key.
	/// Note that a named argument with a numeric name shares the same key.
	pub fn positional(&self, index: usize) -> Option<&Tree<'a>> {
		self.values.get(index.to_string().as_str())
	}

	/// Iterate over the arguments in order of first appearance of their key.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Tree<'a>)> {
		self.values.iter().map(|(key, value)| (key.as_ref(), value))
	}

	/// Get the number of arguments.
	#[inline]
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Check if there are no arguments.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Convert the arguments into ones that own all their data.
	pub fn into_owned(self) -> Arguments<'static> {
		let values = self
			.values
			.into_iter()
			.map(|(key, value)| (Cow::Owned(key.into_owned()), value.into_owned()))
			.collect();
		Arguments { values }
	}
}

impl std::fmt::Display for Tree<'_> {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.text)
	}
}
