//! Fault-tolerant extraction of template invocations from MediaWiki wikitext.
//!
//! # Features
//!
//! * Find all templates (`{{Name|arg|key=value}}`) in a piece of wikitext.
//! * Anonymous arguments get the keys `"1"`, `"2"`, ..., named arguments keep their name.
//! * Argument values are parsed recursively, so nested templates end up in the tree.
//! * Parameters (`{{{name|default}}}`) and parser functions (`{{#if:...}}`) are kept as literal text.
//! * Never fails on malformed input: unterminated or broken braces degrade to text.
//! * Bounded nesting depth, so adversarial input can not exhaust the stack.
//! * Serialize parse trees with serde (optional, requires the `serde` feature),
//!   or convert them directly to JSON (optional, requires the `json` feature).
//!
//! # Examples
//!
//! The [`parse()`][parse] function parses a string with the default options.
//!
//! ```
//! # fn main() -> Result<(), wikitemplate::Error> {
//! let tree = wikitemplate::parse("{{Infobox|name=Ada|{{born|1815}}}}")?;
//! let infobox = tree.first("Infobox").unwrap();
//! assert_eq!(infobox.get("name").unwrap().text(), "Ada");
//!
//! let born = infobox.positional(1).unwrap().first("born").unwrap();
//! assert_eq!(born.positional(1).unwrap().text(), "1815");
//! # Ok(())
//! # }
//! ```
//!
//! A [`Parser`] can be used to change the maximum nesting depth.
//! Input that nests deeper results in an [`Error`].
//!
//! ```
//! let parser = wikitemplate::Parser::new().with_max_depth(2);
//! assert!(parser.parse("{{a|{{b}}}}").is_ok());
//! assert!(parser.parse("{{a|{{b|{{c}}}}}}").is_err());
//! ```
#![warn(missing_docs, missing_debug_implementations)]
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]

pub mod error;
pub use error::Error;

mod cursor;
mod features;
mod scan;

mod tree;
pub use tree::{Arguments, Tree, TEXT_KEY};

#[allow(unused_imports)] // Not all feature combinations use all imports.
pub use features::*;

/// Parse wikitext with the default options.
///
/// This is a shortcut for [`Parser::new().parse(source)`][Parser::parse].
#[inline]
pub fn parse(source: &str) -> Result<Tree<'_>, Error> {
	Parser::new().parse(source)
}

/// Options for parsing wikitext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
	max_depth: usize,
}

impl Default for Parser {
	fn default() -> Self {
		Self::new()
	}
}

impl Parser {
	/// The default maximum nesting depth.
	pub const DEFAULT_MAX_DEPTH: usize = 100;

	/// Create a parser with the default options.
	#[inline]
	pub const fn new() -> Self {
		Self {
			max_depth: Self::DEFAULT_MAX_DEPTH,
		}
	}

	/// Set the maximum nesting depth.
	///
	/// Every template and parameter counts as one level,
	/// including parameters that are skipped and parser functions that are dropped.
	/// With a maximum depth of zero, any template or parameter is an error.
	#[inline]
	pub const fn with_max_depth(self, max_depth: usize) -> Self {
		Self { max_depth }
	}

	/// Get the maximum nesting depth.
	#[inline]
	pub const fn max_depth(&self) -> usize {
		self.max_depth
	}

	/// Parse wikitext into a tree of templates.
	///
	/// The returned tree contains all top-level templates of `source`,
	/// and the trimmed `source` itself as [text][Tree::text].
	///
	/// The only possible error is [`Error::DepthLimitExceeded`].
	pub fn parse<'a>(&self, source: &'a str) -> Result<Tree<'a>, Error> {
		let depth = scan::Depth {
			current: 0,
			limit: self.max_depth,
		};
		tree::parse_tree(source, 0..source.len(), depth)
	}
}
