//! Brace matching and span extraction.
//!
//! All functions in this module work on byte ranges into the original source,
//! so nothing is copied until the final tree is built.

use crate::cursor::Cursor;

mod brace;
mod locate;
mod split;

pub(crate) use brace::match_run;
pub(crate) use locate::locate_templates;
pub(crate) use split::split_arguments;

/// The kind of a brace run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
	/// A template run: `{{` ... `}}`.
	Template,

	/// A parameter run: `{{{` ... `}}}`.
	Parameter,
}

impl Delimiter {
	/// Get the delimiter opening at the cursor position, if any.
	///
	/// A parameter opening takes priority over a template opening.
	pub fn open_at(cursor: &Cursor) -> Option<Self> {
		if cursor.peek(0) != b'{' || cursor.peek(1) != b'{' {
			None
		} else if cursor.peek(2) == b'{' {
			Some(Self::Parameter)
		} else {
			Some(Self::Template)
		}
	}

	/// The number of braces in the opening and closing runs.
	pub fn width(self) -> usize {
		match self {
			Self::Template => 2,
			Self::Parameter => 3,
		}
	}

	/// The closing run of the delimiter.
	pub fn close(self) -> &'static [u8] {
		match self {
			Self::Template => b"}}",
			Self::Parameter => b"}}}",
		}
	}
}

/// A span found by [`match_run()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Match {
	/// The range of the span in the source, including the delimiters.
	///
	/// For unterminated runs, this extends to the end of the scanned range.
	pub range: std::ops::Range<usize>,

	/// True if the closing run was found before the end of the scanned range.
	pub terminated: bool,
}

/// Limits that apply while scanning.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Depth {
	/// The number of runs enclosing the scanned range.
	pub current: usize,

	/// The maximum number of nested runs.
	pub limit: usize,
}

impl Depth {
	/// The depth for text inside a run at this depth.
	pub fn nested(self) -> Self {
		Self {
			current: self.current + 1,
			limit: self.limit,
		}
	}
}
