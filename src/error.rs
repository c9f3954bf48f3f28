//! Module containing error details.
//!
//! Malformed wikitext is never an error: unterminated braces, empty names and parser functions
//! simply end up as literal text.
//! The only failure is input that nests braces deeper than the configured limit.

/// An error that can occur while parsing wikitext.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum Error {
	/// The input nests templates or parameters deeper than the configured limit.
	DepthLimitExceeded(DepthLimitExceeded),
}

impl From<DepthLimitExceeded> for Error {
	fn from(other: DepthLimitExceeded) -> Self {
		Self::DepthLimitExceeded(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::DepthLimitExceeded(e) => e.fmt(f),
		}
	}
}

/// The input nests templates or parameters deeper than the configured limit.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct DepthLimitExceeded {
	/// The byte offset within the input where the error occurs.
	///
	/// This points to the first brace of the opening run that would exceed the limit.
	pub position: usize,

	/// The length of the opening run in bytes (2 for a template, 3 for a parameter).
	pub len: usize,

	/// The maximum nesting depth that was in effect.
	pub limit: usize,
}

impl std::error::Error for DepthLimitExceeded {}

impl std::fmt::Display for DepthLimitExceeded {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Nesting depth limit exceeded: more than {} nested templates or parameters", self.limit)
	}
}

impl Error {
	/// Get the range in the source text that contains the error.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		let (start, len) = match &self {
			Self::DepthLimitExceeded(e) => (e.position, e.len),
		};
		std::ops::Range {
			start,
			end: start + len,
		}
	}

	/// Get the line of source that contains the error.
	///
	/// # Panics
	/// May panic if the source text is not the original source that contains the error.
	pub fn source_line<'a>(&self, source: &'a str) -> &'a str {
		let position = self.source_range().start;
		let start = line_start(source, position);
		let end = line_end(source, position);
		&source[start..end]
	}

	/// Write source highlighting for the error location.
	///
	/// The highlighting ends with a newline.
	///
	/// Note: this function doesn't print anything if the source line exceeds 60 characters in width.
	/// For more control over this behaviour, consider using [`Self::source_range()`] and [`Self::source_line()`] instead.
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		use unicode_width::UnicodeWidthStr;

		let range = self.source_range();
		let line_start = line_start(source, range.start);
		let line = self.source_line(source);
		if line.width() > 60 {
			return Ok(());
		}
		let end = range.end.min(line_start + line.len());
		write!(f, "  {}\n  ", line)?;
		write_underline(f, line, range.start - line_start..end - line_start)?;
		writeln!(f)
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	pub fn source_highlighting(&self, source: &str) -> String {
		let mut output = String::new();
		// Writing to a String never fails.
		let _ = self.write_source_highlighting(&mut output, source);
		output
	}
}

fn line_start(source: &str, position: usize) -> usize {
	match source.as_bytes()[..position].iter().rposition(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => line_end + 1,
		None => 0,
	}
}

fn line_end(source: &str, position: usize) -> usize {
	match source.as_bytes()[position..].iter().position(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => position + line_end,
		None => source.len(),
	}
}

fn write_underline(f: &mut impl std::fmt::Write, line: &str, range: std::ops::Range<usize>) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;
	let spaces = line[..range.start].width();
	let carets = line[range].width();
	write!(f, "{}", " ".repeat(spaces))?;
	write!(f, "{}", "^".repeat(carets))?;
	Ok(())
}
