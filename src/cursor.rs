/// A position in a source string with bounded lookahead.
///
/// The cursor only ever looks at the bytes before `end`,
/// so it can scan a sub-range of the input while reporting positions relative to the whole input.
///
/// Every byte the cursor is asked to stop on (`{`, `}`, `|`) is ASCII,
/// and multi-byte characters are only ever skipped as a whole by [`Self::skip_to()`] or [`Self::skip_to2()`],
/// so the position is always on a character boundary of the source string.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
	source: &'a [u8],
	position: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor over `source[..end]`, starting at `start`.
	pub fn new(source: &'a str, start: usize, end: usize) -> Self {
		let source = &source.as_bytes()[..end];
		Self {
			source,
			position: start.min(end),
		}
	}

	/// The current position, as a byte offset into the original source.
	#[inline]
	pub fn position(&self) -> usize {
		self.position
	}

	/// The position of the end of the scanned range.
	#[inline]
	pub fn end(&self) -> usize {
		self.source.len()
	}

	/// Look at the byte `offset` bytes after the current position.
	///
	/// Returns a NUL byte when looking past the end.
	#[inline]
	pub fn peek(&self, offset: usize) -> u8 {
		self.source.get(self.position + offset).copied().unwrap_or(0)
	}

	/// Check if the bytes at the current position match `needle`.
	#[inline]
	pub fn starts_with(&self, needle: &[u8]) -> bool {
		self.source[self.position..].starts_with(needle)
	}

	/// Move forward by `count` bytes, stopping at the end.
	#[inline]
	pub fn advance(&mut self, count: usize) {
		self.position = (self.position + count).min(self.source.len());
	}

	/// Move to `position`, which must not lie before the current position.
	#[inline]
	pub fn seek(&mut self, position: usize) {
		debug_assert!(position >= self.position);
		self.position = position.min(self.source.len());
	}

	/// Move to the next occurrence of `needle`, or to the end if there is none.
	///
	/// Returns `true` if the needle was found.
	pub fn skip_to(&mut self, needle: u8) -> bool {
		match memchr::memchr(needle, &self.source[self.position..]) {
			Some(offset) => {
				self.position += offset;
				true
			},
			None => {
				self.position = self.source.len();
				false
			},
		}
	}

	/// Move to the next occurrence of either needle, or to the end if there is none.
	///
	/// Returns `true` if a needle was found.
	pub fn skip_to2(&mut self, needle1: u8, needle2: u8) -> bool {
		match memchr::memchr2(needle1, needle2, &self.source[self.position..]) {
			Some(offset) => {
				self.position += offset;
				true
			},
			None => {
				self.position = self.source.len();
				false
			},
		}
	}
}
