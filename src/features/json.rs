//! Support for converting parse trees to JSON.
//!
//! The JSON form of a tree is an object that maps each template name to an array of argument objects,
//! with the trimmed text under the `"_text"` key.
//! Each argument object maps an argument key to the JSON form of the argument value.
//!
//! Enable the `preserve-order` feature to keep templates and arguments in source order.

use crate::{Parser, Tree};

/// Convert a parsed tree to a JSON value.
pub fn to_value(tree: &Tree) -> Result<serde_json::Value, serde_json::Error> {
	serde_json::to_value(tree)
}

/// Parse wikitext and convert the resulting tree to a JSON value.
///
/// This uses the default parser options.
pub fn parse(source: &str) -> Result<serde_json::Value, Error> {
	let tree = crate::parse(source)?;
	Ok(to_value(&tree)?)
}

/// Parse all string values in a JSON document as wikitext.
///
/// Every string value is replaced by the JSON form of its parse tree.
/// Object keys are left as they are.
pub fn parse_string_values(value: &mut serde_json::Value, parser: &Parser) -> Result<(), Error> {
	visit_string_values(value, &|value: &mut serde_json::Value| -> Result<(), Error> {
		if let serde_json::Value::String(source) = value {
			let parsed = to_value(&parser.parse(source)?)?;
			*value = parsed;
		}
		Ok(())
	})
}

/// Error for parsing wikitext to JSON.
#[derive(Debug)]
pub enum Error {
	/// An error occurred while producing JSON.
	Json(serde_json::Error),

	/// An error occurred while parsing wikitext.
	Parse(crate::Error),
}

impl From<serde_json::Error> for Error {
	#[inline]
	fn from(other: serde_json::Error) -> Self {
		Self::Json(other)
	}
}

impl From<crate::Error> for Error {
	#[inline]
	fn from(other: crate::Error) -> Self {
		Self::Parse(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Json(e) => std::fmt::Display::fmt(e, f),
			Self::Parse(e) => std::fmt::Display::fmt(e, f),
		}
	}
}

/// Recursively apply a function to all string values in a JSON value.
///
/// The function receives the value holding the string, so it can replace it with a value of another type.
fn visit_string_values<F, E>(value: &mut serde_json::Value, fun: &F) -> Result<(), E>
where
	F: Fn(&mut serde_json::Value) -> Result<(), E>,
{
	match value {
		serde_json::Value::Null => Ok(()),
		serde_json::Value::Bool(_) => Ok(()),
		serde_json::Value::Number(_) => Ok(()),
		serde_json::Value::String(_) => fun(value),
		serde_json::Value::Array(seq) => {
			for value in seq {
				visit_string_values(value, fun)?;
			}
			Ok(())
		},
		serde_json::Value::Object(map) => {
			for value in map.values_mut() {
				visit_string_values(value, fun)?;
			}
			Ok(())
		},
	}
}
