use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{Arguments, Tree, TEXT_KEY};

/// A tree serializes as a map from template name to a sequence of argument maps,
/// with the text under [`TEXT_KEY`].
///
/// The text goes after all templates,
/// unless a template with the reserved name was replaced by it: then the text takes that template's place.
impl Serialize for Tree<'_> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let text_index = self.text_index().unwrap_or(self.len());
		let mut map = serializer.serialize_map(Some(self.len() + 1))?;
		for (index, (name, occurrences)) in self.templates().enumerate() {
			if index == text_index {
				map.serialize_entry(TEXT_KEY, self.text())?;
			}
			map.serialize_entry(name, occurrences)?;
		}
		if text_index >= self.len() {
			map.serialize_entry(TEXT_KEY, self.text())?;
		}
		map.end()
	}
}

/// Arguments serialize as a map from argument key to tree.
impl Serialize for Arguments<'_> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.len()))?;
		for (key, value) in self.iter() {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}
