/// Markup shown while the layout is still running.
pub const CALCULATING: &str = "<span style='color: red'>Calculating layout...</span>";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoKey {
	Nodes,
	Edges,
	Calc,
	Select,
}

/// Ordered pieces of the info box. Entries keep the order they were first
/// set in; removing and setting again moves an entry to the end.
#[derive(Clone, Debug, Default)]
pub struct InfoText {
	entries: Vec<(InfoKey, String)>,
}

impl InfoText {
	pub fn set(&mut self, key: InfoKey, value: impl Into<String>) {
		let value = value.into();
		match self.entries.iter_mut().find(|(k, _)| *k == key) {
			Some((_, existing)) => *existing = value,
			None => self.entries.push((key, value)),
		}
	}

	pub fn remove(&mut self, key: InfoKey) {
		self.entries.retain(|(k, _)| *k != key);
	}

	#[cfg(test)]
	pub fn get(&self, key: InfoKey) -> Option<&str> {
		self.entries
			.iter()
			.find(|(k, _)| *k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Join the entries with " - ". The separator only goes in front of a
	/// non-empty value once something has been written.
	pub fn render(&self) -> String {
		let mut out = String::new();
		for (_, value) in &self.entries {
			if !out.is_empty() && !value.is_empty() {
				out.push_str(" - ");
			}
			out.push_str(value);
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_values_add_no_separator() {
		let mut info = InfoText::default();
		info.set(InfoKey::Nodes, "Nodes 16");
		info.set(InfoKey::Edges, "Edges 16");
		info.set(InfoKey::Calc, "");
		assert_eq!(info.render(), "Nodes 16 - Edges 16");

		info.set(InfoKey::Select, "Object 3");
		assert_eq!(info.render(), "Nodes 16 - Edges 16 - Object 3");
	}

	#[test]
	fn set_keeps_position_and_remove_drops() {
		let mut info = InfoText::default();
		info.set(InfoKey::Nodes, "Nodes 2");
		info.set(InfoKey::Calc, CALCULATING);
		info.set(InfoKey::Nodes, "Nodes 3");
		assert_eq!(info.render(), format!("Nodes 3 - {CALCULATING}"));

		info.remove(InfoKey::Nodes);
		assert_eq!(info.get(InfoKey::Nodes), None);
		assert_eq!(info.render(), CALCULATING);
	}

	#[test]
	fn leading_empty_value_is_skipped() {
		let mut info = InfoText::default();
		info.set(InfoKey::Calc, "");
		info.set(InfoKey::Select, "Object 1");
		assert_eq!(info.render(), "Object 1");
	}
}
