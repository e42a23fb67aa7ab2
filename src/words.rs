use std::collections::HashMap;
use phf::phf_set;

///control tokens that can never name a word
pub static RESERVED: phf::Set<&'static str> = phf_set! {"=", "quit"};
///`RESERVED` as shown in error messages
pub const RESERVED_LIST: &str = "= quit";

///User-defined words: name -> body tokens.
#[derive(Clone, Debug, Default)]
pub struct WordTable(HashMap<String, Vec<String>>);
impl WordTable {
	pub fn new() -> Self {
		Self::default()
	}

	#[inline(always)]
	pub fn get(&self, name: &str) -> Option<&Vec<String>> {
		self.0.get(name)
	}

	///store `body` under `name`, replacing any previous definition
	pub fn define(&mut self, name: String, body: Vec<String>) {
		self.0.insert(name, body);
	}

	///true if something was removed
	pub fn remove(&mut self, name: &str) -> bool {
		self.0.remove(name).is_some()
	}

	pub fn len(&self) -> usize {self.0.len()}
	pub fn is_empty(&self) -> bool {self.0.is_empty()}

	///(name, body) sorted longest name first, then alphabetically
	pub fn sorted(&self) -> Vec<(&str, &[String])> {
		let mut all: Vec<(&str, &[String])> = self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice())).collect();
		all.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
		all
	}

	///table with a `word | definition` header, names right-aligned
	pub fn listing(&self) -> String {
		let header = "word";
		let all = self.sorted();
		let width = all.iter().map(|(k, _)| k.len()).chain([header.len()]).max().unwrap_or(0);
		let mut out = format!("{header:>width$} | definition\n");
		for (k, body) in all {
			out += &format!("{k:>width$} : {}\n", body.join(" "));
		}
		out
	}
}
