use std::collections::HashMap;
use crate::{Engine, error::CalcError};

///behavior of a built-in: mutate the engine, return text to print
pub type Behavior = fn(&mut Engine) -> Result<String, CalcError>;

///Built-in stack operator.
#[derive(Clone, Copy)]
pub struct Action {
	///values consumed from the top of the stack
	pub pops: usize,
	///values produced
	pub pushes: usize,
	pub call: Behavior,
	pub help: &'static str
}
impl Action {
	pub const fn new(pops: usize, pushes: usize, call: Behavior, help: &'static str) -> Self {
		Self {pops, pushes, call, help}
	}
}

///Insertion-ordered, write-once table of built-ins, read-only once the engine owns it.
#[derive(Clone, Default)]
pub struct ActionRegistry {
	index: HashMap<&'static str, usize>,
	entries: Vec<(&'static str, Action)>
}
impl ActionRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	///add `token`, panics if it is already taken since that is a wiring mistake
	pub fn register(&mut self, token: &'static str, action: Action) {
		if self.index.contains_key(token) {
			panic!("action '{token}' registered twice");
		}
		self.index.insert(token, self.entries.len());
		self.entries.push((token, action));
	}

	///builder variant of `register`
	pub fn with(mut self, token: &'static str, action: Action) -> Self {
		self.register(token, action);
		self
	}

	#[inline(always)]
	pub fn get(&self, token: &str) -> Option<&Action> {
		self.index.get(token).map(|&i| &self.entries[i].1)
	}

	#[inline(always)]
	pub fn contains(&self, token: &str) -> bool {
		self.index.contains_key(token)
	}

	///in registration order
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Action)> + '_ {
		self.entries.iter().map(|(t, a)| (*t, a))
	}

	pub fn len(&self) -> usize {self.entries.len()}
	pub fn is_empty(&self) -> bool {self.entries.is_empty()}

	///table with an `operator | description` header, tokens right-aligned
	pub fn listing(&self) -> String {
		let header = "operator";
		let width = self.iter().map(|(t, _)| t.len()).chain([header.len()]).max().unwrap_or(0);
		let mut out = format!("{header:>width$} | description\n");
		for (t, a) in self.iter() {
			out += &format!("{t:>width$} : {}\n", a.help);
		}
		out
	}
}
