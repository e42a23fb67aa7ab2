use std::fmt;
use thiserror::Error;

///"N value" / "N values", for arity messages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Values(pub usize);
impl fmt::Display for Values {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} value{}", self.0, if self.0==1 {""} else {"s"})
	}
}

#[inline(always)]
fn show(v: &f64) -> String {crate::stack::format_value(*v)}

///Everything that can go wrong while evaluating a line.
///
///Messages are plain text without a trailing newline, printing is up to the caller.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CalcError {
	#[error("cannot push {}, stack at capacity ({capacity})", show(.value))]
	Capacity {value: f64, capacity: usize},

	#[error("operation error: '{token}' would overflow stack")]
	Overflow {token: String},

	#[error("operation error: '{token}' needs {needs} in stack")]
	Arity {token: String, needs: Values},

	#[error("operation error: {0}")]
	Domain(&'static str),

	#[error("define word: = example 2 2 +; remove word: = example")]
	Usage,

	#[error("could not define {name} : cannot redefine number")]
	NumericName {name: String},

	#[error("could not define {name} : word cannot be any of: {}", crate::words::RESERVED_LIST)]
	Reserved {name: String},

	#[error("could not define {name} : cannot redefine operator")]
	Builtin {name: String},

	#[error("could not delete {name} : not defined")]
	Undefined {name: String},

	#[error("command not found: {token}")]
	NotFound {token: String},

	#[error("word expansion too deep: '{word}' exceeded {limit} levels")]
	Depth {word: String, limit: usize},

	#[error("prompt compiler produced {segments} segments for {renderers} specifiers")]
	Prompt {segments: usize, renderers: usize},
}

///coarse grouping of [`CalcError`] variants
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
	Capacity,
	Arity,
	Domain,
	Definition,
	Lookup,
	Depth,
	Prompt,
}

impl CalcError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Capacity{..}|Self::Overflow{..} => ErrorKind::Capacity,
			Self::Arity{..} => ErrorKind::Arity,
			Self::Domain(_) => ErrorKind::Domain,
			Self::Usage|Self::NumericName{..}|Self::Reserved{..}|Self::Builtin{..}|Self::Undefined{..} => ErrorKind::Definition,
			Self::NotFound{..} => ErrorKind::Lookup,
			Self::Depth{..} => ErrorKind::Depth,
			Self::Prompt{..} => ErrorKind::Prompt,
		}
	}
}
