//!Interactive RPN calculator core: bounded operand stack, built-in actions,
//!user-defined words (macros) and a templated status prompt.
//!
//!```
//!use rpncalc::{Engine, EngineConfig, Reply};
//!
//!let mut calc = Engine::with_defaults(EngineConfig::default());
//!calc.evaluate("= sq 2 ^").unwrap();
//!assert_eq!(calc.evaluate("3 sq 1 +").unwrap(), Reply::Text("10\n".into()));
//!```

#[macro_use]
extern crate lazy_static;

pub mod actions;
pub mod config;
pub mod error;
pub mod prompt;
pub mod registry;
pub mod session;
pub mod stack;
pub mod words;

use rand::{RngCore, SeedableRng, rngs::{OsRng, StdRng}};

pub use error::{CalcError, ErrorKind};
pub use prompt::Prompt;
pub use registry::{Action, ActionRegistry};
pub use stack::{Capacity, DisplayMode, Stack};
pub use words::WordTable;

///word definition command
pub const DEFINE: &str = "=";
///ends the session
pub const QUIT: &str = "quit";

///Construction-time settings of an [`Engine`].
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
	pub capacity: Capacity,
	pub display: DisplayMode,
	///unknown tokens are errors instead of no-ops
	pub strict: bool,
	///maximum word expansion depth
	pub max_depth: usize
}
impl Default for EngineConfig {
	///- capacity: 8 values
	///- display: script style
	///- lenient about unknown tokens
	///- word expansion depth: 256
	fn default() -> Self {
		Self {
			capacity: Capacity::Fixed(8),
			display: DisplayMode::Script,
			strict: false,
			max_depth: 256
		}
	}
}

///Successful outcome of evaluating a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
	///text produced by the last token (usually the stack display)
	Text(String),
	///`quit` was evaluated, the session should end
	Quit
}
impl Reply {
	///printable text, empty for `Quit`
	pub fn text(&self) -> &str {
		match self {
			Self::Text(s) => s,
			Self::Quit => ""
		}
	}
}

///What a single token turned out to be.
enum Token {
	Empty,
	Word(Vec<String>),
	Number(f64),
	Action(Action),
	Quit,
	Unknown
}

///Bundled state of one calculator instance.
pub struct Engine {
	pub(crate) stack: Stack,
	words: WordTable,
	actions: ActionRegistry,
	display: DisplayMode,
	strict: bool,
	max_depth: usize,
	pub(crate) rng: StdRng
}

impl Engine {
	///engine with the given built-ins and no words
	pub fn new(actions: ActionRegistry, cfg: EngineConfig) -> Self {
		Self {
			stack: Stack::new(cfg.capacity),
			words: WordTable::new(),
			actions,
			display: cfg.display,
			strict: cfg.strict,
			max_depth: cfg.max_depth,
			rng: {
				//seed RNG with OS randomness
				let mut seed = [0_u8; 32];
				OsRng.fill_bytes(&mut seed);
				StdRng::from_seed(seed)
			}
		}
	}

	///engine with every built-in action and the default words
	pub fn with_defaults(cfg: EngineConfig) -> Self {
		let mut e = Self::new(actions::builtins(), cfg);
		for (name, body) in actions::default_words() {
			e.words.define(name, body);
		}
		e
	}

	///replace RNG with custom one
	pub fn with_rng(mut self, r: StdRng) -> Self {
		self.rng = r;
		self
	}

	#[inline(always)]
	pub fn stack(&self) -> &Stack {&self.stack}
	#[inline(always)]
	pub fn stack_mut(&mut self) -> &mut Stack {&mut self.stack}
	#[inline(always)]
	pub fn words(&self) -> &WordTable {&self.words}
	#[inline(always)]
	pub fn actions(&self) -> &ActionRegistry {&self.actions}

	///stack rendered in the configured display mode
	#[inline(always)]
	pub fn display(&self) -> String {
		self.stack.display(self.display)
	}

	///Evaluates one line of input.
	///
	///Tokens run left to right until the first error, which aborts the rest of the line.
	///A `=` token turns the remainder of the line into a word definition.
	pub fn evaluate(&mut self, line: &str) -> Result<Reply, CalcError> {
		let tokens: Vec<&str> = line.trim().split(' ').collect();
		self.run(&tokens, 0)
	}

	fn run(&mut self, tokens: &[&str], depth: usize) -> Result<Reply, CalcError> {
		let mut text = String::new();
		for (i, tok) in tokens.iter().enumerate() {
			if *tok==DEFINE {
				return self.define_tokens(&tokens[i+1..]).map(Reply::Text);	//nothing after a definition runs
			}
			match self.dispatch(tok, depth)? {
				Reply::Quit => {return Ok(Reply::Quit);}
				Reply::Text(t) => {text = t;}
			}
		}
		Ok(Reply::Text(text))
	}

	fn classify(&self, tok: &str) -> Token {
		if tok.is_empty() {
			Token::Empty
		}
		else if let Some(body) = self.words.get(tok) {
			Token::Word(body.clone())
		}
		else if let Some(x) = stack::parse_number(tok) {
			Token::Number(x)
		}
		else if let Some(a) = self.actions.get(tok) {
			Token::Action(*a)
		}
		else if tok==QUIT {
			Token::Quit
		}
		else {
			Token::Unknown
		}
	}

	fn dispatch(&mut self, tok: &str, depth: usize) -> Result<Reply, CalcError> {
		match self.classify(tok) {
			Token::Empty => {Ok(Reply::Text(String::new()))}
			Token::Word(body) => {
				if depth >= self.max_depth {
					return Err(CalcError::Depth {word: tok.to_string(), limit: self.max_depth});
				}
				let body: Vec<&str> = body.iter().map(String::as_str).collect();
				self.run(&body, depth+1)
			}
			Token::Number(x) => {
				self.stack.push(x)?;
				Ok(Reply::Text(self.display()))
			}
			Token::Action(a) => {
				if self.stack.len() < a.pops {
					return Err(CalcError::Arity {token: tok.to_string(), needs: error::Values(a.pops)});
				}
				if self.stack.would_overflow(a.pops, a.pushes) {
					return Err(CalcError::Overflow {token: tok.to_string()});
				}
				(a.call)(self).map(Reply::Text)
			}
			Token::Quit => {Ok(Reply::Quit)}
			Token::Unknown => {
				if self.strict {Err(CalcError::NotFound {token: tok.to_string()})}
				else {Ok(Reply::Text(String::new()))}
			}
		}
	}

	fn define_tokens(&mut self, args: &[&str]) -> Result<String, CalcError> {
		if args.is_empty() {
			return Err(CalcError::Usage);
		}
		let args: Vec<&str> = args.iter().copied().filter(|s| !s.is_empty()).collect();
		let Some((name, body)) = args.split_first() else {
			return Ok(String::new());
		};
		if stack::parse_number(name).is_some() {
			return Err(CalcError::NumericName {name: name.to_string()});
		}
		if words::RESERVED.contains(*name) {
			return Err(CalcError::Reserved {name: name.to_string()});
		}
		if self.actions.contains(name) {
			return Err(CalcError::Builtin {name: name.to_string()});
		}
		if body.is_empty() {
			if !self.words.remove(name) {
				return Err(CalcError::Undefined {name: name.to_string()});
			}
			return Ok(format!("deleted word: {name}\n"));
		}
		let body: Vec<String> = body.iter().map(|s| s.to_string()).collect();
		let shown = body.join(" ");
		self.words.define(name.to_string(), body);
		Ok(format!("defined {name} : {shown}\n"))
	}
}
