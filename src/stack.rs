use regex::Regex;
use crate::error::CalcError;

///starting reserve of an unbounded stack
pub const DEFAULT_RESERVE: usize = 8;

///stack size limit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capacity {
	Fixed(usize),
	Unbounded
}
impl Capacity {
	///negative limits mean "no limit", like the -l flag
	pub fn from_limit(limit: i64) -> Self {
		if let Ok(n) = usize::try_from(limit) {Self::Fixed(n)} else {Self::Unbounded}
	}
}

///how the stack is rendered after an operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
	///`[ 1 2 3 ]`
	Interactive,
	///`1 2 3`
	Script,
	///nothing at all
	Hidden
}

///custom number printing function: shortest representation that parses back to the same value,
///exponential notation if the decimal exponent is below -4 or at least 21
pub fn format_value(num: f64) -> String {
	if num.is_nan() {return String::from("NaN");}
	if num.is_infinite() {
		return String::from(if num.is_sign_negative() {"-Inf"} else {"+Inf"});
	}
	let sci = format!("{num:e}");	//e.g. "1.5e-7", always shortest round-trip mantissa
	let (man, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
	let exp: i32 = exp.parse().unwrap_or(0);
	if !(-4..21).contains(&exp) {
		format!("{man}e{}{:02}", if exp<0 {'-'} else {'+'}, exp.unsigned_abs())
	}
	else {
		num.to_string()
	}
}

lazy_static! {
	///hexadecimal float, the binary exponent is mandatory
	static ref HEX_FLOAT: Regex = Regex::new(r"^([+-]?)0[xX]([0-9a-fA-F]*)(?:\.([0-9a-fA-F]*))?[pP]([+-]?[0-9]+)$").unwrap();
}

///Reads a numeric token: decimal or exponent notation, `inf`/`nan`,
///or a hexadecimal mantissa with a binary exponent (`0x1.8p3`).
pub fn parse_number(tok: &str) -> Option<f64> {
	if let Ok(x) = tok.parse::<f64>() {return Some(x);}
	let caps = HEX_FLOAT.captures(tok)?;
	let (int, frac) = (&caps[2], caps.get(3).map_or("", |m| m.as_str()));
	if int.is_empty() && frac.is_empty() {return None;}
	let mut man = 0.0_f64;
	for d in int.chars().chain(frac.chars()) {
		man = man * 16.0 + d.to_digit(16)? as f64;
	}
	let exp = caps[4].parse::<i32>().ok()?.checked_sub(4 * frac.len() as i32)?;
	let x = man * 2f64.powi(exp);
	Some(if &caps[1]=="-" {-x} else {x})
}

///Operand stack of 64-bit floats plus the stash register.
#[derive(Clone, Debug)]
pub struct Stack {
	values: Vec<f64>,
	///auxiliary register, see `stash`/`pull`
	pub stash: f64,
	cap: Capacity
}
impl Stack {
	pub fn new(cap: Capacity) -> Self {
		let reserve = match cap {
			Capacity::Fixed(n) => n,
			Capacity::Unbounded => DEFAULT_RESERVE
		};
		Self {values: Vec::with_capacity(reserve), stash: 0.0, cap}
	}

	///append `x`, rejected if a bounded stack is already full
	pub fn push(&mut self, x: f64) -> Result<(), CalcError> {
		if let Capacity::Fixed(n) = self.cap {
			if self.values.len() >= n {
				return Err(CalcError::Capacity {value: x, capacity: n});
			}
		}
		self.values.push(x);
		Ok(())
	}

	///remove the top value; callers check arity first
	#[inline(always)]
	pub fn pop(&mut self) -> Option<f64> {
		self.values.pop()
	}

	#[inline(always)]
	pub fn len(&self) -> usize {self.values.len()}
	#[inline(always)]
	pub fn is_empty(&self) -> bool {self.values.is_empty()}
	///bottom to top
	#[inline(always)]
	pub fn values(&self) -> &[f64] {&self.values}

	///fixed limit, or the current reserve of an unbounded stack
	pub fn capacity(&self) -> usize {
		match self.cap {
			Capacity::Fixed(n) => n,
			Capacity::Unbounded => self.values.capacity()
		}
	}

	///would `len - pops + pushes` exceed a fixed limit?
	pub fn would_overflow(&self, pops: usize, pushes: usize) -> bool {
		match self.cap {
			Capacity::Fixed(n) => self.values.len().saturating_sub(pops) + pushes > n,
			Capacity::Unbounded => false
		}
	}

	///remove everything, returns the number of values removed
	pub fn clear(&mut self) -> usize {
		let n = self.values.len();
		self.values.clear();
		n
	}

	///remove everything, bottom to top
	pub fn drain(&mut self) -> Vec<f64> {
		self.values.drain(..).collect()
	}

	///top value moves to the bottom
	pub fn roll_forward(&mut self) {
		let k = 1.min(self.values.len());
		self.values.rotate_right(k);
	}

	///bottom value moves to the top
	pub fn roll_back(&mut self) {
		let k = 1.min(self.values.len());
		self.values.rotate_left(k);
	}

	///all values space-joined, decorated according to `mode`
	pub fn display(&self, mode: DisplayMode) -> String {
		if mode==DisplayMode::Hidden {return String::new();}
		let joined = self.values.iter().map(|v| format_value(*v)).collect::<Vec<String>>().join(" ");
		match mode {
			DisplayMode::Interactive => format!("[ {joined} ]\n"),
			_ => joined + "\n"
		}
	}
}
