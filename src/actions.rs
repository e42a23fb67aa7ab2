use std::f64::consts::{PI, E};
use rand::Rng;
use crate::{Engine, error::{CalcError, Values}, registry::{Action, ActionRegistry}, stack::{DisplayMode, format_value}};

type Outcome = Result<String, CalcError>;

///pop `N` operands, bottom-most first; arity is checked before any behavior runs
#[inline(always)]
fn take<const N: usize>(e: &mut Engine) -> [f64; N] {
	let mut ops = [0.0; N];
	for slot in ops.iter_mut().rev() {
		*slot = e.stack.pop().unwrap_or(f64::NAN);
	}
	ops
}

///put operands back in their original order and return the reason
fn fail(e: &mut Engine, why: &'static str, ops: &[f64]) -> CalcError {
	for &x in ops {
		let _ = e.stack.push(x);	//slots were just freed
	}
	CalcError::Domain(why)
}

#[inline(always)]
fn unary(e: &mut Engine, f: fn(f64) -> f64) -> Outcome {
	let [a] = take::<1>(e);
	e.stack.push(f(a))?;
	Ok(e.display())
}

#[inline(always)]
fn binary(e: &mut Engine, f: fn(f64, f64) -> f64) -> Outcome {
	let [a, b] = take::<2>(e);
	e.stack.push(f(a, b))?;
	Ok(e.display())
}

#[inline(always)]
fn is_integer(x: f64) -> bool {
	x.fract()==0.0	//false for inf and NaN too
}

/*----------------
	ARITHMETIC
----------------*/
fn add(e: &mut Engine) -> Outcome {binary(e, |a, b| a + b)}
fn subtract(e: &mut Engine) -> Outcome {binary(e, |a, b| a - b)}
fn multiply(e: &mut Engine) -> Outcome {binary(e, |a, b| a * b)}

fn divide(e: &mut Engine) -> Outcome {
	let [a, b] = take::<2>(e);
	if b==0.0 {return Err(fail(e, "cannot divide by 0", &[a, b]));}
	e.stack.push(a / b)?;
	Ok(e.display())
}

fn modulo(e: &mut Engine) -> Outcome {
	let [a, b] = take::<2>(e);
	if b==0.0 {return Err(fail(e, "cannot divide by 0", &[a, b]));}
	e.stack.push(a % b)?;
	Ok(e.display())
}

fn power(e: &mut Engine) -> Outcome {
	let [base, exp] = take::<2>(e);
	if base==0.0 && exp<0.0 {
		return Err(fail(e, "cannot raise 0 to negative power", &[base, exp]));
	}
	if base<0.0 && !is_integer(exp) {
		return Err(fail(e, "cannot raise negative number to non-integer power", &[base, exp]));
	}
	e.stack.push(base.powf(exp))?;
	Ok(e.display())
}

fn factorial(e: &mut Engine) -> Outcome {
	let [x] = take::<1>(e);
	if !is_integer(x) {return Err(fail(e, "cannot take factorial of non-integer", &[x]));}
	if x<0.0 {return Err(fail(e, "cannot take factorial of negative number", &[x]));}
	let res = if x>170.0 {f64::INFINITY}	//170! is the largest finite one
	else {(2..=x as u32).fold(1.0, |p, i| p * f64::from(i))};
	e.stack.push(res)?;
	Ok(e.display())
}

fn log(e: &mut Engine) -> Outcome {
	let [x] = take::<1>(e);
	if x<=0.0 {return Err(fail(e, "cannot take logarithm of non-positive number", &[x]));}
	e.stack.push(x.log10())?;
	Ok(e.display())
}

fn ln(e: &mut Engine) -> Outcome {
	let [x] = take::<1>(e);
	if x<=0.0 {return Err(fail(e, "cannot take logarithm of non-positive number", &[x]));}
	e.stack.push(x.ln())?;
	Ok(e.display())
}

/*------------------
	TRIGONOMETRY
------------------*/
fn radians(e: &mut Engine) -> Outcome {unary(e, f64::to_radians)}
fn degrees(e: &mut Engine) -> Outcome {unary(e, f64::to_degrees)}
fn sine(e: &mut Engine) -> Outcome {unary(e, f64::sin)}
fn cosine(e: &mut Engine) -> Outcome {unary(e, f64::cos)}
fn tangent(e: &mut Engine) -> Outcome {unary(e, f64::tan)}
fn arcsine(e: &mut Engine) -> Outcome {unary(e, f64::asin)}
fn arccosine(e: &mut Engine) -> Outcome {unary(e, f64::acos)}
fn arctangent(e: &mut Engine) -> Outcome {unary(e, f64::atan)}

/*--------------
	ROUNDING
--------------*/
fn floor(e: &mut Engine) -> Outcome {unary(e, f64::floor)}
fn ceiling(e: &mut Engine) -> Outcome {unary(e, f64::ceil)}

fn round(e: &mut Engine) -> Outcome {
	let [x, prec] = take::<2>(e);
	if prec<0.0 || !is_integer(prec) {
		return Err(fail(e, "precision must be non-negative integer", &[x, prec]));
	}
	let ratio = 10_f64.powf(prec);
	e.stack.push((x * ratio).round() / ratio)?;
	Ok(e.display())
}

fn random(e: &mut Engine) -> Outcome {
	let r: f64 = e.rng.gen();
	e.stack.push(r)?;
	Ok(e.display())
}

/*-------------------------
	STACK MANIPULATION
-------------------------*/
fn show(e: &mut Engine) -> Outcome {
	Ok(e.stack.display(DisplayMode::Interactive))	//bracketed in every mode
}

fn pop_top(e: &mut Engine) -> Outcome {
	let [_] = take::<1>(e);
	Ok(e.display())
}

fn swap(e: &mut Engine) -> Outcome {
	let [a, b] = take::<2>(e);
	e.stack.push(b)?;
	e.stack.push(a)?;
	Ok(e.display())
}

fn roll_forward(e: &mut Engine) -> Outcome {
	e.stack.roll_forward();
	Ok(e.display())
}

fn roll_back(e: &mut Engine) -> Outcome {
	e.stack.roll_back();
	Ok(e.display())
}

fn sum(e: &mut Engine) -> Outcome {
	let total: f64 = e.stack.drain().iter().sum();
	e.stack.push(total)?;
	Ok(e.display())
}

fn average(e: &mut Engine) -> Outcome {
	let all = e.stack.drain();
	let n = all.len() as f64;
	e.stack.push(all.iter().sum::<f64>() / n)?;
	Ok(e.display())
}

fn stash(e: &mut Engine) -> Outcome {
	let [a] = take::<1>(e);
	e.stack.stash = a;
	Ok(e.display())
}

fn pull(e: &mut Engine) -> Outcome {
	let s = e.stack.stash;
	e.stack.push(s)?;
	Ok(e.display())
}

fn clear(e: &mut Engine) -> Outcome {
	let n = e.stack.clear();
	Ok(format!("cleared {}\n", Values(n)))
}

/*-----------
	OTHER
-----------*/
fn words(e: &mut Engine) -> Outcome {Ok(e.words().listing())}
fn help(e: &mut Engine) -> Outcome {Ok(e.actions().listing())}
fn clear_screen(_: &mut Engine) -> Outcome {Ok(String::from("\x1b[2J\x1b[H"))}

///Every built-in action, in the order `help` lists them.
pub fn builtins() -> ActionRegistry {
	ActionRegistry::new()
		.with("+", Action::new(2, 1, add, "pop 'a', 'b'; push the result of 'a' + 'b'"))
		.with("-", Action::new(2, 1, subtract, "pop 'a', 'b'; push the result of 'b' - 'a'"))
		.with("*", Action::new(2, 1, multiply, "pop 'a', 'b'; push the result of 'a' * 'b'"))
		.with("/", Action::new(2, 1, divide, "pop 'a', 'b'; push the result of 'b' / 'a'"))
		.with("%", Action::new(2, 1, modulo, "pop 'a', 'b'; push the remainder of 'b' / 'a'"))
		.with("^", Action::new(2, 1, power, "pop 'a', 'b'; push the result of 'b' ^ 'a'"))
		.with("!", Action::new(1, 1, factorial, "pop 'a'; push the factorial of 'a'"))
		.with("log", Action::new(1, 1, log, "pop 'a'; push the logarithm base 10 of 'a'"))
		.with("ln", Action::new(1, 1, ln, "pop 'a'; push the natural logarithm of 'a'"))
		.with("rad", Action::new(1, 1, radians, "pop 'a'; push the result of converting 'a' from degrees to radians"))
		.with("deg", Action::new(1, 1, degrees, "pop 'a'; push the result of converting 'a' from radians to degrees"))
		.with("sin", Action::new(1, 1, sine, "pop 'a'; push the sine of 'a' in radians"))
		.with("cos", Action::new(1, 1, cosine, "pop 'a'; push the cosine of 'a' in radians"))
		.with("tan", Action::new(1, 1, tangent, "pop 'a'; push the tangent of 'a' in radians"))
		.with("asin", Action::new(1, 1, arcsine, "pop 'a'; push the arcsine of 'a' in radians"))
		.with("acos", Action::new(1, 1, arccosine, "pop 'a'; push the arccosine of 'a' in radians"))
		.with("atan", Action::new(1, 1, arctangent, "pop 'a'; push the arctangent of 'a' in radians"))
		.with("floor", Action::new(1, 1, floor, "pop 'a'; push the greatest integer value less than or equal to 'a'"))
		.with("ceil", Action::new(1, 1, ceiling, "pop 'a'; push the least integer value greater than or equal to 'a'"))
		.with("round", Action::new(2, 1, round, "pop 'a', 'b'; push the result of rounding 'b' to 'a' decimal places"))
		.with("rand", Action::new(0, 1, random, "push a random number between 0 and 1"))
		.with(".", Action::new(0, 0, show, "display all values in the stack"))
		.with(",", Action::new(1, 0, pop_top, "pop 'a'"))
		.with("swap", Action::new(2, 2, swap, "pop 'a', 'b'; push 'b', 'a'"))
		.with("froll", Action::new(2, 2, roll_forward, "roll the stack to the right one position"))
		.with("rroll", Action::new(2, 2, roll_back, "roll the stack to the left one position"))
		.with("sum", Action::new(1, 1, sum, "pop all values in the stack; push their sum"))
		.with("avg", Action::new(1, 1, average, "pop all values in the stack; push their average"))
		.with("stash", Action::new(1, 0, stash, "pop 'a'; stash 'a'"))
		.with("pull", Action::new(0, 1, pull, "push the value in the stash"))
		.with("clr", Action::new(0, 0, clear, "pop all values in the stack"))
		.with("words", Action::new(0, 0, words, "display all defined words"))
		.with("help", Action::new(0, 0, help, "display this information screen"))
		.with("cls", Action::new(0, 0, clear_screen, "clear the terminal screen"))
}

///Words every session starts with.
pub fn default_words() -> Vec<(String, Vec<String>)> {
	let pi = format!("pi {}", format_value(PI));
	let e = format!("e {}", format_value(E));
	[
		"? help",
		"randn rand * floor",
		"sqrt 0.5 ^",
		"logb log swap log / -1 ^",
		pi.as_str(),
		e.as_str(),
	].iter().filter_map(|def| {
		let mut toks = def.split(' ').map(String::from);
		toks.next().map(|name| (name, toks.collect()))
	}).collect()
}

#[cfg(test)]
mod tests {
	use rand::{SeedableRng, rngs::StdRng};
	use crate::{Capacity, EngineConfig, ErrorKind, Reply};
	use super::*;

	fn calc() -> Engine {
		Engine::with_defaults(EngineConfig::default())
	}

	fn eval(program: &str) -> Result<Reply, CalcError> {
		calc().evaluate(program)
	}

	fn text(program: &str) -> String {
		eval(program).unwrap().text().to_string()
	}

	#[test]
	fn arithmetic() {
		assert_eq!(text("2 2 +"), "4\n");
		assert_eq!(text("6 2 -"), "4\n");
		assert_eq!(text("2 2 *"), "4\n");
		assert_eq!(text("8 2 /"), "4\n");
		assert_eq!(text("15 4 %"), "3\n");
		assert_eq!(text("-7 2 %"), "-1\n");
		assert_eq!(text("2 3 ^"), "8\n");
		assert_eq!(text("-2 3 ^"), "-8\n");
		assert_eq!(text("4 !"), "24\n");
		assert_eq!(text("0 !"), "1\n");
		assert_eq!(text("171 !"), "+Inf\n");
	}

	#[test]
	fn logarithms() {
		assert_eq!(text("10 log"), "1\n");
		assert_eq!(text("10 ln"), "2.302585092994046\n");
		let b: f64 = text("8 2 logb").trim_end().parse().unwrap();
		assert!((b - 3.0).abs() < 1e-12);
	}

	#[test]
	fn default_words_work() {
		assert_eq!(text("4 sqrt"), "2\n");
		let r: f64 = text("pi sqrt").trim_end().parse().unwrap();
		assert!((r - PI.sqrt()).abs() < 1e-15);
		assert_eq!(text("= pi"), "deleted word: pi\n");
	}

	#[test]
	fn divide_by_zero_restores_operands() {
		let mut e = calc();
		let err = e.evaluate("1 0 /").unwrap_err();
		assert_eq!(err, CalcError::Domain("cannot divide by 0"));
		assert_eq!(e.stack().values(), &[1.0, 0.0]);
		let err = e.evaluate("%").unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Domain);
		assert_eq!(e.stack().values(), &[1.0, 0.0]);
	}

	#[test]
	fn log_of_non_positive_restores_operand() {
		for program in ["-1 log", "-1 ln"] {
			let mut e = calc();
			let err = e.evaluate(program).unwrap_err();
			assert_eq!(err.to_string(), "operation error: cannot take logarithm of non-positive number");
			assert_eq!(e.stack().values(), &[-1.0]);
		}
	}

	#[test]
	fn power_domain() {
		let mut e = calc();
		assert_eq!(e.evaluate("0 -1 ^").unwrap_err(), CalcError::Domain("cannot raise 0 to negative power"));
		assert_eq!(e.stack().values(), &[0.0, -1.0]);
		e.evaluate("clr").unwrap();
		assert_eq!(e.evaluate("-8 0.5 ^").unwrap_err(), CalcError::Domain("cannot raise negative number to non-integer power"));
		assert_eq!(e.stack().values(), &[-8.0, 0.5]);
	}

	#[test]
	fn factorial_domain() {
		let mut e = calc();
		assert_eq!(e.evaluate("2.5 !").unwrap_err(), CalcError::Domain("cannot take factorial of non-integer"));
		assert_eq!(e.evaluate("clr -3 !").unwrap_err(), CalcError::Domain("cannot take factorial of negative number"));
		assert_eq!(e.stack().values(), &[-3.0]);
	}

	#[test]
	fn rounding() {
		assert_eq!(text("3.14159 2 round"), "3.14\n");
		assert_eq!(text("2.5 0 round"), "3\n");
		let mut e = calc();
		assert_eq!(e.evaluate("1.25 -1 round").unwrap_err(), CalcError::Domain("precision must be non-negative integer"));
		assert_eq!(e.stack().values(), &[1.25, -1.0]);
		assert!(e.evaluate("clr 1.25 0.5 round").is_err());
		assert_eq!(e.stack().values(), &[1.25, 0.5]);
	}

	#[test]
	fn underflow_leaves_stack_alone() {
		let mut e = calc();
		e.evaluate("7").unwrap();
		for tok in ["+", "-", "swap", "froll", "round"] {
			let err = e.evaluate(tok).unwrap_err();
			assert_eq!(err, CalcError::Arity {token: tok.into(), needs: Values(2)});
			assert_eq!(e.stack().values(), &[7.0]);
		}
		let err = calc().evaluate("log").unwrap_err();
		assert_eq!(err.to_string(), "operation error: 'log' needs 1 value in stack");
		assert_eq!(calc().evaluate("+").unwrap_err().to_string(), "operation error: '+' needs 2 values in stack");
	}

	#[test]
	fn stack_manipulation() {
		assert_eq!(text("1 2 swap"), "2 1\n");
		assert_eq!(text("1 2 3 froll"), "3 1 2\n");
		assert_eq!(text("1 2 3 rroll"), "2 3 1\n");
		assert_eq!(text("1 2 3 ,"), "1 2\n");
		assert_eq!(text("1 2 3 4 sum"), "10\n");
		assert_eq!(text("1 2 3 4 avg"), "2.5\n");
		assert_eq!(text("1 2 3 clr"), "cleared 3 values\n");
		assert_eq!(text("1 clr"), "cleared 1 value\n");
		assert_eq!(text("clr"), "cleared 0 values\n");
	}

	#[test]
	fn stash_and_pull() {
		let mut e = calc();
		assert_eq!(e.evaluate("1 5 stash").unwrap().text(), "1\n");
		assert_eq!(e.stack().stash, 5.0);
		assert_eq!(e.evaluate("pull pull").unwrap().text(), "1 5 5\n");
	}

	#[test]
	fn display_forced_when_hidden() {
		let mut e = Engine::with_defaults(EngineConfig {display: crate::DisplayMode::Hidden, ..EngineConfig::default()});
		assert_eq!(e.evaluate("1 2").unwrap().text(), "");
		assert_eq!(e.evaluate(".").unwrap().text(), "[ 1 2 ]\n");
	}

	#[test]
	fn display_bracketed_in_script_mode() {
		let mut e = calc();
		assert_eq!(e.evaluate("1 2").unwrap().text(), "1 2\n");
		assert_eq!(e.evaluate(".").unwrap().text(), "[ 1 2 ]\n");
		assert_eq!(text("3 4 ."), "[ 3 4 ]\n");
	}

	#[test]
	fn random_is_seedable() {
		let mut a = calc().with_rng(StdRng::seed_from_u64(43615));
		let mut b = calc().with_rng(StdRng::seed_from_u64(43615));
		assert_eq!(a.evaluate("rand rand").unwrap(), b.evaluate("rand rand").unwrap());
		let r = a.stack().values()[0];
		assert!((0.0..1.0).contains(&r));
		let n = text("10 randn").trim_end().parse::<f64>().unwrap();
		assert!((0.0..10.0).contains(&n) && n.fract()==0.0);
	}

	#[test]
	fn listings() {
		let h = text("help");
		assert!(h.starts_with("operator | description\n"));
		assert!(h.contains("     + : pop 'a', 'b'; push the result of 'a' + 'b'\n"));
		assert_eq!(text("?"), h);
		let w = text("words");
		assert!(w.starts_with(" word | definition\n"));
		assert!(w.contains(" sqrt : 0.5 ^\n"));
	}

	#[test]
	fn net_overflow() {
		let mut e = Engine::with_defaults(EngineConfig {capacity: Capacity::Fixed(1), ..EngineConfig::default()});
		e.evaluate("3").unwrap();
		assert_eq!(e.evaluate("rand").unwrap_err(), CalcError::Overflow {token: "rand".into()});
		assert_eq!(e.evaluate("!").unwrap().text(), "6\n");
	}
}
