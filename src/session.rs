use std::io::{BufRead, Write};
use crate::{Engine, Reply};

///Bundle of generic IO streams, for brevity.
pub struct IOTriple<'a> {
	pub input: &'a mut dyn BufRead,
	pub output: &'a mut dyn Write,
	pub error: &'a mut dyn Write
}
#[macro_export]
///Default IO triple using stdin, stdout, stderr
macro_rules! stdio {
	() => {
		$crate::session::IOTriple {
			input: &mut ::std::io::BufReader::new(::std::io::stdin()),
			output: &mut ::std::io::stdout(),
			error: &mut ::std::io::stderr()
		}
	}
}

///Evaluates every line of `io.input` on `engine`.
///
///Replies go to `io.output`, error messages (one per line) to `io.error`.
///A failing line does not stop the script, `quit` does.
///
///Returns whether the session was ended by `quit`.
///Terminates with `Err` only if a read/write on an IO stream fails.
pub fn run_script(engine: &mut Engine, io: &mut IOTriple) -> std::io::Result<bool> {
	let mut line = String::new();
	loop {
		line.clear();
		if io.input.read_line(&mut line)? == 0 {return Ok(false);}
		match engine.evaluate(line.trim_end_matches(['\n', '\r'])) {
			Ok(Reply::Text(t)) => {write!(io.output, "{t}")?;}
			Ok(Reply::Quit) => {return Ok(true);}
			Err(e) => {writeln!(io.error, "{e}")?;}
		}
	}
}

///Evaluates each program in order, like positional command line arguments.
///
///Errors are reported as they happen, only the reply of the last program is printed.
///Returns whether the session was ended by `quit`.
pub fn run_programs<S: AsRef<str>>(engine: &mut Engine, programs: &[S], output: &mut dyn Write, error: &mut dyn Write) -> std::io::Result<bool> {
	let mut last = String::new();
	for prog in programs {
		match engine.evaluate(prog.as_ref()) {
			Ok(Reply::Text(t)) => {last = t;}
			Ok(Reply::Quit) => {
				write!(output, "{last}")?;
				return Ok(true);
			}
			Err(e) => {
				last.clear();
				writeln!(error, "{e}")?;
			}
		}
	}
	write!(output, "{last}")?;
	Ok(false)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::EngineConfig;

	#[test]
	fn script_reports_errors_and_keeps_going() {
		let mut e = Engine::with_defaults(EngineConfig::default());
		let mut input: &[u8] = b"1 2 +\n+ +\n= dbl 2 *\n3 dbl\n";
		let (mut out, mut err) = (Vec::new(), Vec::new());
		let quit = run_script(&mut e, &mut IOTriple {input: &mut input, output: &mut out, error: &mut err}).unwrap();
		assert!(!quit);
		assert_eq!(String::from_utf8(out).unwrap(), "3\ndefined dbl : 2 *\n3 6\n");
		assert_eq!(String::from_utf8(err).unwrap(), "operation error: '+' needs 2 values in stack\n");
	}

	#[test]
	fn script_stops_on_quit() {
		let mut e = Engine::with_defaults(EngineConfig::default());
		let mut input: &[u8] = b"1\nquit\n2\n";
		let (mut out, mut err) = (Vec::new(), Vec::new());
		let quit = run_script(&mut e, &mut IOTriple {input: &mut input, output: &mut out, error: &mut err}).unwrap();
		assert!(quit);
		assert_eq!(out, b"1\n");
		assert_eq!(e.stack().values(), &[1.0]);
	}

	#[test]
	fn programs_print_last_reply() {
		let mut e = Engine::with_defaults(EngineConfig::default());
		let (mut out, mut err) = (Vec::new(), Vec::new());
		run_programs(&mut e, &["2 2 +", "1 0 /", "3 *"], &mut out, &mut err).unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), "4 1 0\n");
		assert_eq!(String::from_utf8(err).unwrap(), "operation error: cannot divide by 0\n");
	}
}
